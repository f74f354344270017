pub mod actions;
pub mod catalog;
pub mod disclosure;
pub mod mount_gate;
pub mod navigation;
pub mod persistence;
pub mod reducer;
pub mod state;
pub mod theme;

pub use actions::*;
pub use catalog::*;
pub use disclosure::*;
pub use mount_gate::*;
pub use navigation::*;
pub use persistence::*;
pub use reducer::*;
pub use state::*;
pub use theme::*;

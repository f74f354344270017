pub mod environment;
pub mod listeners;
pub mod runtime;

pub use environment::*;
pub use listeners::*;
pub use runtime::*;

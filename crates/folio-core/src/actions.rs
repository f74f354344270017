use super::navigation::Location;
use super::theme::ThemePreference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteAction {
    User(UserAction),
    Host(HostAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Char(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    ToggleMenu,
    PressKey(Key),
    Navigate(Location),
    SetThemePreference(ThemePreference),
    ToggleTheme,
    SetFilter(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// First scheduler turn after the initial render.
    Hydrated,
    ColorSchemeChanged(Option<bool>),
    NavigationCompleted(Location),
}

impl From<UserAction> for SiteAction {
    fn from(action: UserAction) -> Self {
        Self::User(action)
    }
}

impl From<HostAction> for SiteAction {
    fn from(action: HostAction) -> Self {
        Self::Host(action)
    }
}

use tracing::debug;

use super::actions::HostAction;
use super::actions::Key;
use super::actions::SiteAction;
use super::actions::UserAction;
use super::disclosure::ListenerChange;
use super::navigation::Location;
use super::state::SiteState;
use super::theme::EffectiveTheme;
use super::theme::ThemePreference;
use super::theme::ThemeSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteEffect {
    RequestFrame,
    PersistThemePreference(ThemePreference),
    /// Root attribute downstream styling keys off.
    ApplyThemeAttribute(EffectiveTheme),
    AttachEscapeListener,
    DetachEscapeListener,
    NavigateTo(Location),
}

pub fn reduce(state: &mut SiteState, action: SiteAction) -> Vec<SiteEffect> {
    match action {
        SiteAction::User(user) => reduce_user(state, user),
        SiteAction::Host(host) => reduce_host(state, host),
    }
}

fn reduce_user(state: &mut SiteState, action: UserAction) -> Vec<SiteEffect> {
    match action {
        UserAction::ToggleMenu => {
            let change = state.menu.toggle();
            vec![listener_effect(change), SiteEffect::RequestFrame]
        }
        UserAction::PressKey(Key::Escape) => match state.menu.escape() {
            Some(change) => vec![listener_effect(change), SiteEffect::RequestFrame],
            None => Vec::new(),
        },
        UserAction::PressKey(_) => Vec::new(),
        UserAction::Navigate(location) => vec![SiteEffect::NavigateTo(location)],
        UserAction::SetFilter(filter) => vec![SiteEffect::NavigateTo(Location::projects(filter))],
        UserAction::SetThemePreference(preference) => set_preference(state, preference),
        UserAction::ToggleTheme => {
            // The placeholder toggle is inert until hydration.
            if !state.mount.is_ready() {
                return Vec::new();
            }
            let target = state.theme.toggle_target();
            set_preference(state, target)
        }
    }
}

fn reduce_host(state: &mut SiteState, action: HostAction) -> Vec<SiteEffect> {
    match action {
        HostAction::Hydrated => {
            if state.mount.mark_ready() {
                debug!("surface hydrated");
                vec![SiteEffect::RequestFrame]
            } else {
                Vec::new()
            }
        }
        HostAction::ColorSchemeChanged(prefers_dark) => {
            if state.theme.observe_color_scheme(prefers_dark) {
                vec![
                    SiteEffect::ApplyThemeAttribute(state.theme.effective()),
                    SiteEffect::RequestFrame,
                ]
            } else {
                Vec::new()
            }
        }
        HostAction::NavigationCompleted(location) => {
            state.location = location;
            let mut effects = Vec::new();
            if let Some(change) = state.menu.navigation_completed() {
                effects.push(listener_effect(change));
            }
            effects.push(SiteEffect::RequestFrame);
            effects
        }
    }
}

fn set_preference(state: &mut SiteState, preference: ThemePreference) -> Vec<SiteEffect> {
    let before = state.theme.effective();
    state.theme.set_preference(preference);
    let after = state.theme.effective();

    let mut effects = vec![SiteEffect::PersistThemePreference(preference)];
    if before != after {
        effects.push(SiteEffect::ApplyThemeAttribute(after));
    }
    effects.push(SiteEffect::RequestFrame);
    effects
}

fn listener_effect(change: ListenerChange) -> SiteEffect {
    match change {
        ListenerChange::Attach => SiteEffect::AttachEscapeListener,
        ListenerChange::Detach => SiteEffect::DetachEscapeListener,
    }
}

#[cfg(test)]
mod tests;

use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::SiteEffect;
pub(super) use crate::actions::HostAction;
pub(super) use crate::actions::Key;
pub(super) use crate::actions::SiteAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::catalog::project;
pub(super) use crate::catalog::Catalog;
pub(super) use crate::catalog::ProjectStatus;
pub(super) use crate::disclosure::DisclosureState;
pub(super) use crate::mount_gate::MountPhase;
pub(super) use crate::navigation::Location;
pub(super) use crate::navigation::Route;
pub(super) use crate::state::SiteState;
pub(super) use crate::theme::EffectiveTheme;
pub(super) use crate::theme::ThemePreference;
pub(super) use crate::theme::ThemeResolver;
pub(super) use crate::theme::ThemeSource;

mod hydration;
mod theme_sync;

fn catalog() -> Catalog {
    Catalog::new(vec![
        project(1, &["Data Visualization", "Psychology"], ProjectStatus::Completed),
        project(2, &["AI/ML", "Education"], ProjectStatus::InProgress),
        project(3, &["Behavioral Science", "Psychology"], ProjectStatus::Planning),
        project(4, &["Algorithms", "Education"], ProjectStatus::InProgress),
        project(5, &["Mobile", "Psychology"], ProjectStatus::Completed),
        project(6, &["Gamification", "Education"], ProjectStatus::Planning),
    ])
    .expect("catalog")
}

fn state() -> SiteState {
    state_with_theme(ThemePreference::System, Some(false))
}

fn state_with_theme(preference: ThemePreference, prefers_dark: Option<bool>) -> SiteState {
    SiteState::new(
        catalog(),
        ThemeResolver::new(preference, prefers_dark),
        Location::default(),
    )
}

fn user(state: &mut SiteState, action: UserAction) -> Vec<SiteEffect> {
    reduce(state, SiteAction::User(action))
}

fn host(state: &mut SiteState, action: HostAction) -> Vec<SiteEffect> {
    reduce(state, SiteAction::Host(action))
}

fn hydrate(state: &mut SiteState) {
    let effects = host(state, HostAction::Hydrated);
    assert_eq!(effects, vec![SiteEffect::RequestFrame]);
}

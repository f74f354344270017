use super::*;
use pretty_assertions::assert_eq;

#[test]
fn hydration_transitions_once() {
    let mut state = state();
    assert_eq!(state.mount.phase(), MountPhase::Pending);

    hydrate(&mut state);
    assert_eq!(state.mount.phase(), MountPhase::Ready);

    let effects = host(&mut state, HostAction::Hydrated);
    assert!(effects.is_empty());
    assert_eq!(state.mount.phase(), MountPhase::Ready);
}

#[test]
fn toggle_theme_is_inert_before_hydration() {
    let mut state = state_with_theme(ThemePreference::Light, None);
    let effects = user(&mut state, UserAction::ToggleTheme);
    assert!(effects.is_empty());
    assert_eq!(state.theme.preference(), ThemePreference::Light);
}

#[test]
fn toggle_theme_after_hydration_flips_effective_theme() {
    let mut state = state_with_theme(ThemePreference::System, Some(true));
    hydrate(&mut state);

    let effects = user(&mut state, UserAction::ToggleTheme);
    assert_eq!(state.theme.preference(), ThemePreference::Light);
    assert_eq!(
        effects,
        vec![
            SiteEffect::PersistThemePreference(ThemePreference::Light),
            SiteEffect::ApplyThemeAttribute(EffectiveTheme::Light),
            SiteEffect::RequestFrame,
        ]
    );

    user(&mut state, UserAction::ToggleTheme);
    assert_eq!(state.theme.preference(), ThemePreference::Dark);
}

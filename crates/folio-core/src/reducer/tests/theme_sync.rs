use super::*;
use pretty_assertions::assert_eq;

#[test]
fn set_preference_persists_every_choice() {
    let mut state = state();
    let effects = user(&mut state, UserAction::SetThemePreference(ThemePreference::Dark));
    assert_eq!(
        effects,
        vec![
            SiteEffect::PersistThemePreference(ThemePreference::Dark),
            SiteEffect::ApplyThemeAttribute(EffectiveTheme::Dark),
            SiteEffect::RequestFrame,
        ]
    );
    assert_eq!(state.theme.preference(), ThemePreference::Dark);

    let effects = user(&mut state, UserAction::SetThemePreference(ThemePreference::Dark));
    assert_eq!(
        effects,
        vec![
            SiteEffect::PersistThemePreference(ThemePreference::Dark),
            SiteEffect::RequestFrame,
        ]
    );
}

#[test]
fn system_preference_follows_signal_flip_without_user_action() {
    let mut state = state_with_theme(ThemePreference::System, Some(false));
    hydrate(&mut state);
    assert_eq!(state.theme.effective(), EffectiveTheme::Light);

    let effects = host(&mut state, HostAction::ColorSchemeChanged(Some(true)));
    assert_eq!(state.theme.effective(), EffectiveTheme::Dark);
    assert_eq!(
        effects,
        vec![
            SiteEffect::ApplyThemeAttribute(EffectiveTheme::Dark),
            SiteEffect::RequestFrame,
        ]
    );
}

#[test]
fn explicit_preference_ignores_signal_flip() {
    let mut state = state_with_theme(ThemePreference::Light, Some(false));
    let effects = host(&mut state, HostAction::ColorSchemeChanged(Some(true)));
    assert!(effects.is_empty());
    assert_eq!(state.theme.effective(), EffectiveTheme::Light);

    user(&mut state, UserAction::SetThemePreference(ThemePreference::System));
    assert_eq!(state.theme.effective(), EffectiveTheme::Dark);
}

#[test]
fn lost_signal_falls_back_to_light() {
    let mut state = state_with_theme(ThemePreference::System, Some(true));
    let effects = host(&mut state, HostAction::ColorSchemeChanged(None));
    assert_eq!(state.theme.effective(), EffectiveTheme::Light);
    assert_eq!(effects[0], SiteEffect::ApplyThemeAttribute(EffectiveTheme::Light));
}

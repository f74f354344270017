use folio_core::actions::Key;
use folio_core::actions::UserAction;
use folio_core::catalog::Catalog;
use folio_core::disclosure::DisclosureState;
use folio_core::mount_gate::theme_toggle_view;
use folio_core::mount_gate::MountPhase;
use folio_core::mount_gate::ToggleView;
use folio_core::navigation::Location;
use folio_core::navigation::Route;
use folio_core::persistence::FilePreferenceStore;
use folio_core::persistence::MemoryStore;
use folio_core::persistence::PreferenceStore;
use folio_core::theme::EffectiveTheme;
use folio_core::theme::ThemePreference;
use folio_core::theme::ThemeSource;
use folio_core::theme::THEME_STORAGE_KEY;
use folio_host::ColorSchemeMedia;
use folio_host::KeyListenerRegistry;
use folio_host::SiteRuntime;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn mount<S: PreferenceStore>(store: S, media: &ColorSchemeMedia) -> SiteRuntime<S> {
    SiteRuntime::mount(
        store,
        media,
        KeyListenerRegistry::new(),
        Catalog::portfolio().expect("catalog"),
        Location::default(),
    )
}

fn first_paint<S: PreferenceStore>(runtime: &mut SiteRuntime<S>) {
    let phase = runtime.render(|state| state.mount.phase());
    assert_eq!(phase, MountPhase::Pending);
    runtime.pump();
}

#[test]
fn hydration_completes_on_the_turn_after_first_render() {
    let media = ColorSchemeMedia::new(Some(true));
    let mut runtime = mount(MemoryStore::new(), &media);

    runtime.pump();
    assert_eq!(runtime.state().mount.phase(), MountPhase::Pending);

    let toggle = runtime.render(|state| theme_toggle_view(&state.mount, &state.theme));
    assert!(matches!(toggle, ToggleView::Placeholder { .. }));
    assert_eq!(runtime.state().mount.phase(), MountPhase::Pending);

    runtime.pump();
    assert_eq!(runtime.state().mount.phase(), MountPhase::Ready);
    assert!(runtime.take_frame_request());

    let toggle = runtime.render(|state| theme_toggle_view(&state.mount, &state.theme));
    assert!(matches!(
        toggle,
        ToggleView::Ready {
            effective: EffectiveTheme::Dark,
            ..
        }
    ));

    runtime.render(|_| ());
    runtime.pump();
    assert!(!runtime.take_frame_request());
}

#[test]
fn escape_listener_lives_exactly_while_open() {
    let media = ColorSchemeMedia::new(None);
    let mut runtime = mount(MemoryStore::new(), &media);
    first_paint(&mut runtime);

    for _ in 0..25 {
        runtime.dispatch(UserAction::ToggleMenu.into());
        assert_eq!(runtime.keys().active(), 1);
        runtime.dispatch(UserAction::ToggleMenu.into());
        assert_eq!(runtime.keys().active(), 0);

        runtime.dispatch(UserAction::ToggleMenu.into());
        runtime.key_down(Key::Escape);
        assert_eq!(runtime.state().menu.state(), DisclosureState::Closed);
        assert_eq!(runtime.keys().active(), 0);
    }
}

#[test]
fn escape_while_closed_reaches_no_listener() {
    let media = ColorSchemeMedia::new(None);
    let mut runtime = mount(MemoryStore::new(), &media);
    first_paint(&mut runtime);
    runtime.take_frame_request();

    runtime.key_down(Key::Escape);
    assert_eq!(runtime.state().menu.state(), DisclosureState::Closed);
    assert!(!runtime.escape_listener_attached());
    assert!(!runtime.take_frame_request());
}

#[test]
fn unmount_while_open_detaches_listener() {
    let media = ColorSchemeMedia::new(None);
    let mut runtime = mount(MemoryStore::new(), &media);
    runtime.dispatch(UserAction::ToggleMenu.into());
    let keys = runtime.keys().clone();
    assert_eq!(keys.active(), 1);

    drop(runtime);
    assert_eq!(keys.active(), 0);
}

#[test]
fn navigation_closes_menu_and_moves_location() {
    let media = ColorSchemeMedia::new(None);
    let mut runtime = mount(MemoryStore::new(), &media);
    first_paint(&mut runtime);
    runtime.dispatch(UserAction::ToggleMenu.into());

    let target = Location::parse("/projects?filter=Psychology").expect("location");
    runtime.dispatch(UserAction::Navigate(target).into());

    assert_eq!(runtime.state().location.route, Route::Projects);
    assert_eq!(runtime.state().menu.state(), DisclosureState::Closed);
    assert_eq!(runtime.keys().active(), 0);
    let titles: Vec<String> = runtime
        .state()
        .visible_projects()
        .iter()
        .map(|project| project.title.clone())
        .collect();
    assert_eq!(
        titles,
        vec!["EduAnalytics Dashboard", "Cognitive Load Tracker"]
    );
}

#[test]
fn system_theme_tracks_media_changes() {
    let media = ColorSchemeMedia::new(Some(false));
    let mut runtime = mount(MemoryStore::new(), &media);
    first_paint(&mut runtime);
    assert_eq!(runtime.state().theme.preference(), ThemePreference::System);
    assert_eq!(runtime.root_theme(), EffectiveTheme::Light);

    media.set_prefers_dark(Some(true));
    runtime.pump();
    assert_eq!(runtime.state().theme.effective(), EffectiveTheme::Dark);
    assert_eq!(runtime.root_theme(), EffectiveTheme::Dark);
}

#[test]
fn preference_survives_a_reload() {
    let dir = tempdir().expect("tmpdir");
    let media = ColorSchemeMedia::new(Some(false));

    let store = FilePreferenceStore::open(dir.path()).expect("open");
    let mut runtime = mount(store, &media);
    first_paint(&mut runtime);
    runtime.dispatch(UserAction::SetThemePreference(ThemePreference::Dark).into());
    assert_eq!(runtime.state().theme.preference(), ThemePreference::Dark);
    assert_eq!(
        runtime
            .store()
            .read(THEME_STORAGE_KEY)
            .expect("read")
            .as_deref(),
        Some("dark")
    );
    drop(runtime);

    let store = FilePreferenceStore::open(dir.path()).expect("reopen");
    let runtime = mount(store, &media);
    assert_eq!(runtime.state().theme.preference(), ThemePreference::Dark);
    assert_eq!(runtime.root_theme(), EffectiveTheme::Dark);
}

#[test]
fn blocked_storage_keeps_session_preference() {
    let media = ColorSchemeMedia::new(Some(true));
    let mut runtime = mount(MemoryStore::blocked(), &media);
    assert_eq!(runtime.state().theme.preference(), ThemePreference::System);
    first_paint(&mut runtime);

    runtime.dispatch(UserAction::ToggleTheme.into());
    assert_eq!(runtime.state().theme.preference(), ThemePreference::Light);
    assert_eq!(runtime.root_theme(), EffectiveTheme::Light);
}

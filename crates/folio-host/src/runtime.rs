use std::collections::VecDeque;

use folio_core::actions::HostAction;
use folio_core::actions::Key;
use folio_core::actions::SiteAction;
use folio_core::actions::UserAction;
use folio_core::catalog::Catalog;
use folio_core::navigation::Location;
use folio_core::persistence::PreferenceStore;
use folio_core::reducer::reduce;
use folio_core::reducer::SiteEffect;
use folio_core::state::SiteState;
use folio_core::theme::persist_preference;
use folio_core::theme::EffectiveTheme;
use folio_core::theme::ThemeResolver;
use folio_core::theme::ThemeSource;
use tracing::debug;
use tracing::info;

use crate::environment::ColorSchemeMedia;
use crate::environment::ColorSchemeSubscription;
use crate::listeners::KeyListenerRegistry;
use crate::listeners::ListenerGuard;

/// Drives one page surface: owns its state and executes reducer effects
/// against the host (storage, key listeners, color-scheme subscription and
/// the microtask queue that completes hydration).
#[derive(Debug)]
pub struct SiteRuntime<S: PreferenceStore> {
    state: SiteState,
    store: S,
    keys: KeyListenerRegistry,
    escape_listener: Option<ListenerGuard>,
    color_scheme: ColorSchemeSubscription,
    microtasks: VecDeque<HostAction>,
    root_theme: EffectiveTheme,
    rendered: bool,
    frame_requested: bool,
}

impl<S: PreferenceStore> SiteRuntime<S> {
    pub fn mount(
        store: S,
        media: &ColorSchemeMedia,
        keys: KeyListenerRegistry,
        catalog: Catalog,
        location: Location,
    ) -> Self {
        let theme = ThemeResolver::restore(&store, media.prefers_dark());
        let root_theme = theme.effective();
        info!(
            preference = theme.preference().as_str(),
            root_theme = root_theme.as_str(),
            path = %location.href(),
            "surface mounted"
        );
        Self {
            state: SiteState::new(catalog, theme, location),
            store,
            keys,
            escape_listener: None,
            color_scheme: media.subscribe(),
            microtasks: VecDeque::new(),
            root_theme,
            rendered: false,
            frame_requested: true,
        }
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &KeyListenerRegistry {
        &self.keys
    }

    /// Theme attribute currently applied at the document root.
    pub fn root_theme(&self) -> EffectiveTheme {
        self.root_theme
    }

    pub fn escape_listener_attached(&self) -> bool {
        self.escape_listener.is_some()
    }

    /// Renders the surface. The first render queues hydration for the next turn.
    pub fn render<V>(&mut self, view: impl FnOnce(&SiteState) -> V) -> V {
        self.frame_requested = false;
        let output = view(&self.state);
        if !self.rendered {
            self.rendered = true;
            self.microtasks.push_back(HostAction::Hydrated);
        }
        output
    }

    /// Runs one scheduler turn: pending notifications, then queued microtasks.
    pub fn pump(&mut self) {
        for prefers_dark in self.color_scheme.drain() {
            self.dispatch(HostAction::ColorSchemeChanged(prefers_dark).into());
        }
        while let Some(task) = self.microtasks.pop_front() {
            self.dispatch(task.into());
        }
    }

    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Feeds a key from the global key stream to whatever listeners are attached.
    pub fn key_down(&mut self, key: Key) {
        for action in self.keys.dispatch(&key) {
            self.dispatch(action);
        }
    }

    pub fn dispatch(&mut self, action: SiteAction) {
        let effects = reduce(&mut self.state, action);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: SiteEffect) {
        match effect {
            SiteEffect::RequestFrame => self.frame_requested = true,
            SiteEffect::PersistThemePreference(preference) => {
                persist_preference(&mut self.store, preference);
            }
            SiteEffect::ApplyThemeAttribute(theme) => {
                debug!(theme = theme.as_str(), "root theme attribute applied");
                self.root_theme = theme;
            }
            SiteEffect::AttachEscapeListener => {
                if self.escape_listener.is_none() {
                    self.escape_listener = Some(self.keys.attach(Box::new(escape_to_action)));
                }
            }
            SiteEffect::DetachEscapeListener => {
                self.escape_listener = None;
            }
            SiteEffect::NavigateTo(location) => {
                debug!(path = %location.href(), "navigation completed");
                self.dispatch(HostAction::NavigationCompleted(location).into());
            }
        }
    }
}

fn escape_to_action(key: &Key) -> Option<SiteAction> {
    matches!(key, Key::Escape).then_some(UserAction::PressKey(Key::Escape).into())
}

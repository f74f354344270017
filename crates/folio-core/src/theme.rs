//! Theme preference and effective theme resolution.
//!
//! The preference is what the visitor chose (or `System`); the effective
//! theme is what gets applied. `System` is resolved against the latest
//! color-scheme signal each time it is read.

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use super::persistence::PreferenceStore;

/// Storage key for the persisted preference.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveTheme {
    Light,
    Dark,
}

impl EffectiveTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Effective theme for a color-scheme signal; an unavailable signal is light.
    pub fn from_signal(prefers_dark: Option<bool>) -> Self {
        match prefers_dark {
            Some(true) => Self::Dark,
            Some(false) | None => Self::Light,
        }
    }
}

impl From<EffectiveTheme> for ThemePreference {
    fn from(theme: EffectiveTheme) -> Self {
        match theme {
            EffectiveTheme::Light => Self::Light,
            EffectiveTheme::Dark => Self::Dark,
        }
    }
}

/// Read side of the resolver, as seen by views.
pub trait ThemeSource {
    fn preference(&self) -> ThemePreference;
    fn effective(&self) -> EffectiveTheme;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeResolver {
    preference: ThemePreference,
    prefers_dark: Option<bool>,
}

impl ThemeResolver {
    pub fn new(preference: ThemePreference, prefers_dark: Option<bool>) -> Self {
        Self {
            preference,
            prefers_dark,
        }
    }

    /// Restores the persisted preference; anything unreadable falls back to `System`.
    pub fn restore(store: &dyn PreferenceStore, prefers_dark: Option<bool>) -> Self {
        Self::new(load_preference(store), prefers_dark)
    }

    pub fn set_preference(&mut self, preference: ThemePreference) {
        self.preference = preference;
    }

    /// Records a color-scheme change notification. Returns whether the
    /// effective theme moved.
    pub fn observe_color_scheme(&mut self, prefers_dark: Option<bool>) -> bool {
        let before = self.effective();
        self.prefers_dark = prefers_dark;
        before != self.effective()
    }

    pub fn prefers_dark(&self) -> Option<bool> {
        self.prefers_dark
    }

    /// Preference the toggle control switches to. Flips the effective theme,
    /// not the stored preference, so under `System` with a dark environment
    /// the toggle goes to `Light` rather than `Dark`.
    pub fn toggle_target(&self) -> ThemePreference {
        self.effective().toggled().into()
    }
}

impl ThemeSource for ThemeResolver {
    fn preference(&self) -> ThemePreference {
        self.preference
    }

    fn effective(&self) -> EffectiveTheme {
        match self.preference {
            ThemePreference::Light => EffectiveTheme::Light,
            ThemePreference::Dark => EffectiveTheme::Dark,
            ThemePreference::System => EffectiveTheme::from_signal(self.prefers_dark),
        }
    }
}

pub fn load_preference(store: &dyn PreferenceStore) -> ThemePreference {
    match store.read(THEME_STORAGE_KEY) {
        Ok(Some(value)) => ThemePreference::parse(value.as_str()).unwrap_or_else(|| {
            warn!(value = %value, "unrecognized theme preference, using system");
            ThemePreference::System
        }),
        Ok(None) => ThemePreference::System,
        Err(err) => {
            warn!(error = %err, "theme preference unavailable, using system");
            ThemePreference::System
        }
    }
}

/// Persists the preference. Storage failures are logged and otherwise ignored.
pub fn persist_preference(store: &mut dyn PreferenceStore, preference: ThemePreference) {
    match store.write(THEME_STORAGE_KEY, preference.as_str()) {
        Ok(()) => debug!(preference = preference.as_str(), "theme preference persisted"),
        Err(err) => warn!(error = %err, "theme preference not persisted"),
    }
}

//! Host color-scheme signal.
//!
//! Mirrors a `prefers-color-scheme: dark` media query: a current value plus
//! change notifications delivered to every live subscription.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use tracing::debug;

pub const COLOR_SCHEME_ENV: &str = "FOLIO_COLOR_SCHEME";

#[derive(Default)]
struct Media {
    prefers_dark: Option<bool>,
    subscribers: Vec<mpsc::Sender<Option<bool>>>,
}

#[derive(Clone, Default)]
pub struct ColorSchemeMedia {
    inner: Rc<RefCell<Media>>,
}

impl std::fmt::Debug for ColorSchemeMedia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let media = self.inner.borrow();
        f.debug_struct("ColorSchemeMedia")
            .field("prefers_dark", &media.prefers_dark)
            .field("subscribers", &media.subscribers.len())
            .finish()
    }
}

impl ColorSchemeMedia {
    /// `None` means the host cannot report a color scheme.
    pub fn new(prefers_dark: Option<bool>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Media {
                prefers_dark,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn from_env() -> Self {
        Self::new(detect_prefers_dark(|name| std::env::var(name).ok()))
    }

    pub fn prefers_dark(&self) -> Option<bool> {
        self.inner.borrow().prefers_dark
    }

    pub fn subscribe(&self) -> ColorSchemeSubscription {
        let (tx, rx) = mpsc::channel();
        self.inner.borrow_mut().subscribers.push(tx);
        ColorSchemeSubscription { rx }
    }

    /// Updates the signal and notifies subscribers when it changed.
    pub fn set_prefers_dark(&self, prefers_dark: Option<bool>) {
        let mut media = self.inner.borrow_mut();
        if media.prefers_dark == prefers_dark {
            return;
        }
        media.prefers_dark = prefers_dark;
        media
            .subscribers
            .retain(|subscriber| subscriber.send(prefers_dark).is_ok());
        debug!(
            ?prefers_dark,
            subscribers = media.subscribers.len(),
            "color scheme changed"
        );
    }
}

#[derive(Debug)]
pub struct ColorSchemeSubscription {
    rx: mpsc::Receiver<Option<bool>>,
}

impl ColorSchemeSubscription {
    /// Pending notifications, oldest first.
    pub fn drain(&self) -> Vec<Option<bool>> {
        self.rx.try_iter().collect()
    }
}

/// Reads the terminal's color scheme: an explicit `FOLIO_COLOR_SCHEME`
/// (`dark`/`light`) wins, then the background index in `COLORFGBG`.
pub fn detect_prefers_dark(lookup: impl Fn(&str) -> Option<String>) -> Option<bool> {
    if let Some(value) = lookup(COLOR_SCHEME_ENV) {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => return Some(true),
            "light" => return Some(false),
            _ => {}
        }
    }
    let colorfgbg = lookup("COLORFGBG")?;
    let background = colorfgbg.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(matches!(background, 0..=6 | 8))
}

use super::theme::EffectiveTheme;
use super::theme::ThemePreference;
use super::theme::ThemeSource;

/// Toggle footprint; the placeholder occupies the same box.
pub const TOGGLE_WIDTH: u16 = 9;
pub const TOGGLE_HEIGHT: u16 = 9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MountPhase {
    #[default]
    Pending,
    Ready,
}

/// One-shot hydration guard. Starts pending and becomes ready once, after the
/// first render, when client-side signals are known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountGate {
    phase: MountPhase,
}

impl MountGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MountPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, MountPhase::Ready)
    }

    /// Returns `true` only for the transition itself.
    pub fn mark_ready(&mut self) -> bool {
        match self.phase {
            MountPhase::Pending => {
                self.phase = MountPhase::Ready;
                true
            }
            MountPhase::Ready => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleView {
    Placeholder {
        width: u16,
        height: u16,
        label: &'static str,
    },
    Ready {
        width: u16,
        height: u16,
        preference: ThemePreference,
        effective: EffectiveTheme,
        target: ThemePreference,
        aria_label: String,
    },
}

impl ToggleView {
    pub fn size(&self) -> (u16, u16) {
        match self {
            Self::Placeholder { width, height, .. } | Self::Ready { width, height, .. } => {
                (*width, *height)
            }
        }
    }
}

/// Theme toggle view model. The theme is not consulted while the gate is pending.
pub fn theme_toggle_view(gate: &MountGate, theme: &impl ThemeSource) -> ToggleView {
    if !gate.is_ready() {
        return ToggleView::Placeholder {
            width: TOGGLE_WIDTH,
            height: TOGGLE_HEIGHT,
            label: "Loading theme toggle",
        };
    }
    let effective = theme.effective();
    let target = effective.toggled();
    ToggleView::Ready {
        width: TOGGLE_WIDTH,
        height: TOGGLE_HEIGHT,
        preference: theme.preference(),
        effective,
        target: target.into(),
        aria_label: format!("Switch to {} mode", target.as_str()),
    }
}

//! Public types for the status controller.

use std::fmt;
use std::time::Duration;

use pubip_resolver::ResolutionOutcome;

/// What the indicator currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    /// No address known or the last lookup failed.
    #[default]
    Offline,
    /// A lookup is in flight.
    Refreshing,
    /// The last lookup succeeded.
    Online(String),
}

impl DisplayState {
    /// Returns the known address when online.
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Online(addr) => Some(addr),
            _ => None,
        }
    }

    /// Icon to render for this state.
    pub fn icon(&self) -> IconVariant {
        match self {
            Self::Offline => IconVariant::Offline,
            Self::Refreshing => IconVariant::Refreshing,
            Self::Online(_) => IconVariant::Online,
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => f.write_str("Offline"),
            Self::Refreshing => f.write_str("Refreshing..."),
            Self::Online(addr) => f.write_str(addr),
        }
    }
}

/// Indicator icon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconVariant {
    Offline,
    Refreshing,
    Online,
}

/// Inputs to the controller state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Fired once at process start.
    StartupRefresh,
    /// The user asked for a refresh from the menu.
    UserRefreshRequested,
    /// The host reported a network reachability change.
    ConnectivityChanged,
    /// The user toggled status text in the indicator.
    ToggleShowStatus,
    /// Result of the lookup started by the last refresh.
    ResolutionCompleted(ResolutionOutcome),
    /// Settle delay after a completed lookup elapsed.
    Settled,
}

/// Everything the presentation layer needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub state: DisplayState,
    /// Whether the address is rendered into the indicator title.
    pub show_status: bool,
}

impl StatusSnapshot {
    /// Derives the render payload. UI fields are never stored elsewhere.
    pub fn render(&self) -> RenderPayload {
        let display_label = if self.show_status {
            self.state.to_string()
        } else {
            String::new()
        };

        RenderPayload {
            display_label,
            icon_variant: self.state.icon(),
            clipboard_enabled: matches!(self.state, DisplayState::Online(_)),
            toggle_checked: self.show_status,
        }
    }
}

/// Render callback payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPayload {
    /// Indicator title text; empty when status text is hidden.
    pub display_label: String,
    pub icon_variant: IconVariant,
    /// Copy-to-clipboard is only offered when online.
    pub clipboard_enabled: bool,
    /// Checked state of the "show status" toggle.
    pub toggle_checked: bool,
}

/// Observer invoked on the control task for every observable change.
pub type Observer = Box<dyn Fn(&StatusSnapshot) + Send + Sync>;

/// Fixed delays applied by the controller.
#[derive(Debug, Clone)]
pub struct TimingConfig {
    /// Pause between entering Refreshing and invoking the resolver.
    pub refresh_delay: Duration,
    /// Pause after a completed lookup before connectivity changes are honored.
    pub settle_delay: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            refresh_delay: Duration::from_millis(800),
            settle_delay: Duration::from_secs(3),
        }
    }
}

//! Tray handle, events, and update types.
//!
//! The actual system tray implementation depends on platform crates that
//! need system libraries. This module defines the channel-based interface
//! the app core uses to talk to a tray backend, independent of the GUI.

use std::sync::mpsc;

use pubip_status::{RenderPayload, StatusSnapshot};
use tracing::trace;

use crate::menu::{MenuAction, MenuItem, MenuState};

/// Events emitted by the tray (or other host sources) to the app core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayEvent {
    /// User clicked a menu entry.
    Action(MenuAction),
    /// Host reported a network reachability change.
    ConnectivityChanged,
}

/// Updates sent from the app core to the tray.
#[derive(Debug, Clone)]
pub enum TrayUpdate {
    /// Re-render title, icon and menu.
    Render {
        payload: RenderPayload,
        menu: Vec<MenuItem>,
    },
    /// Request tray shutdown.
    Shutdown,
}

/// Handle for communicating with the system tray from the app core.
///
/// The tray event loop runs on the main thread and communicates via
/// channels. Cloning is cheap and every clone feeds the same tray.
#[derive(Clone)]
pub struct TrayHandle {
    app_name: String,
    update_tx: mpsc::Sender<TrayUpdate>,
}

impl TrayHandle {
    /// Creates a tray handle with its channel pair.
    ///
    /// Returns `(handle, event_sender, event_receiver, update_receiver)`.
    /// The event sender goes to the tray backend and any other host event
    /// source; the update receiver goes to the tray backend.
    pub fn new(
        app_name: &str,
    ) -> (
        Self,
        mpsc::Sender<TrayEvent>,
        mpsc::Receiver<TrayEvent>,
        mpsc::Receiver<TrayUpdate>,
    ) {
        let (update_tx, update_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = Self {
            app_name: app_name.into(),
            update_tx,
        };

        (handle, event_tx, event_rx, update_rx)
    }

    /// Pushes a re-render derived from the controller snapshot.
    pub fn render(&self, snapshot: &StatusSnapshot) {
        let menu = MenuState::from_snapshot(&self.app_name, snapshot).build_menu();
        let payload = snapshot.render();
        trace!(label = %payload.display_label, icon = ?payload.icon_variant, "tray render");
        let _ = self.update_tx.send(TrayUpdate::Render { payload, menu });
    }

    /// Requests the tray to shut down.
    pub fn shutdown(&self) {
        let _ = self.update_tx.send(TrayUpdate::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubip_status::{DisplayState, IconVariant};

    #[test]
    fn render_sends_payload_and_menu() {
        let (handle, _event_tx, _event_rx, update_rx) = TrayHandle::new("PubIP");

        handle.render(&StatusSnapshot {
            state: DisplayState::Online("1.2.3.4".into()),
            show_status: true,
        });

        match update_rx.try_recv().unwrap() {
            TrayUpdate::Render { payload, menu } => {
                assert_eq!(payload.display_label, "1.2.3.4");
                assert_eq!(payload.icon_variant, IconVariant::Online);
                assert_eq!(menu[0].label, "Online: 1.2.3.4");
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[test]
    fn events_flow_to_receiver() {
        let (_handle, event_tx, event_rx, _update_rx) = TrayHandle::new("PubIP");

        assert!(event_rx.try_recv().is_err());

        event_tx.send(TrayEvent::Action(MenuAction::Refresh)).unwrap();
        event_tx.send(TrayEvent::ConnectivityChanged).unwrap();

        assert_eq!(
            event_rx.try_recv().unwrap(),
            TrayEvent::Action(MenuAction::Refresh)
        );
        assert_eq!(event_rx.try_recv().unwrap(), TrayEvent::ConnectivityChanged);
    }

    #[test]
    fn shutdown_sends_update() {
        let (handle, _event_tx, _event_rx, update_rx) = TrayHandle::new("PubIP");

        handle.shutdown();
        assert!(matches!(update_rx.recv().unwrap(), TrayUpdate::Shutdown));
    }

    #[test]
    fn render_after_backend_gone_is_silent() {
        let (handle, _event_tx, _event_rx, update_rx) = TrayHandle::new("PubIP");
        drop(update_rx);

        handle.render(&StatusSnapshot {
            state: DisplayState::Offline,
            show_status: true,
        });
        handle.shutdown();
    }
}

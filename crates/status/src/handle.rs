//! Cloneable handle the presentation layer uses to drive the controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};

use crate::controller::Message;
use crate::types::{Event, Observer, StatusSnapshot};

/// Errors returned by [`StatusHandle`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("status controller has stopped")]
    Closed,
}

/// Handle to a running [`crate::StatusController`].
///
/// Commands are queued and never block; reads come from the last
/// snapshot the controller published.
#[derive(Clone)]
pub struct StatusHandle {
    tx: mpsc::UnboundedSender<Message>,
    snapshot_rx: watch::Receiver<StatusSnapshot>,
    initialized: Arc<AtomicBool>,
}

impl StatusHandle {
    pub(crate) fn new(
        tx: mpsc::UnboundedSender<Message>,
        snapshot_rx: watch::Receiver<StatusSnapshot>,
        initialized: Arc<AtomicBool>,
    ) -> Self {
        Self {
            tx,
            snapshot_rx,
            initialized,
        }
    }

    pub(crate) fn send_event(&self, event: Event) -> Result<(), Error> {
        self.tx
            .send(Message::Event(event))
            .map_err(|_| Error::Closed)
    }

    /// Kicks off the initial lookup. Sent once at process start.
    pub fn startup_refresh(&self) -> Result<(), Error> {
        self.send_event(Event::StartupRefresh)
    }

    /// User asked for a refresh.
    pub fn request_refresh(&self) -> Result<(), Error> {
        self.send_event(Event::UserRefreshRequested)
    }

    /// Host network reachability changed. Ignored until the first lookup settles.
    pub fn notify_connectivity_changed(&self) -> Result<(), Error> {
        self.send_event(Event::ConnectivityChanged)
    }

    /// Flips whether the address is shown in the indicator title.
    pub fn toggle_show_status(&self) -> Result<(), Error> {
        self.send_event(Event::ToggleShowStatus)
    }

    /// Registers an observer. It is called once right away with the
    /// current snapshot, then on every change.
    pub fn subscribe(&self, observer: Observer) -> Result<(), Error> {
        self.tx
            .send(Message::Subscribe(observer))
            .map_err(|_| Error::Closed)
    }

    /// Returns the address to copy, or `None` unless online.
    pub fn copy_address(&self) -> Option<String> {
        self.snapshot_rx.borrow().state.address().map(str::to_owned)
    }

    /// Last published snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that is notified whenever a new snapshot is published.
    pub fn watch(&self) -> watch::Receiver<StatusSnapshot> {
        self.snapshot_rx.clone()
    }

    /// True once the first lookup has completed and its settle delay elapsed.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Stops the control task. Later commands return [`Error::Closed`].
    pub fn shutdown(&self) {
        let _ = self.tx.send(Message::Shutdown);
    }
}

//! Single-consumer control task owning the indicator state.
//!
//! Every input, including lookup results and settle timers, arrives on
//! one queue and is handled in arrival order. The resolver runs on a
//! spawned task and posts its outcome back onto the same queue, so the
//! state is never touched from two places.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use pubip_resolver::{ResolutionOutcome, Resolver};

use crate::handle::StatusHandle;
use crate::types::{DisplayState, Event, Observer, StatusSnapshot, TimingConfig};

/// Messages accepted by the control task.
pub(crate) enum Message {
    Event(Event),
    Subscribe(Observer),
    Shutdown,
}

/// State machine for the indicator. Lives inside the control task.
pub struct StatusController {
    resolver: Arc<dyn Resolver>,
    timing: TimingConfig,
    state: DisplayState,
    show_status: bool,
    /// A lookup has been scheduled and its result not yet handled.
    in_flight: bool,
    initialized: Arc<AtomicBool>,
    observers: Vec<Observer>,
    /// Weak so the task ends once every handle is dropped.
    feedback_tx: mpsc::WeakUnboundedSender<Message>,
    snapshot_tx: watch::Sender<StatusSnapshot>,
}

impl StatusController {
    /// Starts the control task and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        resolver: Arc<dyn Resolver>,
        timing: TimingConfig,
        show_status: bool,
    ) -> StatusHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let initial = StatusSnapshot {
            state: DisplayState::Offline,
            show_status,
        };
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let initialized = Arc::new(AtomicBool::new(false));

        let controller = Self {
            resolver,
            timing,
            state: DisplayState::Offline,
            show_status,
            in_flight: false,
            initialized: Arc::clone(&initialized),
            observers: Vec::new(),
            feedback_tx: tx.downgrade(),
            snapshot_tx,
        };

        tokio::spawn(controller.run(rx));

        StatusHandle::new(tx, snapshot_rx, initialized)
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Message>) {
        while let Some(msg) = rx.recv().await {
            match msg {
                Message::Event(event) => self.handle(event),
                Message::Subscribe(observer) => {
                    observer(&self.snapshot());
                    self.observers.push(observer);
                }
                Message::Shutdown => break,
            }
        }
        debug!("status controller stopped");
    }

    /// Applies one event. Every event is defined from every state.
    fn handle(&mut self, event: Event) {
        match event {
            Event::StartupRefresh => self.begin_refresh("startup"),
            Event::UserRefreshRequested => self.begin_refresh("user"),
            Event::ConnectivityChanged => {
                if self.initialized.load(Ordering::Acquire) {
                    self.begin_refresh("connectivity");
                } else {
                    debug!("connectivity change before first settle, dropped");
                }
            }
            Event::ToggleShowStatus => {
                self.show_status = !self.show_status;
                info!(show_status = self.show_status, "status text toggled");
                self.publish();
            }
            Event::ResolutionCompleted(outcome) => self.complete(outcome),
            Event::Settled => {
                if !self.initialized.swap(true, Ordering::AcqRel) {
                    info!("initial lookup settled, honoring connectivity changes");
                }
            }
        }
    }

    fn begin_refresh(&mut self, trigger: &'static str) {
        if self.in_flight {
            debug!(trigger, "lookup already in flight, refresh absorbed");
            return;
        }
        self.in_flight = true;
        self.set_state(DisplayState::Refreshing);
        debug!(trigger, "refresh started");

        let resolver = Arc::clone(&self.resolver);
        let feedback = self.feedback_tx.clone();
        let delay = self.timing.refresh_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A panicking resolver must still yield exactly one outcome.
            let lookup = tokio::spawn(async move { resolver.resolve().await });
            let outcome = match lookup.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, "lookup task failed");
                    ResolutionOutcome::Failed
                }
            };
            if let Some(tx) = feedback.upgrade() {
                let _ = tx.send(Message::Event(Event::ResolutionCompleted(outcome)));
            }
        });
    }

    fn complete(&mut self, outcome: ResolutionOutcome) {
        if !self.in_flight {
            debug!("resolution result without pending lookup, ignored");
            return;
        }
        self.in_flight = false;

        let next = match outcome {
            ResolutionOutcome::Resolved(addr) => DisplayState::Online(addr),
            ResolutionOutcome::Failed => DisplayState::Offline,
        };
        self.set_state(next);

        if self.initialized.load(Ordering::Acquire) {
            return;
        }
        let feedback = self.feedback_tx.clone();
        let delay = self.timing.settle_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = feedback.upgrade() {
                let _ = tx.send(Message::Event(Event::Settled));
            }
        });
    }

    fn set_state(&mut self, next: DisplayState) {
        if self.state == next {
            return;
        }
        info!(from = %self.state, to = %next, "status changed");
        self.state = next;
        self.publish();
    }

    fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state.clone(),
            show_status: self.show_status,
        }
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.snapshot_tx.send_replace(snapshot.clone());
        for observer in &self.observers {
            observer(&snapshot);
        }
    }
}

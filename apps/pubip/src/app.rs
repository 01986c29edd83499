//! Application orchestrator: wires the controller, tray and host events.

use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use pubip_resolver::HttpResolver;
use pubip_status::{StatusController, StatusHandle, StatusSnapshot};
use pubip_tray::{MenuAction, TrayEvent, TrayHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clipboard::ClipboardWriter;
use crate::config::Config;
use crate::{console, netwatch};

const APP_NAME: &str = "PubIP";

/// Runs until quit is requested from the tray or SIGINT arrives.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // -- Controller --
    let resolver = HttpResolver::new(&config.resolver_config())?;
    info!(url = %resolver.url(), "resolver ready");
    let status = StatusController::spawn(Arc::new(resolver), config.timing(), config.show_status);

    // -- Tray --
    let (tray, event_tx, event_rx, update_rx) = TrayHandle::new(APP_NAME);
    let renderer = tray.clone();
    status.subscribe(Box::new(move |snapshot: &StatusSnapshot| {
        renderer.render(snapshot)
    }))?;
    console::spawn(event_tx.clone(), update_rx);

    // -- Connectivity --
    let watcher = netwatch::spawn(event_tx, config.connectivity_poll(), cancel.clone());

    status.startup_refresh()?;
    info!("ready");

    let dispatcher = Dispatcher {
        status: status.clone(),
        menu_action_delay: config.menu_action_delay(),
        clipboard: ClipboardWriter::default(),
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT received, shutting down");
        }
        result = dispatcher.run(event_rx) => {
            result?;
            info!("quit requested via tray");
        }
    }

    cancel.cancel();
    let _ = watcher.await;
    status.shutdown();
    tray.shutdown();

    Ok(())
}

/// Forwards tray and host events to the controller.
struct Dispatcher {
    status: StatusHandle,
    menu_action_delay: Duration,
    clipboard: ClipboardWriter,
}

impl Dispatcher {
    /// Returns when quit is requested or every event sender is gone.
    async fn run(mut self, events: mpsc::Receiver<TrayEvent>) -> anyhow::Result<()> {
        loop {
            match events.try_recv() {
                Ok(TrayEvent::Action(MenuAction::Quit)) => return Ok(()),
                Ok(event) => self.handle(event).await?,
                Err(TryRecvError::Empty) => {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }
    }

    async fn handle(&mut self, event: TrayEvent) -> anyhow::Result<()> {
        match event {
            TrayEvent::ConnectivityChanged => self.status.notify_connectivity_changed()?,
            TrayEvent::Action(MenuAction::Refresh) => {
                // Let the menu close before the indicator changes.
                tokio::time::sleep(self.menu_action_delay).await;
                self.status.request_refresh()?;
            }
            TrayEvent::Action(MenuAction::ToggleShowStatus) => {
                tokio::time::sleep(self.menu_action_delay).await;
                self.status.toggle_show_status()?;
            }
            TrayEvent::Action(MenuAction::CopyAddress) => match self.status.copy_address() {
                Some(addr) => match self.clipboard.write(&addr) {
                    Ok(()) => info!(address = %addr, "address copied to clipboard"),
                    Err(e) => warn!(error = %e, "clipboard write failed"),
                },
                None => debug!("copy requested while not online, ignored"),
            },
            TrayEvent::Action(MenuAction::About) => {
                info!(
                    version = env!("CARGO_PKG_VERSION"),
                    "{APP_NAME} shows this machine's public IP address"
                );
            }
            TrayEvent::Action(MenuAction::Quit) => {}
        }
        Ok(())
    }
}

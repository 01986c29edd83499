//! Connectivity change detection by polling local interface addresses.

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::mpsc;
use std::time::Duration;

use pubip_tray::TrayEvent;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Addresses that indicate a usable network link.
pub fn is_routable(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => !v4.is_loopback() && !v4.is_link_local() && !v4.is_unspecified(),
        // fe80::/10
        IpAddr::V6(v6) => {
            !v6.is_loopback() && !v6.is_unspecified() && (v6.segments()[0] & 0xffc0) != 0xfe80
        }
    }
}

/// Current set of routable interface addresses.
pub fn local_addresses() -> BTreeSet<IpAddr> {
    let Ok(interfaces) = if_addrs::get_if_addrs() else {
        return BTreeSet::new();
    };
    interfaces
        .into_iter()
        .filter(|iface| !iface.is_loopback())
        .map(|iface| iface.ip())
        .filter(is_routable)
        .collect()
}

/// Spawns the watcher using the host's interfaces.
pub fn spawn(
    events: mpsc::Sender<TrayEvent>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    spawn_with(local_addresses, events, interval, cancel)
}

/// Polls `probe` every `interval` and emits `ConnectivityChanged` whenever
/// the address set differs from the previous poll.
pub fn spawn_with<F>(
    probe: F,
    events: mpsc::Sender<TrayEvent>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    F: Fn() -> BTreeSet<IpAddr> + Send + 'static,
{
    tokio::spawn(async move {
        let mut last = probe();
        debug!(addresses = ?last, "connectivity watcher started");

        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let current = probe();
            if current == last {
                continue;
            }
            info!(before = ?last, after = ?current, "network interfaces changed");
            last = current;
            if events.send(TrayEvent::ConnectivityChanged).is_err() {
                break;
            }
        }
        debug!("connectivity watcher stopped");
    })
}

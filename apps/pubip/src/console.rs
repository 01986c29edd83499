//! Headless tray backend.
//!
//! Reads menu commands from stdin and logs tray updates, standing in for a
//! graphical tray where none is available.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use pubip_tray::{MenuAction, MenuItemKind, TrayEvent, TrayUpdate};
use tracing::{debug, info, warn};

/// Maps a console command to a menu action.
pub fn parse_command(line: &str) -> Option<MenuAction> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "refresh" => Some(MenuAction::Refresh),
        "c" | "copy" => Some(MenuAction::CopyAddress),
        "t" | "toggle" => Some(MenuAction::ToggleShowStatus),
        "a" | "about" => Some(MenuAction::About),
        "q" | "quit" => Some(MenuAction::Quit),
        _ => None,
    }
}

/// Starts the stdin reader and the update logger on their own threads.
pub fn spawn(events: mpsc::Sender<TrayEvent>, updates: mpsc::Receiver<TrayUpdate>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(action) => {
                    if events.send(TrayEvent::Action(action)).is_err() {
                        break;
                    }
                }
                None => warn!(command = %line.trim(), "unknown command (refresh|copy|toggle|about|quit)"),
            }
        }
        debug!("console input closed");
    });

    thread::spawn(move || {
        while let Ok(update) = updates.recv() {
            match update {
                TrayUpdate::Render { payload, menu } => {
                    let header = menu.first().map(|i| i.label.as_str()).unwrap_or_default();
                    let toggle = menu
                        .iter()
                        .find_map(|i| match i.kind {
                            MenuItemKind::Checkbox { checked } => Some(checked),
                            _ => None,
                        })
                        .unwrap_or(payload.toggle_checked);
                    info!(
                        title = %payload.display_label,
                        icon = ?payload.icon_variant,
                        copy = payload.clipboard_enabled,
                        show_status = toggle,
                        "{header}"
                    );
                }
                TrayUpdate::Shutdown => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("refresh"), Some(MenuAction::Refresh));
        assert_eq!(parse_command(" R \n"), Some(MenuAction::Refresh));
        assert_eq!(parse_command("copy"), Some(MenuAction::CopyAddress));
        assert_eq!(parse_command("Toggle"), Some(MenuAction::ToggleShowStatus));
        assert_eq!(parse_command("about"), Some(MenuAction::About));
        assert_eq!(parse_command("q"), Some(MenuAction::Quit));
        assert_eq!(parse_command("reboot"), None);
    }
}

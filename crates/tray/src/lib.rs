//! System tray model for the public address indicator.
//!
//! Derives the context menu from a [`pubip_status::StatusSnapshot`] and
//! defines the channel-based interface between the app core and a tray
//! backend:
//! - [`TrayEvent`]: events from tray to app (menu clicks, connectivity)
//! - [`TrayUpdate`]: updates from app to tray (re-render, shutdown)
//!
//! # Platform notes
//! - The tray event loop must run on the main thread on some platforms,
//!   hence the std channels.

mod menu;
mod tray;

pub use menu::{MenuAction, MenuItem, MenuItemKind, MenuState};
pub use tray::{TrayEvent, TrayHandle, TrayUpdate};

//! Status controller for the public address indicator.
//!
//! Owns the display state (Offline / Refreshing / Online), serializes
//! refresh requests so at most one lookup is in flight, and notifies
//! observers so the presentation layer can re-render.
//!
//! All inputs are delivered as messages to a single control task:
//! - presentation calls on [`StatusHandle`]
//! - lookup results and settle timers fed back by the task itself

pub mod controller;
pub mod handle;
pub mod types;

pub use controller::StatusController;
pub use handle::{Error, StatusHandle};
pub use types::{
    DisplayState, Event, IconVariant, Observer, RenderPayload, StatusSnapshot, TimingConfig,
};

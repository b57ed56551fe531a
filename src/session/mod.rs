//! Driving API for a presentation layer.
//!
//! - `controller`: `Session`, one action per method
//! - `view`: serializable snapshots of the current screen

pub mod controller;
pub mod view;

pub use controller::{Session, SessionSummary};
pub use view::{CardView, PhaseView, PlayerView, RoundView};

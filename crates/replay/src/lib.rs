//! Hermes Replay
//!
//! The replay driver: loads historical order data, then runs the discrete
//! clock loop (advance time, match, settle, display) with one simulated
//! trader injecting orders into the timeline. The interactive console and
//! the text charts live here too; the engine crates below know nothing
//! about presentation.

pub mod charts;
pub mod console;
pub mod export;
pub mod session;

pub use console::Console;
pub use session::{MarketStats, PlaceOutcome, Session, SessionConfig, SessionError};

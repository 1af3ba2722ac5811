//! Hermes Matching
//!
//! The batch-auction pairing algorithm: at one instant of the replay
//! timeline, asks are crossed against bids on caller-provided copies and
//! trades are emitted without touching the stored book.

mod batch;

pub use batch::BatchAuction;

//! Hermes Ingest
//!
//! The ingestion boundary: reads line-oriented CSV order records into
//! validated domain orders and builds the global replay timeline. All
//! format concerns live here; the engine downstream assumes every order it
//! receives is well-formed.

mod error;
mod source;
mod timeline;

pub use error::{IngestError, RecordError};
pub use source::read_orders;
pub use timeline::all_timestamps;

use std::path::PathBuf;

use thiserror::Error;

use hermes_core::TimestampError;

/// Errors that abort reading a data source outright.
///
/// A malformed individual record is not one of these: bad records are
/// skipped (and logged) the way the replay datasets have always been
/// handled, and are described by [`RecordError`].
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("cannot read order data from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Why a single CSV record was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),

    #[error("unrecognized side token `{0}`")]
    UnknownSide(String),

    #[error("bad decimal `{0}`")]
    BadDecimal(String),

    #[error(transparent)]
    BadTimestamp(#[from] TimestampError),
}

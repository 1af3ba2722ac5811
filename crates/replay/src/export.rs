use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use hermes_core::Candle;

/// Errors raised while exporting series data
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode candles for {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Write a candle series as pretty-printed JSON.
pub fn write_candles_json(candles: &[Candle], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), candles).map_err(|source| {
        ExportError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!("wrote {} candles to {}", candles.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::Timestamp;
    use rust_decimal_macros::dec;

    #[test]
    fn candles_round_trip_through_json() {
        let candles = vec![Candle::new(
            Timestamp::parse("2020/03/17 09:00:00").unwrap(),
            dec!(1),
            dec!(2),
            dec!(0.5),
            dec!(1.5),
        )];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candles.json");

        write_candles_json(&candles, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: Vec<Candle> = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded, candles);
    }
}

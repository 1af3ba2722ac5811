use std::collections::BTreeSet;
use std::path::Path;

use hermes_core::Timestamp;

use crate::error::IngestError;
use crate::source::read_orders;

/// Collect every distinct timestamp across all configured data sources,
/// sorted ascending.
///
/// This is the aggregation timeline: it spans all products and sides, so
/// it may well contain instants at which a particular side/product has no
/// orders at all.
pub fn all_timestamps<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Timestamp>, IngestError> {
    let mut uniq = BTreeSet::new();
    for path in paths {
        for order in read_orders(path)? {
            uniq.insert(order.timestamp);
        }
    }
    Ok(uniq.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn data_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn timeline_is_sorted_and_deduplicated_across_sources() {
        let first = data_file(
            "2020/06/01 12:00:00,ETH/USDT,ask,200,1\n\
             2020/03/17 09:00:00,ETH/USDT,bid,190,1\n",
        );
        let second = data_file(
            "2020/03/17 09:00:00,BTC/USDT,ask,6000,1\n\
             2020/03/17 10:30:00,BTC/USDT,bid,5900,1\n",
        );

        let timeline = all_timestamps(&[first.path(), second.path()]).unwrap();

        let stamps: Vec<&str> = timeline.iter().map(Timestamp::as_str).collect();
        assert_eq!(
            stamps,
            vec![
                "2020/03/17 09:00:00",
                "2020/03/17 10:30:00",
                "2020/06/01 12:00:00",
            ]
        );
    }

    #[test]
    fn empty_source_list_yields_an_empty_timeline() {
        let paths: [&Path; 0] = [];
        assert!(all_timestamps(&paths).unwrap().is_empty());
    }
}

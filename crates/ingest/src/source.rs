use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use log::{info, warn};
use rust_decimal::Decimal;

use hermes_core::{Order, Product, Side, Timestamp};

use crate::error::{IngestError, RecordError};

/// Read every well-formed order record from a CSV data source.
///
/// Records are headerless lines of the form
/// `timestamp,product,side,price,amount`. A record that fails validation
/// (wrong field count, unknown side token, bad decimal, bad timestamp) is
/// skipped with a warning; an unreadable file is an error.
pub fn read_orders(path: impl AsRef<Path>) -> Result<Vec<Order>, IngestError> {
    let path = path.as_ref();
    let read_err = |source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let mut orders = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result.map_err(read_err)?;
        match parse_record(&record) {
            Ok(order) => orders.push(order),
            Err(err) => {
                skipped += 1;
                warn!(
                    "{}: skipping record {}: {err}",
                    path.display(),
                    record.position().map_or(0, |p| p.line())
                );
            }
        }
    }

    info!(
        "{}: read {} orders ({} skipped)",
        path.display(),
        orders.len(),
        skipped
    );
    Ok(orders)
}

fn parse_record(record: &StringRecord) -> Result<Order, RecordError> {
    if record.len() != 5 {
        return Err(RecordError::FieldCount(record.len()));
    }

    let timestamp = Timestamp::parse(&record[0])?;
    let product = Product::new(&record[1]);
    let side = match &record[2] {
        "ask" => Side::Ask,
        "bid" => Side::Bid,
        other => return Err(RecordError::UnknownSide(other.to_string())),
    };
    let price = parse_decimal(&record[3])?;
    let amount = parse_decimal(&record[4])?;

    Ok(Order::from_dataset(product, side, price, amount, timestamp))
}

fn parse_decimal(field: &str) -> Result<Decimal, RecordError> {
    Decimal::from_str(field).map_err(|_| RecordError::BadDecimal(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn data_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_well_formed_records() {
        let file = data_file(
            "2020/03/17 17:01:24.884492,ETH/BTC,bid,0.02187308,7.44564869\n\
             2020/03/17 17:01:24.884492,ETH/BTC,ask,0.02188520,3.46935741\n",
        );

        let orders = read_orders(file.path()).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].side, Side::Bid);
        assert_eq!(orders[0].price, dec!(0.02187308));
        assert_eq!(orders[1].side, Side::Ask);
        assert_eq!(orders[1].product, Product::new("ETH/BTC"));
        assert!(orders.iter().all(|o| o.owner.is_none()));
    }

    #[test]
    fn skips_malformed_records() {
        let file = data_file(
            "2020/03/17 17:01:24,ETH/BTC,bid,0.02,7.44\n\
             not a timestamp,ETH/BTC,bid,0.02,7.44\n\
             2020/03/17 17:01:24,ETH/BTC,hold,0.02,7.44\n\
             2020/03/17 17:01:24,ETH/BTC,bid,not-a-price,7.44\n\
             2020/03/17 17:01:24,ETH/BTC,bid,0.02\n\
             2020/03/17 17:01:25,ETH/BTC,ask,0.03,1.5\n",
        );

        let orders = read_orders(file.path()).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].timestamp.as_str(), "2020/03/17 17:01:24");
        assert_eq!(orders[1].timestamp.as_str(), "2020/03/17 17:01:25");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_orders("/nonexistent/orders.csv").is_err());
    }

    #[test]
    fn rejects_side_tokens_case_sensitively() {
        let record = StringRecord::from(vec![
            "2020/03/17 17:01:24",
            "ETH/BTC",
            "ASK",
            "0.02",
            "7.44",
        ]);
        assert!(matches!(
            parse_record(&record),
            Err(RecordError::UnknownSide(token)) if token == "ASK"
        ));
    }
}

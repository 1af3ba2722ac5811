use serde::{Deserialize, Serialize};

use crate::values::{Price, Timestamp};

/// One OHLC record for one instant of the replay timeline.
///
/// `close` is the amount-weighted average price over the instant's orders;
/// `open` chains from the previous emitted candle's close, so gaps in the
/// timeline are compressed rather than rendered as empty candles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Candle {
    pub fn new(timestamp: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// The body's `(low, high)` bounds, whichever way the candle points.
    /// Chart rendering spans the body between open and close.
    pub fn body(&self) -> (Price, Price) {
        if self.open <= self.close {
            (self.open, self.close)
        } else {
            (self.close, self.open)
        }
    }
}

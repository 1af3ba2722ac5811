//! Text-mode chart rendering for the replay console.
//!
//! Everything renders into a `String` so the console can print it and the
//! tests can inspect it.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use hermes_core::{Candle, Price, Quantity, Timestamp};

/// Vertical resolution of the candlestick chart
const PRICE_ROWS: u32 = 20;
/// Maximum bar length of the horizontal charts
const BAR_WIDTH: u32 = 50;
/// A time label every this many candle columns
const LABEL_EVERY: usize = 10;

/// ASCII candlestick chart: one column per candle, `*` for the open/close
/// body, `|` for the low/high wick, price labels on the left and clock
/// labels under the axis.
pub fn candlestick_chart(candles: &[Candle]) -> String {
    if candles.is_empty() {
        return "no data to plot\n".to_string();
    }

    let mut global_high = candles[0].high;
    let mut global_low = candles[0].low;
    for candle in candles {
        global_high = global_high.max(candle.high);
        global_low = global_low.min(candle.low);
    }

    let raw_span = global_high - global_low;
    let span = if raw_span.is_zero() {
        // flat series still gets a non-degenerate ladder
        Decimal::ONE
    } else {
        raw_span
    } / Decimal::from(PRICE_ROWS);

    let levels: Vec<Price> = (0..=PRICE_ROWS)
        .rev()
        .map(|row| global_low + span * Decimal::from(row))
        .collect();
    let labels: Vec<String> = levels.iter().map(|level| format!("{level:.6}")).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    for (label, level) in labels.iter().zip(&levels) {
        out.push_str(&format!("{label:>label_width$} |"));
        for candle in candles {
            let (body_low, body_high) = candle.body();
            let mark = if body_low <= *level && *level <= body_high {
                '*'
            } else if candle.low <= *level && *level <= candle.high {
                '|'
            } else {
                ' '
            };
            out.push(mark);
        }
        out.push('\n');
    }

    let margin = " ".repeat(label_width + 2);
    out.push_str(&margin);
    out.push_str(&"-".repeat(candles.len()));
    out.push('\n');

    let mut label_row = String::new();
    for (column, candle) in candles.iter().enumerate().step_by(LABEL_EVERY) {
        while label_row.len() < column {
            label_row.push(' ');
        }
        label_row.push_str(candle.timestamp.clock());
    }
    out.push_str(&margin);
    out.push_str(&label_row);
    out.push('\n');

    out
}

/// Horizontal bar chart of volume per instant, scaled to the largest bar.
pub fn volume_chart(points: &[(Timestamp, Quantity)]) -> String {
    if points.is_empty() {
        return "no volume data\n".to_string();
    }

    let max = points
        .iter()
        .map(|(_, volume)| *volume)
        .max()
        .unwrap_or(Decimal::ZERO);

    let mut out = String::new();
    for (ts, volume) in points {
        out.push_str(&format!(
            "{} | {} ({volume})\n",
            ts.clock(),
            "*".repeat(bar_len(*volume, max))
        ));
    }
    out
}

/// Horizontal bar chart of per-minute mean prices.
pub fn mean_price_chart(points: &[(String, Price)]) -> String {
    if points.is_empty() {
        return "no price data\n".to_string();
    }

    let max = points
        .iter()
        .map(|(_, price)| *price)
        .max()
        .unwrap_or(Decimal::ZERO);

    let mut out = String::new();
    for (minute, price) in points {
        out.push_str(&format!(
            "{minute} | {} ({price})\n",
            "*".repeat(bar_len(*price, max))
        ));
    }
    out
}

fn bar_len(value: Decimal, max: Decimal) -> usize {
    if max.is_zero() || value <= Decimal::ZERO {
        return 0;
    }
    (value / max * Decimal::from(BAR_WIDTH))
        .trunc()
        .to_usize()
        .unwrap_or(0)
}

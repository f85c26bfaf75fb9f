//! Quadruple-bar classifiers: the three-line strike formations.

use crate::{Ohlcv, OhlcvExt};

/// Bullish three-line strike: three bullish bars with rising closes, then one
/// bearish bar that opens above the third close and retraces below the first
/// open in a single move.
#[inline]
pub fn is_bullish_three_line_strike<T: Ohlcv>(
    first: &T,
    second: &T,
    third: &T,
    fourth: &T,
) -> bool {
    first.is_bullish()
        && second.is_bullish()
        && third.is_bullish()
        && second.close() > first.close()
        && third.close() > second.close()
        && fourth.is_bearish()
        && fourth.open() > third.close()
        && fourth.close() < first.open()
}

/// Bearish three-line strike: mirror of the bullish strike.
#[inline]
pub fn is_bearish_three_line_strike<T: Ohlcv>(
    first: &T,
    second: &T,
    third: &T,
    fourth: &T,
) -> bool {
    first.is_bearish()
        && second.is_bearish()
        && third.is_bearish()
        && second.close() < first.close()
        && third.close() < second.close()
        && fourth.is_bullish()
        && fourth.open() < third.close()
        && fourth.close() > first.open()
}

//! Triple-bar classifiers over a (first, second, third) window.
//!
//! Star family (plain, doji, abandoned baby), three soldiers/crows and the
//! confirmed harami/engulfing formations (three inside/outside). The inside
//! and outside variants reuse the two-bar predicates on the leading pair.

use super::{
    shape::is_doji,
    two_bar::{is_bearish_engulfing, is_bearish_harami, is_bullish_engulfing, is_bullish_harami},
};
use crate::{Ohlcv, OhlcvExt};

/// Star formations: middle body must stay below this fraction of the first
/// bar's body.
pub const STAR_MIDDLE_MAX_BODY_FRACTION: f64 = 0.3;

/// Morning star: bearish trend bar, small middle body, bullish bar closing
/// past the first bar's midpoint.
#[inline]
pub fn is_morning_star<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    first.is_bearish()
        && second.body() < first.body() * STAR_MIDDLE_MAX_BODY_FRACTION
        && third.is_bullish()
        && third.close() > (first.open() + first.close()) / 2.0
}

/// Evening star: mirror of the morning star.
#[inline]
pub fn is_evening_star<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    first.is_bullish()
        && second.body() < first.body() * STAR_MIDDLE_MAX_BODY_FRACTION
        && third.is_bearish()
        && third.close() < (first.open() + first.close()) / 2.0
}

/// Morning doji star: the middle bar is a doji gapping below the first close.
#[inline]
pub fn is_morning_doji_star<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    first.is_bearish()
        && is_doji(second)
        && second.high() < first.close()
        && third.is_bullish()
        && third.close() > (first.open() + first.close()) / 2.0
}

/// Evening doji star: the middle bar is a doji gapping above the first close.
#[inline]
pub fn is_evening_doji_star<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    first.is_bullish()
        && is_doji(second)
        && second.low() > first.close()
        && third.is_bearish()
        && third.close() < (first.open() + first.close()) / 2.0
}

/// Bullish abandoned baby: doji island below the first bar's low with a gap
/// on both sides, then a bullish bar closing above the first close.
#[inline]
pub fn is_bullish_abandoned_baby<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    first.is_bearish()
        && is_doji(second)
        && second.high() < first.low()
        && third.is_bullish()
        && third.open() > second.high()
        && third.close() > first.close()
}

/// Bearish abandoned baby: doji island above the first bar's high with a gap
/// on both sides, then a bearish bar closing below the first close.
#[inline]
pub fn is_bearish_abandoned_baby<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    first.is_bullish()
        && is_doji(second)
        && second.low() > first.high()
        && third.is_bearish()
        && third.open() < second.low()
        && third.close() < first.close()
}

/// Three white soldiers: three bullish bars with rising closes, each opening
/// inside the previous body.
#[inline]
pub fn is_three_white_soldiers<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    first.is_bullish()
        && second.is_bullish()
        && third.is_bullish()
        && second.close() > first.close()
        && third.close() > second.close()
        && second.open() > first.open()
        && second.open() < first.close()
        && third.open() > second.open()
        && third.open() < second.close()
}

/// Three black crows: three bearish bars with falling closes, each opening
/// inside the previous body.
#[inline]
pub fn is_three_black_crows<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    first.is_bearish()
        && second.is_bearish()
        && third.is_bearish()
        && second.close() < first.close()
        && third.close() < second.close()
        && second.open() < first.open()
        && second.open() > first.close()
        && third.open() < second.open()
        && third.open() > second.close()
}

/// Three inside up: bullish harami confirmed by a bullish close above the
/// second bar's close.
#[inline]
pub fn is_three_inside_up<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    is_bullish_harami(first, second) && third.is_bullish() && third.close() > second.close()
}

/// Three inside down: bearish harami confirmed by a bearish close below the
/// second bar's close.
#[inline]
pub fn is_three_inside_down<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    is_bearish_harami(first, second) && third.is_bearish() && third.close() < second.close()
}

/// Three outside up: bullish engulfing confirmed by a bullish close above the
/// second bar's close.
#[inline]
pub fn is_three_outside_up<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    is_bullish_engulfing(first, second) && third.is_bullish() && third.close() > second.close()
}

/// Three outside down: bearish engulfing confirmed by a bearish close below
/// the second bar's close.
#[inline]
pub fn is_three_outside_down<T: Ohlcv>(first: &T, second: &T, third: &T) -> bool {
    is_bearish_engulfing(first, second) && third.is_bearish() && third.close() < second.close()
}

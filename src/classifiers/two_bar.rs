//! Double-bar classifiers over a (previous, current) window.
//!
//! Engulfing, harami, piercing line / dark cloud cover, tweezers and kickers.
//! All predicates are pure functions of the two bars; trend context is not
//! consulted.

use crate::{Ohlcv, OhlcvExt};

/// Harami: current body must stay below this fraction of the previous body.
pub const HARAMI_MAX_BODY_FRACTION: f64 = 0.5;
/// Tweezer: high/low match tolerance as a fraction of the summed extremes
/// (0.002 of the sum is ~0.4% of price).
pub const TWEEZER_TOLERANCE_FACTOR: f64 = 0.002;
/// Kicker: both bars must have a body above this fraction of their range.
pub const KICKER_MIN_BODY_RATIO: f64 = 0.7;

/// Bullish engulfing: bullish body fully containing the previous bearish body.
#[inline]
pub fn is_bullish_engulfing<T: Ohlcv>(prev: &T, current: &T) -> bool {
    prev.is_bearish()
        && current.is_bullish()
        && current.open() < prev.close()
        && current.close() > prev.open()
}

/// Bearish engulfing: bearish body fully containing the previous bullish body.
#[inline]
pub fn is_bearish_engulfing<T: Ohlcv>(prev: &T, current: &T) -> bool {
    prev.is_bullish()
        && current.is_bearish()
        && current.open() > prev.close()
        && current.close() < prev.open()
}

/// Bullish harami: small bullish body nested inside the previous bearish body.
#[inline]
pub fn is_bullish_harami<T: Ohlcv>(prev: &T, current: &T) -> bool {
    prev.is_bearish()
        && current.is_bullish()
        && current.open() > prev.close()
        && current.close() < prev.open()
        && current.body() < prev.body() * HARAMI_MAX_BODY_FRACTION
}

/// Bearish harami: small bearish body nested inside the previous bullish body.
#[inline]
pub fn is_bearish_harami<T: Ohlcv>(prev: &T, current: &T) -> bool {
    prev.is_bullish()
        && current.is_bearish()
        && current.open() < prev.close()
        && current.close() > prev.open()
        && current.body() < prev.body() * HARAMI_MAX_BODY_FRACTION
}

/// Piercing line: gap down below the previous low, then a bullish close
/// between the previous body's midpoint and its open (engulfing excluded).
#[inline]
pub fn is_piercing_line<T: Ohlcv>(prev: &T, current: &T) -> bool {
    prev.is_bearish()
        && current.is_bullish()
        && current.open() < prev.low()
        && current.close() > (prev.open() + prev.close()) / 2.0
        && current.close() < prev.open()
}

/// Dark cloud cover: mirror of the piercing line for a bearish reversal.
#[inline]
pub fn is_dark_cloud_cover<T: Ohlcv>(prev: &T, current: &T) -> bool {
    prev.is_bullish()
        && current.is_bearish()
        && current.open() > prev.high()
        && current.close() < (prev.open() + prev.close()) / 2.0
        && current.close() > prev.open()
}

/// Tweezer bottom: matching lows within tolerance, confirmed by a bullish
/// current bar.
#[inline]
pub fn is_tweezer_bottom<T: Ohlcv>(prev: &T, current: &T) -> bool {
    let tolerance = (prev.low() + current.low()) * TWEEZER_TOLERANCE_FACTOR;
    (prev.low() - current.low()).abs() < tolerance && current.is_bullish()
}

/// Tweezer top: matching highs within tolerance, confirmed by a bearish
/// current bar.
#[inline]
pub fn is_tweezer_top<T: Ohlcv>(prev: &T, current: &T) -> bool {
    let tolerance = (prev.high() + current.high()) * TWEEZER_TOLERANCE_FACTOR;
    (prev.high() - current.high()).abs() < tolerance && current.is_bearish()
}

/// Bullish kicker: near-marubozu bearish bar followed by a near-marubozu
/// bullish bar opening above the previous close.
#[inline]
pub fn is_bullish_kicker<T: Ohlcv>(prev: &T, current: &T) -> bool {
    prev.is_bearish()
        && current.is_bullish()
        && current.open() > prev.close()
        && prev.body() > prev.range() * KICKER_MIN_BODY_RATIO
        && current.body() > current.range() * KICKER_MIN_BODY_RATIO
}

/// Bearish kicker: near-marubozu bullish bar followed by a near-marubozu
/// bearish bar opening below the previous close.
#[inline]
pub fn is_bearish_kicker<T: Ohlcv>(prev: &T, current: &T) -> bool {
    prev.is_bullish()
        && current.is_bearish()
        && current.open() < prev.close()
        && prev.body() > prev.range() * KICKER_MIN_BODY_RATIO
        && current.body() > current.range() * KICKER_MIN_BODY_RATIO
}

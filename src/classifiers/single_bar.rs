//! Single-bar reversal classifiers.
//!
//! Hammer family and the directional doji variants. The defining geometry is
//! one bar; directionality (bullish/bearish close) is part of the predicate
//! where the pattern calls for it.

use super::shape::is_doji;
use crate::{Ohlcv, OhlcvExt};

/// Long shadow: shadow must exceed this multiple of the body.
pub const LONG_SHADOW_BODY_FACTOR: f64 = 2.0;
/// Short shadow: opposite shadow must stay below this fraction of the body.
pub const SHORT_SHADOW_BODY_FACTOR: f64 = 0.3;
/// Directional doji: dominant shadow exceeds this fraction of the range.
pub const DOJI_LONG_SHADOW_RANGE_RATIO: f64 = 0.6;
/// Directional doji: minor shadow stays below this fraction of the range.
pub const DOJI_SHORT_SHADOW_RANGE_RATIO: f64 = 0.1;

/// Hammer: bullish bar with a long lower shadow and almost no upper shadow.
#[inline]
pub fn is_hammer<T: Ohlcv>(bar: &T) -> bool {
    let body = bar.body();
    bar.lower_shadow() > body * LONG_SHADOW_BODY_FACTOR
        && bar.upper_shadow() < body * SHORT_SHADOW_BODY_FACTOR
        && bar.is_bullish()
        && body > 0.0
}

/// Inverted hammer: long upper shadow, almost no lower shadow. Direction
/// agnostic.
#[inline]
pub fn is_inverted_hammer<T: Ohlcv>(bar: &T) -> bool {
    let body = bar.body();
    bar.upper_shadow() > body * LONG_SHADOW_BODY_FACTOR
        && bar.lower_shadow() < body * SHORT_SHADOW_BODY_FACTOR
        && body > 0.0
}

/// Dragonfly doji: doji whose range sits almost entirely below the body.
#[inline]
pub fn is_dragonfly_doji<T: Ohlcv>(bar: &T) -> bool {
    let range = bar.range();
    is_doji(bar)
        && bar.lower_shadow() > range * DOJI_LONG_SHADOW_RANGE_RATIO
        && bar.upper_shadow() < range * DOJI_SHORT_SHADOW_RANGE_RATIO
}

/// Shooting star: bearish bar with inverted-hammer geometry.
#[inline]
pub fn is_shooting_star<T: Ohlcv>(bar: &T) -> bool {
    let body = bar.body();
    bar.upper_shadow() > body * LONG_SHADOW_BODY_FACTOR
        && bar.lower_shadow() < body * SHORT_SHADOW_BODY_FACTOR
        && bar.is_bearish()
        && body > 0.0
}

/// Hanging man: bearish bar with hammer geometry.
#[inline]
pub fn is_hanging_man<T: Ohlcv>(bar: &T) -> bool {
    let body = bar.body();
    bar.lower_shadow() > body * LONG_SHADOW_BODY_FACTOR
        && bar.upper_shadow() < body * SHORT_SHADOW_BODY_FACTOR
        && bar.is_bearish()
        && body > 0.0
}

/// Gravestone doji: doji whose range sits almost entirely above the body.
#[inline]
pub fn is_gravestone_doji<T: Ohlcv>(bar: &T) -> bool {
    let range = bar.range();
    is_doji(bar)
        && bar.upper_shadow() > range * DOJI_LONG_SHADOW_RANGE_RATIO
        && bar.lower_shadow() < range * DOJI_SHORT_SHADOW_RANGE_RATIO
}

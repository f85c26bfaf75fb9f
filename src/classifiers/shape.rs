//! Bar-local shape predicates.
//!
//! Geometry-only classification of a single bar: doji, spinning top, marubozu
//! and the generic small-body "star". These are deliberately non-exclusive;
//! the priority resolver decides which one (if any) is reported.

use crate::{Ohlcv, OhlcvExt};

// ============================================================
// SHAPE THRESHOLDS
// ============================================================

/// Doji: body is less than this fraction of the high-low range.
pub const DOJI_MAX_BODY_RATIO: f64 = 0.10;
/// Spinning top: body is less than this fraction of the range.
pub const SPINNING_TOP_MAX_BODY_RATIO: f64 = 0.30;
/// Marubozu: body exceeds this fraction of the range.
pub const MARUBOZU_MIN_BODY_RATIO: f64 = 0.95;
/// Marubozu: each shadow stays below this fraction of the range.
pub const MARUBOZU_MAX_SHADOW_RATIO: f64 = 0.025;
/// Star: body is less than this fraction of the range.
pub const STAR_MAX_BODY_RATIO: f64 = 0.20;

// ============================================================
// PREDICATES
// ============================================================

/// Doji: negligible body relative to the full range.
///
/// A zero-range bar (open = high = low = close) is not a doji: the ratio is
/// undefined there, and the range guard makes the bar fall through to
/// "no pattern".
#[inline]
pub fn is_doji<T: Ohlcv>(bar: &T) -> bool {
    let range = bar.range();
    range > 0.0 && bar.body() / range < DOJI_MAX_BODY_RATIO
}

/// Spinning top: small body with both shadows longer than the body.
#[inline]
pub fn is_spinning_top<T: Ohlcv>(bar: &T) -> bool {
    let body = bar.body();
    body < bar.range() * SPINNING_TOP_MAX_BODY_RATIO
        && bar.upper_shadow() > body
        && bar.lower_shadow() > body
        && body > 0.0
}

/// Marubozu: the body covers nearly the entire range, with no meaningful
/// shadow on either side.
#[inline]
pub fn is_marubozu<T: Ohlcv>(bar: &T) -> bool {
    let range = bar.range();
    bar.body() > range * MARUBOZU_MIN_BODY_RATIO
        && bar.upper_shadow() < range * MARUBOZU_MAX_SHADOW_RATIO
        && bar.lower_shadow() < range * MARUBOZU_MAX_SHADOW_RATIO
}

/// Star: generic small body (looser than doji, no shadow constraint).
#[inline]
pub fn is_star<T: Ohlcv>(bar: &T) -> bool {
    let body = bar.body();
    body < bar.range() * STAR_MAX_BODY_RATIO && body > 0.0
}

//! # candlesig - Candlestick Pattern Classification
//!
//! Pure, synchronous candlestick-pattern classification: given an ordered
//! sequence of OHLCV bars, recognize named 1/2/3/4-bar formations and emit at
//! most one directional [`PatternSignal`] per bar, resolved in a fixed
//! priority order.
//!
//! ## Quick Start
//!
//! ```rust
//! use candlesig::prelude::*;
//!
//! let candles = vec![
//!     Candle::new(0, 10.0, 10.0, 8.0, 8.0, 1200.0),
//!     Candle::new(60, 7.0, 11.0, 7.0, 11.0, 1800.0),
//! ];
//!
//! let signals = detect_patterns(&candles);
//! assert_eq!(signals.len(), 1);
//! assert_eq!(signals[0].pattern, Pattern::BullishEngulfing);
//! assert_eq!(signals[0].signal, Signal::Buy);
//! assert_eq!(signals[0].confidence, Confidence::High);
//!
//! assert_eq!(latest_signal(&candles), signals.last().copied());
//! ```
//!
//! Detection is a total function of the input: no I/O, no shared state, no
//! panics on degenerate data. Malformed bars simply fail every predicate and
//! contribute no signal.

pub mod classifiers;
pub mod resolver;

pub mod prelude {
    pub use crate::{
        classifiers::*, detect_patterns, detect_patterns_validated, latest_signal,
        resolver::classify_at, scan_parallel, validate_bars, Candle, Confidence, Ohlcv, OhlcvExt,
        Pattern, PatternError, PatternSignal, Result, ScanError, ScanResult, Signal,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, PatternError>;

/// Errors reported by the optional input validation. Classification itself
/// never fails: an ill-formed bar just matches no pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid OHLCV at index {index}: {reason}")]
    InvalidOhlcv { index: usize, reason: &'static str },
}

// ============================================================
// OHLCV TRAITS
// ============================================================

/// Core OHLCV bar accessor trait. Implement this for your own bar type to
/// run detection without converting into [`Candle`].
pub trait Ohlcv {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
    fn volume(&self) -> f64;

    fn timestamp(&self) -> Option<i64> {
        None
    }
}

/// Extension trait with the derived geometry of a bar.
pub trait OhlcvExt: Ohlcv {
    /// Absolute distance between open and close.
    #[inline]
    fn body(&self) -> f64 {
        (self.close() - self.open()).abs()
    }

    /// Full high-low extent.
    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    /// Extent above the body.
    #[inline]
    fn upper_shadow(&self) -> f64 {
        self.high() - self.open().max(self.close())
    }

    /// Extent below the body.
    #[inline]
    fn lower_shadow(&self) -> f64 {
        self.open().min(self.close()) - self.low()
    }

    #[inline]
    fn is_bullish(&self) -> bool {
        self.close() > self.open()
    }

    #[inline]
    fn is_bearish(&self) -> bool {
        self.close() < self.open()
    }

    /// Check OHLCV consistency: high/low ordering, NaN, infinities.
    fn validate(&self) -> Result<()> {
        if self.high() < self.low() {
            return Err(PatternError::InvalidOhlcv {
                index: 0,
                reason: "high < low",
            });
        }
        let fields = [self.open(), self.high(), self.low(), self.close()];
        if fields.iter().any(|v| v.is_nan()) {
            return Err(PatternError::InvalidOhlcv {
                index: 0,
                reason: "NaN in OHLCV",
            });
        }
        if fields.iter().any(|v| v.is_infinite()) {
            return Err(PatternError::InvalidOhlcv {
                index: 0,
                reason: "infinite value in OHLCV",
            });
        }
        Ok(())
    }
}

impl<T: Ohlcv> OhlcvExt for T {}

// ============================================================
// CANDLE
// ============================================================

/// One OHLCV bar as delivered by market-data feeds. The optional moving
/// averages ride along for charting consumers; classification ignores them.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candle {
    /// Ordering key, epoch seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma50: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma200: Option<f64>,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
            ma20: None,
            ma50: None,
            ma200: None,
        }
    }
}

impl Ohlcv for Candle {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.time)
    }
}

// ============================================================
// SIGNAL TYPES
// ============================================================

/// Trading direction of an emitted signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
}

/// Confidence tier, fixed per pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Closed set of recognizable candlestick patterns. Serialized tags use the
/// SCREAMING_SNAKE_CASE wire names (`BULLISH_ENGULFING`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pattern {
    // Neutral shapes
    Doji,
    SpinningTop,
    Marubozu,
    Star,
    // Single-bar reversals
    Hammer,
    InvertedHammer,
    DragonflyDoji,
    ShootingStar,
    HangingMan,
    GravestoneDoji,
    // Double-bar formations
    BullishKicker,
    BearishKicker,
    BullishEngulfing,
    BearishEngulfing,
    BullishHarami,
    BearishHarami,
    PiercingLine,
    DarkCloudCover,
    TweezerBottom,
    TweezerTop,
    // Triple-bar formations
    MorningStar,
    EveningStar,
    MorningDojiStar,
    EveningDojiStar,
    BullishAbandonedBaby,
    BearishAbandonedBaby,
    ThreeWhiteSoldiers,
    ThreeBlackCrows,
    ThreeInsideUp,
    ThreeInsideDown,
    ThreeOutsideUp,
    ThreeOutsideDown,
    // Quadruple-bar formations
    BullishThreeLineStrike,
    BearishThreeLineStrike,
}

impl Pattern {
    /// Every recognizable pattern, grouped by window size.
    pub const ALL: [Pattern; 34] = [
        Pattern::Doji,
        Pattern::SpinningTop,
        Pattern::Marubozu,
        Pattern::Star,
        Pattern::Hammer,
        Pattern::InvertedHammer,
        Pattern::DragonflyDoji,
        Pattern::ShootingStar,
        Pattern::HangingMan,
        Pattern::GravestoneDoji,
        Pattern::BullishKicker,
        Pattern::BearishKicker,
        Pattern::BullishEngulfing,
        Pattern::BearishEngulfing,
        Pattern::BullishHarami,
        Pattern::BearishHarami,
        Pattern::PiercingLine,
        Pattern::DarkCloudCover,
        Pattern::TweezerBottom,
        Pattern::TweezerTop,
        Pattern::MorningStar,
        Pattern::EveningStar,
        Pattern::MorningDojiStar,
        Pattern::EveningDojiStar,
        Pattern::BullishAbandonedBaby,
        Pattern::BearishAbandonedBaby,
        Pattern::ThreeWhiteSoldiers,
        Pattern::ThreeBlackCrows,
        Pattern::ThreeInsideUp,
        Pattern::ThreeInsideDown,
        Pattern::ThreeOutsideUp,
        Pattern::ThreeOutsideDown,
        Pattern::BullishThreeLineStrike,
        Pattern::BearishThreeLineStrike,
    ];

    /// Wire tag, identical to the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Pattern::Doji => "DOJI",
            Pattern::SpinningTop => "SPINNING_TOP",
            Pattern::Marubozu => "MARUBOZU",
            Pattern::Star => "STAR",
            Pattern::Hammer => "HAMMER",
            Pattern::InvertedHammer => "INVERTED_HAMMER",
            Pattern::DragonflyDoji => "DRAGONFLY_DOJI",
            Pattern::ShootingStar => "SHOOTING_STAR",
            Pattern::HangingMan => "HANGING_MAN",
            Pattern::GravestoneDoji => "GRAVESTONE_DOJI",
            Pattern::BullishKicker => "BULLISH_KICKER",
            Pattern::BearishKicker => "BEARISH_KICKER",
            Pattern::BullishEngulfing => "BULLISH_ENGULFING",
            Pattern::BearishEngulfing => "BEARISH_ENGULFING",
            Pattern::BullishHarami => "BULLISH_HARAMI",
            Pattern::BearishHarami => "BEARISH_HARAMI",
            Pattern::PiercingLine => "PIERCING_LINE",
            Pattern::DarkCloudCover => "DARK_CLOUD_COVER",
            Pattern::TweezerBottom => "TWEEZER_BOTTOM",
            Pattern::TweezerTop => "TWEEZER_TOP",
            Pattern::MorningStar => "MORNING_STAR",
            Pattern::EveningStar => "EVENING_STAR",
            Pattern::MorningDojiStar => "MORNING_DOJI_STAR",
            Pattern::EveningDojiStar => "EVENING_DOJI_STAR",
            Pattern::BullishAbandonedBaby => "BULLISH_ABANDONED_BABY",
            Pattern::BearishAbandonedBaby => "BEARISH_ABANDONED_BABY",
            Pattern::ThreeWhiteSoldiers => "THREE_WHITE_SOLDIERS",
            Pattern::ThreeBlackCrows => "THREE_BLACK_CROWS",
            Pattern::ThreeInsideUp => "THREE_INSIDE_UP",
            Pattern::ThreeInsideDown => "THREE_INSIDE_DOWN",
            Pattern::ThreeOutsideUp => "THREE_OUTSIDE_UP",
            Pattern::ThreeOutsideDown => "THREE_OUTSIDE_DOWN",
            Pattern::BullishThreeLineStrike => "BULLISH_THREE_LINE_STRIKE",
            Pattern::BearishThreeLineStrike => "BEARISH_THREE_LINE_STRIKE",
        }
    }

    /// Number of bars in the defining window (1..=4).
    pub const fn window_len(self) -> usize {
        match self {
            Pattern::Doji
            | Pattern::SpinningTop
            | Pattern::Marubozu
            | Pattern::Star
            | Pattern::Hammer
            | Pattern::InvertedHammer
            | Pattern::DragonflyDoji
            | Pattern::ShootingStar
            | Pattern::HangingMan
            | Pattern::GravestoneDoji => 1,
            Pattern::BullishKicker
            | Pattern::BearishKicker
            | Pattern::BullishEngulfing
            | Pattern::BearishEngulfing
            | Pattern::BullishHarami
            | Pattern::BearishHarami
            | Pattern::PiercingLine
            | Pattern::DarkCloudCover
            | Pattern::TweezerBottom
            | Pattern::TweezerTop => 2,
            Pattern::MorningStar
            | Pattern::EveningStar
            | Pattern::MorningDojiStar
            | Pattern::EveningDojiStar
            | Pattern::BullishAbandonedBaby
            | Pattern::BearishAbandonedBaby
            | Pattern::ThreeWhiteSoldiers
            | Pattern::ThreeBlackCrows
            | Pattern::ThreeInsideUp
            | Pattern::ThreeInsideDown
            | Pattern::ThreeOutsideUp
            | Pattern::ThreeOutsideDown => 3,
            Pattern::BullishThreeLineStrike | Pattern::BearishThreeLineStrike => 4,
        }
    }

    /// Confidence tier assigned when this pattern is emitted.
    pub const fn confidence(self) -> Confidence {
        match self {
            Pattern::BullishThreeLineStrike
            | Pattern::BearishThreeLineStrike
            | Pattern::MorningStar
            | Pattern::EveningStar
            | Pattern::MorningDojiStar
            | Pattern::EveningDojiStar
            | Pattern::BullishAbandonedBaby
            | Pattern::BearishAbandonedBaby
            | Pattern::ThreeWhiteSoldiers
            | Pattern::ThreeBlackCrows
            | Pattern::ThreeInsideUp
            | Pattern::ThreeInsideDown
            | Pattern::ThreeOutsideUp
            | Pattern::ThreeOutsideDown
            | Pattern::BullishKicker
            | Pattern::BearishKicker
            | Pattern::BullishEngulfing
            | Pattern::BearishEngulfing => Confidence::High,
            Pattern::BullishHarami
            | Pattern::BearishHarami
            | Pattern::PiercingLine
            | Pattern::DarkCloudCover
            | Pattern::TweezerBottom
            | Pattern::TweezerTop
            | Pattern::Hammer
            | Pattern::InvertedHammer
            | Pattern::DragonflyDoji
            | Pattern::ShootingStar
            | Pattern::HangingMan
            | Pattern::GravestoneDoji
            | Pattern::Marubozu => Confidence::Medium,
            Pattern::Doji | Pattern::SpinningTop | Pattern::Star => Confidence::Low,
        }
    }

    /// Fixed direction for directional patterns. `None` for the four neutral
    /// shapes whose signal depends on surrounding bars.
    pub const fn fixed_signal(self) -> Option<Signal> {
        match self {
            Pattern::Hammer
            | Pattern::InvertedHammer
            | Pattern::DragonflyDoji
            | Pattern::BullishKicker
            | Pattern::BullishEngulfing
            | Pattern::BullishHarami
            | Pattern::PiercingLine
            | Pattern::TweezerBottom
            | Pattern::MorningStar
            | Pattern::MorningDojiStar
            | Pattern::BullishAbandonedBaby
            | Pattern::ThreeWhiteSoldiers
            | Pattern::ThreeInsideUp
            | Pattern::ThreeOutsideUp
            | Pattern::BullishThreeLineStrike => Some(Signal::Buy),
            Pattern::ShootingStar
            | Pattern::HangingMan
            | Pattern::GravestoneDoji
            | Pattern::BearishKicker
            | Pattern::BearishEngulfing
            | Pattern::BearishHarami
            | Pattern::DarkCloudCover
            | Pattern::TweezerTop
            | Pattern::EveningStar
            | Pattern::EveningDojiStar
            | Pattern::BearishAbandonedBaby
            | Pattern::ThreeBlackCrows
            | Pattern::ThreeInsideDown
            | Pattern::ThreeOutsideDown
            | Pattern::BearishThreeLineStrike => Some(Signal::Sell),
            Pattern::Doji | Pattern::SpinningTop | Pattern::Marubozu | Pattern::Star => None,
        }
    }

    /// Human-readable text shipped with the signal, never used for logic.
    /// Marubozu is the one pattern whose wording follows the emitted
    /// direction.
    pub fn description(self, signal: Signal) -> &'static str {
        match self {
            Pattern::Doji => "Doji - Indecision, potential reversal",
            Pattern::SpinningTop => "Spinning Top - Market indecision",
            Pattern::Marubozu => match signal {
                Signal::Buy => "Bullish Marubozu - Strong momentum",
                Signal::Sell => "Bearish Marubozu - Strong momentum",
            },
            Pattern::Star => "Star - Small body, potential reversal",
            Pattern::Hammer => "Hammer - Bullish reversal",
            Pattern::InvertedHammer => "Inverted Hammer - Potential reversal",
            Pattern::DragonflyDoji => "Dragonfly Doji - Bullish signal",
            Pattern::ShootingStar => "Shooting Star - Bearish reversal",
            Pattern::HangingMan => "Hanging Man - Bearish signal",
            Pattern::GravestoneDoji => "Gravestone Doji - Bearish signal",
            Pattern::BullishKicker => "Bullish Kicker - Extremely strong reversal",
            Pattern::BearishKicker => "Bearish Kicker - Extremely strong reversal",
            Pattern::BullishEngulfing => "Bullish Engulfing - Strong buy signal",
            Pattern::BearishEngulfing => "Bearish Engulfing - Strong sell signal",
            Pattern::BullishHarami => "Bullish Harami - Potential reversal",
            Pattern::BearishHarami => "Bearish Harami - Potential reversal",
            Pattern::PiercingLine => "Piercing Line - Bullish reversal",
            Pattern::DarkCloudCover => "Dark Cloud Cover - Bearish reversal",
            Pattern::TweezerBottom => "Tweezer Bottom - Support level",
            Pattern::TweezerTop => "Tweezer Top - Resistance level",
            Pattern::MorningStar => "Morning Star - Strong bullish reversal",
            Pattern::EveningStar => "Evening Star - Strong bearish reversal",
            Pattern::MorningDojiStar => "Morning Doji Star - Strong bullish reversal with doji",
            Pattern::EveningDojiStar => "Evening Doji Star - Strong bearish reversal with doji",
            Pattern::BullishAbandonedBaby => {
                "Bullish Abandoned Baby - Extremely rare bullish reversal"
            }
            Pattern::BearishAbandonedBaby => {
                "Bearish Abandoned Baby - Extremely rare bearish reversal"
            }
            Pattern::ThreeWhiteSoldiers => "Three White Soldiers - Strong uptrend",
            Pattern::ThreeBlackCrows => "Three Black Crows - Strong downtrend",
            Pattern::ThreeInsideUp => "Three Inside Up - Bullish confirmation",
            Pattern::ThreeInsideDown => "Three Inside Down - Bearish confirmation",
            Pattern::ThreeOutsideUp => "Three Outside Up - Strong bullish signal",
            Pattern::ThreeOutsideDown => "Three Outside Down - Strong bearish signal",
            Pattern::BullishThreeLineStrike => {
                "Bullish Three Line Strike - Powerful continuation"
            }
            Pattern::BearishThreeLineStrike => {
                "Bearish Three Line Strike - Powerful continuation"
            }
        }
    }
}

/// One emitted signal: the pattern found at a bar, its direction and
/// confidence, and the index of the last bar of the matched window.
/// Copy, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSignal {
    pub pattern: Pattern,
    pub signal: Signal,
    pub confidence: Confidence,
    pub candle_index: usize,
    pub description: &'static str,
}

// ============================================================
// DETECTION API
// ============================================================

/// Scan the whole sequence and return every emitted signal, ordered by
/// strictly increasing `candle_index`.
///
/// Sequences shorter than two bars yield an empty list. Each index carries at
/// most one signal; index 0 never carries one.
pub fn detect_patterns<T: Ohlcv>(candles: &[T]) -> Vec<PatternSignal> {
    if candles.len() < 2 {
        return Vec::new();
    }
    (1..candles.len())
        .filter_map(|index| resolver::classify_at(candles, index))
        .collect()
}

/// The signal at the highest bar index, if any.
///
/// Indices are strictly increasing, so this is the last element of
/// [`detect_patterns`]: the match closest to the end of the sequence, which
/// is not necessarily on the final bar if trailing bars matched nothing.
pub fn latest_signal<T: Ohlcv>(candles: &[T]) -> Option<PatternSignal> {
    detect_patterns(candles).pop()
}

/// Check every bar for OHLCV consistency, reporting the first offender.
pub fn validate_bars<T: Ohlcv>(candles: &[T]) -> Result<()> {
    for (index, bar) in candles.iter().enumerate() {
        bar.validate().map_err(|e| match e {
            PatternError::InvalidOhlcv { reason, .. } => {
                PatternError::InvalidOhlcv { index, reason }
            }
        })?;
    }
    Ok(())
}

/// [`detect_patterns`] with up-front input validation, for callers that want
/// malformed feeds rejected instead of silently unmatched.
pub fn detect_patterns_validated<T: Ohlcv>(candles: &[T]) -> Result<Vec<PatternSignal>> {
    validate_bars(candles)?;
    Ok(detect_patterns(candles))
}

// ============================================================
// PARALLEL SCANNING
// ============================================================

use rayon::prelude::*;

/// Result of scanning a single instrument.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub symbol: String,
    pub signals: Vec<PatternSignal>,
}

/// Error from scanning a single instrument.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub symbol: String,
    pub error: PatternError,
}

/// Validated detection over many independent instruments in parallel.
/// Detection is stateless, so per-instrument runs share nothing.
pub fn scan_parallel<'a, T, I>(instruments: I) -> (Vec<ScanResult>, Vec<ScanError>)
where
    T: Ohlcv + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
{
    let results: Vec<_> = instruments
        .into_par_iter()
        .map(|(symbol, candles)| {
            detect_patterns_validated(candles)
                .map(|signals| ScanResult {
                    symbol: symbol.to_string(),
                    signals,
                })
                .map_err(|error| ScanError {
                    symbol: symbol.to_string(),
                    error,
                })
        })
        .collect();

    let mut successes = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => errors.push(e),
        }
    }

    (successes, errors)
}

// ============================================================
// TESTS
// ============================================================

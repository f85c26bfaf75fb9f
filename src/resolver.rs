//! Priority resolution and signal emission.
//!
//! Every classifier predicate is paired with its pattern tag in one ordered
//! rule table. For a given bar the table is scanned top to bottom and the
//! first match is emitted, so at most one [`PatternSignal`] exists per bar
//! and adding a pattern is a data change, not a control-flow change.
//!
//! Rules read bars through a trailing-window snapshot of at most four bars
//! (the widest formation), taken once per bar with no heap allocation.

use crate::classifiers::{
    four_bar::{is_bearish_three_line_strike, is_bullish_three_line_strike},
    shape,
    single_bar::{
        is_dragonfly_doji, is_gravestone_doji, is_hammer, is_hanging_man, is_inverted_hammer,
        is_shooting_star,
    },
    three_bar::{
        is_bearish_abandoned_baby, is_bullish_abandoned_baby, is_evening_doji_star,
        is_evening_star, is_morning_doji_star, is_morning_star, is_three_black_crows,
        is_three_inside_down, is_three_inside_up, is_three_outside_down, is_three_outside_up,
        is_three_white_soldiers,
    },
    two_bar::{
        is_bearish_engulfing, is_bearish_harami, is_bearish_kicker, is_bullish_engulfing,
        is_bullish_harami, is_bullish_kicker, is_dark_cloud_cover, is_piercing_line,
        is_tweezer_bottom, is_tweezer_top,
    },
};
use crate::{Ohlcv, OhlcvExt, Pattern, PatternSignal, Signal};

// ============================================================
// TRAILING WINDOW
// ============================================================

/// Plain-value copy of one bar, detached from the caller's bar type.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl Snapshot {
    fn of<T: Ohlcv>(bar: &T) -> Self {
        Self {
            open: bar.open(),
            high: bar.high(),
            low: bar.low(),
            close: bar.close(),
        }
    }
}

impl Ohlcv for Snapshot {
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
        0.0
    }
}

/// Trailing window ending at the bar under classification. The current and
/// previous bars always exist (index 0 is never classified); the two older
/// slots are present only when the sequence reaches back that far.
#[derive(Debug, Clone, Copy)]
struct Window {
    current: Snapshot,
    prev: Snapshot,
    third_back: Option<Snapshot>,
    fourth_back: Option<Snapshot>,
}

impl Window {
    fn at<T: Ohlcv>(bars: &[T], index: usize) -> Option<Self> {
        if index == 0 || index >= bars.len() {
            return None;
        }
        Some(Self {
            current: Snapshot::of(&bars[index]),
            prev: Snapshot::of(&bars[index - 1]),
            third_back: index.checked_sub(2).map(|i| Snapshot::of(&bars[i])),
            fourth_back: index.checked_sub(3).map(|i| Snapshot::of(&bars[i])),
        })
    }

    /// Chronological (first, second, third) view ending at the current bar.
    fn triple(&self) -> Option<(Snapshot, Snapshot, Snapshot)> {
        self.third_back.map(|first| (first, self.prev, self.current))
    }

    /// Chronological (first, second, third, fourth) view ending at the
    /// current bar.
    fn quad(&self) -> Option<(Snapshot, Snapshot, Snapshot, Snapshot)> {
        match (self.fourth_back, self.third_back) {
            (Some(first), Some(second)) => Some((first, second, self.prev, self.current)),
            _ => None,
        }
    }
}

// ============================================================
// PRIORITY TABLE
// ============================================================

type Matcher = fn(&Window) -> bool;

/// Fixed evaluation order: wide formations first, neutral shapes last.
/// The first matching rule wins and no later rule is consulted for the bar.
const PRIORITY: &[(Pattern, Matcher)] = &[
    // Quadruple-bar strike patterns
    (Pattern::BullishThreeLineStrike, |w| {
        w.quad()
            .is_some_and(|(a, b, c, d)| is_bullish_three_line_strike(&a, &b, &c, &d))
    }),
    (Pattern::BearishThreeLineStrike, |w| {
        w.quad()
            .is_some_and(|(a, b, c, d)| is_bearish_three_line_strike(&a, &b, &c, &d))
    }),
    // Triple-bar patterns: abandoned baby, doji star, star, soldiers/crows,
    // three inside, three outside
    (Pattern::BullishAbandonedBaby, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_bullish_abandoned_baby(&a, &b, &c))
    }),
    (Pattern::BearishAbandonedBaby, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_bearish_abandoned_baby(&a, &b, &c))
    }),
    (Pattern::MorningDojiStar, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_morning_doji_star(&a, &b, &c))
    }),
    (Pattern::EveningDojiStar, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_evening_doji_star(&a, &b, &c))
    }),
    (Pattern::MorningStar, |w| {
        w.triple().is_some_and(|(a, b, c)| is_morning_star(&a, &b, &c))
    }),
    (Pattern::EveningStar, |w| {
        w.triple().is_some_and(|(a, b, c)| is_evening_star(&a, &b, &c))
    }),
    (Pattern::ThreeWhiteSoldiers, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_three_white_soldiers(&a, &b, &c))
    }),
    (Pattern::ThreeBlackCrows, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_three_black_crows(&a, &b, &c))
    }),
    (Pattern::ThreeInsideUp, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_three_inside_up(&a, &b, &c))
    }),
    (Pattern::ThreeInsideDown, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_three_inside_down(&a, &b, &c))
    }),
    (Pattern::ThreeOutsideUp, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_three_outside_up(&a, &b, &c))
    }),
    (Pattern::ThreeOutsideDown, |w| {
        w.triple()
            .is_some_and(|(a, b, c)| is_three_outside_down(&a, &b, &c))
    }),
    // Double-bar patterns: kicker, engulfing, harami, piercing/dark-cloud,
    // tweezer
    (Pattern::BullishKicker, |w| is_bullish_kicker(&w.prev, &w.current)),
    (Pattern::BearishKicker, |w| is_bearish_kicker(&w.prev, &w.current)),
    (Pattern::BullishEngulfing, |w| {
        is_bullish_engulfing(&w.prev, &w.current)
    }),
    (Pattern::BearishEngulfing, |w| {
        is_bearish_engulfing(&w.prev, &w.current)
    }),
    (Pattern::BullishHarami, |w| is_bullish_harami(&w.prev, &w.current)),
    (Pattern::BearishHarami, |w| is_bearish_harami(&w.prev, &w.current)),
    (Pattern::PiercingLine, |w| is_piercing_line(&w.prev, &w.current)),
    (Pattern::DarkCloudCover, |w| is_dark_cloud_cover(&w.prev, &w.current)),
    (Pattern::TweezerBottom, |w| is_tweezer_bottom(&w.prev, &w.current)),
    (Pattern::TweezerTop, |w| is_tweezer_top(&w.prev, &w.current)),
    // Single-bar patterns. The shooting star slot is preserved for order
    // compatibility even though the direction-agnostic inverted hammer
    // always claims its geometry first.
    (Pattern::Hammer, |w| is_hammer(&w.current)),
    (Pattern::InvertedHammer, |w| is_inverted_hammer(&w.current)),
    (Pattern::DragonflyDoji, |w| is_dragonfly_doji(&w.current)),
    (Pattern::ShootingStar, |w| is_shooting_star(&w.current)),
    (Pattern::HangingMan, |w| is_hanging_man(&w.current)),
    (Pattern::GravestoneDoji, |w| is_gravestone_doji(&w.current)),
    // Neutral shapes, always last
    (Pattern::Marubozu, |w| shape::is_marubozu(&w.current)),
    (Pattern::Doji, |w| shape::is_doji(&w.current)),
    (Pattern::SpinningTop, |w| shape::is_spinning_top(&w.current)),
    (Pattern::Star, |w| shape::is_star(&w.current)),
];

// ============================================================
// CLASSIFICATION
// ============================================================

/// Classify the bar at `index`, returning the highest-priority pattern match
/// for that bar, if any.
///
/// Index 0 is never classified: the minimal evaluation window is two bars.
/// Out-of-range indices yield `None`.
pub fn classify_at<T: Ohlcv>(bars: &[T], index: usize) -> Option<PatternSignal> {
    let window = Window::at(bars, index)?;
    let pattern = PRIORITY
        .iter()
        .find_map(|(pattern, matches)| matches(&window).then_some(*pattern))?;
    let signal = resolve_signal(pattern, &window);

    Some(PatternSignal {
        pattern,
        signal,
        confidence: pattern.confidence(),
        candle_index: index,
        description: pattern.description(signal),
    })
}

/// Directional patterns carry a fixed signal. The neutral shapes derive
/// theirs from local context: marubozu follows its own bar's direction,
/// while doji, spinning top and star signal contrarian to the previous bar.
/// The contrarian convention is inherited behavior, kept as-is.
fn resolve_signal(pattern: Pattern, window: &Window) -> Signal {
    if let Some(signal) = pattern.fixed_signal() {
        return signal;
    }
    match pattern {
        Pattern::Marubozu => {
            if window.current.is_bullish() {
                Signal::Buy
            } else {
                Signal::Sell
            }
        }
        _ => {
            if window.prev.is_bullish() {
                Signal::Sell
            } else {
                Signal::Buy
            }
        }
    }
}

//! Integration tests for signal emission.
//!
//! Every emittable pattern gets at least one fixture, with neighboring bars
//! chosen so no higher-priority rule claims the window first.

use candlesig::prelude::*;

fn bar(open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(0, open, high, low, close, 1000.0)
}

fn series(bars: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    bars.iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Candle::new(i as i64 * 60, o, h, l, c, 1000.0))
        .collect()
}

fn expect(
    bars: &[Candle],
    index: usize,
    pattern: Pattern,
    signal: Signal,
    confidence: Confidence,
) -> PatternSignal {
    let emitted = classify_at(bars, index)
        .unwrap_or_else(|| panic!("expected {pattern:?} at index {index}, got nothing"));
    assert_eq!(emitted.pattern, pattern, "at index {index}");
    assert_eq!(emitted.signal, signal);
    assert_eq!(emitted.confidence, confidence);
    assert_eq!(emitted.candle_index, index);
    assert_eq!(emitted.description, pattern.description(signal));
    emitted
}

// ============================================================
// SINGLE-BAR PATTERNS
// ============================================================

#[test]
fn hammer_emits_buy() {
    let bars = vec![bar(10.2, 10.9, 9.8, 10.0), bar(10.0, 10.6, 8.0, 10.5)];
    expect(&bars, 1, Pattern::Hammer, Signal::Buy, Confidence::Medium);
}

#[test]
fn inverted_hammer_emits_buy() {
    let bars = vec![bar(10.0, 10.6, 9.9, 10.4), bar(11.0, 13.5, 10.9, 11.5)];
    expect(
        &bars,
        1,
        Pattern::InvertedHammer,
        Signal::Buy,
        Confidence::Medium,
    );
}

#[test]
fn shooting_star_geometry_reports_inverted_hammer() {
    // The bearish long-upper-shadow bar satisfies both predicates; the
    // direction-agnostic inverted hammer sits higher in the order, so the
    // dedicated shooting-star tag is never the one emitted.
    let star = bar(11.5, 13.5, 10.9, 11.0);
    assert!(is_shooting_star(&star));

    let bars = vec![bar(10.0, 10.6, 9.9, 10.4), star];
    expect(
        &bars,
        1,
        Pattern::InvertedHammer,
        Signal::Buy,
        Confidence::Medium,
    );
}

#[test]
fn hanging_man_emits_sell() {
    let bars = vec![bar(10.3, 10.8, 10.1, 10.6), bar(10.5, 10.6, 8.0, 10.0)];
    expect(&bars, 1, Pattern::HangingMan, Signal::Sell, Confidence::Medium);
}

#[test]
fn dragonfly_doji_emits_buy() {
    let bars = vec![bar(10.1, 10.3, 9.9, 10.25), bar(10.0, 10.02, 9.0, 10.0)];
    expect(
        &bars,
        1,
        Pattern::DragonflyDoji,
        Signal::Buy,
        Confidence::Medium,
    );
}

#[test]
fn gravestone_doji_emits_sell() {
    let bars = vec![bar(9.8, 10.1, 9.7, 10.0), bar(10.0, 11.0, 9.98, 10.0)];
    expect(
        &bars,
        1,
        Pattern::GravestoneDoji,
        Signal::Sell,
        Confidence::Medium,
    );
}

// ============================================================
// NEUTRAL SHAPES
// ============================================================

#[test]
fn doji_after_bullish_bar_emits_sell() {
    let bars = vec![bar(10.0, 10.55, 9.95, 10.3), bar(10.0, 10.5, 9.5, 10.05)];
    expect(&bars, 1, Pattern::Doji, Signal::Sell, Confidence::Low);
}

#[test]
fn doji_after_bearish_bar_emits_buy() {
    let bars = vec![bar(10.9, 11.05, 10.3, 10.5), bar(10.0, 10.5, 9.5, 10.05)];
    expect(&bars, 1, Pattern::Doji, Signal::Buy, Confidence::Low);
}

#[test]
fn spinning_top_is_contrarian() {
    let bars = vec![bar(10.2, 10.5, 9.9, 10.0), bar(10.0, 10.4, 9.55, 10.1)];
    expect(&bars, 1, Pattern::SpinningTop, Signal::Buy, Confidence::Low);
}

#[test]
fn star_catches_small_bodies_the_spinning_top_rejects() {
    // Small body but the upper shadow is shorter than the body, so the
    // spinning-top rule passes over the bar and the generic star claims it.
    let bars = vec![bar(9.7, 10.1, 9.6, 10.0), bar(10.0, 10.2, 9.2, 10.15)];
    expect(&bars, 1, Pattern::Star, Signal::Sell, Confidence::Low);
}

#[test]
fn marubozu_direction_drives_signal_and_description() {
    let up = vec![bar(10.0, 10.7, 9.95, 10.3), bar(10.1, 10.6, 10.1, 10.6)];
    let signal = expect(&up, 1, Pattern::Marubozu, Signal::Buy, Confidence::Medium);
    assert_eq!(signal.description, "Bullish Marubozu - Strong momentum");

    let down = vec![bar(10.0, 10.7, 9.95, 10.3), bar(10.6, 10.6, 10.1, 10.1)];
    let signal = expect(&down, 1, Pattern::Marubozu, Signal::Sell, Confidence::Medium);
    assert_eq!(signal.description, "Bearish Marubozu - Strong momentum");
}

#[test]
fn flat_bar_emits_nothing() {
    let bars = vec![bar(10.0, 10.55, 9.95, 10.3), bar(10.0, 10.0, 10.0, 10.0)];
    assert!(classify_at(&bars, 1).is_none());
}

// ============================================================
// DOUBLE-BAR PATTERNS
// ============================================================

#[test]
fn bullish_engulfing_is_exclusive() {
    let bars = vec![bar(10.0, 10.0, 8.0, 8.0), bar(7.0, 11.0, 7.0, 11.0)];
    expect(
        &bars,
        1,
        Pattern::BullishEngulfing,
        Signal::Buy,
        Confidence::High,
    );
    // The mirrored predicate must not also hold for the same pair.
    assert!(!is_bearish_engulfing(&bars[0], &bars[1]));
}

#[test]
fn bearish_engulfing_emits_sell() {
    let bars = vec![bar(8.0, 10.1, 7.9, 10.0), bar(11.0, 11.1, 6.9, 7.0)];
    expect(
        &bars,
        1,
        Pattern::BearishEngulfing,
        Signal::Sell,
        Confidence::High,
    );
}

#[test]
fn bullish_harami_emits_buy() {
    let bars = vec![bar(12.0, 12.1, 7.9, 8.0), bar(9.0, 11.2, 8.8, 10.5)];
    expect(
        &bars,
        1,
        Pattern::BullishHarami,
        Signal::Buy,
        Confidence::Medium,
    );
}

#[test]
fn bearish_harami_emits_sell() {
    let bars = vec![bar(8.0, 12.1, 7.9, 12.0), bar(11.0, 11.2, 8.8, 9.5)];
    expect(
        &bars,
        1,
        Pattern::BearishHarami,
        Signal::Sell,
        Confidence::Medium,
    );
}

#[test]
fn piercing_line_emits_buy() {
    let bars = vec![bar(10.0, 10.2, 8.9, 9.0), bar(8.7, 9.9, 8.5, 9.8)];
    expect(
        &bars,
        1,
        Pattern::PiercingLine,
        Signal::Buy,
        Confidence::Medium,
    );
}

#[test]
fn dark_cloud_cover_emits_sell() {
    let bars = vec![bar(9.0, 10.1, 8.8, 10.0), bar(10.3, 10.5, 9.1, 9.2)];
    expect(
        &bars,
        1,
        Pattern::DarkCloudCover,
        Signal::Sell,
        Confidence::Medium,
    );
}

#[test]
fn tweezer_bottom_emits_buy() {
    let bars = vec![bar(10.0, 10.2, 9.0, 9.2), bar(9.3, 9.9, 9.001, 9.8)];
    expect(
        &bars,
        1,
        Pattern::TweezerBottom,
        Signal::Buy,
        Confidence::Medium,
    );
}

#[test]
fn tweezer_top_emits_sell() {
    let bars = vec![bar(9.8, 10.5, 9.6, 10.4), bar(10.1, 10.501, 9.1, 9.2)];
    expect(
        &bars,
        1,
        Pattern::TweezerTop,
        Signal::Sell,
        Confidence::Medium,
    );
}

#[test]
fn bullish_kicker_emits_buy() {
    let bars = vec![bar(10.0, 10.1, 8.9, 9.0), bar(9.5, 11.0, 9.45, 10.9)];
    expect(
        &bars,
        1,
        Pattern::BullishKicker,
        Signal::Buy,
        Confidence::High,
    );
}

#[test]
fn bearish_kicker_emits_sell() {
    let bars = vec![bar(9.0, 10.1, 8.95, 10.0), bar(9.5, 9.55, 8.1, 8.2)];
    expect(
        &bars,
        1,
        Pattern::BearishKicker,
        Signal::Sell,
        Confidence::High,
    );
}

// ============================================================
// TRIPLE-BAR PATTERNS
// ============================================================

#[test]
fn morning_star_emits_buy() {
    let bars = series(&[
        (10.0, 10.1, 7.9, 8.0),
        (7.8, 8.0, 7.2, 7.5),
        (7.6, 9.9, 7.5, 9.8),
    ]);
    expect(&bars, 2, Pattern::MorningStar, Signal::Buy, Confidence::High);
}

#[test]
fn evening_star_emits_sell() {
    let bars = series(&[
        (8.0, 10.1, 7.9, 10.0),
        (10.2, 10.8, 10.0, 10.45),
        (10.3, 10.4, 7.5, 7.6),
    ]);
    expect(&bars, 2, Pattern::EveningStar, Signal::Sell, Confidence::High);
}

#[test]
fn morning_doji_star_outranks_morning_star() {
    let bars = series(&[
        (10.0, 10.1, 7.9, 8.0),
        (7.5, 7.8, 7.2, 7.52),
        (7.7, 9.9, 7.6, 9.8),
    ]);
    expect(
        &bars,
        2,
        Pattern::MorningDojiStar,
        Signal::Buy,
        Confidence::High,
    );
}

#[test]
fn evening_doji_star_outranks_evening_star() {
    let bars = series(&[
        (8.0, 10.15, 7.9, 10.0),
        (10.2, 10.5, 10.1, 10.22),
        (10.0, 10.05, 7.5, 7.6),
    ]);
    expect(
        &bars,
        2,
        Pattern::EveningDojiStar,
        Signal::Sell,
        Confidence::High,
    );
}

#[test]
fn bullish_abandoned_baby_emits_buy() {
    let bars = series(&[
        (10.0, 10.1, 8.5, 8.6),
        (8.0, 8.3, 7.8, 8.02),
        (8.4, 9.5, 8.35, 9.4),
    ]);
    expect(
        &bars,
        2,
        Pattern::BullishAbandonedBaby,
        Signal::Buy,
        Confidence::High,
    );
}

#[test]
fn bearish_abandoned_baby_emits_sell() {
    let bars = series(&[
        (8.6, 10.0, 8.5, 9.9),
        (10.3, 10.5, 10.1, 10.32),
        (9.9, 9.95, 8.8, 8.9),
    ]);
    expect(
        &bars,
        2,
        Pattern::BearishAbandonedBaby,
        Signal::Sell,
        Confidence::High,
    );
}

#[test]
fn three_white_soldiers_emit_buy() {
    let bars = series(&[
        (9.0, 9.8, 8.9, 9.6),
        (9.3, 10.4, 9.2, 10.2),
        (9.9, 11.0, 9.8, 10.8),
    ]);
    expect(
        &bars,
        2,
        Pattern::ThreeWhiteSoldiers,
        Signal::Buy,
        Confidence::High,
    );
}

#[test]
fn three_black_crows_emit_sell() {
    let bars = series(&[
        (10.8, 10.9, 9.9, 10.0),
        (10.5, 10.6, 9.3, 9.4),
        (9.9, 10.0, 8.7, 8.8),
    ]);
    expect(
        &bars,
        2,
        Pattern::ThreeBlackCrows,
        Signal::Sell,
        Confidence::High,
    );
}

#[test]
fn three_inside_up_confirms_the_harami_bar() {
    let bars = series(&[
        (12.0, 12.1, 7.9, 8.0),
        (9.0, 11.2, 8.8, 10.5),
        (10.3, 11.8, 10.2, 11.5),
    ]);
    // The middle bar is already a bullish harami on its own window; the
    // confirmation bar gets the stronger three-inside-up tag.
    let signals = detect_patterns(&bars);
    assert_eq!(signals.len(), 2);
    assert_eq!(signals[0].pattern, Pattern::BullishHarami);
    assert_eq!(signals[0].candle_index, 1);
    assert_eq!(signals[1].pattern, Pattern::ThreeInsideUp);
    assert_eq!(signals[1].candle_index, 2);
    assert_eq!(signals[1].signal, Signal::Buy);
    assert_eq!(signals[1].confidence, Confidence::High);
}

#[test]
fn three_inside_down_emits_sell() {
    let bars = series(&[
        (8.0, 12.1, 7.9, 12.0),
        (11.0, 11.2, 8.8, 9.5),
        (9.3, 9.4, 8.0, 8.1),
    ]);
    expect(
        &bars,
        2,
        Pattern::ThreeInsideDown,
        Signal::Sell,
        Confidence::High,
    );
}

#[test]
fn three_outside_up_emits_buy() {
    let bars = series(&[
        (10.0, 10.0, 8.0, 8.0),
        (7.0, 11.0, 7.0, 11.0),
        (10.8, 12.0, 10.7, 11.8),
    ]);
    expect(
        &bars,
        2,
        Pattern::ThreeOutsideUp,
        Signal::Buy,
        Confidence::High,
    );
}

#[test]
fn three_outside_down_emits_sell() {
    let bars = series(&[
        (8.0, 10.1, 7.9, 10.0),
        (11.0, 11.1, 6.9, 7.0),
        (7.5, 7.6, 6.4, 6.5),
    ]);
    expect(
        &bars,
        2,
        Pattern::ThreeOutsideDown,
        Signal::Sell,
        Confidence::High,
    );
}

// ============================================================
// QUADRUPLE-BAR PATTERNS
// ============================================================

#[test]
fn bullish_three_line_strike_emits_buy() {
    let bars = series(&[
        (9.0, 9.7, 8.9, 9.5),
        (9.4, 10.2, 9.3, 10.0),
        (9.9, 10.8, 9.8, 10.5),
        (10.7, 10.8, 8.4, 8.5),
    ]);
    let signal = expect(
        &bars,
        3,
        Pattern::BullishThreeLineStrike,
        Signal::Buy,
        Confidence::High,
    );
    assert_eq!(
        signal.description,
        "Bullish Three Line Strike - Powerful continuation"
    );
}

#[test]
fn bearish_three_line_strike_emits_sell() {
    let bars = series(&[
        (10.0, 10.1, 9.2, 9.4),
        (9.5, 9.6, 8.7, 8.9),
        (9.0, 9.1, 8.2, 8.4),
        (8.2, 10.6, 8.1, 10.5),
    ]);
    let signal = expect(
        &bars,
        3,
        Pattern::BearishThreeLineStrike,
        Signal::Sell,
        Confidence::High,
    );
    assert_eq!(
        signal.description,
        "Bearish Three Line Strike - Powerful continuation"
    );
}

#[test]
fn strike_outranks_the_engulfing_on_its_last_bar() {
    let bars = series(&[
        (9.0, 9.7, 8.9, 9.5),
        (9.4, 10.2, 9.3, 10.0),
        (9.9, 10.8, 9.8, 10.5),
        (10.7, 10.8, 8.4, 8.5),
    ]);
    // The strike's final bar also engulfs the third bar; the four-bar rule
    // must win.
    assert!(is_bearish_engulfing(&bars[2], &bars[3]));
    let signal = classify_at(&bars, 3).unwrap();
    assert_eq!(signal.pattern, Pattern::BullishThreeLineStrike);
}

// ============================================================
// SEQUENCE-LEVEL BEHAVIOR
// ============================================================

#[test]
fn quiet_sequence_ends_in_single_engulfing() {
    let bars = series(&[
        (10.0, 10.55, 9.95, 10.3),
        (10.3, 10.85, 10.15, 10.6),
        (10.9, 11.05, 10.3, 10.5),
        (10.4, 11.2, 10.2, 11.0),
    ]);

    let signals = detect_patterns(&bars);
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].pattern, Pattern::BullishEngulfing);
    assert_eq!(signals[0].candle_index, 3);

    assert_eq!(latest_signal(&bars), Some(signals[0]));
}

#[test]
fn detection_is_idempotent() {
    let bars = series(&[
        (10.0, 10.55, 9.95, 10.3),
        (10.3, 10.85, 10.15, 10.6),
        (10.9, 11.05, 10.3, 10.5),
        (10.4, 11.2, 10.2, 11.0),
    ]);
    assert_eq!(detect_patterns(&bars), detect_patterns(&bars));
}

#[test]
fn indices_are_strictly_increasing() {
    let bars = series(&[
        (12.0, 12.1, 7.9, 8.0),
        (9.0, 11.2, 8.8, 10.5),
        (10.3, 11.8, 10.2, 11.5),
        (11.3, 12.8, 11.2, 12.5),
    ]);
    let signals = detect_patterns(&bars);
    assert!(!signals.is_empty());
    for pair in signals.windows(2) {
        assert!(pair[0].candle_index < pair[1].candle_index);
    }
    assert!(signals.iter().all(|s| s.candle_index >= 1));
}

#[test]
fn validated_detection_rejects_bad_feed() {
    let mut bars = series(&[
        (10.0, 10.0, 8.0, 8.0),
        (7.0, 11.0, 7.0, 11.0),
    ]);
    bars[1].high = 5.0; // below the low

    let err = detect_patterns_validated(&bars).unwrap_err();
    assert!(matches!(err, PatternError::InvalidOhlcv { index: 1, .. }));

    bars[1].high = 11.0;
    assert_eq!(detect_patterns_validated(&bars).unwrap().len(), 1);
}

//! Candlestick pattern classifiers.
//!
//! Pure predicate functions over fixed-size bar windows, grouped by window
//! size:
//!
//! - **Shape (1 bar)**: doji, spinning top, marubozu, star
//! - **Single-bar**: hammer family, directional doji variants
//! - **Double-bar**: engulfing, harami, piercing/dark-cloud, tweezers, kickers
//! - **Triple-bar**: star family, soldiers/crows, three inside/outside
//! - **Quadruple-bar**: three-line strikes
//!
//! Every predicate is a total function of its window; none inspects trend
//! context or performs I/O. Exclusivity between overlapping predicates is the
//! job of [`crate::resolver`], not of the predicates themselves.

pub mod four_bar;
pub mod shape;
pub mod single_bar;
pub mod three_bar;
pub mod two_bar;

// Re-export all predicates for convenience
pub use four_bar::*;
pub use shape::*;
pub use single_bar::*;
pub use three_bar::*;
pub use two_bar::*;

//! Fixture universes and values for column tests.

use mzcol_core::{SharedUniverse, Universe};

/// Ion polarity of a scan, as stored in feature lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

/// Universe over all [`Polarity`] values in declaration order.
pub fn polarity_universe() -> SharedUniverse<Polarity> {
    Universe::new([
        Polarity::Positive,
        Polarity::Negative,
        Polarity::Neutral,
        Polarity::Unknown,
    ])
    .into_shared()
}

/// The three-symbol universe `[A, B, C]`.
pub fn abc_universe() -> SharedUniverse<&'static str> {
    Universe::new(["A", "B", "C"]).into_shared()
}

/// Distinct, non-sentinel m/z values for index `i`.
pub fn mz_value(i: usize) -> f64 {
    100.0 + i as f64 * 0.125
}

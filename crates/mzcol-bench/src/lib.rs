//! Benchmark profiles for mzcol columns.
//!
//! Provides a pre-built feature list for benchmarking:
//!
//! - [`FeatureList`]: one column per encoding, sized like a typical
//!   aligned feature list
//! - [`feature_list_profile`]: a filled 10K-row list
//! - [`synthetic_mz`]: deterministic m/z values via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use mzcol_arena::{HeapStorage, SharedStorage, StorageConfig};
use mzcol_column::{
    AlignmentScores, AlignmentScoresColumn, ColumnError, DoubleColumn, FloatIntervalColumn,
    IntColumn, SymbolColumn,
};
use mzcol_core::{ClosedInterval, SharedUniverse, Universe};

/// Rows in [`feature_list_profile`].
pub const REFERENCE_ROWS: usize = 10_000;

/// Charge states stored in the symbol column.
pub const CHARGE_STATES: [&str; 5] = ["+1", "+2", "+3", "-1", "-2"];

/// One column of every encoding over a shared storage.
pub struct FeatureList {
    /// Storage the columns allocate from.
    pub storage: SharedStorage,
    /// Row m/z.
    pub mz: DoubleColumn,
    /// Number of detected isotopes.
    pub isotopes: IntColumn,
    /// Charge state symbol.
    pub charge: SymbolColumn<&'static str>,
    /// Retention-time window.
    pub rt_range: FloatIntervalColumn,
    /// Alignment scores.
    pub scores: AlignmentScoresColumn,
}

impl FeatureList {
    /// Empty columns with `rows` null slots each.
    pub fn new(rows: usize) -> Result<Self, ColumnError> {
        let storage: SharedStorage = Arc::new(HeapStorage::new(StorageConfig::new("bench"))?);
        let charges: SharedUniverse<&'static str> = Universe::new(CHARGE_STATES).into_shared();
        Ok(Self {
            mz: DoubleColumn::new(Arc::clone(&storage), rows)?,
            isotopes: IntColumn::new(Arc::clone(&storage), rows)?,
            charge: SymbolColumn::new(Arc::clone(&storage), charges, rows)?,
            rt_range: FloatIntervalColumn::new(Arc::clone(&storage), rows)?,
            scores: AlignmentScoresColumn::new(Arc::clone(&storage), rows)?,
            storage,
        })
    }

    /// Write row `i` of the synthetic data set into every column.
    pub fn fill_row(&mut self, i: usize, seed: u64) -> Result<(), ColumnError> {
        let mz = synthetic_mz(i, seed);
        let rt = (i % 600) as f32 * 0.1;
        self.mz.put(i, Some(mz))?;
        self.isotopes.put(i, Some((i % 4) as i32))?;
        self.charge.put(i, Some(CHARGE_STATES[i % CHARGE_STATES.len()]))?;
        self.rt_range.put(i, Some(ClosedInterval::new(rt, rt + 0.25)))?;
        self.scores.put(
            i,
            Some(AlignmentScores {
                rate: 1.0 - (i % 10) as f32 * 0.05,
                aligned_features: (i % 20) as i32,
                extra_features: (i % 3) as i32,
                weighted_distance_score: 0.8,
                mz_ppm_delta: (mz % 3.0) as f32,
                max_mz_delta: Some(mz * 1e-6),
                max_rt_delta: Some(0.02),
                max_mobility_delta: None,
            }),
        )
    }
}

/// A [`REFERENCE_ROWS`]-row feature list with every row filled.
pub fn feature_list_profile(seed: u64) -> Result<FeatureList, ColumnError> {
    let mut list = FeatureList::new(REFERENCE_ROWS)?;
    for i in 0..REFERENCE_ROWS {
        list.fill_row(i, seed)?;
    }
    Ok(list)
}

/// Deterministic m/z in `[100, 2100)` for row `i`.
pub fn synthetic_mz(i: usize, seed: u64) -> f64 {
    let h = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add((i as u64).wrapping_mul(1442695040888963407));
    100.0 + (h >> 11) as f64 / (1u64 << 53) as f64 * 2000.0
}

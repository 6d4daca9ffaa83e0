//! Alignment quality scores of aligned feature-list rows.
//!
//! Physical layout (40 bytes, 8-byte aligned):
//!
//! ```text
//! offset  field                     kind
//!  0      max_mz_delta              f64   NaN = absent
//!  8      rate                      f32   NaN = whole record null
//! 12      aligned_features          i32
//! 16      extra_features            i32
//! 20      weighted_distance_score   f32
//! 24      mz_ppm_delta              f32
//! 28      max_rt_delta              f32   NaN = absent
//! 32      max_mobility_delta        f32   NaN = absent
//! 36      _padding                  4 bytes
//! ```

use mzcol_core::FieldKind;

use crate::column::Column;
use crate::record::{Record, RecordEncoding, RecordFields, RecordFieldsMut};

/// How well a row's features were aligned across samples.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentScores {
    /// Fraction of samples the row was aligned in, `aligned / total`.
    pub rate: f32,
    /// Number of samples with an aligned feature.
    pub aligned_features: i32,
    /// Features in the row beyond one per sample.
    pub extra_features: i32,
    /// Distance score weighted over m/z, RT and mobility tolerances.
    pub weighted_distance_score: f32,
    /// Mean m/z deviation in ppm.
    pub mz_ppm_delta: f32,
    /// Largest absolute m/z deviation.
    pub max_mz_delta: Option<f64>,
    /// Largest retention-time deviation.
    pub max_rt_delta: Option<f32>,
    /// Largest ion-mobility deviation.
    pub max_mobility_delta: Option<f32>,
}

const RATE: usize = 0;
const ALIGNED_FEATURES: usize = 1;
const EXTRA_FEATURES: usize = 2;
const WEIGHTED_DISTANCE_SCORE: usize = 3;
const MZ_PPM_DELTA: usize = 4;
const MAX_MZ_DELTA: usize = 5;
const MAX_RT_DELTA: usize = 6;
const MAX_MOBILITY_DELTA: usize = 7;

impl AlignmentScores {
    /// Combine scores of two alignment passes over the same row.
    ///
    /// Counts add up (saturating at `i32::MAX`). The rate is recomputed from
    /// the combined counts when both passes report a rate; maxima keep the
    /// larger deviation.
    pub fn merge(&self, other: &Self) -> Self {
        let aligned_features = self.aligned_features.saturating_add(other.aligned_features);
        let total_self = samples(self.aligned_features, self.rate);
        let total_other = samples(other.aligned_features, other.rate);
        let rate = match (total_self, total_other) {
            (Some(a), Some(b)) if a + b > 0.0 => aligned_features as f32 / (a + b),
            _ => self.rate.max(other.rate),
        };
        let weight = |score: f32, n: i32| score * n as f32;
        let weighted_mean = |a: f32, b: f32| {
            if aligned_features == 0 {
                0.0
            } else {
                (weight(a, self.aligned_features) + weight(b, other.aligned_features))
                    / aligned_features as f32
            }
        };
        Self {
            rate,
            aligned_features,
            extra_features: self.extra_features.saturating_add(other.extra_features),
            weighted_distance_score: weighted_mean(
                self.weighted_distance_score,
                other.weighted_distance_score,
            ),
            mz_ppm_delta: weighted_mean(self.mz_ppm_delta, other.mz_ppm_delta),
            max_mz_delta: max_option(self.max_mz_delta, other.max_mz_delta),
            max_rt_delta: max_option(self.max_rt_delta, other.max_rt_delta),
            max_mobility_delta: max_option(self.max_mobility_delta, other.max_mobility_delta),
        }
    }
}

fn samples(aligned: i32, rate: f32) -> Option<f32> {
    (rate > 0.0).then(|| aligned as f32 / rate)
}

fn max_option<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b > a { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

impl Record for AlignmentScores {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("rate", FieldKind::F32),
        ("aligned_features", FieldKind::I32),
        ("extra_features", FieldKind::I32),
        ("weighted_distance_score", FieldKind::F32),
        ("mz_ppm_delta", FieldKind::F32),
        ("max_mz_delta", FieldKind::F64),
        ("max_rt_delta", FieldKind::F32),
        ("max_mobility_delta", FieldKind::F32),
    ];

    const NULL_FIELD: &'static str = "rate";

    fn decode(fields: &RecordFields<'_>) -> Self {
        Self {
            rate: fields.get(RATE),
            aligned_features: fields.get(ALIGNED_FEATURES),
            extra_features: fields.get(EXTRA_FEATURES),
            weighted_distance_score: fields.get(WEIGHTED_DISTANCE_SCORE),
            mz_ppm_delta: fields.get(MZ_PPM_DELTA),
            max_mz_delta: fields.get_nullable(MAX_MZ_DELTA),
            max_rt_delta: fields.get_nullable(MAX_RT_DELTA),
            max_mobility_delta: fields.get_nullable(MAX_MOBILITY_DELTA),
        }
    }

    fn encode(&self, fields: &mut RecordFieldsMut<'_>) {
        fields.set(RATE, self.rate);
        fields.set(ALIGNED_FEATURES, self.aligned_features);
        fields.set(EXTRA_FEATURES, self.extra_features);
        fields.set(WEIGHTED_DISTANCE_SCORE, self.weighted_distance_score);
        fields.set(MZ_PPM_DELTA, self.mz_ppm_delta);
        fields.set_nullable(MAX_MZ_DELTA, self.max_mz_delta);
        fields.set_nullable(MAX_RT_DELTA, self.max_rt_delta);
        fields.set_nullable(MAX_MOBILITY_DELTA, self.max_mobility_delta);
    }
}

/// Column of [`AlignmentScores`].
pub type AlignmentScoresColumn = Column<RecordEncoding<AlignmentScores>>;

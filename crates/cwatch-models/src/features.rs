//! Acoustic feature vector.

use serde::{Deserialize, Serialize};

/// The four scalar descriptors summarizing an audio clip.
///
/// Computed once per invocation and immutable afterwards. All fields are
/// non-negative; `zero_crossing_rate` is a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticFeatureVector {
    /// Clip length in seconds
    pub duration: f64,
    /// Mean frame-wise root-mean-square amplitude
    pub rms_energy: f64,
    /// Mean frame-wise energy-weighted spectral centroid in Hz
    pub spectral_centroid: f64,
    /// Mean frame-wise fraction of sign changes
    pub zero_crossing_rate: f64,
}

impl AcousticFeatureVector {
    /// Check the vector's range invariants.
    pub fn is_valid(&self) -> bool {
        self.duration >= 0.0
            && self.rms_energy >= 0.0
            && self.spectral_centroid >= 0.0
            && (0.0..=1.0).contains(&self.zero_crossing_rate)
    }
}

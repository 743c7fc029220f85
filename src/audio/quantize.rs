//! Sample quantization to signed 16-bit PCM.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToneError};

/// Scale factor from normalized samples to 16-bit PCM.
pub const PCM_SCALE: f64 = 32767.0;

/// What to do with samples whose quantized value leaves the i16 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipPolicy {
    /// Saturate at -32768 / 32767.
    #[default]
    Clip,

    /// Keep the low 16 bits (two's-complement wraparound).
    Wrap,

    /// Fail with SAMPLE_OUT_OF_RANGE.
    Error,
}

impl ClipPolicy {
    /// Returns the string representation of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipPolicy::Clip => "clip",
            ClipPolicy::Wrap => "wrap",
            ClipPolicy::Error => "error",
        }
    }

    /// Parses a policy from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clip" | "clamp" => Some(ClipPolicy::Clip),
            "wrap" => Some(ClipPolicy::Wrap),
            "error" | "strict" => Some(ClipPolicy::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClipPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Quantizes one normalized sample, rounding toward zero.
///
/// `index` only feeds the error message under [`ClipPolicy::Error`].
pub fn quantize_sample(sample: f64, index: usize, policy: ClipPolicy) -> Result<i16> {
    let scaled = (sample * PCM_SCALE).trunc();
    let in_range = (i16::MIN as f64..=i16::MAX as f64).contains(&scaled);

    match policy {
        ClipPolicy::Clip => Ok(scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16),
        // NaN maps to 0 through the saturating cast
        ClipPolicy::Wrap => Ok(scaled as i64 as i16),
        ClipPolicy::Error if in_range => Ok(scaled as i16),
        ClipPolicy::Error => Err(ToneError::sample_out_of_range(index, scaled)),
    }
}

/// Quantizes a whole sample sequence.
pub fn quantize(samples: &[f64], policy: ClipPolicy) -> Result<Vec<i16>> {
    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| quantize_sample(s, i, policy))
        .collect()
}

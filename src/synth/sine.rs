//! Sine tone generator.
//!
//! Produces normalized floating-point samples for a single-frequency tone.
//! The raw generator is a pure function; [`ToneSpec`] adds parameter
//! validation for callers at the program boundary.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::wav::MAX_WAV_FRAMES;
use crate::error::{Result, ToneError};

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default peak amplitude of generated tones.
pub const DEFAULT_AMPLITUDE: f64 = 0.5;

/// Generates `floor(duration * sample_rate)` samples of a sine wave.
///
/// The i-th sample is `amplitude * sin(2π * frequency * i / sample_rate)`.
/// A non-positive or NaN duration, or a zero sample rate, yields an empty
/// vector. Frequencies at or above Nyquist alias; nothing corrects them.
///
/// # Example
///
/// ```
/// use tonegen::synth::generate_sine_wave;
///
/// let samples = generate_sine_wave(1.0, 1.0, 4, 1.0);
/// assert_eq!(samples.len(), 4);
/// assert!((samples[1] - 1.0).abs() < 1e-12);
/// ```
pub fn generate_sine_wave(
    frequency: f64,
    duration: f64,
    sample_rate: u32,
    amplitude: f64,
) -> Vec<f64> {
    let total = sample_count(duration, sample_rate);
    let rate = sample_rate as f64;

    (0..total)
        .map(|i| {
            let t = i as f64 / rate;
            amplitude * (2.0 * PI * frequency * t).sin()
        })
        .collect()
}

/// Number of samples covering `duration` seconds, truncated.
///
/// Float-to-int `as` saturates, so negative and NaN durations map to 0.
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    (duration * sample_rate as f64) as usize
}

/// Parameters of a single tone, validated before generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Tone length in seconds.
    pub duration: f64,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Peak amplitude; values above 1.0 clip according to the clip policy.
    pub amplitude: f64,
}

impl ToneSpec {
    /// Creates a spec with the default sample rate and amplitude.
    pub fn new(frequency: f64, duration: f64) -> Self {
        Self {
            frequency,
            duration,
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    /// Checks every parameter, returning a descriptive error for the first
    /// invalid one.
    pub fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ToneError::invalid_parameter(
                "frequency",
                format!("{} Hz (must be finite and > 0)", self.frequency),
            ));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ToneError::invalid_parameter(
                "duration",
                format!("{} s (must be finite and >= 0)", self.duration),
            ));
        }
        if self.sample_rate == 0 {
            return Err(ToneError::invalid_parameter("sample rate", "0 Hz (must be > 0)"));
        }
        let frames = self.duration * self.sample_rate as f64;
        if frames > MAX_WAV_FRAMES as f64 {
            return Err(ToneError::invalid_parameter(
                "duration",
                format!(
                    "{} s at {} Hz needs {} frames (WAV limit {})",
                    self.duration, self.sample_rate, frames as u64, MAX_WAV_FRAMES
                ),
            ));
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(ToneError::invalid_parameter(
                "amplitude",
                format!("{} (must be finite and >= 0)", self.amplitude),
            ));
        }
        if self.frequency >= self.sample_rate as f64 / 2.0 {
            debug!(
                frequency = self.frequency,
                sample_rate = self.sample_rate,
                "frequency at or above Nyquist, output will alias"
            );
        }
        Ok(())
    }

    /// Validates the spec and generates its samples.
    pub fn generate(&self) -> Result<Vec<f64>> {
        self.validate()?;
        let samples = generate_sine_wave(
            self.frequency,
            self.duration,
            self.sample_rate,
            self.amplitude,
        );
        debug!(
            frequency = self.frequency,
            samples = samples.len(),
            "generated sine tone"
        );
        Ok(samples)
    }

    /// Number of samples this spec produces.
    pub fn len(&self) -> usize {
        sample_count(self.duration, self.sample_rate)
    }

    /// Returns true if this spec produces no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

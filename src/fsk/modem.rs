//! Binary FSK modulator and demodulator.
//!
//! Each frame bit becomes one fixed-length sine burst at `f0` (0) or `f1`
//! (1). Demodulation compares Goertzel power at both carriers per block.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audio::wav::MAX_WAV_FRAMES;
use crate::error::{Result, ToneError};
use crate::fsk::frame::{decode_frame, encode_frame, LENGTH_BITS, SYNC_WORD};
use crate::fsk::goertzel::goertzel_power;
use crate::synth::{generate_sine_wave, sample_count, DEFAULT_AMPLITUDE};

/// Carrier frequency for a 0 bit, in Hz.
pub const DEFAULT_F0: f64 = 35_000.0;

/// Carrier frequency for a 1 bit, in Hz.
pub const DEFAULT_F1: f64 = 45_000.0;

/// Length of one bit in seconds (200 bits per second).
pub const DEFAULT_BIT_DURATION: f64 = 0.005;

/// Sample rate high enough to carry both default carriers below Nyquist.
pub const DEFAULT_FSK_SAMPLE_RATE: u32 = 96_000;

/// Modem parameters shared by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FskConfig {
    /// Carrier for 0 bits (Hz).
    pub f0: f64,
    /// Carrier for 1 bits (Hz).
    pub f1: f64,
    /// Seconds per bit. Shorter is faster but less reliable.
    pub bit_duration: f64,
    /// Sample rate of the rendered signal (Hz).
    pub sample_rate: u32,
    /// Peak amplitude of each burst.
    pub amplitude: f64,
}

impl Default for FskConfig {
    fn default() -> Self {
        Self {
            f0: DEFAULT_F0,
            f1: DEFAULT_F1,
            bit_duration: DEFAULT_BIT_DURATION,
            sample_rate: DEFAULT_FSK_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl FskConfig {
    /// Number of samples rendered per bit.
    pub fn samples_per_bit(&self) -> usize {
        sample_count(self.bit_duration, self.sample_rate)
    }

    /// Returns a copy using `sample_rate`, as read from a WAV header.
    pub fn with_sample_rate(self, sample_rate: u32) -> Self {
        Self { sample_rate, ..self }
    }

    /// Checks carriers, bit length and amplitude.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(ToneError::invalid_parameter("sample rate", "0 Hz (must be > 0)"));
        }
        let nyquist = self.sample_rate as f64 / 2.0;
        for (name, freq) in [("f0", self.f0), ("f1", self.f1)] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(ToneError::invalid_parameter(
                    name,
                    format!("{} Hz (must be finite and > 0)", freq),
                ));
            }
            if freq >= nyquist {
                return Err(ToneError::invalid_parameter(
                    name,
                    format!(
                        "{} Hz is at or above Nyquist ({} Hz) for {} Hz sampling",
                        freq, nyquist, self.sample_rate
                    ),
                ));
            }
        }
        if self.f0 == self.f1 {
            return Err(ToneError::invalid_parameter(
                "carriers",
                format!("f0 and f1 are both {} Hz", self.f0),
            ));
        }
        if !self.bit_duration.is_finite() || self.samples_per_bit() == 0 {
            return Err(ToneError::invalid_parameter(
                "bit duration",
                format!(
                    "{} s gives no samples per bit at {} Hz",
                    self.bit_duration, self.sample_rate
                ),
            ));
        }
        if !self.amplitude.is_finite() || self.amplitude <= 0.0 {
            return Err(ToneError::invalid_parameter(
                "amplitude",
                format!("{} (must be finite and > 0)", self.amplitude),
            ));
        }
        frame_fits_wav(SYNC_WORD.len() + LENGTH_BITS, self)
    }
}

/// Rejects frames whose rendered length exceeds the WAV frame limit.
fn frame_fits_wav(bit_count: usize, config: &FskConfig) -> Result<()> {
    let total = bit_count as u64 * config.samples_per_bit() as u64;
    if total > MAX_WAV_FRAMES {
        return Err(ToneError::invalid_parameter(
            "bit duration",
            format!(
                "{} bits of {} s need {} samples (WAV limit {})",
                bit_count, config.bit_duration, total, MAX_WAV_FRAMES
            ),
        ));
    }
    Ok(())
}

/// Renders `payload` as one FSK frame.
pub fn fsk_encode(payload: &[u8], config: &FskConfig) -> Result<Vec<f64>> {
    config.validate()?;
    let bits = encode_frame(payload)?;
    frame_fits_wav(bits.len(), config)?;

    let zero = generate_sine_wave(config.f0, config.bit_duration, config.sample_rate, config.amplitude);
    let one = generate_sine_wave(config.f1, config.bit_duration, config.sample_rate, config.amplitude);

    let mut samples = Vec::with_capacity(bits.len() * zero.len());
    for bit in &bits {
        samples.extend_from_slice(if *bit { &one } else { &zero });
    }

    info!(
        payload_bytes = payload.len(),
        bits = bits.len(),
        samples = samples.len(),
        "encoded FSK frame"
    );
    Ok(samples)
}

/// Recovers one bit per full block of `samples_per_bit` samples.
pub fn demodulate_bits(samples: &[f64], config: &FskConfig) -> Vec<bool> {
    let block = config.samples_per_bit();
    if block == 0 {
        return Vec::new();
    }

    samples
        .chunks_exact(block)
        .map(|chunk| {
            let p0 = goertzel_power(chunk, config.f0, config.sample_rate);
            let p1 = goertzel_power(chunk, config.f1, config.sample_rate);
            p1 > p0
        })
        .collect()
}

/// Demodulates `samples` and returns the payload of the first frame.
pub fn fsk_decode(samples: &[f64], config: &FskConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let bits = demodulate_bits(samples, config);
    debug!(bits = bits.len(), "demodulated bitstream");

    let payload = decode_frame(&bits)?;
    info!(payload_bytes = payload.len(), "decoded FSK frame");
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn default_config_is_valid() {
        let config = FskConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.samples_per_bit() >= 479);
    }

    #[test]
    fn carriers_above_nyquist_rejected() {
        let config = FskConfig::default().with_sample_rate(44100);
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
        assert!(err.message.contains("Nyquist"));
    }

    #[test]
    fn equal_carriers_rejected() {
        let config = FskConfig { f1: DEFAULT_F0, ..FskConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn too_short_bits_rejected() {
        let config = FskConfig { bit_duration: 1e-9, ..FskConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bits_longer_than_wav_limit_rejected() {
        // 32 header bits of 1000 s at 96 kHz need 3.07e9 samples
        let config = FskConfig { bit_duration: 1000.0, ..FskConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("WAV limit"));
    }

    #[test]
    fn payload_longer_than_wav_limit_rejected() {
        // Header fits (3.07e8 samples) but 232 bits of 9.6e6 samples do not
        let config = FskConfig { bit_duration: 100.0, ..FskConfig::default() };
        assert!(config.validate().is_ok());
        let err = fsk_encode(&[0u8; 25], &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
        assert!(err.message.contains("WAV limit"));
    }

    #[test]
    fn encoded_length() {
        let config = FskConfig::default();
        let samples = fsk_encode(b"hi", &config).unwrap();
        assert_eq!(samples.len(), (16 + 16 + 16) * config.samples_per_bit());
    }

    #[test]
    fn encode_decode_in_memory() {
        let config = FskConfig::default();
        let samples = fsk_encode(b"Hello, FSK!", &config).unwrap();
        assert_eq!(fsk_decode(&samples, &config).unwrap(), b"Hello, FSK!".to_vec());
    }

    #[test]
    fn audible_carriers() {
        let config = FskConfig {
            f0: 1200.0,
            f1: 2200.0,
            bit_duration: 0.01,
            sample_rate: 44100,
            amplitude: 0.8,
        };
        let samples = fsk_encode(b"bell 202", &config).unwrap();
        assert_eq!(fsk_decode(&samples, &config).unwrap(), b"bell 202".to_vec());
    }

    #[test]
    fn silence_has_no_sync() {
        let config = FskConfig::default();
        let silence = vec![0.0; config.samples_per_bit() * 40];
        let err = fsk_decode(&silence, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::SyncNotFound);
    }

    #[test]
    fn demodulate_ignores_partial_block() {
        let config = FskConfig::default();
        let mut samples = fsk_encode(b"", &config).unwrap();
        samples.extend(vec![0.0; config.samples_per_bit() / 2]);
        assert_eq!(demodulate_bits(&samples, &config).len(), 32);
    }
}

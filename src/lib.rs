//! tonegen: sine tone synthesis and 16-bit PCM WAV output.
//!
//! This library generates single-frequency tones, quantizes them to mono
//! 16-bit PCM and writes them as WAV files. A small FSK modem built on the
//! same pieces turns text into audio and back.
//!
//! # Modules
//!
//! - [`synth`]: Sine generator and validated tone parameters (ToneSpec)
//! - [`audio`]: Quantization (ClipPolicy) and the WAV codec
//! - [`fsk`]: FSK framing, encoding and Goertzel decoding
//! - [`config`]: Layered runtime configuration (ToneConfig)
//! - [`error`]: Error types and codes (ToneError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use tonegen::{write_wav, ClipPolicy, ToneSpec};
//!
//! // One second of 440 Hz at 44.1 kHz, amplitude 0.5
//! let spec = ToneSpec::new(440.0, 1.0);
//! let samples = spec.generate()?;
//! write_wav(Path::new("a4.wav"), &samples, spec.sample_rate, ClipPolicy::Clip)?;
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod fsk;
pub mod synth;

// Re-export commonly used types at crate root for convenience
pub use audio::{read_wav, write_wav, ClipPolicy, WavData};
pub use config::ToneConfig;
pub use error::{ErrorCode, Result, ToneError};
pub use fsk::{fsk_decode, fsk_encode, FskConfig};
pub use synth::{generate_sine_wave, ToneSpec};

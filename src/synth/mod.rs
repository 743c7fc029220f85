//! Signal synthesis module.
//!
//! Provides the sine tone generator used for plain tones and FSK carriers.

pub mod sine;

// Re-export commonly used items
pub use sine::{
    generate_sine_wave, sample_count, ToneSpec, DEFAULT_AMPLITUDE, DEFAULT_SAMPLE_RATE,
};

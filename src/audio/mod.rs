//! Audio output module.
//!
//! Provides 16-bit quantization and WAV file reading and writing.

pub mod quantize;
pub mod wav;

// Re-export commonly used items
pub use quantize::{quantize, quantize_sample, ClipPolicy, PCM_SCALE};
pub use wav::{
    pcm_spec, read_wav, read_wav_from_buffer, samples_to_duration, write_wav,
    write_wav_to_buffer, WavData, BITS_PER_SAMPLE, CHANNELS, MAX_WAV_FRAMES,
};

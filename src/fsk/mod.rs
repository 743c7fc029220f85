//! Frequency-shift keying text modem.
//!
//! Encodes bytes as sine bursts built from [`crate::synth`] and decodes
//! them back with a Goertzel detector.

pub mod bits;
pub mod frame;
pub mod goertzel;
pub mod modem;

// Re-export commonly used items
pub use bits::{bits_to_bytes, bytes_to_bits};
pub use frame::{decode_frame, encode_frame, SYNC_WORD};
pub use goertzel::goertzel_power;
pub use modem::{demodulate_bits, fsk_decode, fsk_encode, FskConfig};

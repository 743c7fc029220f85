//! Frame layout: sync word, 16-bit payload length, payload bits.

use tracing::debug;

use crate::error::{Result, ToneError};
use crate::fsk::bits::{bits_to_bytes, bits_to_u16, bytes_to_bits, u16_to_bits};

/// Sync word preceding every frame: `1111000011110000`.
pub const SYNC_WORD: [bool; 16] = [
    true, true, true, true, false, false, false, false, true, true, true, true, false, false,
    false, false,
];

/// Width of the length field in bits.
pub const LENGTH_BITS: usize = 16;

/// Builds the bit sequence for one frame carrying `payload`.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<bool>> {
    let len = u16::try_from(payload.len()).map_err(|_| ToneError::payload_too_long(payload.len()))?;

    let mut bits = Vec::with_capacity(SYNC_WORD.len() + LENGTH_BITS + payload.len() * 8);
    bits.extend_from_slice(&SYNC_WORD);
    bits.extend(u16_to_bits(len));
    bits.extend(bytes_to_bits(payload));
    Ok(bits)
}

/// Locates the first frame in `bits` and returns its payload.
pub fn decode_frame(bits: &[bool]) -> Result<Vec<u8>> {
    let sync_at = find_sync(bits).ok_or_else(|| ToneError::sync_not_found(bits.len()))?;
    debug!(sync_at, total_bits = bits.len(), "sync word found");
    let after_sync = &bits[sync_at + SYNC_WORD.len()..];

    if after_sync.len() < LENGTH_BITS {
        return Err(ToneError::truncated_frame(LENGTH_BITS, after_sync.len()));
    }
    let payload_len = bits_to_u16(&after_sync[..LENGTH_BITS]) as usize;
    let needed = LENGTH_BITS + payload_len * 8;
    if after_sync.len() < needed {
        return Err(ToneError::truncated_frame(needed, after_sync.len()));
    }

    Ok(bits_to_bytes(&after_sync[LENGTH_BITS..needed]))
}

/// Index of the first sync word in `bits`.
pub fn find_sync(bits: &[bool]) -> Option<usize> {
    bits.windows(SYNC_WORD.len()).position(|w| w == SYNC_WORD)
}

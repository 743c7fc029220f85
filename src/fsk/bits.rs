//! Byte and bit conversions, most significant bit first.

/// Expands bytes into bits, MSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&b| (0..8).rev().map(move |i| (b >> i) & 1 == 1))
        .collect()
}

/// Packs bits into bytes, MSB first. A trailing partial byte is dropped.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect()
}

/// Reads `bits` as an unsigned big-endian integer.
pub fn bits_to_u16(bits: &[bool]) -> u16 {
    bits.iter().fold(0u16, |acc, &bit| (acc << 1) | bit as u16)
}

/// Writes `value` as 16 bits, MSB first.
pub fn u16_to_bits(value: u16) -> Vec<bool> {
    (0..16).rev().map(|i| (value >> i) & 1 == 1).collect()
}

/// Renders bits as a string of '0' and '1'.
pub fn format_bits(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

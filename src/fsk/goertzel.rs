//! Single-bin DFT power via the Goertzel recurrence.

use std::f64::consts::PI;

/// Power of `block` at the DFT bin nearest `target_freq`.
///
/// The bin index is `floor(0.5 + N * f / sample_rate)`. Returns 0 for an
/// empty block.
pub fn goertzel_power(block: &[f64], target_freq: f64, sample_rate: u32) -> f64 {
    let len = block.len();
    if len == 0 {
        return 0.0;
    }

    let k = (0.5 + len as f64 * target_freq / sample_rate as f64).floor();
    let omega = 2.0 * PI * k / len as f64;
    let coeff = 2.0 * omega.cos();

    let (mut s1, mut s2) = (0.0f64, 0.0f64);
    for &x in block {
        let s0 = x + coeff * s1 - s2;
        s2 = s1;
        s1 = s0;
    }

    s1 * s1 + s2 * s2 - coeff * s1 * s2
}

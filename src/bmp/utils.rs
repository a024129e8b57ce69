//! 1-bit row packing and unpacking, most significant bit first.

use alloc::vec::Vec;

/// Expand `width` bits from a packed row into on/off states.
///
/// Bits past `width` in the last meaningful byte are ignored, as is any
/// row padding after it. `input` must hold at least `width.div_ceil(8)` bytes.
pub(crate) fn unpack_bits(input: &[u8], width: usize, out: &mut Vec<bool>) {
    let bits = input
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 0x01 != 0));
    out.extend(bits.take(width));
}

/// Pack on/off states 8 per byte into `out`, flushing a partial trailing byte,
/// then zero-pad to `stride` bytes.
pub(crate) fn pack_bits(bits: impl IntoIterator<Item = bool>, stride: usize, out: &mut Vec<u8>) {
    let start = out.len();
    let mut cur = 0u8;
    let mut filled = 0u8;
    for bit in bits {
        cur |= u8::from(bit) << (7 - filled);
        filled += 1;
        if filled == 8 {
            out.push(cur);
            cur = 0;
            filled = 0;
        }
    }
    if filled != 0 {
        out.push(cur);
    }
    let written = out.len() - start;
    out.extend(core::iter::repeat_n(0u8, stride.saturating_sub(written)));
}

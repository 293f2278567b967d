//! SIMD-within-a-register helpers for the decimal fast path.
//!
//! Eight ASCII code units are loaded as one little-endian word, tested for
//! being all decimal digits with a single bitwise check
//! (<https://lemire.me/blog/2018/09/30/quickly-identifying-a-sequence-of-digits-in-a-string-of-characters/>),
//! and converted to a binary value in a constant number of arithmetic
//! operations
//! (<https://lemire.me/blog/2022/01/21/swar-explained-parsing-eight-digits/>).
//! The conversion relies on mod-2^64 wrapping; the relevant result bits are
//! exact. The scalar digit loop in the parent module is the semantic
//! reference for this block and the two are held equivalent by test.

const ASCII_ZEROES: u64 = 0x3030_3030_3030_3030;

/// Powers of ten representable in a `u64`.
pub(crate) const POWERS_OF_TEN: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

#[inline]
pub(crate) const fn power_of_10(pw: usize) -> u64 {
    POWERS_OF_TEN[pw]
}

/// Loads the first `n` (1..=8) units of `bytes` into the low bytes of a
/// little-endian word.
#[inline]
pub(crate) fn load_word(bytes: &[u8], n: usize) -> u64 {
    debug_assert!((1..=8).contains(&n) && bytes.len() >= n);
    let mut buf = [0u8; 8];
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(buf)
}

/// Whether all eight units in `word` are ASCII decimal digits.
#[inline]
pub(crate) fn word_is_all_decimal(word: u64) -> bool {
    (word & word.wrapping_add(0x0606_0606_0606_0606) & 0xF0F0_F0F0_F0F0_F0F0) == ASCII_ZEROES
}

/// Right-aligns a partial chunk of `n` digit units so it converts as an
/// eight-digit word: the loaded units move to the high bytes and the low
/// bytes are filled with ASCII zeroes.
#[inline]
pub(crate) fn pad_partial_word(word: u64, n: usize) -> u64 {
    debug_assert!((1..=8).contains(&n));
    let shift = 8 * (8 - n as u32);
    let shifted = word << shift;
    let mask = !0u64 << shift;
    (shifted & mask) | (!mask & ASCII_ZEROES)
}

/// Converts a word of eight ASCII decimal digits (first digit in the low
/// byte) to its binary value.
#[inline]
pub(crate) fn parse_eight_digits(word: u64) -> u64 {
    const MASK: u64 = 0x0000_00FF_0000_00FF;
    const MUL1: u64 = 100 + (1_000_000u64 << 32);
    const MUL2: u64 = 1 + (10_000u64 << 32);

    let mut w = word.wrapping_sub(ASCII_ZEROES);
    w = w.wrapping_mul(10).wrapping_add(w >> 8);
    (w & MASK)
        .wrapping_mul(MUL1)
        .wrapping_add(((w >> 16) & MASK).wrapping_mul(MUL2))
        >> 32
}

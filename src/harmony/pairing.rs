// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Bijective integer pairing for stable pair identity.
//!
//! Interval visuals are keyed by a single integer derived from the two
//! pitch indices, so a pair that keeps sounding across frames keeps the
//! same key and its visual can be updated in place instead of rebuilt.
//! The encoding is Szudzik's elegant pairing, which is cheap and exactly
//! invertible.

/// A pair of pitch indices packed into one integer
pub type PairKey = u64;

/// Largest input value that cannot overflow the 64-bit key:
/// `floor(sqrt(u64::MAX))`.
pub const MAX_INPUT: u64 = 4_294_967_295;

/// Pack an ordered pair of non-negative integers into a single key.
///
/// # Panics
/// Panics if either input exceeds [`MAX_INPUT`]. Callers only ever supply
/// pitch indices in `0..96`, so a violation is a programming error and
/// fails fast rather than silently corrupting a key.
pub fn encode(a: u64, b: u64) -> PairKey {
    assert!(
        a <= MAX_INPUT && b <= MAX_INPUT,
        "pair inputs out of range: ({}, {})",
        a,
        b
    );
    if a >= b {
        a * a + a + b
    } else {
        a + b * b
    }
}

/// Unpack a key back into the ordered pair it encodes.
pub fn decode(key: PairKey) -> (u64, u64) {
    let s = isqrt(key);
    let d = key - s * s;
    if d < s {
        (d, s)
    } else {
        (s, d - s)
    }
}

/// Integer square root; the f64 estimate can be off by one near the top
/// of the range, so correct it
fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}

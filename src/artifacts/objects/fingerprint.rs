//! Content fingerprint
//!
//! A weighted checksum over the character codes of a file's text. It is not a
//! cryptographic hash: two files of equal length may share a fingerprint, and
//! such files are treated as the same content within a snapshot.
//!
//! ## Formula
//!
//! For content `c[0..L)` decoded as UTF-16 code units:
//! `sum = Σ c[i] * WEIGHTS[i mod 5]  (mod 2^31 - 1)`
//!
//! The formula must stay stable, stored artifact names depend on it.

/// Weight cycle applied to consecutive character codes
pub const FINGERPRINT_WEIGHTS: [u64; 5] = [1, 3, 7, 11, 13];

/// Modulus keeping the sum below 2^31 - 1
pub const FINGERPRINT_MODULUS: u64 = (1 << 31) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// Weighted sum of the character codes
    sum: u32,
    /// Number of character codes the sum was computed over
    length: usize,
}

impl Fingerprint {
    /// Fingerprint raw file bytes
    ///
    /// The bytes are decoded as UTF-8 (invalid sequences become U+FFFD) and
    /// weighted per UTF-16 code unit.
    pub fn of(content: &[u8]) -> Self {
        let text = String::from_utf8_lossy(content);

        let (sum, length) = text
            .encode_utf16()
            .enumerate()
            .fold((0u64, 0usize), |(sum, _), (i, code)| {
                let weight = FINGERPRINT_WEIGHTS[i % FINGERPRINT_WEIGHTS.len()];
                ((sum + code as u64 * weight) % FINGERPRINT_MODULUS, i + 1)
            });

        Fingerprint {
            sum: sum as u32,
            length,
        }
    }

    pub fn sum(&self) -> u32 {
        self.sum
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Weighted checksum of raw content, see [`Fingerprint::of`]
pub fn fingerprint(content: &[u8]) -> u32 {
    Fingerprint::of(content).sum()
}

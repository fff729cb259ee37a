//! Hash functions mapping keys to bucket indices.
//!
//! Both built-in variants reduce the same 32-bit digest, [`poly31`]:
//!
//! | Variant | Bucket |
//! |---------|--------|
//! | [`HashVariant::Direct`] | `abs(poly31(key)) % buckets` |
//! | [`HashVariant::Scaled`] | `abs(poly31(key) / 31) % buckets` |
//!
//! `abs` is the unsigned magnitude, so `i32::MIN` maps to `2^31` instead of
//! overflowing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Divisor applied to the digest by [`HashVariant::Scaled`].
pub const SCALE_DIVISOR: i32 = 31;

/// 32-bit polynomial rolling hash over the UTF-16 code units of `key`.
///
/// `h = 31 * h + unit`, wrapping on overflow, starting from zero. The empty
/// string hashes to zero.
///
/// ```
/// use nexus_buckets::poly31;
///
/// assert_eq!(poly31(""), 0);
/// assert_eq!(poly31("a"), 97);
/// assert_eq!(poly31("Aa"), poly31("BB"));
/// ```
#[inline]
pub fn poly31(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Maps a key to a bucket index.
///
/// Implementations must be pure and return a value in `[0, bucket_count)`.
/// Implemented for [`HashVariant`] and for any `Fn(&str, usize) -> usize`.
pub trait BucketHasher {
    /// Returns the bucket for `key` in a table of `bucket_count` buckets.
    fn bucket(&self, key: &str, bucket_count: usize) -> usize;
}

impl<F> BucketHasher for F
where
    F: Fn(&str, usize) -> usize,
{
    #[inline]
    fn bucket(&self, key: &str, bucket_count: usize) -> usize {
        self(key, bucket_count)
    }
}

/// The two built-in hash functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashVariant {
    /// Digest magnitude modulo bucket count.
    Direct,
    /// Digest divided by [`SCALE_DIVISOR`] before taking the magnitude.
    Scaled,
}

impl HashVariant {
    /// Every variant, in report order.
    pub const ALL: [Self; 2] = [Self::Direct, Self::Scaled];

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Scaled => "scaled",
        }
    }

    /// Unsigned value reduced modulo the bucket count.
    #[inline]
    pub fn magnitude(self, key: &str) -> u32 {
        let digest = poly31(key);
        match self {
            Self::Direct => digest.unsigned_abs(),
            // Truncates toward zero, so i32::MIN / 31 cannot overflow.
            Self::Scaled => (digest / SCALE_DIVISOR).unsigned_abs(),
        }
    }
}

impl BucketHasher for HashVariant {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn bucket(&self, key: &str, bucket_count: usize) -> usize {
        let reduced = u64::from(self.magnitude(key)) % bucket_count as u64;
        // reduced < bucket_count, which is a usize.
        reduced as usize
    }
}

impl fmt::Display for HashVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hash variant '{0}' (expected 'direct' or 'scaled')")]
pub struct UnknownVariant(pub String);

impl FromStr for HashVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "scaled" => Ok(Self::Scaled),
            _ => Err(UnknownVariant(s.to_owned())),
        }
    }
}

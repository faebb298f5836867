use crate::{Base32Text, Result};
use core::fmt;
use core::hash::Hash;

/// Trait for layout-compatible 64-bit flake identifiers.
///
/// This abstracts the `timestamp`, `randomness` and `shard_id` partitions of
/// a packed `u64` so one generator implementation can drive every layout.
/// Both provided layouts ([`UlidFlake`], [`UlidFlakeScalable`]) reserve the
/// sign bit, so `to_u64` is always a non-negative value when reinterpreted
/// as `i64`.
///
/// [`UlidFlake`]: crate::UlidFlake
/// [`UlidFlakeScalable`]: crate::UlidFlakeScalable
pub trait FlakeId:
    Copy + Clone + fmt::Display + fmt::Debug + PartialOrd + Ord + PartialEq + Eq + Hash
{
    /// Packs the given components, masking each to its field width.
    #[must_use]
    fn from_components(timestamp: u64, randomness: u64, shard_id: u64) -> Self;

    /// Wraps a raw packed value.
    fn from_u64(value: u64) -> Self;

    /// Returns the raw packed value.
    fn to_u64(&self) -> u64;

    /// Returns the timestamp field (milliseconds since the generator epoch).
    fn timestamp(&self) -> u64;

    /// Returns the randomness field.
    fn randomness(&self) -> u64;

    /// Returns the shard id field (always 0 for layouts without one).
    fn shard_id(&self) -> u64;

    /// Maximum value of the timestamp field.
    fn max_timestamp() -> u64;

    /// Maximum value of the randomness field.
    fn max_randomness() -> u64;

    /// Maximum value of the shard id field (0 for layouts without one).
    fn max_shard_id() -> u64;

    /// Widest entropy step, in bytes, allowed for collision handling.
    fn max_entropy_bytes() -> u8;

    /// Returns the fixed 13-character base32 rendering.
    fn encode(&self) -> Base32Text;

    /// Parses a 13-character base32 string, uppercasing first.
    fn decode(text: &str) -> Result<Self>;
}

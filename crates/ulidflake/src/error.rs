use core::fmt;
use std::sync::{MutexGuard, PoisonError, RwLockReadGuard, RwLockWriteGuard};

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `ulidflake` can emit.
///
/// Every failure is surfaced to the caller as a distinct variant; nothing is
/// retried or coerced internally.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Entropy size passed to `set_config` is outside `1..=max` for the
    /// target layout (3 bytes for [`UlidFlake`], 2 for [`UlidFlakeScalable`]).
    ///
    /// [`UlidFlake`]: crate::UlidFlake
    /// [`UlidFlakeScalable`]: crate::UlidFlakeScalable
    InvalidEntropySize { size: u8, max: u8 },

    /// Shard id passed to `set_config` exceeds the layout's shard field.
    InvalidShardId { shard_id: u8, max: u64 },

    /// Elapsed milliseconds since the configured epoch no longer fit the
    /// 43-bit timestamp field.
    TimestampOverflow { timestamp: u64 },

    /// The randomness field was exhausted while resolving a same-millisecond
    /// collision.
    RandomnessOverflow { randomness: u64, max: u64 },

    /// Input string is not exactly 13 characters.
    InvalidLength { len: usize },

    /// Input contains a byte outside the base32 alphabet.
    InvalidAscii { byte: u8, index: usize },

    /// The supplied (or current) time predates the configured epoch.
    BeforeEpoch,

    /// The supplied Unix time is not a finite number.
    InvalidUnixTime { seconds: f64 },

    /// The operation failed because a lock was poisoned by a thread that
    /// panicked while holding it.
    LockPoisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidEntropySize { size, max } => {
                write!(f, "entropy size {size} out of range 1..={max}")
            }
            Self::InvalidShardId { shard_id, max } => {
                write!(f, "shard id {shard_id} out of range 0..={max}")
            }
            Self::TimestampOverflow { timestamp } => {
                write!(f, "timestamp {timestamp} exceeds the 43-bit field")
            }
            Self::RandomnessOverflow { randomness, max } => {
                write!(f, "randomness {randomness} exceeds field maximum {max}")
            }
            Self::InvalidLength { len } => {
                write!(f, "invalid length {len}, expected 13")
            }
            Self::InvalidAscii { byte, index } => {
                write!(f, "invalid ascii byte {byte} at index {index}")
            }
            Self::BeforeEpoch => write!(f, "time predates the configured epoch"),
            Self::InvalidUnixTime { seconds } => {
                write!(f, "invalid unix time: {seconds}")
            }
            Self::LockPoisoned => write!(f, "lock poisoned"),
        }
    }
}

impl core::error::Error for Error {}

// Convert all poisoned lock errors to a simplified `LockPoisoned`
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

impl<T> From<PoisonError<RwLockReadGuard<'_, T>>> for Error {
    fn from(_: PoisonError<RwLockReadGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

impl<T> From<PoisonError<RwLockWriteGuard<'_, T>>> for Error {
    fn from(_: PoisonError<RwLockWriteGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}

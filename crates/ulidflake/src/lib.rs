//! Compact 64-bit flake-style ULIDs.
//!
//! A flake identifier packs a millisecond timestamp and a random component
//! into a single `u64` whose sign bit is always clear, so values sort the
//! same whether treated as signed or unsigned integers, and their fixed
//! 13-character base32 encodings sort the same as the integers.
//!
//! Two layouts are provided:
//!
//! - [`UlidFlake`]: 43-bit timestamp, 20-bit randomness.
//! - [`UlidFlakeScalable`]: 43-bit timestamp, 15-bit randomness, 5-bit shard
//!   id for coordination-free multi-node generation.
//!
//! IDs generated by one [`FlakeGenerator`] are strictly monotonic: within
//! the same millisecond the randomness field advances by a random positive
//! entropy step rather than being redrawn.

mod base32;
mod error;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod thread_random;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::thread_random::*;
pub use crate::time::*;

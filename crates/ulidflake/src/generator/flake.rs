use core::marker::PhantomData;
use std::sync::{Mutex, RwLock};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, FlakeConfig, FlakeId, MonotonicClock, RandSource, Result, ThreadRandom, TimeSource,
    UlidFlake, UlidFlakeScalable,
};

/// Timestamp and randomness of the most recent successful generation.
#[derive(Clone, Copy, Debug)]
struct LastValue {
    timestamp: u64,
    randomness: u64,
}

/// A thread-safe, monotonic flake identifier generator.
///
/// One generic algorithm drives every [`FlakeId`] layout; the field widths
/// and entropy limits come from the ID type. Construct one generator per
/// logical identifier namespace and share it behind an `Arc`. There is no
/// hidden global instance, so independent generators (and parallel tests)
/// cannot contaminate each other.
///
/// Identifiers from one instance are strictly increasing: a fresh
/// millisecond draws fresh randomness, while a call landing in the same
/// millisecond as the previous one advances the previous randomness by a
/// random positive entropy step. The step keeps ordering strict without
/// making the next value predictable. When the randomness field cannot
/// absorb another step, [`Error::RandomnessOverflow`] is returned rather
/// than retried.
///
/// # Example
/// ```
/// use ulidflake::{FlakeId, UlidFlakeGenerator};
///
/// let generator = UlidFlakeGenerator::default();
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
/// assert!(b.to_u64() > a.to_u64());
/// ```
pub struct FlakeGenerator<ID, T, R>
where
    ID: FlakeId,
    T: TimeSource,
    R: RandSource,
{
    state: Mutex<Option<LastValue>>,
    config: RwLock<FlakeConfig>,
    time: T,
    rng: R,
    _id: PhantomData<ID>,
}

/// Generator for the standard layout (43-bit timestamp, 20-bit randomness).
pub type UlidFlakeGenerator<T = MonotonicClock, R = ThreadRandom> = FlakeGenerator<UlidFlake, T, R>;

/// Generator for the scalable layout (43-bit timestamp, 15-bit randomness,
/// 5-bit shard id).
pub type UlidFlakeScalableGenerator<T = MonotonicClock, R = ThreadRandom> =
    FlakeGenerator<UlidFlakeScalable, T, R>;

impl<ID> Default for FlakeGenerator<ID, MonotonicClock, ThreadRandom>
where
    ID: FlakeId,
{
    /// Constructs a generator with the built-in monotonic clock, the
    /// thread-local RNG and the default config.
    fn default() -> Self {
        Self::new(MonotonicClock::default(), ThreadRandom)
    }
}

impl<ID, T, R> FlakeGenerator<ID, T, R>
where
    ID: FlakeId,
    T: TimeSource,
    R: RandSource,
{
    /// Creates a generator with the default [`FlakeConfig`] and an empty
    /// generation history.
    ///
    /// # Parameters
    /// - `time`: A [`TimeSource`] used to read the current Unix time
    /// - `rng`: A [`RandSource`] used to draw randomness and entropy steps
    pub fn new(time: T, rng: R) -> Self {
        Self {
            state: Mutex::new(None),
            config: RwLock::new(FlakeConfig::default()),
            time,
            rng,
            _id: PhantomData,
        }
    }

    /// Creates a generator with an explicit config.
    ///
    /// # Errors
    /// Fails with the same validation errors as [`Self::set_config`].
    pub fn with_config(config: FlakeConfig, time: T, rng: R) -> Result<Self> {
        Self::validate(&config)?;
        let generator = Self::new(time, rng);
        *generator.config.write()? = config;
        Ok(generator)
    }

    /// Replaces the generator's configuration.
    ///
    /// The generation history is left untouched: a same-millisecond call
    /// after a config change still continues the previous randomness chain.
    ///
    /// # Errors
    /// - [`Error::InvalidEntropySize`] unless
    ///   `1 <= entropy_size <= ID::max_entropy_bytes()`
    /// - [`Error::InvalidShardId`] if `shard_id` exceeds the layout's shard
    ///   field (any nonzero value for the standard layout)
    /// - [`Error::LockPoisoned`] if the config lock is poisoned
    pub fn set_config(&self, config: FlakeConfig) -> Result<()> {
        Self::validate(&config)?;
        *self.config.write()? = config;
        Ok(())
    }

    /// Restores the built-in defaults: epoch 2024-01-01T00:00:00Z, entropy
    /// size 1, shard id 0.
    ///
    /// # Errors
    /// - [`Error::LockPoisoned`] if the config lock is poisoned
    pub fn reset_config(&self) -> Result<()> {
        *self.config.write()? = FlakeConfig::default();
        Ok(())
    }

    /// Returns a copy of the current configuration.
    ///
    /// # Errors
    /// - [`Error::LockPoisoned`] if the config lock is poisoned
    pub fn config(&self) -> Result<FlakeConfig> {
        Ok(*self.config.read()?)
    }

    fn validate(config: &FlakeConfig) -> Result<()> {
        let max = ID::max_entropy_bytes();
        if config.entropy_size < 1 || config.entropy_size > max {
            return Err(Error::InvalidEntropySize {
                size: config.entropy_size,
                max,
            });
        }
        let max_shard = ID::max_shard_id();
        if u64::from(config.shard_id) > max_shard {
            return Err(Error::InvalidShardId {
                shard_id: config.shard_id,
                max: max_shard,
            });
        }
        Ok(())
    }

    /// Generates the next identifier.
    ///
    /// The clock read, the read of the previous `(timestamp, randomness)`
    /// pair, the collision check, the randomness computation and the
    /// history write form one critical section under the state mutex, so
    /// concurrent callers observe a serialized, strictly increasing
    /// sequence. Reading the clock outside the lock would let a caller
    /// commit a later millisecond before a concurrent caller holding an
    /// earlier reading, inverting the issued order.
    ///
    /// # Errors
    /// - [`Error::BeforeEpoch`] if the clock reads earlier than the
    ///   configured epoch
    /// - [`Error::TimestampOverflow`] once elapsed milliseconds exceed the
    ///   43-bit field
    /// - [`Error::RandomnessOverflow`] if a same-millisecond entropy step
    ///   would exceed the randomness field; the failed call leaves the
    ///   history unchanged and is not retried
    /// - [`Error::LockPoisoned`] if a lock is poisoned
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<ID> {
        let config = *self.config.read()?;

        let mut last = self.state.lock()?;
        let now = self.time.unix_millis();
        let timestamp = now
            .checked_sub(config.epoch_millis())
            .ok_or(Error::BeforeEpoch)?;
        if timestamp > ID::max_timestamp() {
            return Err(Error::TimestampOverflow { timestamp });
        }
        let randomness = match last.as_ref() {
            Some(prev) if prev.timestamp == timestamp => {
                let next = prev.randomness + self.nonzero_entropy(config.entropy_size);
                if next > ID::max_randomness() {
                    return Err(Error::RandomnessOverflow {
                        randomness: next,
                        max: ID::max_randomness(),
                    });
                }
                next
            }
            _ => self.rng.rand_u64() & ID::max_randomness(),
        };
        *last = Some(LastValue {
            timestamp,
            randomness,
        });

        Ok(ID::from_components(
            timestamp,
            randomness,
            u64::from(config.shard_id),
        ))
    }

    /// Parses a 13-character base32 string into an identifier.
    ///
    /// # Errors
    /// - [`Error::InvalidLength`] if the input is not exactly 13 characters
    /// - [`Error::InvalidAscii`] for characters outside the alphabet
    pub fn parse(&self, text: &str) -> Result<ID> {
        ID::decode(text)
    }

    /// Wraps a raw integer as an identifier.
    #[must_use]
    pub fn from_u64(&self, value: u64) -> ID {
        ID::from_u64(value)
    }

    /// Builds an identifier for a given Unix time (seconds), drawing fresh
    /// randomness.
    ///
    /// This path is exempt from the monotonicity chain: it neither consults
    /// nor updates the generation history. The configured shard id is still
    /// embedded.
    ///
    /// # Errors
    /// - [`Error::InvalidUnixTime`] if `seconds` is NaN or infinite
    /// - [`Error::BeforeEpoch`] if `seconds` predates the configured epoch
    /// - [`Error::TimestampOverflow`] past the 43-bit field
    /// - [`Error::LockPoisoned`] if the config lock is poisoned
    pub fn from_unix_time(&self, seconds: f64) -> Result<ID> {
        if !seconds.is_finite() {
            return Err(Error::InvalidUnixTime { seconds });
        }
        let config = *self.config.read()?;
        let epoch_seconds = config.epoch_seconds();
        if seconds < epoch_seconds {
            return Err(Error::BeforeEpoch);
        }
        // Saturating float-to-int cast; the bound check below catches
        // anything past the field anyway.
        let timestamp = ((seconds - epoch_seconds) * 1000.0).floor() as u64;
        if timestamp > ID::max_timestamp() {
            return Err(Error::TimestampOverflow { timestamp });
        }
        let randomness = self.rng.rand_u64() & ID::max_randomness();
        Ok(ID::from_components(
            timestamp,
            randomness,
            u64::from(config.shard_id),
        ))
    }

    /// Draws a nonzero entropy step of `size` bytes. Zero is redrawn since
    /// it would not advance monotonicity.
    fn nonzero_entropy(&self, size: u8) -> u64 {
        let mask = (1_u64 << (u32::from(size) * 8)) - 1;
        loop {
            let entropy = self.rng.rand_u64() & mask;
            if entropy != 0 {
                return entropy;
            }
        }
    }
}

use core::time::Duration;

/// Default epoch: Monday, January 1, 2024 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_704_067_200_000);

/// Default entropy step width for same-millisecond collision handling.
pub const DEFAULT_ENTROPY_SIZE: u8 = 1;

/// Runtime configuration of a [`FlakeGenerator`].
///
/// Replacing a generator's config never touches its generation history;
/// identifiers issued before and after a `set_config` call still form one
/// monotonic sequence as long as the epoch is unchanged.
///
/// [`FlakeGenerator`]: crate::FlakeGenerator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlakeConfig {
    /// Reference instant the timestamp field counts from, expressed as a
    /// duration since the Unix epoch.
    pub epoch: Duration,
    /// Width in bytes of the random entropy step added on a
    /// same-millisecond collision. Validated against the layout's maximum
    /// (3 for the standard layout, 2 for the scalable one).
    pub entropy_size: u8,
    /// Shard id embedded in every generated identifier. Must be 0 for
    /// layouts without a shard field.
    pub shard_id: u8,
}

impl Default for FlakeConfig {
    fn default() -> Self {
        Self {
            epoch: DEFAULT_EPOCH,
            entropy_size: DEFAULT_ENTROPY_SIZE,
            shard_id: 0,
        }
    }
}

impl FlakeConfig {
    /// Creates a config with the given epoch and entropy size and no shard.
    #[must_use]
    pub const fn new(epoch: Duration, entropy_size: u8) -> Self {
        Self {
            epoch,
            entropy_size,
            shard_id: 0,
        }
    }

    /// Returns the config with the shard id replaced.
    #[must_use]
    pub const fn with_shard_id(mut self, shard_id: u8) -> Self {
        self.shard_id = shard_id;
        self
    }

    pub(crate) const fn epoch_millis(&self) -> u64 {
        self.epoch.as_millis() as u64
    }

    pub(crate) fn epoch_seconds(&self) -> f64 {
        self.epoch.as_secs_f64()
    }
}

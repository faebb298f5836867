use crate::RandSource;
use rand::{Rng, rng};

/// A [`RandSource`] backed by the thread-local RNG.
///
/// The underlying RNG is fast, cryptographically secure and periodically
/// reseeded. Each OS thread has its own instance, so calls from multiple
/// threads are contention-free. This type does not store the RNG itself; it
/// accesses the thread-local generator on each call, which is why this
/// zero-sized wrapper can be shared freely across threads even though
/// `ThreadRng` itself cannot.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand_u64(&self) -> u64 {
        rng().random()
    }
}

/// A source of random bits for identifier generation.
///
/// This abstraction allows plugging in the thread-local RNG, a deterministic
/// generator in tests, or any other entropy source. Implementations return a
/// full 64 bits; callers mask down to the field width they need.
pub trait RandSource {
    /// Returns 64 random bits.
    fn rand_u64(&self) -> u64;
}

use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// The flake epoch is generator configuration, not a property of the clock:
/// a generator subtracts its configured epoch from whatever this returns.
/// That keeps the clock reusable across generators with different epochs and
/// lets tests substitute a fixed or stepping time source.
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn unix_millis(&self) -> u64;
}

/// Shared ticker thread state, updated every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source reporting milliseconds since the Unix epoch.
///
/// Wall-clock time is sampled once at construction; afterwards the clock
/// advances by monotonic elapsed time, so readings never go backward even if
/// the system clock is adjusted externally (NTP, DST).
///
/// Internally a background thread updates a shared atomic counter once per
/// millisecond from an `Instant` captured at startup, keeping syscalls off
/// the read path. The thread exits when the last clone of the clock is
/// dropped.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    start_millis: u64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock anchored to the current wall-clock time.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reports a time before the Unix epoch.
    pub fn new() -> Self {
        let start = Instant::now();
        let start_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System clock before UNIX_EPOCH")
            .as_millis() as u64;

        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Compute the absolute target time of the next tick
                let target = start + Duration::from_millis(tick);

                // Sleep if we are early
                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                // After waking, recompute how far we actually are from the
                // start
                let now_ms = start.elapsed().as_millis() as u64;

                // Monotonic store, aligned to elapsed milliseconds since start
                inner_ref.current.store(now_ms, Ordering::Relaxed);

                // Align to next tick after the current actual time
                tick = now_ms + 1;
            }
        });

        inner
            ._handle
            .set(handle)
            .expect("failed to set thread handle");

        Self {
            inner,
            start_millis,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn unix_millis(&self) -> u64 {
        self.start_millis + self.inner.current.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_reports_unix_time_and_never_goes_backward() {
        let clock = MonotonicClock::new();
        let system_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        let first = clock.unix_millis();
        // Within a generous window of the system clock.
        assert!(first.abs_diff(system_now) < 5_000);

        thread::sleep(Duration::from_millis(5));
        let second = clock.unix_millis();
        assert!(second >= first);
    }
}

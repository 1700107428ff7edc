use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A trait for time sources that return a microsecond timestamp.
///
/// This abstraction allows you to plug in the real monotonic clock or a
/// mocked time source in tests.
///
/// # Example
///
/// ```
/// use microflake::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_micros(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_micros(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in microseconds since the Unix epoch.
    ///
    /// Implementations must be non-decreasing across the lifetime of the
    /// value: two consecutive calls never observe time going backward.
    fn current_micros(&self) -> u64;
}

/// A monotonic, microsecond-resolution time source anchored to wall-clock
/// time at construction.
///
/// This avoids wall-clock adjustments (e.g., NTP corrections or manual clock
/// changes) while still producing timestamps with real-time meaning.
///
/// Internally, the clock captures `SystemTime::now()` and `Instant::now()`
/// once at construction; every call returns the captured wall-clock origin
/// plus the monotonic elapsed time since then. The reported time can drift
/// slowly from true wall-clock if the two sources diverge, which is
/// acceptable: the contract is relative ordering plus approximate real-time
/// meaning, not clock synchronization.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    /// Microseconds since the Unix epoch, captured at construction.
    origin_micros: u64,
    started: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Constructs a clock anchored to the current wall-clock time.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reports a time before the Unix epoch.
    pub fn new() -> Self {
        let origin = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH");
        Self {
            origin_micros: origin.as_micros() as u64,
            started: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_micros(&self) -> u64 {
        self.origin_micros + self.started.elapsed().as_micros() as u64
    }
}

use crate::{
    FlakeId, MachineId, MonotonicClock, RandSource, Result, ThreadRandom, TimeSource,
};
use core::cell::Cell;
use std::thread;
use std::time::SystemTime;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Construction options for [`FlakeGenerator`].
#[derive(Clone, Copy, Debug)]
pub struct GeneratorOptions {
    /// Derive the machine discriminator from a hardware network address
    /// (hashed with the process id) instead of random bytes. Defaults to
    /// `true`; degrades to random bytes when no usable address exists.
    pub use_hardware_id: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            use_hardware_id: true,
        }
    }
}

/// A generated identifier paired with its embedded timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimestampedId {
    /// The generated identifier.
    pub id: FlakeId,
    /// The identifier's timestamp, truncated to whole milliseconds.
    pub timestamp: SystemTime,
}

/// A coordination-free generator of time-sortable 160-bit identifiers.
///
/// Each call combines the clock's microsecond timestamp, the per-instance
/// machine discriminator, an intra-tick sequence counter, and fresh entropy.
/// Identifiers from one instance are strictly ordered: the sequence counter
/// disambiguates ids minted within the same microsecond, and when it is
/// exhausted the generator waits for the next tick rather than letting the
/// counter wrap.
///
/// ## Features
/// - ❌ Not thread-safe (interior `Cell` state; the type is `!Sync`)
/// - ✅ Probabilistically unique (no coordination required)
/// - ✅ Time-ordered (monotonically increasing per instance)
///
/// ## Recommended When
/// - One generator per thread or per process
/// - You need lexicographically sortable string ids with no central issuer
///
/// Cross-instance uniqueness relies on the machine discriminator plus the
/// 32-bit entropy field, not on a shared lock.
///
/// # Example
/// ```
/// use microflake::FlakeGenerator;
///
/// let generator = FlakeGenerator::new();
/// let id = generator.generate();
/// assert_eq!(id.encode().len(), microflake::ENCODED_LEN);
/// ```
pub struct FlakeGenerator<T = MonotonicClock, R = ThreadRandom>
where
    T: TimeSource,
    R: RandSource<u32>,
{
    machine_id: MachineId,
    time: T,
    rng: R,
    last_micros: Cell<u64>,
    sequence: Cell<u16>,
}

impl FlakeGenerator {
    /// Creates a generator with the default options, the process-wide
    /// monotonic clock, and the thread-local RNG.
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions::default())
    }

    /// Creates a generator with explicit options.
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self::from_parts(
            MachineId::new(options.use_hardware_id),
            MonotonicClock::new(),
            ThreadRandom,
        )
    }
}

impl Default for FlakeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> FlakeGenerator<T, R>
where
    T: TimeSource,
    R: RandSource<u32>,
{
    /// Creates a generator from explicit components.
    ///
    /// Useful for injecting a mock clock or RNG in tests, or for callers
    /// that manage their own machine identity.
    pub fn from_parts(machine_id: MachineId, time: T, rng: R) -> Self {
        Self {
            machine_id,
            time,
            rng,
            last_micros: Cell::new(0),
            sequence: Cell::new(0),
        }
    }

    /// Returns this generator's machine discriminator.
    pub fn machine_id(&self) -> MachineId {
        self.machine_id
    }

    /// Generates a new identifier.
    ///
    /// When the clock reports the same microsecond as the previous call, the
    /// sequence counter increments; no two ids from one instance ever share
    /// a (timestamp, sequence) pair. When the counter is exhausted, this
    /// call blocks until the clock advances to the next tick — at most
    /// 65536 ids are minted per microsecond per instance.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> FlakeId {
        let mut now = self.time.current_micros();

        if now == self.last_micros.get() {
            match self.sequence.get().checked_add(1) {
                Some(seq) => self.sequence.set(seq),
                None => {
                    now = self.wait_for_next_tick();
                    self.last_micros.set(now);
                    self.sequence.set(0);
                }
            }
        } else {
            self.last_micros.set(now);
            self.sequence.set(0);
        }

        let entropy: u32 = self.rng.rand();
        FlakeId::from_parts(
            now,
            &self.machine_id,
            self.sequence.get(),
            entropy.to_be_bytes(),
        )
    }

    /// Generates a new identifier paired with its timestamp at millisecond
    /// resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOverflow`] when the millisecond value falls
    /// outside the losslessly representable range.
    ///
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    pub fn generate_timestamped(&self) -> Result<TimestampedId> {
        let id = self.generate();
        let timestamp = id.timestamp()?;
        Ok(TimestampedId { id, timestamp })
    }

    /// Polls the clock until it passes the last observed tick.
    ///
    /// Bounded by the clock's next microsecond tick, so it resolves almost
    /// immediately against a real clock.
    #[cold]
    #[inline(never)]
    fn wait_for_next_tick(&self) -> u64 {
        let last = self.last_micros.get();
        loop {
            let now = self.time.current_micros();
            if now > last {
                return now;
            }
            thread::yield_now();
        }
    }
}

/// Recovers the embedded timestamp from an encoded identifier.
///
/// # Errors
///
/// Returns [`Error::InvalidCharacter`] or [`Error::DecodeOverflow`] for
/// malformed input, and [`Error::TimestampOverflow`] when the embedded
/// millisecond value is out of range.
///
/// [`Error::InvalidCharacter`]: crate::Error::InvalidCharacter
/// [`Error::DecodeOverflow`]: crate::Error::DecodeOverflow
/// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
pub fn extract_timestamp(encoded: &str) -> Result<SystemTime> {
    FlakeId::decode(encoded)?.timestamp()
}

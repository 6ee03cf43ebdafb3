// src/stabilizer/timing.rs

//! # Tick Tracking
//!
//! Measures the time between stabilizer updates. The filter time constant
//! is configured in milliseconds while rates are per second, so a single
//! measurement is exposed in both units.
//!
//! Gaps longer than [`MAX_ELAPSED_MS`] are shortened to it, which keeps a
//! single step representable in narrow fixed-point types.

use crate::Number;
use core::marker::PhantomData;

/// System tick in milliseconds.
pub type Tick = u32;

/// Nominal period between updates.
pub const SAMPLE_PERIOD_MS: u32 = 10;

/// Longest time step a single update integrates over.
pub const MAX_ELAPSED_MS: u32 = 1000;

const MILLIS_PER_SECOND: u32 = 1000;

/// Time elapsed between two updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDelta<T> {
    ms: u32,
    _number: PhantomData<T>,
}

impl<T: Number> TimeDelta<T> {
    /// Creates a delta from whole milliseconds.
    pub fn from_millis(ms: u32) -> Self {
        Self {
            ms,
            _number: PhantomData,
        }
    }

    /// The nominal sample period.
    pub fn nominal() -> Self {
        Self::from_millis(SAMPLE_PERIOD_MS)
    }

    /// Elapsed whole milliseconds.
    pub fn whole_millis(&self) -> u32 {
        self.ms
    }

    /// Elapsed milliseconds.
    pub fn millis(&self) -> T {
        T::saturating_from(self.ms)
    }

    /// Elapsed seconds.
    pub fn seconds(&self) -> T {
        self.millis() / T::saturating_from(MILLIS_PER_SECOND)
    }
}

/// Remembers the tick of the previous update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTracker {
    last_update: Tick,
}

impl TickTracker {
    /// Starts tracking from `now`.
    pub fn new(now: Tick) -> Self {
        Self { last_update: now }
    }

    /// Tick of the previous update.
    pub fn last_update(&self) -> Tick {
        self.last_update
    }

    /// Returns the time since the previous update and records `now`.
    ///
    /// When the tick has not advanced, for example after wraparound, the
    /// nominal sample period is returned instead. Longer gaps than
    /// [`MAX_ELAPSED_MS`] are returned as `MAX_ELAPSED_MS`.
    pub fn elapsed<T: Number>(&mut self, now: Tick) -> TimeDelta<T> {
        let delta = if now > self.last_update {
            let ms = now - self.last_update;
            if ms > MAX_ELAPSED_MS {
                log::debug!("{} ms since last update, limiting to {} ms", ms, MAX_ELAPSED_MS);
            }
            TimeDelta::from_millis(ms.min(MAX_ELAPSED_MS))
        } else {
            log::debug!(
                "tick did not advance ({} -> {}), using nominal period",
                self.last_update,
                now
            );
            TimeDelta::nominal()
        };
        self.last_update = now;
        delta
    }
}

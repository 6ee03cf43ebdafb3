// src/stabilizer/channel.rs

//! # Channel Filter
//!
//! Per channel input state. The raw input is the offset computed from the
//! accessory value, the filtered input is that offset after the low-pass
//! stage. Both start at zero.

use super::timing::{TimeDelta, MAX_ELAPSED_MS};
use crate::settings::{ChannelSettings, StabilizationMode};
use crate::{bound, exceeds, Number};

/// Input state of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelFilter<T> {
    /// Offset before smoothing.
    pub raw_input: T,
    /// Offset after smoothing.
    pub filtered_input: T,
}

impl<T: Number> ChannelFilter<T> {
    /// Creates a zeroed channel.
    pub fn new() -> Self {
        Self {
            raw_input: T::zero(),
            filtered_input: T::zero(),
        }
    }

    /// Runs one cycle for an available accessory value: the mode specific
    /// input stage followed by the low-pass stage.
    pub fn update(&mut self, accessory: T, settings: &ChannelSettings<T>, dt: TimeDelta<T>) {
        match settings.mode {
            StabilizationMode::Attitude => self.apply_attitude(accessory, settings.input_range),
            StabilizationMode::AxisLock => self.apply_axis_lock(
                accessory,
                settings.input_rate,
                settings.max_axis_lock_rate,
                settings.input_range,
                dt,
            ),
        }
        self.low_pass(settings.response_time_ms, dt);
    }

    /// Attitude mode: the offset is the accessory value scaled by the input
    /// range. Previous state is ignored.
    pub fn apply_attitude(&mut self, accessory: T, input_range: T) {
        self.raw_input = accessory * input_range;
    }

    /// Axis-lock mode: the accessory value scaled by the input rate is
    /// integrated over `dt` and bounded by the input range.
    ///
    /// Integration only happens while the commanded rate magnitude is above
    /// `max_axis_lock_rate`. Below it the offset is held.
    pub fn apply_axis_lock(
        &mut self,
        accessory: T,
        input_rate: T,
        max_axis_lock_rate: T,
        input_range: T,
        dt: TimeDelta<T>,
    ) {
        let rate = accessory * input_rate;
        if exceeds(rate, max_axis_lock_rate) {
            self.raw_input = bound(self.raw_input + rate * dt.seconds(), input_range);
        }
    }

    /// Single-pole low-pass filter with a time constant in milliseconds.
    /// A zero time constant passes the raw input through.
    ///
    /// The new value is `rt / (rt + dt)` of the previous filtered value plus
    /// `dt / (rt + dt)` of the raw input.
    pub fn low_pass(&mut self, response_time_ms: u16, dt: TimeDelta<T>) {
        if response_time_ms == 0 {
            self.filtered_input = self.raw_input;
            return;
        }

        let raw_weight = blend_weight::<T>(dt.whole_millis(), response_time_ms);
        self.filtered_input =
            (T::one() - raw_weight) * self.filtered_input + raw_weight * self.raw_input;
    }
}

/// Largest whole number converted into `T` while forming a blend weight.
/// Fits `i16` based fixed-point types.
const MAX_BLEND_PART: u32 = i16::MAX as u32;

/// Returns `dt / (rt + dt)`, in `[0, 1]`.
///
/// The sum is split into equal parts no larger than [`MAX_BLEND_PART`]
/// before it is formed in `T`, so it never overflows narrow types.
fn blend_weight<T: Number>(dt_ms: u32, response_time_ms: u16) -> T {
    let dt_ms = dt_ms.min(MAX_ELAPSED_MS);
    let total = u32::from(response_time_ms) + dt_ms;
    if total == 0 {
        return T::one();
    }

    let parts = total / MAX_BLEND_PART + 1;
    let part = T::saturating_from(parts);
    let dt = T::saturating_from(dt_ms) / part;
    let total = T::saturating_from(total / parts) + T::saturating_from(total % parts) / part;
    dt / total
}

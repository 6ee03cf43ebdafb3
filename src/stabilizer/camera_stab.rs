// src/stabilizer/camera_stab.rs

//! # Camera Stabilizer
//!
//! The periodic camera stabilization update. On every attitude update the
//! stabilizer reads each bound accessory, runs it through the channel
//! filter, adds the filtered offset to the aircraft attitude, and scales the
//! sum into a bounded gimbal command.
//!
//! ## Usage
//!
//! A [`CameraStab`] is created once, usually through [`crate::initialize`],
//! and then driven by a single scheduler context. It holds no locks; callers
//! in a multi-threaded host must serialize invocations themselves.
//!
//! ```
//! use camera_stabilization::{Attitude, CameraStab, CameraStabSettings, Channel, InputSource};
//!
//! let mut settings = CameraStabSettings::<f32>::new();
//! settings[Channel::Pitch].input = InputSource::Accessory(0);
//! settings[Channel::Pitch].output_range = 45.0;
//!
//! let accessories = |index: u8| if index == 0 { Some(0.5_f32) } else { None };
//!
//! let mut stabilizer = CameraStab::new(0);
//! let desired = stabilizer.update(10, &settings, Attitude::new(0.0, 12.5, 0.0), &accessories);
//!
//! // (12.5 + 0.5 * 20) / 45
//! assert_eq!(desired.pitch, 0.5);
//! ```

use super::channel::ChannelFilter;
use super::timing::{Tick, TickTracker};
use crate::error::CameraStabError;
use crate::interfaces::{
    AccessorySource, Attitude, AttitudeSource, CameraDesired, CameraDesiredSink, ObjectEvent,
    ObjectId, SettingsProvider,
};
use crate::settings::{CameraStabSettings, Channel, InputSource, CHANNEL_COUNT};
use crate::{bound, Number};

/// Camera stabilization state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraStab<T> {
    filters: [ChannelFilter<T>; CHANNEL_COUNT],
    ticks: TickTracker,
    halted: bool,
}

impl<T: Number> CameraStab<T> {
    /// Creates a stabilizer with zeroed channels, measuring time from `now`.
    pub fn new(now: Tick) -> Self {
        Self {
            filters: [ChannelFilter::new(); CHANNEL_COUNT],
            ticks: TickTracker::new(now),
            halted: false,
        }
    }

    /// Input state of a channel.
    pub fn filter(&self, channel: Channel) -> &ChannelFilter<T> {
        &self.filters[channel.index()]
    }

    /// Tick of the previous update.
    pub fn last_update(&self) -> Tick {
        self.ticks.last_update()
    }

    /// Returns `true` once invalid settings have stopped the module.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Runs one stabilization cycle and returns the gimbal commands.
    ///
    /// Channels without an input source, or whose accessory is not
    /// available yet, keep their state from the previous cycle. An axis
    /// whose output range is not positive is commanded to zero; such
    /// settings never get here through [`Self::attitude_updated`].
    pub fn update<A>(
        &mut self,
        now: Tick,
        settings: &CameraStabSettings<T>,
        attitude: Attitude<T>,
        accessories: &A,
    ) -> CameraDesired<T>
    where
        A: AccessorySource<T> + ?Sized,
    {
        let dt = self.ticks.elapsed(now);

        for channel in Channel::ALL {
            let channel_settings = &settings[channel];
            let InputSource::Accessory(index) = channel_settings.input else {
                continue;
            };
            let Some(accessory) = accessories.accessory(index) else {
                log::debug!("accessory {} unavailable, skipping {:?}", index, channel);
                continue;
            };
            self.filters[channel.index()].update(accessory, channel_settings, dt);
        }

        let mut desired = CameraDesired {
            roll: T::zero(),
            pitch: T::zero(),
            yaw: T::zero(),
        };
        for channel in Channel::ALL {
            let output_range = settings[channel].output_range;
            if !(output_range > T::zero()) {
                continue;
            }
            let offset = self.filters[channel.index()].filtered_input;
            let output = (attitude.axis(channel) + offset) / output_range;
            desired.set_axis(channel, bound(output, T::one()));
        }
        desired
    }

    /// Handles an object update event.
    ///
    /// Only attitude updates drive the stabilizer, other events are ignored
    /// and return `Ok(None)`. On an attitude update the settings, attitude,
    /// and accessories are read from `bus` and the new commands are written
    /// back to it.
    ///
    /// Settings that fail validation halt the module: nothing is written for
    /// that cycle or any later one.
    pub fn attitude_updated<B>(
        &mut self,
        event: &ObjectEvent,
        now: Tick,
        bus: &mut B,
    ) -> Result<Option<CameraDesired<T>>, CameraStabError>
    where
        B: SettingsProvider<T> + AttitudeSource<T> + AccessorySource<T> + CameraDesiredSink<T>,
    {
        if event.object != ObjectId::AttitudeActual {
            return Ok(None);
        }
        if self.halted {
            return Err(CameraStabError::Halted);
        }

        let settings = match bus.settings() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("camera stabilization halted: {}", e);
                self.halted = true;
                return Err(e.into());
            }
        };

        let attitude = bus.attitude();
        let desired = self.update(now, &settings, attitude, &*bus);
        bus.set_camera_desired(desired);
        Ok(Some(desired))
    }
}

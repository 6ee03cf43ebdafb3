// src/settings.rs

//! # Camera Stabilization Settings
//!
//! This module provides the configuration read by the stabilizer on every
//! cycle. Settings are kept per input channel and indexed by [`Channel`].
//! The typed settings cannot hold an invalid stabilization mode. Values the
//! type system does not rule out are caught by [`CameraStabSettings::check`];
//! raw stored settings are checked when they are loaded, see
//! [`RawCameraStabSettings::validate`].

pub mod raw;
pub use raw::*;

use crate::error::SettingsError;
use crate::Number;
use core::ops::{Index, IndexMut};

/// Number of stabilized channels.
pub const CHANNEL_COUNT: usize = 3;

/// Number of accessory instances an input channel can be bound to.
pub const ACCESSORY_COUNT: u8 = 6;

/// A stabilized axis. Input channels and output axes share this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Roll axis.
    Roll,
    /// Pitch axis.
    Pitch,
    /// Yaw axis.
    Yaw,
}

impl Channel {
    /// All channels in processing order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Roll, Channel::Pitch, Channel::Yaw];

    /// Array index of the channel.
    pub const fn index(self) -> usize {
        match self {
            Channel::Roll => 0,
            Channel::Pitch => 1,
            Channel::Yaw => 2,
        }
    }
}

/// Where an input channel takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    /// The channel is not driven; its state is left alone.
    #[default]
    None,
    /// The channel follows the given accessory instance. The index must be
    /// below [`ACCESSORY_COUNT`].
    Accessory(u8),
}

impl InputSource {
    /// Raw code used for an unbound channel.
    pub const RAW_NONE: u8 = ACCESSORY_COUNT;

    /// Decodes a stored input source code.
    ///
    /// Codes `0..ACCESSORY_COUNT` select an accessory, `ACCESSORY_COUNT`
    /// means none. Anything else is rejected.
    pub fn from_raw(channel: Channel, raw: u8) -> Result<Self, SettingsError> {
        match raw {
            raw if raw < ACCESSORY_COUNT => Ok(InputSource::Accessory(raw)),
            Self::RAW_NONE => Ok(InputSource::None),
            raw => Err(SettingsError::UnknownInputSource { channel, raw }),
        }
    }
}

/// How an input channel turns an accessory value into an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StabilizationMode {
    /// The accessory value maps directly to an offset angle.
    #[default]
    Attitude,
    /// The accessory value is a rate that is integrated into a held offset.
    AxisLock,
}

impl TryFrom<u8> for StabilizationMode {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(StabilizationMode::Attitude),
            1 => Ok(StabilizationMode::AxisLock),
            raw => Err(raw),
        }
    }
}

impl From<StabilizationMode> for u8 {
    fn from(mode: StabilizationMode) -> u8 {
        match mode {
            StabilizationMode::Attitude => 0,
            StabilizationMode::AxisLock => 1,
        }
    }
}

/// Settings for a single channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSettings<T> {
    /// Accessory driving the channel.
    pub input: InputSource,
    /// How the accessory value is interpreted.
    pub mode: StabilizationMode,
    /// Scale from accessory value to offset angle. In axis-lock mode this is
    /// also the bound on the integrated offset.
    pub input_range: T,
    /// Scale from accessory value to offset rate, per second. Axis-lock only.
    pub input_rate: T,
    /// Axis-lock rate threshold. The offset is integrated only while the
    /// commanded rate magnitude is above it.
    pub max_axis_lock_rate: T,
    /// Low-pass time constant in milliseconds. Zero disables smoothing.
    pub response_time_ms: u16,
    /// Divisor normalizing the compensated angle into the output range.
    pub output_range: T,
}

impl<T: Number> ChannelSettings<T> {
    /// Default input range.
    pub const DEFAULT_INPUT_RANGE: u32 = 20;
    /// Default input rate.
    pub const DEFAULT_INPUT_RATE: u32 = 50;
    /// Default axis-lock rate threshold.
    pub const DEFAULT_MAX_AXIS_LOCK_RATE: u32 = 1;
    /// Default output range.
    pub const DEFAULT_OUTPUT_RANGE: u32 = 20;

    /// Creates unbound channel settings with default scaling.
    pub fn new() -> Self {
        Self {
            input: InputSource::None,
            mode: StabilizationMode::Attitude,
            input_range: T::saturating_from(Self::DEFAULT_INPUT_RANGE),
            input_rate: T::saturating_from(Self::DEFAULT_INPUT_RATE),
            max_axis_lock_rate: T::saturating_from(Self::DEFAULT_MAX_AXIS_LOCK_RATE),
            response_time_ms: 0,
            output_range: T::saturating_from(Self::DEFAULT_OUTPUT_RANGE),
        }
    }

    /// Checks the values the stabilizer cannot run with: an accessory index
    /// outside `0..ACCESSORY_COUNT` and an output range that is not
    /// positive.
    pub fn check(&self, channel: Channel) -> Result<(), SettingsError> {
        if let InputSource::Accessory(index) = self.input {
            if index >= ACCESSORY_COUNT {
                return Err(SettingsError::UnknownInputSource {
                    channel,
                    raw: index,
                });
            }
        }
        if !(self.output_range > T::zero()) {
            return Err(SettingsError::InvalidOutputRange { channel });
        }
        Ok(())
    }
}

impl<T: Number> Default for ChannelSettings<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete stabilizer configuration, one [`ChannelSettings`] per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraStabSettings<T> {
    /// Per channel settings, indexed by [`Channel::index`].
    pub channels: [ChannelSettings<T>; CHANNEL_COUNT],
}

impl<T: Number> CameraStabSettings<T> {
    /// Creates a configuration with every channel unbound.
    ///
    /// Example Usage
    /// ```
    /// use camera_stabilization::{CameraStabSettings, Channel, InputSource, StabilizationMode};
    ///
    /// let mut settings = CameraStabSettings::<f32>::new();
    ///
    /// // Drive pitch from the first accessory and hold the commanded angle.
    /// settings[Channel::Pitch].input = InputSource::Accessory(0);
    /// settings[Channel::Pitch].mode = StabilizationMode::AxisLock;
    /// settings[Channel::Pitch].input_rate = 30.0;
    /// settings[Channel::Pitch].response_time_ms = 150;
    ///
    /// // Roll and yaw only follow the aircraft attitude.
    /// assert_eq!(settings[Channel::Roll].input, InputSource::None);
    /// ```
    pub fn new() -> Self {
        Self {
            channels: [ChannelSettings::new(); CHANNEL_COUNT],
        }
    }

    /// Checks every channel with [`ChannelSettings::check`], reporting the
    /// first failure in channel order.
    pub fn check(&self) -> Result<(), SettingsError> {
        Channel::ALL
            .iter()
            .try_for_each(|&channel| self[channel].check(channel))
    }
}

impl<T: Number> Default for CameraStabSettings<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Channel> for CameraStabSettings<T> {
    type Output = ChannelSettings<T>;

    fn index(&self, channel: Channel) -> &Self::Output {
        &self.channels[channel.index()]
    }
}

impl<T> IndexMut<Channel> for CameraStabSettings<T> {
    fn index_mut(&mut self, channel: Channel) -> &mut Self::Output {
        &mut self.channels[channel.index()]
    }
}

/// Whether the module should run, as reported by the hardware settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleEnable {
    /// Compiled in as a builtin module, always enabled.
    Builtin,
    /// Optional module switched on.
    Enabled,
    /// Optional module switched off.
    Disabled,
}

impl ModuleEnable {
    /// Returns `true` unless the module is switched off.
    pub fn is_enabled(self) -> bool {
        !matches!(self, ModuleEnable::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_index_matches_processing_order() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = CameraStabSettings::<f32>::new();
        for channel in Channel::ALL {
            let channel = settings[channel];
            assert_eq!(channel.input, InputSource::None);
            assert_eq!(channel.mode, StabilizationMode::Attitude);
            assert_eq!(channel.input_range, 20.0);
            assert_eq!(channel.input_rate, 50.0);
            assert_eq!(channel.max_axis_lock_rate, 1.0);
            assert_eq!(channel.response_time_ms, 0);
            assert_eq!(channel.output_range, 20.0);
        }
    }

    #[test]
    fn test_index_mut_touches_only_one_channel() {
        let mut settings = CameraStabSettings::<f32>::new();
        settings[Channel::Yaw].output_range = 90.0;
        assert_eq!(settings[Channel::Yaw].output_range, 90.0);
        assert_eq!(settings[Channel::Roll].output_range, 20.0);
        assert_eq!(settings[Channel::Pitch].output_range, 20.0);
    }

    #[test]
    fn test_input_source_from_raw() {
        assert_eq!(
            InputSource::from_raw(Channel::Roll, 0),
            Ok(InputSource::Accessory(0))
        );
        assert_eq!(
            InputSource::from_raw(Channel::Roll, 5),
            Ok(InputSource::Accessory(5))
        );
        assert_eq!(
            InputSource::from_raw(Channel::Roll, InputSource::RAW_NONE),
            Ok(InputSource::None)
        );
        assert_eq!(
            InputSource::from_raw(Channel::Yaw, 7),
            Err(SettingsError::UnknownInputSource {
                channel: Channel::Yaw,
                raw: 7
            })
        );
    }

    #[test]
    fn test_stabilization_mode_codes() {
        assert_eq!(StabilizationMode::try_from(0), Ok(StabilizationMode::Attitude));
        assert_eq!(StabilizationMode::try_from(1), Ok(StabilizationMode::AxisLock));
        assert_eq!(StabilizationMode::try_from(2), Err(2));
        assert_eq!(u8::from(StabilizationMode::AxisLock), 1);
    }

    #[test]
    fn test_default_settings_pass_check() {
        assert_eq!(CameraStabSettings::<f32>::new().check(), Ok(()));
    }

    #[test]
    fn test_check_rejects_non_positive_output_range() {
        for output_range in [0.0_f32, -20.0, f32::NAN] {
            let mut settings = CameraStabSettings::<f32>::new();
            settings[Channel::Yaw].output_range = output_range;
            assert_eq!(
                settings.check(),
                Err(SettingsError::InvalidOutputRange {
                    channel: Channel::Yaw
                })
            );
        }
    }

    #[test]
    fn test_check_rejects_accessory_index_out_of_range() {
        let mut settings = CameraStabSettings::<f32>::new();
        settings[Channel::Roll].input = InputSource::Accessory(ACCESSORY_COUNT - 1);
        assert_eq!(settings.check(), Ok(()));

        settings[Channel::Roll].input = InputSource::Accessory(ACCESSORY_COUNT);
        assert_eq!(
            settings.check(),
            Err(SettingsError::UnknownInputSource {
                channel: Channel::Roll,
                raw: ACCESSORY_COUNT
            })
        );
    }

    #[test]
    fn test_module_enable() {
        assert!(ModuleEnable::Builtin.is_enabled());
        assert!(ModuleEnable::Enabled.is_enabled());
        assert!(!ModuleEnable::Disabled.is_enabled());
    }
}

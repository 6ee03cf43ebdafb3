// src/settings/raw.rs

//! Stored settings as they come out of the settings object, before the
//! input source and stabilization mode codes are decoded.

use super::{
    CameraStabSettings, Channel, ChannelSettings, InputSource, StabilizationMode, ACCESSORY_COUNT,
    CHANNEL_COUNT,
};
use crate::error::SettingsError;
use crate::Number;

/// Raw per channel settings with undecoded enumeration codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawChannelSettings<T> {
    /// Input source code. See [`InputSource::from_raw`].
    pub input: u8,
    /// Stabilization mode code. See [`StabilizationMode`].
    pub mode: u8,
    /// See [`ChannelSettings::input_range`].
    pub input_range: T,
    /// See [`ChannelSettings::input_rate`].
    pub input_rate: T,
    /// See [`ChannelSettings::max_axis_lock_rate`].
    pub max_axis_lock_rate: T,
    /// See [`ChannelSettings::response_time_ms`].
    pub response_time_ms: u16,
    /// See [`ChannelSettings::output_range`].
    pub output_range: T,
}

impl<T: Number> RawChannelSettings<T> {
    /// Decodes the channel, rejecting unknown codes and the values refused
    /// by [`ChannelSettings::check`].
    pub fn validate(&self, channel: Channel) -> Result<ChannelSettings<T>, SettingsError> {
        let input = InputSource::from_raw(channel, self.input)?;
        let mode = StabilizationMode::try_from(self.mode)
            .map_err(|raw| SettingsError::UnknownStabilizationMode { channel, raw })?;

        let settings = ChannelSettings {
            input,
            mode,
            input_range: self.input_range,
            input_rate: self.input_rate,
            max_axis_lock_rate: self.max_axis_lock_rate,
            response_time_ms: self.response_time_ms,
            output_range: self.output_range,
        };
        settings.check(channel)?;
        Ok(settings)
    }
}

impl<T: Number> From<ChannelSettings<T>> for RawChannelSettings<T> {
    fn from(settings: ChannelSettings<T>) -> Self {
        Self {
            input: match settings.input {
                InputSource::None => InputSource::RAW_NONE,
                InputSource::Accessory(index) => {
                    debug_assert!(index < ACCESSORY_COUNT, "accessory index {} out of range", index);
                    index
                }
            },
            mode: settings.mode.into(),
            input_range: settings.input_range,
            input_rate: settings.input_rate,
            max_axis_lock_rate: settings.max_axis_lock_rate,
            response_time_ms: settings.response_time_ms,
            output_range: settings.output_range,
        }
    }
}

/// Raw stabilizer configuration, one [`RawChannelSettings`] per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCameraStabSettings<T> {
    /// Per channel raw settings, indexed by [`Channel::index`].
    pub channels: [RawChannelSettings<T>; CHANNEL_COUNT],
}

impl<T: Number> RawCameraStabSettings<T> {
    /// Decodes every channel. The first bad code found, in channel order,
    /// is reported.
    ///
    /// This is stricter than a single update: channels bound to no input are
    /// validated too, so an unused channel with a bad code still fails.
    pub fn validate(&self) -> Result<CameraStabSettings<T>, SettingsError> {
        let mut settings = CameraStabSettings::new();
        for channel in Channel::ALL {
            settings[channel] = self.channels[channel.index()].validate(channel)?;
        }
        Ok(settings)
    }
}

impl<T: Number> From<CameraStabSettings<T>> for RawCameraStabSettings<T> {
    fn from(settings: CameraStabSettings<T>) -> Self {
        Self {
            channels: settings.channels.map(RawChannelSettings::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_defaults() -> RawCameraStabSettings<f32> {
        CameraStabSettings::new().into()
    }

    #[test]
    fn test_raw_defaults_validate() {
        let raw = raw_defaults();
        assert_eq!(raw.channels[0].input, InputSource::RAW_NONE);
        assert_eq!(raw.validate(), Ok(CameraStabSettings::new()));
    }

    #[test]
    fn test_raw_axis_lock_accessory_decodes() {
        let mut raw = raw_defaults();
        raw.channels[Channel::Yaw.index()].input = 3;
        raw.channels[Channel::Yaw.index()].mode = 1;
        raw.channels[Channel::Yaw.index()].response_time_ms = 250;

        let settings = raw.validate().unwrap();
        assert_eq!(settings[Channel::Yaw].input, InputSource::Accessory(3));
        assert_eq!(settings[Channel::Yaw].mode, StabilizationMode::AxisLock);
        assert_eq!(settings[Channel::Yaw].response_time_ms, 250);
    }

    #[test]
    fn test_raw_unknown_mode_is_rejected() {
        let mut raw = raw_defaults();
        raw.channels[Channel::Pitch.index()].mode = 9;

        assert_eq!(
            raw.validate(),
            Err(SettingsError::UnknownStabilizationMode {
                channel: Channel::Pitch,
                raw: 9
            })
        );
    }

    #[test]
    fn test_raw_unknown_mode_rejected_even_when_unbound() {
        let mut raw = raw_defaults();
        raw.channels[Channel::Roll.index()].input = InputSource::RAW_NONE;
        raw.channels[Channel::Roll.index()].mode = 2;

        assert!(raw.validate().is_err());
    }

    #[test]
    fn test_raw_reports_first_bad_channel() {
        let mut raw = raw_defaults();
        raw.channels[Channel::Pitch.index()].input = 42;
        raw.channels[Channel::Yaw.index()].mode = 5;

        assert_eq!(
            raw.validate(),
            Err(SettingsError::UnknownInputSource {
                channel: Channel::Pitch,
                raw: 42
            })
        );
    }

    #[test]
    fn test_raw_zero_output_range_is_rejected() {
        for output_range in [0.0_f32, -45.0] {
            let mut raw = raw_defaults();
            raw.channels[Channel::Roll.index()].input = 0;
            raw.channels[Channel::Roll.index()].output_range = output_range;

            assert_eq!(
                raw.validate(),
                Err(SettingsError::InvalidOutputRange {
                    channel: Channel::Roll
                })
            );
        }
    }

    #[test]
    fn test_raw_zero_output_range_rejected_even_when_unbound() {
        let mut raw = raw_defaults();
        raw.channels[Channel::Yaw.index()].output_range = 0.0;

        assert_eq!(
            raw.validate(),
            Err(SettingsError::InvalidOutputRange {
                channel: Channel::Yaw
            })
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic]
    fn test_raw_from_out_of_range_accessory_asserts() {
        let mut settings = CameraStabSettings::<f32>::new();
        settings[Channel::Pitch].input = InputSource::Accessory(ACCESSORY_COUNT);
        let _ = RawCameraStabSettings::from(settings);
    }
}

// src/interfaces.rs

//! Interfaces to the rest of the flight software.
//!
//! The stabilizer reads its settings, the aircraft attitude, and accessory
//! values through these traits and writes the camera commands back through
//! [`CameraDesiredSink`]. All reads are expected to be synchronous and
//! non-blocking, returning the latest published value.

use crate::error::SettingsError;
use crate::settings::{CameraStabSettings, Channel, RawCameraStabSettings};
use crate::Number;

/// Aircraft attitude angles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attitude<T> {
    /// Roll angle.
    pub roll: T,
    /// Pitch angle.
    pub pitch: T,
    /// Yaw angle.
    pub yaw: T,
}

impl<T: Copy> Attitude<T> {
    /// Creates an attitude from roll, pitch, and yaw.
    pub fn new(roll: T, pitch: T, yaw: T) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Angle about the given axis.
    pub fn axis(&self, channel: Channel) -> T {
        match channel {
            Channel::Roll => self.roll,
            Channel::Pitch => self.pitch,
            Channel::Yaw => self.yaw,
        }
    }
}

/// Camera gimbal commands, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraDesired<T> {
    /// Roll command.
    pub roll: T,
    /// Pitch command.
    pub pitch: T,
    /// Yaw command.
    pub yaw: T,
}

impl<T: Copy> CameraDesired<T> {
    /// Command for the given axis.
    pub fn axis(&self, channel: Channel) -> T {
        match channel {
            Channel::Roll => self.roll,
            Channel::Pitch => self.pitch,
            Channel::Yaw => self.yaw,
        }
    }

    /// Sets the command for the given axis.
    pub fn set_axis(&mut self, channel: Channel, value: T) {
        match channel {
            Channel::Roll => self.roll = value,
            Channel::Pitch => self.pitch = value,
            Channel::Yaw => self.yaw = value,
        }
    }
}

/// Objects that can publish an update event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectId {
    /// Aircraft attitude estimate. Drives the stabilizer.
    AttitudeActual,
    /// Accessory input values.
    AccessoryDesired,
    /// Camera stabilization settings.
    CameraStabSettings,
    /// Camera gimbal commands.
    CameraDesired,
}

/// An update notification for a published object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectEvent {
    /// The object that was updated.
    pub object: ObjectId,
    /// Instance of the object that was updated.
    pub instance: u16,
}

impl ObjectEvent {
    /// An update of instance zero of `object`.
    pub fn updated(object: ObjectId) -> Self {
        Self {
            object,
            instance: 0,
        }
    }
}

/// Source of the stabilizer configuration.
pub trait SettingsProvider<T> {
    /// Returns the current settings, or why they are unusable.
    fn settings(&self) -> Result<CameraStabSettings<T>, SettingsError>;
}

impl<T: Number> SettingsProvider<T> for CameraStabSettings<T> {
    fn settings(&self) -> Result<CameraStabSettings<T>, SettingsError> {
        self.check().map(|()| *self)
    }
}

impl<T: Number> SettingsProvider<T> for RawCameraStabSettings<T> {
    fn settings(&self) -> Result<CameraStabSettings<T>, SettingsError> {
        self.validate()
    }
}

/// Source of the aircraft attitude.
pub trait AttitudeSource<T> {
    /// Returns the latest attitude estimate.
    fn attitude(&self) -> Attitude<T>;
}

/// Source of accessory input values.
pub trait AccessorySource<T> {
    /// Returns the normalized value of accessory `index`, in `[-1, 1]`, or
    /// `None` when that accessory has not been published.
    fn accessory(&self, index: u8) -> Option<T>;
}

/// Closures mapping an accessory index to a value act as accessory sources.
impl<T, F> AccessorySource<T> for F
where
    F: Fn(u8) -> Option<T>,
{
    fn accessory(&self, index: u8) -> Option<T> {
        self(index)
    }
}

/// Destination of the camera gimbal commands.
pub trait CameraDesiredSink<T> {
    /// Publishes a new set of commands.
    fn set_camera_desired(&mut self, desired: CameraDesired<T>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StabilizationMode;

    #[test]
    fn test_attitude_axis_lookup() {
        let attitude = Attitude::new(1.0_f32, 2.0, 3.0);
        assert_eq!(attitude.axis(Channel::Roll), 1.0);
        assert_eq!(attitude.axis(Channel::Pitch), 2.0);
        assert_eq!(attitude.axis(Channel::Yaw), 3.0);
    }

    #[test]
    fn test_camera_desired_set_axis() {
        let mut desired = CameraDesired::<f32>::default();
        desired.set_axis(Channel::Pitch, -0.5);
        assert_eq!(desired.axis(Channel::Pitch), -0.5);
        assert_eq!(desired.roll, 0.0);
        assert_eq!(desired.yaw, 0.0);
    }

    #[test]
    fn test_raw_settings_provider_validates() {
        let mut raw: RawCameraStabSettings<f32> = CameraStabSettings::new().into();
        raw.channels[Channel::Roll.index()].mode = u8::from(StabilizationMode::AxisLock);
        assert_eq!(
            raw.settings().map(|s| s[Channel::Roll].mode),
            Ok(StabilizationMode::AxisLock)
        );

        raw.channels[Channel::Roll.index()].mode = 3;
        assert!(raw.settings().is_err());
    }

    #[test]
    fn test_typed_settings_provider_checks_output_range() {
        let mut settings = CameraStabSettings::<f32>::new();
        assert_eq!(settings.settings(), Ok(settings));

        settings[Channel::Pitch].output_range = 0.0;
        assert_eq!(
            settings.settings(),
            Err(SettingsError::InvalidOutputRange {
                channel: Channel::Pitch
            })
        );
    }
}

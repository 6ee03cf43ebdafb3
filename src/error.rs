// src/error.rs

//! Error types for settings validation, module initialization, and the
//! periodic update.
//!
//! Transient conditions such as an accessory that has not published yet or
//! a stalled tick counter are recovered inside the update and never show up
//! here.

use crate::settings::Channel;
use thiserror::Error;

/// Settings that cannot be turned into a valid configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// The stabilization mode code is not attitude or axis-lock.
    #[error("unknown stabilization mode {raw} on {channel:?} channel")]
    UnknownStabilizationMode {
        /// Channel carrying the bad code.
        channel: Channel,
        /// The raw mode code as stored.
        raw: u8,
    },

    /// The input source code names neither an accessory nor "none".
    #[error("unknown input source {raw} on {channel:?} channel")]
    UnknownInputSource {
        /// Channel carrying the bad code.
        channel: Channel,
        /// The raw input source code as stored.
        raw: u8,
    },

    /// The output range is zero, negative, or not a number.
    #[error("output range on {channel:?} channel must be positive")]
    InvalidOutputRange {
        /// Channel carrying the bad range.
        channel: Channel,
    },
}

/// Reasons the module did not come up.
///
/// Both variants leave the module inactive; they only differ by cause.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The module is disabled by the hardware settings.
    #[error("camera stabilization disabled")]
    Disabled,

    /// The storage slot for the module state is already taken.
    #[error("camera stabilization state storage unavailable")]
    StorageUnavailable,
}

/// Fatal errors raised by the periodic update.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraStabError {
    /// The settings failed validation. The module halts.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    /// The module halted on an earlier cycle and produces no more output.
    #[error("camera stabilization halted")]
    Halted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_converts_into_update_error() {
        let error = SettingsError::UnknownStabilizationMode {
            channel: Channel::Pitch,
            raw: 7,
        };
        let converted: CameraStabError = error.into();
        assert_eq!(converted, CameraStabError::InvalidSettings(error));
    }
}

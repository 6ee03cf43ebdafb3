// src/module.rs

//! # Module Lifecycle
//!
//! Startup for the camera stabilization module. The module only takes
//! its state storage when enabled, and has no thread of its own; once
//! initialized it is driven entirely by attitude update events passed to
//! [`CameraStab::attitude_updated`].
//!
//! Example Usage
//! ```
//! use camera_stabilization::{initialize, start, CameraStab, InitError, ModuleEnable};
//! use static_cell::StaticCell;
//!
//! static CAMERA_STAB: StaticCell<CameraStab<f32>> = StaticCell::new();
//!
//! let stabilizer = initialize(ModuleEnable::Enabled, &CAMERA_STAB, 0).unwrap();
//! start();
//! assert!(!stabilizer.is_halted());
//!
//! // The storage slot can only be taken once.
//! assert_eq!(
//!     initialize(ModuleEnable::Enabled, &CAMERA_STAB, 0).err(),
//!     Some(InitError::StorageUnavailable)
//! );
//! ```

use crate::error::InitError;
use crate::settings::ModuleEnable;
use crate::stabilizer::{CameraStab, Tick};
use crate::Number;
use static_cell::StaticCell;

/// Initializes the module into `storage`, measuring time from `now`.
///
/// A disabled module never takes its storage. Either error leaves the
/// module inactive.
pub fn initialize<T: Number>(
    enable: ModuleEnable,
    storage: &'static StaticCell<CameraStab<T>>,
    now: Tick,
) -> Result<&'static mut CameraStab<T>, InitError> {
    if !enable.is_enabled() {
        log::info!("camera stabilization disabled");
        return Err(InitError::Disabled);
    }

    match storage.try_init(CameraStab::new(now)) {
        Some(stabilizer) => {
            log::info!("camera stabilization initialized ({:?})", enable);
            Ok(stabilizer)
        }
        None => {
            log::error!("camera stabilization state storage unavailable");
            Err(InitError::StorageUnavailable)
        }
    }
}

/// Starts the module. There is no module thread, so this always succeeds.
pub fn start() {}

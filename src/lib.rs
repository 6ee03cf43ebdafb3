// src/lib.rs

//! # Camera Stabilization
//!
//! This crate provides a `no_std`, no-alloc camera stabilization module.
//! Accessory inputs, typically spare RC channels, are turned into camera
//! gimbal commands for roll, pitch, and yaw. Each command is compensated
//! against the current aircraft attitude so the camera holds the horizon or
//! a locked axis while the aircraft moves underneath it.
//!
//! Every input channel runs either in attitude mode, where the accessory
//! value maps directly to an offset angle, or in axis-lock mode, where the
//! accessory value is a rate that is integrated over time. The result is
//! smoothed by a single-pole low-pass filter before it is combined with the
//! attitude and scaled into the `[-1, 1]` output range.

#![no_std]
#![deny(missing_docs)]

pub mod error;
pub mod interfaces;
pub mod module;
pub mod number;
pub mod settings;
pub mod stabilizer;

#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use interfaces::*;
#[doc(inline)]
pub use module::{initialize, start};
#[doc(inline)]
pub use number::*;
#[doc(inline)]
pub use settings::*;
#[doc(inline)]
pub use stabilizer::*;

#[cfg(test)]
mod test_utils;

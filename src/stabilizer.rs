// src/stabilizer.rs

//! # Camera Stabilizer Module
//!
//! This module provides the per cycle stabilization pipeline: tick
//! tracking, the per channel input filter, and the update that combines
//! them with the aircraft attitude.

pub mod camera_stab;
pub use camera_stab::*;
pub mod channel;
pub use channel::*;
pub mod timing;
pub use timing::*;

//! # TRIS Shared
//!
//! Plain data types used by both execution contexts of the AR bridge.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - channels or locks
//! - the native engine boundary
//!
//! If you need synchronization, put it in `tris_bridge`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod geometry;
pub mod input;
pub mod platform;
pub mod status;

pub use constants::{
    DEFAULT_DOUBLE_TAP_SLOP_PX, DEFAULT_DOUBLE_TAP_TIMEOUT, DEFAULT_LONG_PRESS_TIMEOUT,
    DEFAULT_REFRESH_INTERVAL, DEFAULT_TOUCH_SLOP_PX, HISCORE_KEY, TARGET_FRAME_TIME,
};
pub use geometry::{DisplayRotation, ViewportGeometry};
pub use input::{ContactPhase, ContactSample, InputEvent};
pub use platform::PlatformContext;
pub use status::{EngineStatusSnapshot, InstallError};

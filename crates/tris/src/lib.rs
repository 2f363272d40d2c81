//! # TRIS
//!
//! Headless host for the AR bridge: a simulated engine, a logging presenter
//! and the driver behind the `tris_headless` binary.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐         ┌───────────────┐         ┌──────────────────┐
//! │ tris_shared  │ ◄────── │  tris_bridge  │ ◄────── │ tris (this crate)│
//! │ (plain data) │         │ (coordination)│         │ sim + presenter  │
//! └──────────────┘         └───────────────┘         └──────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod headless;
pub mod logging;
pub mod presenter;
pub mod sim;

pub use headless::{run, HeadlessOptions, HeadlessReport, HostError, HostStore};
pub use logging::init_logging;
pub use presenter::LogPresenter;
pub use sim::{SimConfig, SimulatedEngine};

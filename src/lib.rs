// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! Initramfs boot menu for a handheld with a touchscreen.
//!
//! Draws a 2×2 menu on the framebuffer, takes one touch (or a persisted
//! choice from the boot partition), mounts the selected root and execs its
//! init in place.

/// Boot choice, kernel sync, root handoff and the overall flow.
pub mod boot;

/// Command line parsing.
pub mod cli;

/// Defaults and environment overrides.
pub mod config;

/// Last-resort console output.
pub mod console;

/// Framebuffer compositor.
pub mod display;

/// Touchscreen decoder.
pub mod input;

/// Mount retries and flash volume attachment.
pub mod storage;

/// Privileged operations behind a trait.
pub mod sys;

pub use boot::{BootChoice, BootError, BootMenu};
pub use config::InitConfig;

// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
//
// ─────────────────────────────────────────────────────────────
// bootmenu · Storage mounting
//
// Block devices show up asynchronously during early boot, so
// mounts are retried a bounded number of times with a fixed
// delay. Within one attempt every filesystem type candidate is
// tried in order.
//
// * `flash` – raw NAND volume attachment via an external helper
// ─────────────────────────────────────────────────────────────

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

pub mod flash;

pub use flash::{attach_flash_volume, FlashAttach, FlashError};

use crate::sys::System;

/// Errors returned by [`mount_with_retry`].
#[derive(Debug, Error)]
pub enum MountError {
    #[error("could not mount {device} on {mountpoint:?} after {attempts} attempt(s)")]
    MountExhausted {
        device: String,
        mountpoint: PathBuf,
        attempts: u32,
    },
    #[error("no filesystem type given for {0}")]
    NoCandidates(String),
}

/// Bounded linear retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A single attempt, no waiting.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

/// Mount `device` on `mountpoint`, trying each filesystem type in
/// `candidates` per attempt. Returns the type that succeeded.
pub fn mount_with_retry<S: System + ?Sized>(
    system: &mut S,
    candidates: &[String],
    device: &str,
    mountpoint: &Path,
    policy: &RetryPolicy,
) -> Result<String, MountError> {
    if candidates.is_empty() {
        return Err(MountError::NoCandidates(device.to_string()));
    }
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        for fstype in candidates {
            info!("mounting {fstype} {device} {}", mountpoint.display());
            match system.mount(device, mountpoint, fstype) {
                Ok(()) => return Ok(fstype.clone()),
                Err(e) => warn!("mount failed: {e}"),
            }
        }
        if attempt < attempts {
            thread::sleep(policy.delay);
        }
    }
    Err(MountError::MountExhausted {
        device: device.to_string(),
        mountpoint: mountpoint.to_path_buf(),
        attempts,
    })
}

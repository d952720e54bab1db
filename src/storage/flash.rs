// CLASSIFICATION: COMMUNITY
// Filename: flash.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Raw NAND volumes must be attached to UBI before their filesystem can be
//! mounted. Attachment is done by an external helper that needs sysfs.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use log::{info, warn};
use thiserror::Error;

use crate::sys::System;

/// How to attach the flash volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashAttach {
    /// Where sysfs gets mounted for the helper.
    pub sysfs: PathBuf,
    /// Helper program, e.g. `/bin/ubiattach`.
    pub helper: PathBuf,
    pub args: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("could not start {helper:?}: {source}")]
    HelperSpawn { helper: PathBuf, source: io::Error },
    #[error("{helper:?} {args:?} failed: {status}")]
    HelperFailed {
        helper: PathBuf,
        args: Vec<String>,
        status: ExitStatus,
    },
}

/// Mount sysfs and run the attach helper to completion.
pub fn attach_flash_volume<S: System + ?Sized>(
    system: &mut S,
    attach: &FlashAttach,
) -> Result<(), FlashError> {
    if let Err(e) = fs::create_dir_all(&attach.sysfs) {
        warn!("mkdir {}: {e}", attach.sysfs.display());
    }
    info!("mounting sysfs none {}", attach.sysfs.display());
    if let Err(e) = system.mount("none", &attach.sysfs, "sysfs") {
        warn!("mount failed: {e}");
    }

    info!("running {} {}", attach.helper.display(), attach.args.join(" "));
    let status = system
        .run_helper(&attach.helper, &attach.args)
        .map_err(|source| FlashError::HelperSpawn {
            helper: attach.helper.clone(),
            source,
        })?;
    if !status.success() {
        return Err(FlashError::HelperFailed {
            helper: attach.helper.clone(),
            args: attach.args.clone(),
            status,
        });
    }
    Ok(())
}

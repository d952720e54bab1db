// CLASSIFICATION: COMMUNITY
// Filename: handoff.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Final switch from the initramfs into the mounted root.
//!
//! The boot menu runs instead of the kernel's usual early userspace, so it
//! provides `/dev` itself, moves the new root over `/`, chroots (optionally
//! into a per-OS subdirectory), takes over the console and execs init in
//! place. Nothing comes back on success.

use std::convert::Infallible;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::sys::System;

/// Everything needed to become the target's init.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    /// Mountpoint of the new root, e.g. `/real-root`.
    pub root: PathBuf,
    /// Directory inside the root holding the OS, if several share a partition.
    pub subdir: Option<PathBuf>,
    pub console: PathBuf,
    pub init: PathBuf,
    /// Full argv for init, including argv[0].
    pub argv: Vec<String>,
}

impl Handoff {
    /// Where the target OS lives as seen from the initramfs.
    pub fn os_root(&self) -> PathBuf {
        match &self.subdir {
            Some(sub) => self.root.join(sub),
            None => self.root.clone(),
        }
    }

    pub fn dev_dir(&self) -> PathBuf {
        self.os_root().join("dev")
    }
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("chdir {path:?}: {source}")]
    ChangeDirectory { path: PathBuf, source: io::Error },
    #[error("moving {path:?} onto /: {source}")]
    MoveMount { path: PathBuf, source: io::Error },
    #[error("chroot {path:?}: {source}")]
    ChangeRoot { path: PathBuf, source: io::Error },
    #[error("console {path:?}: {source}")]
    Console { path: PathBuf, source: io::Error },
    #[error("exec {path:?}: {source}")]
    Exec { path: PathBuf, source: io::Error },
}

/// Replace this process with the target init. Only returns on failure.
pub fn transition_to_root<S: System + ?Sized>(
    system: &mut S,
    handoff: &Handoff,
) -> Result<Infallible, TransitionError> {
    let dev = handoff.dev_dir();
    info!("mounting devtmpfs none {}", dev.display());
    if let Err(e) = system.mount("none", &dev, "devtmpfs") {
        warn!("mount failed: {e}");
    }

    let root = &handoff.root;
    system
        .chdir(root)
        .map_err(|source| TransitionError::ChangeDirectory {
            path: root.clone(),
            source,
        })?;
    system
        .move_mount(root, Path::new("/"))
        .map_err(|source| TransitionError::MoveMount {
            path: root.clone(),
            source,
        })?;
    system
        .chroot(Path::new("."))
        .map_err(|source| TransitionError::ChangeRoot {
            path: root.clone(),
            source,
        })?;
    if let Some(sub) = &handoff.subdir {
        system
            .chroot(sub)
            .map_err(|source| TransitionError::ChangeRoot {
                path: sub.clone(),
                source,
            })?;
    }
    system
        .chdir(Path::new("/"))
        .map_err(|source| TransitionError::ChangeDirectory {
            path: PathBuf::from("/"),
            source,
        })?;
    system
        .attach_console(&handoff.console)
        .map_err(|source| TransitionError::Console {
            path: handoff.console.clone(),
            source,
        })?;

    info!("exec {} {:?}", handoff.init.display(), handoff.argv);
    system
        .exec(&handoff.init, &handoff.argv)
        .map_err(|source| TransitionError::Exec {
            path: handoff.init.clone(),
            source,
        })
}

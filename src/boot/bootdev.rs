// CLASSIFICATION: COMMUNITY
// Filename: bootdev.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! The persisted boot device file on the boot partition.
//!
//! A booted system that wants to come back to the same target writes the
//! file again. If it never does (e.g. it is broken), the next boot falls
//! back to the menu, so the file is removed as soon as it has been read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::choice::BootChoice;

/// Handle on the boot device file; removes it at most once per run.
#[derive(Debug)]
pub struct BootDevFile {
    path: PathBuf,
    discarded: bool,
}

impl BootDevFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            discarded: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once the file has been removed (or found missing) by this handle.
    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Read the persisted choice and remove the file.
    pub fn consume(&mut self) -> Option<BootChoice> {
        let text = match fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{}: no persisted choice", self.path.display());
                self.discarded = true;
                return None;
            }
            Err(e) => {
                warn!("{}: {e}", self.path.display());
                String::new()
            }
        };
        self.discard();
        let choice = BootChoice::parse(&text);
        match &choice {
            Some(c) => info!("persisted choice: {c}"),
            None => info!("{}: empty, showing menu", self.path.display()),
        }
        choice
    }

    /// Remove the file unless this handle already did. Returns true when this
    /// call removed it.
    pub fn discard(&mut self) -> bool {
        if self.discarded {
            return false;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("removed {}", self.path.display());
                self.discarded = true;
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.discarded = true;
                false
            }
            Err(e) => {
                warn!("could not remove {}: {e}", self.path.display());
                false
            }
        }
    }
}

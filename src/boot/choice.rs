// CLASSIFICATION: COMMUNITY
// Filename: choice.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! What to boot.
//!
//! A persisted choice is one line of text:
//!
//! ```text
//! /dev/mmcblk0p2 debian
//! ubi0:rootfs
//! /fat/bootmenu/1.sh
//! ```
//!
//! The first token names a shell script (`*.sh`), a UBI volume (`ubi*`) or a
//! block device; the optional second token is a directory inside that root
//! to chroot into.

use std::fmt;
use std::path::{Path, PathBuf};

/// The single boot target selected for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootChoice {
    /// Hand over to a shell script on the boot partition.
    ShellScript(PathBuf),
    /// Mount a block device as the new root.
    BlockDevice(String, Option<PathBuf>),
    /// Attach and mount a UBI flash volume as the new root.
    FlashVolume(String, Option<PathBuf>),
}

impl BootChoice {
    /// Parse the first line of a boot device file. Returns `None` for an
    /// empty line.
    pub fn parse(text: &str) -> Option<Self> {
        let line = text.lines().next()?.trim();
        let mut tokens = line.split_whitespace();
        let target = tokens.next()?;
        let subdir = tokens.next().and_then(normalize_subdir);

        let choice = if target.ends_with(".sh") {
            BootChoice::ShellScript(PathBuf::from(target))
        } else if target.starts_with("ubi") {
            BootChoice::FlashVolume(target.to_string(), subdir)
        } else {
            BootChoice::BlockDevice(target.to_string(), subdir)
        };
        Some(choice)
    }

    /// Directory inside the new root to chroot into, if any.
    pub fn subdir(&self) -> Option<&Path> {
        match self {
            BootChoice::ShellScript(_) => None,
            BootChoice::BlockDevice(_, sub) | BootChoice::FlashVolume(_, sub) => sub.as_deref(),
        }
    }
}

fn normalize_subdir(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

impl fmt::Display for BootChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootChoice::ShellScript(p) => write!(f, "script {}", p.display()),
            BootChoice::BlockDevice(dev, sub) | BootChoice::FlashVolume(dev, sub) => {
                write!(f, "{dev}")?;
                if let Some(sub) = sub {
                    write!(f, " /{}", sub.display())?;
                }
                Ok(())
            }
        }
    }
}

// CLASSIFICATION: COMMUNITY
// Filename: kernel_sync.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Keep the bootloader's kernel in step with the chosen root.
//!
//! The bootloader only reads the kernel image cached on the small boot
//! partition. Before handing over to a root filesystem its own kernel image
//! is copied over the cached one; if anything changed the device restarts so
//! the matching kernel is actually running.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use thiserror::Error;

use crate::sys::System;

/// Compare/copy granularity.
pub const CHUNK_SIZE: usize = 4096;

/// Result of a kernel sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Unchanged,
    UpdatedAndRebooting,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("open {path:?}: {source}")]
    OpenSource { path: PathBuf, source: io::Error },
    #[error("open {path:?} for writing: {source}")]
    OpenDestination { path: PathBuf, source: io::Error },
    #[error("stat {path:?}: {source}")]
    Stat { path: PathBuf, source: io::Error },
    #[error("truncate {path:?}: {source}")]
    Truncate { path: PathBuf, source: io::Error },
    #[error("read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("seek {path:?}: {source}")]
    Seek { path: PathBuf, source: io::Error },
    #[error("write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

fn read_chunk(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Make `destination` an exact copy of `source`, rewriting only the chunks
/// that differ. Returns whether anything was changed.
pub fn synchronize_image(source: &Path, destination: &Path) -> Result<bool, SyncError> {
    let mut src = File::open(source).map_err(|e| SyncError::OpenSource {
        path: source.to_path_buf(),
        source: e,
    })?;
    let src_len = src
        .metadata()
        .map_err(|e| SyncError::Stat {
            path: source.to_path_buf(),
            source: e,
        })?
        .len();
    let mut dst = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(destination)
        .map_err(|e| SyncError::OpenDestination {
            path: destination.to_path_buf(),
            source: e,
        })?;
    let dst_len = dst
        .metadata()
        .map_err(|e| SyncError::Stat {
            path: destination.to_path_buf(),
            source: e,
        })?
        .len();

    let mut changed = false;
    if dst_len != src_len {
        info!(
            "{}: {dst_len} -> {src_len} bytes",
            destination.display()
        );
        dst.set_len(src_len).map_err(|e| SyncError::Truncate {
            path: destination.to_path_buf(),
            source: e,
        })?;
        changed = true;
    }

    let mut want = vec![0u8; CHUNK_SIZE];
    let mut have = vec![0u8; CHUNK_SIZE];
    let mut offset = 0u64;
    loop {
        let n = read_chunk(&mut src, &mut want).map_err(|e| SyncError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        let m = read_chunk(&mut dst, &mut have[..n]).map_err(|e| SyncError::Read {
            path: destination.to_path_buf(),
            source: e,
        })?;
        if m != n || want[..n] != have[..n] {
            dst.seek(SeekFrom::Start(offset))
                .map_err(|e| SyncError::Seek {
                    path: destination.to_path_buf(),
                    source: e,
                })?;
            dst.write_all(&want[..n]).map_err(|e| SyncError::Write {
                path: destination.to_path_buf(),
                source: e,
            })?;
            changed = true;
        }
        offset += n as u64;
    }

    if changed {
        dst.sync_all().map_err(|e| SyncError::Write {
            path: destination.to_path_buf(),
            source: e,
        })?;
    }
    Ok(changed)
}

/// Refresh `cached_image` from `target_image`. When it changed, unmount
/// `unmount` in order and restart the device.
pub fn sync_kernel_and_maybe_reboot<S: System + ?Sized>(
    system: &mut S,
    cached_image: &Path,
    target_image: &Path,
    unmount: &[PathBuf],
) -> Result<SyncOutcome, SyncError> {
    if !synchronize_image(target_image, cached_image)? {
        info!("kernel {} up to date", cached_image.display());
        return Ok(SyncOutcome::Unchanged);
    }

    info!(
        "kernel {} updated from {}, restarting",
        cached_image.display(),
        target_image.display()
    );
    system.sync_disks();
    for mountpoint in unmount {
        if let Err(e) = system.unmount(mountpoint) {
            warn!("umount {}: {e}", mountpoint.display());
        }
    }
    if let Err(e) = system.restart() {
        error!("restart failed: {e}");
    }
    system.park();
    Ok(SyncOutcome::UpdatedAndRebooting)
}

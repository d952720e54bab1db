// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! Shared fakes for the integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::fs;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Instant;

use bootmenu::display::{DrawError, FramebufferDevice, Surface, BITMAP_HEIGHT, ROW_BYTES};
use bootmenu::input::InputEvent;
use bootmenu::sys::System;

/// One recorded privileged call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Mount {
        source: String,
        target: PathBuf,
        fstype: String,
    },
    MoveMount {
        source: PathBuf,
        target: PathBuf,
    },
    Unmount(PathBuf),
    Chroot(PathBuf),
    Chdir(PathBuf),
    Console(PathBuf),
    Exec {
        program: PathBuf,
        argv: Vec<String>,
    },
    Helper {
        program: PathBuf,
        args: Vec<String>,
    },
    Sync,
    Restart,
    Park,
}

/// Records every call; mounts succeed only for `accept`ed (source, fstype)
/// pairs and for pseudo filesystems (`none`).
#[derive(Debug, Default)]
pub struct FakeSystem {
    pub calls: Vec<Call>,
    pub accept: Vec<(String, String)>,
    pub mount_times: Vec<Instant>,
    pub helper_code: i32,
    pub fail_chroot: bool,
}

impl FakeSystem {
    pub fn accepting(pairs: &[(&str, &str)]) -> Self {
        Self {
            accept: pairs
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn mounts(&self) -> Vec<(String, String)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Mount { source, fstype, .. } => Some((source.clone(), fstype.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn exec_call(&self) -> Option<&Call> {
        self.calls.iter().find(|c| matches!(c, Call::Exec { .. }))
    }

    pub fn has(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }
}

impl System for FakeSystem {
    fn mount(&mut self, source: &str, target: &Path, fstype: &str) -> io::Result<()> {
        self.mount_times.push(Instant::now());
        self.calls.push(Call::Mount {
            source: source.into(),
            target: target.into(),
            fstype: fstype.into(),
        });
        let ok = source == "none"
            || self
                .accept
                .iter()
                .any(|(s, t)| s == source && t == fstype);
        if ok {
            Ok(())
        } else {
            Err(io::Error::from_raw_os_error(libc::ENODEV))
        }
    }

    fn move_mount(&mut self, source: &Path, target: &Path) -> io::Result<()> {
        self.calls.push(Call::MoveMount {
            source: source.into(),
            target: target.into(),
        });
        Ok(())
    }

    fn unmount(&mut self, target: &Path) -> io::Result<()> {
        self.calls.push(Call::Unmount(target.into()));
        Ok(())
    }

    fn chroot(&mut self, path: &Path) -> io::Result<()> {
        self.calls.push(Call::Chroot(path.into()));
        if self.fail_chroot {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        Ok(())
    }

    fn chdir(&mut self, path: &Path) -> io::Result<()> {
        self.calls.push(Call::Chdir(path.into()));
        Ok(())
    }

    fn attach_console(&mut self, console: &Path) -> io::Result<()> {
        self.calls.push(Call::Console(console.into()));
        Ok(())
    }

    fn exec(&mut self, program: &Path, argv: &[String]) -> Result<Infallible, io::Error> {
        self.calls.push(Call::Exec {
            program: program.into(),
            argv: argv.to_vec(),
        });
        Err(io::Error::new(io::ErrorKind::Other, "exec intercepted"))
    }

    fn run_helper(&mut self, program: &Path, args: &[String]) -> io::Result<ExitStatus> {
        self.calls.push(Call::Helper {
            program: program.into(),
            args: args.to_vec(),
        });
        Ok(ExitStatus::from_raw(self.helper_code << 8))
    }

    fn sync_disks(&mut self) {
        self.calls.push(Call::Sync);
    }

    fn restart(&mut self) -> io::Result<()> {
        self.calls.push(Call::Restart);
        Ok(())
    }

    fn park(&mut self) {
        self.calls.push(Call::Park);
    }
}

/// In-memory framebuffer.
#[derive(Debug)]
pub struct MemoryFramebuffer {
    pub pixels: Vec<u8>,
    pub line_length: usize,
    pub acquisitions: usize,
}

impl MemoryFramebuffer {
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            pixels: vec![fill; width * 4 * height],
            line_length: width * 4,
            acquisitions: 0,
        }
    }

    /// Bytes of screen row `y` starting at pixel `left`, one asset row wide.
    pub fn row(&self, left: usize, y: usize) -> &[u8] {
        let start = y * self.line_length + left * 4;
        &self.pixels[start..start + ROW_BYTES]
    }
}

pub struct MemorySurface<'a> {
    fb: &'a mut MemoryFramebuffer,
}

impl Surface for MemorySurface<'_> {
    fn line_length(&self) -> usize {
        self.fb.line_length
    }

    fn pixels(&mut self) -> &mut [u8] {
        &mut self.fb.pixels
    }
}

impl FramebufferDevice for MemoryFramebuffer {
    type Surface<'a> = MemorySurface<'a>
    where
        Self: 'a;

    fn acquire(&mut self) -> Result<Self::Surface<'_>, DrawError> {
        self.acquisitions += 1;
        Ok(MemorySurface { fb: self })
    }
}

/// Byte value of stored row `row` in an asset written with `seed`.
pub fn stored_byte(seed: u8, row: usize) -> u8 {
    seed.wrapping_add(row as u8)
}

/// Write a 128×128 asset whose stored row `r` is filled with
/// `stored_byte(seed, r)`.
pub fn write_asset(dir: &Path, name: &str, seed: u8) -> PathBuf {
    let mut data = Vec::with_capacity(ROW_BYTES * BITMAP_HEIGHT);
    for row in 0..BITMAP_HEIGHT {
        data.extend(std::iter::repeat(stored_byte(seed, row)).take(ROW_BYTES));
    }
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

/// Serialise events as a raw event device would deliver them.
pub fn event_stream(events: &[InputEvent]) -> Vec<u8> {
    events.iter().flat_map(|e| e.to_bytes()).collect()
}

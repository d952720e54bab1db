// CLASSIFICATION: COMMUNITY
// Filename: linux.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! [`System`] implementation backed by the Linux system call layer.

use std::convert::Infallible;
use std::ffi::CString;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::IntoRawFd;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::ptr;
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use super::System;

/// Real system calls. Only meaningful when running as PID 1 of an initramfs.
#[derive(Debug, Clone)]
pub struct LinuxSystem {
    restart_grace: Duration,
}

impl LinuxSystem {
    /// Create a handle that waits `restart_grace` after a restart request.
    pub fn new(restart_grace: Duration) -> Self {
        Self { restart_grace }
    }
}

impl Default for LinuxSystem {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

fn c_path(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn c_str(value: &str) -> io::Result<CString> {
    CString::new(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn check(rc: libc::c_int) -> io::Result<()> {
    if rc == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

impl System for LinuxSystem {
    fn mount(&mut self, source: &str, target: &Path, fstype: &str) -> io::Result<()> {
        let source = c_str(source)?;
        let target = c_path(target)?;
        let fstype = c_str(fstype)?;
        // SAFETY: all pointers come from live CStrings; no mount data is passed.
        check(unsafe {
            libc::mount(
                source.as_ptr(),
                target.as_ptr(),
                fstype.as_ptr(),
                0,
                ptr::null(),
            )
        })
    }

    fn move_mount(&mut self, source: &Path, target: &Path) -> io::Result<()> {
        let source = c_path(source)?;
        let target = c_path(target)?;
        // SAFETY: MS_MOVE ignores fstype and data.
        check(unsafe {
            libc::mount(
                source.as_ptr(),
                target.as_ptr(),
                ptr::null(),
                libc::MS_MOVE,
                ptr::null(),
            )
        })
    }

    fn unmount(&mut self, target: &Path) -> io::Result<()> {
        let target = c_path(target)?;
        // SAFETY: target is a valid NUL terminated path.
        check(unsafe { libc::umount2(target.as_ptr(), 0) })
    }

    fn chroot(&mut self, path: &Path) -> io::Result<()> {
        std::os::unix::fs::chroot(path)
    }

    fn chdir(&mut self, path: &Path) -> io::Result<()> {
        std::env::set_current_dir(path)
    }

    fn attach_console(&mut self, console: &Path) -> io::Result<()> {
        let fd = OpenOptions::new()
            .read(true)
            .write(true)
            .open(console)?
            .into_raw_fd();
        for target in 0..=2 {
            // SAFETY: fd is an open descriptor we own; 0..=2 are the stdio slots.
            if let Err(e) = check(unsafe { libc::dup2(fd, target) }) {
                // SAFETY: fd is still owned by us.
                unsafe { libc::close(fd) };
                return Err(e);
            }
        }
        if fd > 2 {
            // SAFETY: the console now lives on 0..=2; the original fd is ours to close.
            unsafe { libc::close(fd) };
        }
        // PID 1 is already a session leader; stealing the tty may still be refused.
        // SAFETY: plain ioctl on stdin with an integer argument.
        if let Err(e) = check(unsafe { libc::ioctl(0, libc::TIOCSCTTY as _, 1) }) {
            debug!("TIOCSCTTY on {}: {e}", console.display());
        }
        Ok(())
    }

    fn exec(&mut self, program: &Path, argv: &[String]) -> Result<Infallible, io::Error> {
        let mut cmd = Command::new(program);
        if let Some((arg0, rest)) = argv.split_first() {
            cmd.arg0(arg0).args(rest);
        }
        Err(cmd.exec())
    }

    fn run_helper(&mut self, program: &Path, args: &[String]) -> io::Result<ExitStatus> {
        Command::new(program).args(args).status()
    }

    fn sync_disks(&mut self) {
        // SAFETY: sync(2) has no preconditions.
        unsafe { libc::sync() };
    }

    fn restart(&mut self) -> io::Result<()> {
        // SAFETY: reboot(2) takes a plain command word.
        check(unsafe { libc::reboot(libc::RB_AUTOBOOT) })
    }

    fn park(&mut self) {
        warn!(
            "restart requested, waiting {}s for it to take effect",
            self.restart_grace.as_secs()
        );
        thread::sleep(self.restart_grace);
    }
}

// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
//
// ─────────────────────────────────────────────────────────────
// bootmenu · System capability seam
//
// Every privileged call the boot menu makes (mounting, root
// switching, exec, restart) goes through the [`System`] trait so
// the boot flow can be driven against a recording fake in tests.
//
// * [`LinuxSystem`] – the real implementation on top of `libc`
// ─────────────────────────────────────────────────────────────

use std::convert::Infallible;
use std::io;
use std::path::Path;
use std::process::ExitStatus;

mod linux;

pub use linux::LinuxSystem;

/// Privileged operations needed between the initramfs and the target init.
pub trait System {
    /// Mount `source` at `target` as filesystem `fstype`.
    fn mount(&mut self, source: &str, target: &Path, fstype: &str) -> io::Result<()>;

    /// Move an existing mount from `source` to `target`.
    fn move_mount(&mut self, source: &Path, target: &Path) -> io::Result<()>;

    /// Detach the filesystem mounted at `target`.
    fn unmount(&mut self, target: &Path) -> io::Result<()>;

    /// Change the root directory of the calling process.
    fn chroot(&mut self, path: &Path) -> io::Result<()>;

    /// Change the working directory of the calling process.
    fn chdir(&mut self, path: &Path) -> io::Result<()>;

    /// Point stdin, stdout and stderr at `console` and claim it as the
    /// controlling terminal.
    fn attach_console(&mut self, console: &Path) -> io::Result<()>;

    /// Replace the process image. Only returns when the exec failed.
    fn exec(&mut self, program: &Path, argv: &[String]) -> Result<Infallible, io::Error>;

    /// Run a helper program to completion and report its exit status.
    fn run_helper(&mut self, program: &Path, args: &[String]) -> io::Result<ExitStatus>;

    /// Flush dirty buffers to disk.
    fn sync_disks(&mut self);

    /// Request an immediate hard restart. Only returns when the request failed
    /// or has not taken effect yet.
    fn restart(&mut self) -> io::Result<()>;

    /// Block after a restart request has been issued.
    fn park(&mut self);
}

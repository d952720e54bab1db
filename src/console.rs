// CLASSIFICATION: COMMUNITY
// Filename: console.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Last-resort diagnostics for a device whose only output is the screen.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Print `msg` on stdout and on the text console at `tty`, ignoring failures.
pub fn announce(tty: &Path, msg: &str) {
    println!("{msg}");
    if let Ok(mut f) = OpenOptions::new().write(true).open(tty) {
        let _ = writeln!(f, "{msg}");
    }
}

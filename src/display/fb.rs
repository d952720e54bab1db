// CLASSIFICATION: COMMUNITY
// Filename: fb.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Linux fbdev backend (`/dev/fb0`).

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use log::debug;

use super::mmap::Mapping;
use super::{DrawError, FramebufferDevice, Surface};

const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;

#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

/// `struct fb_var_screeninfo` from `<linux/fb.h>`.
#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbVarScreenInfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// `struct fb_fix_screeninfo` from `<linux/fb.h>`.
#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbFixScreenInfo {
    id: [u8; 16],
    smem_start: libc::c_ulong,
    smem_len: u32,
    type_: u32,
    type_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: libc::c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

/// Framebuffer device node opened afresh for every draw.
#[derive(Debug, Clone)]
pub struct LinuxFramebuffer {
    path: PathBuf,
}

impl LinuxFramebuffer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Live mapping of the whole virtual screen.
pub struct MappedSurface {
    map: Mapping,
    line_length: usize,
    _file: File,
}

impl Surface for MappedSurface {
    fn line_length(&self) -> usize {
        self.line_length
    }

    fn pixels(&mut self) -> &mut [u8] {
        self.map.as_mut_slice()
    }
}

impl FramebufferDevice for LinuxFramebuffer {
    type Surface<'a> = MappedSurface
    where
        Self: 'a;

    fn acquire(&mut self) -> Result<Self::Surface<'_>, DrawError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|source| DrawError::FramebufferUnavailable {
                path: self.path.clone(),
                source,
            })?;
        let fd = file.as_raw_fd();

        let mut var = FbVarScreenInfo::default();
        let mut fix = FbFixScreenInfo::default();
        // SAFETY: both structs mirror the kernel ABI and outlive the calls.
        let rc = unsafe {
            if libc::ioctl(fd, FBIOGET_VSCREENINFO as _, &mut var as *mut FbVarScreenInfo) < 0 {
                -1
            } else {
                libc::ioctl(fd, FBIOGET_FSCREENINFO as _, &mut fix as *mut FbFixScreenInfo)
            }
        };
        if rc < 0 {
            return Err(DrawError::FramebufferInfoError {
                path: self.path.clone(),
                source: std::io::Error::last_os_error(),
            });
        }

        let line_length = fix.line_length as usize;
        let len = var.yres_virtual as usize * line_length;
        debug!(
            "fb {}: {}x{} virtual {}x{}, line_length {}",
            self.path.display(),
            var.xres,
            var.yres,
            var.xres_virtual,
            var.yres_virtual,
            line_length
        );
        let map = Mapping::new(fd, len, true).map_err(|source| DrawError::FramebufferMapError {
            path: self.path.clone(),
            source,
        })?;
        Ok(MappedSurface {
            map,
            line_length,
            _file: file,
        })
    }
}

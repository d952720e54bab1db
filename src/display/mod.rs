// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
//
// ─────────────────────────────────────────────────────────────
// bootmenu · Framebuffer compositor
//
// Blits fixed 128×128 raw assets onto the live framebuffer.
// Both the asset and the framebuffer are mapped for the length
// of a single draw call and released before it returns.
//
// * `bitmap` – asset mapping and row addressing
// * `fb`     – `/dev/fb0` backend (ioctl + mmap)
// * `layout` – where the four menu tiles live on screen
// ─────────────────────────────────────────────────────────────

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

pub mod bitmap;
pub mod fb;
pub mod layout;
mod mmap;

pub use bitmap::{RawBitmap, BITMAP_BYTES, BITMAP_HEIGHT, ROW_BYTES};
pub use fb::LinuxFramebuffer;
pub use layout::{MenuLayout, MenuTile};

use crate::input::Quadrant;

/// Errors raised while drawing a bitmap.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("bitmap {path:?} unavailable: {source}")]
    AssetUnavailable { path: PathBuf, source: io::Error },
    #[error("bitmap {path:?} is {len} bytes, too short for a 128x128 image")]
    AssetTruncated { path: PathBuf, len: usize },
    #[error("pixel buffer is {len} bytes, too short for a 128x128 image")]
    ShortPixelData { len: usize },
    #[error("bitmap {path:?} could not be mapped: {source}")]
    AssetMapError { path: PathBuf, source: io::Error },
    #[error("framebuffer {path:?} unavailable: {source}")]
    FramebufferUnavailable { path: PathBuf, source: io::Error },
    #[error("framebuffer {path:?} info query failed: {source}")]
    FramebufferInfoError { path: PathBuf, source: io::Error },
    #[error("framebuffer {path:?} could not be mapped: {source}")]
    FramebufferMapError { path: PathBuf, source: io::Error },
    #[error("bitmap at ({left}, {top}) does not fit a {len} byte surface with stride {line_length}")]
    OutOfBounds {
        left: usize,
        top: usize,
        line_length: usize,
        len: usize,
    },
}

/// A writable view of the screen, valid until dropped.
pub trait Surface {
    /// Bytes per scanline.
    fn line_length(&self) -> usize;
    /// The whole mapped region.
    fn pixels(&mut self) -> &mut [u8];
}

/// Source of framebuffer surfaces.
pub trait FramebufferDevice {
    type Surface<'a>: Surface
    where
        Self: 'a;

    /// Acquire the surface for one draw.
    fn acquire(&mut self) -> Result<Self::Surface<'_>, DrawError>;
}

/// Copy a 128×128 asset into `surface` with its top-left pixel at
/// (`left`, `top`). Nothing is written if the asset is short or the
/// footprint does not fit.
pub fn blit(
    asset: &[u8],
    surface: &mut [u8],
    line_length: usize,
    left: usize,
    top: usize,
    clear: bool,
) -> Result<(), DrawError> {
    if asset.len() < BITMAP_BYTES {
        return Err(DrawError::ShortPixelData { len: asset.len() });
    }
    let len = surface.len();
    let out_of_bounds = || DrawError::OutOfBounds {
        left,
        top,
        line_length,
        len,
    };
    let x_offset = left
        .checked_mul(bitmap::PIXEL_BYTES)
        .filter(|x| x.checked_add(ROW_BYTES).is_some_and(|e| e <= line_length))
        .ok_or_else(out_of_bounds)?;
    // One past the last byte written; bounds every row before it.
    top.checked_add(BITMAP_HEIGHT - 1)
        .and_then(|row| row.checked_mul(line_length))
        .and_then(|row| row.checked_add(x_offset + ROW_BYTES))
        .filter(|end| *end <= len)
        .ok_or_else(out_of_bounds)?;

    if clear {
        surface.fill(0);
    }
    for y in 0..BITMAP_HEIGHT {
        let start = (top + y) * line_length + x_offset;
        surface[start..start + ROW_BYTES].copy_from_slice(bitmap::image_row(asset, y));
    }
    Ok(())
}

/// Serialises all drawing onto one framebuffer device.
pub struct Compositor<F: FramebufferDevice> {
    device: F,
}

impl<F: FramebufferDevice> Compositor<F> {
    pub fn new(device: F) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &F {
        &self.device
    }

    /// Draw the asset at `path` with its top-left corner at (`left`, `top`),
    /// optionally clearing the whole screen first.
    pub fn draw(
        &mut self,
        path: &Path,
        left: usize,
        top: usize,
        clear_first: bool,
    ) -> Result<(), DrawError> {
        let asset = RawBitmap::open(path)?;
        let mut surface = self.device.acquire()?;
        let line_length = surface.line_length();
        blit(
            asset.bytes(),
            surface.pixels(),
            line_length,
            left,
            top,
            clear_first,
        )?;
        debug!("drew {} at ({left}, {top})", path.display());
        Ok(())
    }

    /// Draw the four menu tiles. Missing tiles are skipped; the first tile
    /// that draws clears the screen. Returns how many were drawn.
    pub fn draw_menu(&mut self, layout: &MenuLayout) -> usize {
        let mut drawn = 0;
        for quadrant in Quadrant::ALL {
            let tile = layout.tile(quadrant);
            match self.draw(&tile.bitmap, tile.left, tile.top, drawn == 0) {
                Ok(()) => drawn += 1,
                Err(e) => warn!("menu tile {quadrant:?}: {e}"),
            }
        }
        drawn
    }

    /// Redraw the chosen tile alone, centred, on a cleared screen.
    pub fn acknowledge(
        &mut self,
        layout: &MenuLayout,
        quadrant: Quadrant,
    ) -> Result<(), DrawError> {
        let tile = layout.tile(quadrant);
        self.draw(&tile.bitmap, layout.ack_left, layout.ack_top, true)
    }
}

// CLASSIFICATION: COMMUNITY
// Filename: bitmap.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Raw 128×128 BGRA assets.
//!
//! Assets are plain pixel dumps stored bottom row first. Rows are located
//! from the end of the file, so a leading header (if any) is skipped.

use std::fs::File;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use super::mmap::Mapping;
use super::DrawError;

/// Width of every asset in pixels.
pub const BITMAP_WIDTH: usize = 128;
/// Height of every asset in pixels.
pub const BITMAP_HEIGHT: usize = 128;
/// Bytes per pixel.
pub const PIXEL_BYTES: usize = 4;
/// Bytes in one asset row.
pub const ROW_BYTES: usize = BITMAP_WIDTH * PIXEL_BYTES;
/// Minimum asset size.
pub const BITMAP_BYTES: usize = ROW_BYTES * BITMAP_HEIGHT;

/// Read-only mapping of a bitmap asset, released on drop.
#[derive(Debug)]
pub struct RawBitmap {
    map: Mapping,
}

impl RawBitmap {
    /// Map the asset at `path`; its size comes from `fstat`.
    pub fn open(path: &Path) -> Result<Self, DrawError> {
        let file = File::open(path).map_err(|source| DrawError::AssetUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let len = file
            .metadata()
            .map_err(|source| DrawError::AssetUnavailable {
                path: path.to_path_buf(),
                source,
            })?
            .len() as usize;
        if len < BITMAP_BYTES {
            return Err(DrawError::AssetTruncated {
                path: path.to_path_buf(),
                len,
            });
        }
        let map = Mapping::new(file.as_raw_fd(), len, false).map_err(|source| {
            DrawError::AssetMapError {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self { map })
    }

    /// Whole mapped file.
    pub fn bytes(&self) -> &[u8] {
        self.map.as_slice()
    }

    /// Size of the mapped file in bytes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Always false; empty assets are rejected by [`RawBitmap::open`].
    pub fn is_empty(&self) -> bool {
        self.map.len() == 0
    }
}

/// Image row `y` (0 = top of the picture) within an asset of any size.
pub fn image_row(asset: &[u8], y: usize) -> &[u8] {
    let end = asset.len() - y * ROW_BYTES;
    &asset[end - ROW_BYTES..end]
}

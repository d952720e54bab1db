// CLASSIFICATION: COMMUNITY
// Filename: layout.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Screen placement of the boot menu tiles.

use std::path::{Path, PathBuf};

use crate::input::Quadrant;

/// One menu tile: the asset and where it sits in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTile {
    pub bitmap: PathBuf,
    pub left: usize,
    pub top: usize,
}

/// The 2×2 menu plus the spot used to acknowledge a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    pub top_left: MenuTile,
    pub top_right: MenuTile,
    pub bottom_left: MenuTile,
    pub bottom_right: MenuTile,
    pub ack_left: usize,
    pub ack_top: usize,
}

impl MenuLayout {
    /// Standard 480×640 portrait layout with assets under `dir`.
    pub fn portrait(dir: &Path) -> Self {
        let tile = |name: &str, left, top| MenuTile {
            bitmap: dir.join(name),
            left,
            top,
        };
        Self {
            top_left: tile("sd.bmp", 56, 96),
            top_right: tile("nand.bmp", 56 + 240, 96),
            bottom_left: tile("1.bmp", 56, 320 + 96),
            bottom_right: tile("2.bmp", 56 + 240, 320 + 96),
            ack_left: 176,
            ack_top: 256,
        }
    }

    pub fn tile(&self, quadrant: Quadrant) -> &MenuTile {
        match quadrant {
            Quadrant::TopLeft => &self.top_left,
            Quadrant::TopRight => &self.top_right,
            Quadrant::BottomLeft => &self.bottom_left,
            Quadrant::BottomRight => &self.bottom_right,
        }
    }
}

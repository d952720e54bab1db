// CLASSIFICATION: COMMUNITY
// Filename: compositor.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

mod common;

use bootmenu::display::{Compositor, DrawError, LinuxFramebuffer, MenuLayout, BITMAP_HEIGHT, ROW_BYTES};
use common::{stored_byte, write_asset, MemoryFramebuffer};
use tempfile::tempdir;

const FILL: u8 = 0x55;

#[test]
fn draw_copies_rows_bottom_first_inside_footprint() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempdir().unwrap();
    let asset = write_asset(dir.path(), "sd.bmp", 3);
    let mut compositor = Compositor::new(MemoryFramebuffer::new(256, 300, FILL));

    let (left, top) = (10, 20);
    compositor.draw(&asset, left, top, false).unwrap();
    let fb = compositor.device();

    for y in 0..BITMAP_HEIGHT {
        let expected = stored_byte(3, BITMAP_HEIGHT - 1 - y);
        assert!(
            fb.row(left, top + y).iter().all(|b| *b == expected),
            "row {y}"
        );
    }
    let x_start = left * 4;
    for (i, b) in fb.pixels.iter().enumerate() {
        let (row, col) = (i / fb.line_length, i % fb.line_length);
        let inside = (top..top + BITMAP_HEIGHT).contains(&row)
            && (x_start..x_start + ROW_BYTES).contains(&col);
        if !inside {
            assert_eq!(*b, FILL, "byte {i} outside the footprint was touched");
        }
    }
}

#[test]
fn clear_first_blanks_the_whole_surface() {
    let dir = tempdir().unwrap();
    let asset = write_asset(dir.path(), "nand.bmp", 40);
    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, FILL));

    compositor.draw(&asset, 176, 256, true).unwrap();
    let fb = compositor.device();
    assert_eq!(fb.pixels[0], 0);
    assert_eq!(*fb.pixels.last().unwrap(), 0);
    assert_eq!(fb.row(176, 256)[0], stored_byte(40, BITMAP_HEIGHT - 1));
}

#[test]
fn asset_with_header_is_read_from_the_end() {
    let dir = tempdir().unwrap();
    let raw = write_asset(dir.path(), "raw.bmp", 7);
    let mut with_header = vec![0xEEu8; 54];
    with_header.extend(std::fs::read(&raw).unwrap());
    let asset = dir.path().join("header.bmp");
    std::fs::write(&asset, with_header).unwrap();

    let mut compositor = Compositor::new(MemoryFramebuffer::new(256, 200, 0));
    compositor.draw(&asset, 0, 0, false).unwrap();
    let fb = compositor.device();
    assert!(fb.row(0, 127).iter().all(|b| *b == stored_byte(7, 0)));
    assert!(fb.row(0, 0).iter().all(|b| *b == stored_byte(7, 127)));
}

#[test]
fn missing_asset_never_touches_the_framebuffer() {
    let dir = tempdir().unwrap();
    let mut compositor = Compositor::new(MemoryFramebuffer::new(256, 300, FILL));
    let err = compositor
        .draw(&dir.path().join("absent.bmp"), 0, 0, true)
        .unwrap_err();
    assert!(matches!(err, DrawError::AssetUnavailable { .. }));
    assert_eq!(compositor.device().acquisitions, 0);
    assert!(compositor.device().pixels.iter().all(|b| *b == FILL));
}

#[test]
fn out_of_bounds_draw_leaves_screen_untouched() {
    let dir = tempdir().unwrap();
    let asset = write_asset(dir.path(), "1.bmp", 1);
    let mut compositor = Compositor::new(MemoryFramebuffer::new(200, 200, FILL));
    let err = compositor.draw(&asset, 100, 0, true).unwrap_err();
    assert!(matches!(err, DrawError::OutOfBounds { .. }));
    assert!(compositor.device().pixels.iter().all(|b| *b == FILL));
}

#[test]
fn missing_framebuffer_device_is_reported() {
    let dir = tempdir().unwrap();
    let asset = write_asset(dir.path(), "2.bmp", 9);
    let mut compositor = Compositor::new(LinuxFramebuffer::new(dir.path().join("fb0")));
    let err = compositor.draw(&asset, 0, 0, false).unwrap_err();
    assert!(matches!(err, DrawError::FramebufferUnavailable { .. }));
}

#[test]
fn menu_skips_missing_tiles() {
    let dir = tempdir().unwrap();
    write_asset(dir.path(), "sd.bmp", 10);
    write_asset(dir.path(), "nand.bmp", 20);
    write_asset(dir.path(), "2.bmp", 40);
    let layout = MenuLayout::portrait(dir.path());

    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, FILL));
    assert_eq!(compositor.draw_menu(&layout), 3);
    let fb = compositor.device();
    // The first tile clears the screen.
    assert_eq!(fb.pixels[0], 0);
    assert_eq!(fb.row(56 + 240, 96)[0], stored_byte(20, 127));
    assert_eq!(fb.row(56, 320 + 96)[0], 0);
    assert_eq!(fb.row(56 + 240, 320 + 96)[0], stored_byte(40, 127));
}

#[test]
fn menu_clears_on_first_tile_drawn() {
    let dir = tempdir().unwrap();
    write_asset(dir.path(), "nand.bmp", 20);
    write_asset(dir.path(), "1.bmp", 30);
    let layout = MenuLayout::portrait(dir.path());

    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, FILL));
    assert_eq!(compositor.draw_menu(&layout), 2);
    let fb = compositor.device();
    // sd.bmp is missing; nand.bmp takes over the clear.
    assert_eq!(fb.pixels[0], 0);
    assert_eq!(fb.row(56, 96)[0], 0);
    assert_eq!(fb.row(56 + 240, 96)[0], stored_byte(20, 127));
    assert_eq!(fb.row(56, 320 + 96)[0], stored_byte(30, 127));
    assert_eq!(compositor.device().acquisitions, 2);
}

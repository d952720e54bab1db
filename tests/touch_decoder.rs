// CLASSIFICATION: COMMUNITY
// Filename: touch_decoder.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

mod common;

use std::collections::VecDeque;
use std::io::{self, Cursor, Read};
use std::path::Path;

use bootmenu::display::{Compositor, MenuLayout, BITMAP_HEIGHT};
use bootmenu::input::{
    await_choice, decode_choice, InputError, InputEvent, Quadrant, ABS_X, ABS_Y, EVENT_SIZE,
    EV_ABS,
};
use common::{event_stream, stored_byte, write_asset, MemoryFramebuffer};
use tempfile::{tempdir, TempDir};

const EV_SYN: u16 = 0;
const EV_KEY: u16 = 1;
const BTN_TOUCH: u16 = 0x14a;

fn abs_x(v: i32) -> InputEvent {
    InputEvent::new(EV_ABS, ABS_X, v)
}

fn abs_y(v: i32) -> InputEvent {
    InputEvent::new(EV_ABS, ABS_Y, v)
}

fn syn() -> InputEvent {
    InputEvent::new(EV_SYN, 0, 0)
}

fn menu() -> (TempDir, MenuLayout) {
    let dir = tempdir().unwrap();
    write_asset(dir.path(), "sd.bmp", 10);
    write_asset(dir.path(), "nand.bmp", 20);
    write_asset(dir.path(), "1.bmp", 30);
    write_asset(dir.path(), "2.bmp", 40);
    let layout = MenuLayout::portrait(dir.path());
    (dir, layout)
}

fn decode(events: &[InputEvent]) -> Result<Quadrant, InputError> {
    let (_dir, layout) = menu();
    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, 0));
    decode_choice(Cursor::new(event_stream(events)), &layout, &mut compositor)
}

#[test]
fn thresholds_pick_each_quadrant() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(decode(&[abs_x(2500), abs_y(2500)]).unwrap(), Quadrant::TopRight);
    assert_eq!(decode(&[abs_x(1000), abs_y(2500)]).unwrap(), Quadrant::TopLeft);
    assert_eq!(decode(&[abs_x(1000), abs_y(1000)]).unwrap(), Quadrant::BottomLeft);
    assert_eq!(decode(&[abs_x(2500), abs_y(1000)]).unwrap(), Quadrant::BottomRight);
}

#[test]
fn waits_for_both_axes() {
    let events = [
        InputEvent::new(EV_KEY, BTN_TOUCH, 1),
        abs_x(2500),
        syn(),
        abs_x(2600),
        syn(),
    ];
    assert!(matches!(decode(&events), Err(InputError::StreamClosed)));

    let events = [abs_y(2500), syn(), abs_x(1200), syn()];
    assert_eq!(decode(&events).unwrap(), Quadrant::TopLeft);
}

#[test]
fn stops_reading_after_one_selection() {
    let (_dir, layout) = menu();
    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, 0));
    let stream = event_stream(&[abs_x(2500), abs_y(1000), syn(), abs_x(100), abs_y(100)]);
    let mut cursor = Cursor::new(stream);

    let choice = decode_choice(&mut cursor, &layout, &mut compositor).unwrap();
    assert_eq!(choice, Quadrant::BottomRight);
    assert_eq!(cursor.position() as usize, 2 * EVENT_SIZE);
}

#[test]
fn selection_is_acknowledged_before_returning() {
    let (_dir, layout) = menu();
    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, 0xFF));
    let stream = event_stream(&[abs_x(1000), abs_y(1000)]);
    decode_choice(Cursor::new(stream), &layout, &mut compositor).unwrap();

    let fb = compositor.device();
    assert_eq!(fb.acquisitions, 1);
    // 1.bmp redrawn at the acknowledgement spot on a cleared screen.
    assert_eq!(fb.row(layout.ack_left, layout.ack_top)[0], stored_byte(30, BITMAP_HEIGHT - 1));
    assert_eq!(fb.pixels[0], 0);
}

/// Hands out one queued chunk per `read` call.
struct ChunkedReader {
    chunks: VecDeque<Vec<u8>>,
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                Ok(n)
            }
            None => Ok(0),
        }
    }
}

#[test]
fn short_read_keeps_decoding() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (_dir, layout) = menu();
    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, 0));

    // The Y record arrives without its value; the stale value stays in place.
    let y = abs_y(0).to_bytes();
    let reader = ChunkedReader {
        chunks: VecDeque::from(vec![
            abs_x(2500).to_bytes().to_vec(),
            y[..EVENT_SIZE - 4].to_vec(),
        ]),
    };
    let choice = decode_choice(reader, &layout, &mut compositor).unwrap();
    assert_eq!(choice, Quadrant::TopRight);
}

#[test]
fn missing_device_is_unavailable() {
    let (_dir, layout) = menu();
    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, 0));
    let err = await_choice(Path::new("/nonexistent/event0"), &layout, &mut compositor).unwrap_err();
    assert!(matches!(err, InputError::InputUnavailable { .. }));
    assert_eq!(compositor.device().acquisitions, 0);
}

#[test]
fn reads_from_device_node() {
    let (dir, layout) = menu();
    let node = dir.path().join("event0");
    std::fs::write(&node, event_stream(&[abs_x(300), abs_y(2999), syn()])).unwrap();
    let mut compositor = Compositor::new(MemoryFramebuffer::new(480, 640, 0));
    assert_eq!(
        await_choice(&node, &layout, &mut compositor).unwrap(),
        Quadrant::TopLeft
    );
}

// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Touchscreen decoder.
//!
//! Reduces the raw event stream of a resistive touch digitizer to exactly one
//! menu selection. Reads block without timeout: the menu waits until someone
//! touches the screen.

use std::fs::OpenOptions;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

pub mod event;

pub use event::{InputEvent, ABS_X, ABS_Y, EVENT_SIZE, EV_ABS};

use crate::display::{Compositor, FramebufferDevice, MenuLayout};

/// Axis value splitting each axis into a "high" and a "not high" half.
pub const AXIS_THRESHOLD: i32 = 2000;

/// Errors from the touch decoder.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open touchscreen {path:?}: {source}")]
    InputUnavailable { path: PathBuf, source: io::Error },
    #[error("touchscreen read failed: {0}")]
    Read(#[source] io::Error),
    #[error("touchscreen event stream closed")]
    StreamClosed,
}

/// The four selectable menu regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Menu drawing order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Map digitizer coordinates onto the 2×2 menu.
    pub fn classify(x: i32, y: i32) -> Self {
        if y > AXIS_THRESHOLD {
            if x > AXIS_THRESHOLD {
                Quadrant::TopRight
            } else {
                Quadrant::TopLeft
            }
        } else if x < AXIS_THRESHOLD {
            Quadrant::BottomLeft
        } else {
            Quadrant::BottomRight
        }
    }
}

/// Latest absolute X/Y values; negative means not seen yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
}

impl Default for TouchSample {
    fn default() -> Self {
        Self { x: -1, y: -1 }
    }
}

impl TouchSample {
    /// Fold one event into the sample; returns the selection once both axes
    /// hold non-negative values.
    pub fn feed(&mut self, ev: &InputEvent) -> Option<Quadrant> {
        if ev.is_abs(ABS_X) {
            debug!("ABS_X type={} code={} value={}", ev.type_, ev.code, ev.value);
            self.x = ev.value;
        }
        if ev.is_abs(ABS_Y) {
            debug!("ABS_Y type={} code={} value={}", ev.type_, ev.code, ev.value);
            self.y = ev.value;
        }
        if self.x < 0 || self.y < 0 {
            return None;
        }
        Some(Quadrant::classify(self.x, self.y))
    }
}

/// Read events from `reader` until one selection is made, acknowledge it on
/// screen and return it.
pub fn decode_choice<R, F>(
    mut reader: R,
    layout: &MenuLayout,
    compositor: &mut Compositor<F>,
) -> Result<Quadrant, InputError>
where
    R: Read,
    F: FramebufferDevice,
{
    let mut sample = TouchSample::default();
    let mut raw = [0u8; EVENT_SIZE];
    let quadrant = loop {
        let n = match reader.read(&mut raw) {
            Ok(0) => return Err(InputError::StreamClosed),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(InputError::Read(e)),
        };
        if n < EVENT_SIZE {
            warn!("short read: {n} of {EVENT_SIZE} bytes");
        }
        if let Some(q) = sample.feed(&InputEvent::from_bytes(&raw)) {
            break q;
        }
    };
    info!("x={}, y={} -> {quadrant:?}", sample.x, sample.y);

    if let Err(e) = compositor.acknowledge(layout, quadrant) {
        warn!("could not acknowledge {quadrant:?}: {e}");
    }
    Ok(quadrant)
}

/// Open the touchscreen at `path` and block until one selection is made.
pub fn await_choice<F: FramebufferDevice>(
    path: &Path,
    layout: &MenuLayout,
    compositor: &mut Compositor<F>,
) -> Result<Quadrant, InputError> {
    let device = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| InputError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    decode_choice(device, layout, compositor)
}

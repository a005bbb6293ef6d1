//! Canvas bounds, colors and shape state
//!
//! Plain value types shared by shapes, animations and keyframes, plus the
//! linear tween used by every animation kind.

use std::fmt;

use crate::error::{AnimatorError, Result};

/// Discrete animation time unit. Real time is `tick / tempo` seconds.
pub type Tick = u32;

// ─────────────────────────────────────────────────────────────────────────────
// Bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable canvas viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0, 0, 100, 100)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "canvas {} {} {} {}",
            self.x, self.y, self.width, self.height
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from integer channels, rejecting anything outside `0..=255`
    pub fn from_channels(r: i32, g: i32, b: i32) -> Result<Self> {
        Ok(Self::new(channel(r, "red")?, channel(g, "green")?, channel(b, "blue")?))
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

fn channel(value: i32, name: &str) -> Result<u8> {
    u8::try_from(value).map_err(|_| {
        AnimatorError::invalid(format!(
            "{} channel must be within 0..=255, got {}",
            name, value
        ))
    })
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shape State
// ─────────────────────────────────────────────────────────────────────────────

/// The animatable fields of a shape at one instant
///
/// `width`/`height` are the shape's first and second dimension: the size of
/// a rectangle, the radii of an ellipse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeState {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb,
}

impl ShapeState {
    pub fn new(x: i32, y: i32, width: u32, height: u32, color: Rgb) -> Result<Self> {
        guard_dimension(width)?;
        guard_dimension(height)?;
        Ok(Self {
            x,
            y,
            width,
            height,
            color,
        })
    }
}

pub(crate) fn guard_dimension(dimension: u32) -> Result<()> {
    if dimension == 0 {
        return Err(AnimatorError::invalid(
            "dimensions must be positive, got 0",
        ));
    }
    Ok(())
}

pub(crate) fn guard_interval(start: Tick, end: Tick) -> Result<()> {
    if end < start {
        return Err(AnimatorError::invalid(format!(
            "end time {} is before start time {}",
            end, start
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tweening
// ─────────────────────────────────────────────────────────────────────────────

/// Linearly interpolate a scalar from `from` at `start` to `to` at `end`
///
/// Evaluated in `f64` and rounded half away from zero. A zero-length interval
/// has no intermediate values and resolves straight to `to`.
pub fn tween(from: f64, to: f64, start: Tick, end: Tick, tick: Tick) -> f64 {
    if end == start {
        return to.round();
    }
    let (start, end, tick) = (f64::from(start), f64::from(end), f64::from(tick));
    let span = end - start;
    (from * (end - tick) / span + to * (tick - start) / span).round()
}

pub(crate) fn tween_i32(from: i32, to: i32, start: Tick, end: Tick, tick: Tick) -> i32 {
    tween(f64::from(from), f64::from(to), start, end, tick) as i32
}

pub(crate) fn tween_u32(from: u32, to: u32, start: Tick, end: Tick, tick: Tick) -> u32 {
    tween(f64::from(from), f64::from(to), start, end, tick).max(1.0) as u32
}

pub(crate) fn tween_u8(from: u8, to: u8, start: Tick, end: Tick, tick: Tick) -> u8 {
    tween(f64::from(from), f64::from(to), start, end, tick).clamp(0.0, 255.0) as u8
}

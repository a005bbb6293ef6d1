//! Keyframes
//!
//! A keyframe is a full-state snapshot of one shape, reached at `end` after
//! tweening from the previous keyframe over `[start, end]`. It owns no
//! animation objects: its Move, Resize and ColorChange triple is derived from
//! the scalar fields on demand, so editing a field changes exactly the
//! animation that reads it.

use std::fmt;

use crate::animation::{Animation, Change};
use crate::error::Result;
use crate::geometry::{guard_dimension, guard_interval, Rgb, ShapeState, Tick};
use crate::shape::ShapeKey;

/// A named full-state snapshot of a shape
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Keyframe {
    shape: ShapeKey,
    start: Tick,
    end: Tick,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgb,
}

impl Keyframe {
    /// Create a keyframe reaching `state` at `end`, tweening from `start`
    pub fn new(shape: &ShapeKey, start: Tick, end: Tick, state: ShapeState) -> Result<Self> {
        guard_interval(start, end)?;
        guard_dimension(state.width)?;
        guard_dimension(state.height)?;
        Ok(Self {
            shape: shape.clone(),
            start,
            end,
            x: state.x,
            y: state.y,
            width: state.width,
            height: state.height,
            color: state.color,
        })
    }

    /// A point keyframe: `state` at `tick`, with no tween leading into it
    pub fn at(shape: &ShapeKey, tick: Tick, state: ShapeState) -> Result<Self> {
        Self::new(shape, tick, tick, state)
    }

    pub fn shape(&self) -> &ShapeKey {
        &self.shape
    }

    pub fn start_time(&self) -> Tick {
        self.start
    }

    pub fn end_time(&self) -> Tick {
        self.end
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn red(&self) -> u8 {
        self.color.r
    }

    pub fn green(&self) -> u8 {
        self.color.g
    }

    pub fn blue(&self) -> u8 {
        self.color.b
    }

    /// The shape state this keyframe describes
    pub fn snapshot(&self) -> ShapeState {
        ShapeState {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            color: self.color,
        }
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub fn set_width(&mut self, width: u32) -> Result<()> {
        guard_dimension(width)?;
        self.width = width;
        Ok(())
    }

    pub fn set_height(&mut self, height: u32) -> Result<()> {
        guard_dimension(height)?;
        self.height = height;
        Ok(())
    }

    pub fn set_red(&mut self, value: u8) {
        self.color.r = value;
    }

    pub fn set_green(&mut self, value: u8) {
        self.color.g = value;
    }

    pub fn set_blue(&mut self, value: u8) {
        self.color.b = value;
    }

    pub fn set_start_time(&mut self, time: Tick) -> Result<()> {
        guard_interval(time, self.end)?;
        self.start = time;
        Ok(())
    }

    pub fn set_end_time(&mut self, time: Tick) -> Result<()> {
        guard_interval(self.start, time)?;
        self.end = time;
        Ok(())
    }

    pub fn move_animation(&self) -> Animation {
        self.derive(Change::Move {
            x: self.x,
            y: self.y,
        })
    }

    pub fn resize_animation(&self) -> Animation {
        self.derive(Change::Resize {
            width: self.width,
            height: self.height,
        })
    }

    pub fn color_animation(&self) -> Animation {
        self.derive(Change::Recolor(self.color))
    }

    /// The synchronized Move, Resize and ColorChange triple over `[start, end]`
    pub fn animations(&self) -> [Animation; 3] {
        [
            self.move_animation(),
            self.resize_animation(),
            self.color_animation(),
        ]
    }

    fn derive(&self, change: Change) -> Animation {
        Animation::from_parts(self.shape.clone(), self.start, self.end, change)
    }
}

impl fmt::Display for Keyframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "keyframe {} [{}, {}] {}",
            self.shape.name,
            self.start,
            self.end,
            crate::animation::state_fields(&self.snapshot())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationKind;
    use crate::shape::ShapeKind;

    fn keyframe() -> Keyframe {
        let key = ShapeKey::new(ShapeKind::Rectangle, "r");
        let state = ShapeState::new(1, 1, 1, 1, Rgb::BLACK).unwrap();
        Keyframe::new(&key, 1, 1, state).unwrap()
    }

    #[test]
    fn test_field_setters() {
        let mut kf = keyframe();
        kf.set_x(2);
        kf.set_y(3);
        kf.set_width(4).unwrap();
        kf.set_height(5).unwrap();
        kf.set_red(6);
        kf.set_green(7);
        kf.set_blue(8);

        assert_eq!(
            kf.snapshot(),
            ShapeState::new(2, 3, 4, 5, Rgb::new(6, 7, 8)).unwrap()
        );
        assert!(kf.set_width(0).is_err());
        assert_eq!(kf.width(), 4);
    }

    #[test]
    fn test_time_setters_keep_order() {
        let mut kf = keyframe();
        kf.set_end_time(10).unwrap();
        kf.set_start_time(4).unwrap();
        assert_eq!((kf.start_time(), kf.end_time()), (4, 10));

        assert!(kf.set_start_time(11).is_err());
        assert!(kf.set_end_time(3).is_err());
        assert_eq!((kf.start_time(), kf.end_time()), (4, 10));
    }

    #[test]
    fn test_triple_tracks_fields() {
        let mut kf = keyframe();
        kf.set_end_time(10).unwrap();
        kf.set_x(30);
        kf.set_blue(200);

        let [movement, resize, recolor] = kf.animations();
        assert_eq!(movement.kind(), AnimationKind::Move);
        assert_eq!(resize.kind(), AnimationKind::Resize);
        assert_eq!(recolor.kind(), AnimationKind::ColorChange);

        for anim in kf.animations() {
            assert_eq!((anim.start(), anim.end()), (1, 10));
            assert_eq!(anim.shape(), kf.shape());
        }

        assert_eq!(movement.change(), Change::Move { x: 30, y: 1 });
        assert_eq!(recolor.change(), Change::Recolor(Rgb::new(0, 0, 200)));
    }

    #[test]
    fn test_rejects_invalid_construction() {
        let key = ShapeKey::new(ShapeKind::Ellipse, "e");
        let state = ShapeState::new(1, 1, 1, 1, Rgb::BLACK).unwrap();
        assert!(Keyframe::new(&key, 5, 2, state).is_err());
        assert!(Keyframe::at(&key, 5, state).is_ok());
    }
}

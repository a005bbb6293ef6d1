//! Model builder
//!
//! Replays shape, motion and keyframe declarations (as produced by a script
//! reader) into a [`Model`]. Arguments arrive as plain integers and are
//! validated here, so malformed scripts surface as
//! [`AnimatorError::InvalidArgument`].

use crate::animation::{guard_no_conflict, Animation};
use crate::error::{AnimatorError, Result};
use crate::geometry::{guard_interval, Bounds, Rgb, ShapeState, Tick};
use crate::keyframe::Keyframe;
use crate::model::Model;
use crate::shape::{Shape, ShapeKey, ShapeKind};

/// Geometry given to freshly declared shapes until a motion or keyframe
/// says otherwise
const DECLARED_SIZE: u32 = 50;
const DECLARED_POSITION: i32 = 1;

/// One `(t, x, y, w, h, r, g, b)` tuple as written in a script
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub t: i32,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Snapshot {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(t: i32, x: i32, y: i32, w: i32, h: i32, r: i32, g: i32, b: i32) -> Self {
        Self {
            t,
            x,
            y,
            w,
            h,
            r,
            g,
            b,
        }
    }

    /// Validate into a tick and shape state
    pub fn resolve(&self) -> Result<(Tick, ShapeState)> {
        let tick = Tick::try_from(self.t)
            .map_err(|_| AnimatorError::invalid(format!("time cannot be negative, got {}", self.t)))?;
        let state = ShapeState::new(
            self.x,
            self.y,
            dimension(self.w)?,
            dimension(self.h)?,
            Rgb::from_channels(self.r, self.g, self.b)?,
        )?;
        Ok((tick, state))
    }
}

fn dimension(value: i32) -> Result<u32> {
    match u32::try_from(value) {
        Ok(d) if d > 0 => Ok(d),
        _ => Err(AnimatorError::invalid(format!(
            "dimensions must be positive, got {}",
            value
        ))),
    }
}

/// Incrementally assembles a [`Model`]
#[derive(Debug, Default)]
pub struct Builder {
    model: Model,
    /// Shapes whose origin has been taken from a motion or keyframe
    seeded: Vec<ShapeKey>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bounds(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        self.model.set_bounds(Bounds::new(x, y, width, height));
        self
    }

    pub fn set_tempo(&mut self, tempo: u32) -> &mut Self {
        self.model.set_tempo(tempo);
        self
    }

    /// Declare a shape of the given kind (`rectangle` or `ellipse`, any case)
    pub fn declare_shape(&mut self, name: &str, kind: &str) -> Result<&mut Self> {
        let kind: ShapeKind = kind.parse()?;
        let state = ShapeState::new(
            DECLARED_POSITION,
            DECLARED_POSITION,
            DECLARED_SIZE,
            DECLARED_SIZE,
            Rgb::BLACK,
        )?;
        self.model.add_shape(Shape::new(kind, name, state, 0, 0)?)?;
        Ok(self)
    }

    /// Declared shape, if any
    pub fn shape(&self, name: &str) -> Option<&Shape> {
        self.model.find(name)
    }

    /// Add a motion between two snapshots
    ///
    /// Only the animation kinds whose fields differ between `from` and `to`
    /// are created. The first motion or keyframe of a shape sets its origin.
    /// Nothing is changed when any of the new animations conflicts.
    pub fn add_motion(&mut self, name: &str, from: Snapshot, to: Snapshot) -> Result<&mut Self> {
        let key = self.resolve(name)?;
        let (t1, s1) = from.resolve()?;
        let (t2, s2) = to.resolve()?;
        guard_interval(t1, t2)?;

        let mut animations = Vec::with_capacity(3);
        if (s1.x, s1.y) != (s2.x, s2.y) {
            animations.push(Animation::moving(&key, t1, t2, s2.x, s2.y)?);
        }
        if (s1.width, s1.height) != (s2.width, s2.height) {
            animations.push(Animation::resizing(&key, t1, t2, s2.width, s2.height)?);
        }
        if s1.color != s2.color {
            animations.push(Animation::recoloring(&key, t1, t2, s2.color)?);
        }

        let timeline = self.model.get(&key).map(Shape::timeline).unwrap_or_default();
        for animation in &animations {
            guard_no_conflict(animation, &timeline)?;
        }

        self.seed(&key, t1, s1)?;
        let shape = self.model.shape_mut(&key)?;
        for animation in animations {
            shape.add_animation(animation)?;
        }
        shape.cover(t1, t2);
        tracing::debug!("Builder: motion of {} over [{}, {}]", key, t1, t2);
        Ok(self)
    }

    /// Add a point keyframe reaching the snapshot at its time
    ///
    /// The keyframe tweens from the end of the keyframe before it; the
    /// first keyframe of a shape has no tween and sets the shape's origin.
    pub fn add_keyframe(&mut self, name: &str, at: Snapshot) -> Result<&mut Self> {
        let key = self.resolve(name)?;
        let (tick, state) = at.resolve()?;

        let start = self
            .keyframe_ends(&key)
            .into_iter()
            .rev()
            .find(|&end| end <= tick)
            .unwrap_or(tick);

        self.seed(&key, tick, state)?;
        self.model
            .insert_keyframe(Keyframe::new(&key, start, tick, state)?)?;
        self.model.shape_mut(&key)?.cover(tick, tick);
        Ok(self)
    }

    /// Add the keyframes implied by a motion line of the textual format
    ///
    /// Each snapshot becomes a keyframe unless the last keyframe already ends
    /// at its time in its state, so consecutive motion lines chain into one
    /// contiguous keyframe timeline. A start snapshot after the last keyframe
    /// ends first holds the last state until then, and a start snapshot that
    /// differs from the last state jumps to it.
    pub fn add_keyframed_motion(
        &mut self,
        name: &str,
        from: Snapshot,
        to: Snapshot,
    ) -> Result<&mut Self> {
        let key = self.resolve(name)?;
        let (t1, s1) = from.resolve()?;
        let (t2, s2) = to.resolve()?;
        guard_interval(t1, t2)?;

        match self.last_keyframe(&key) {
            None => {
                self.add_keyframe(name, from)?;
            }
            Some((end, state)) if end <= t1 => {
                if end < t1 {
                    self.model
                        .insert_keyframe(Keyframe::new(&key, end, t1, state)?)?;
                    self.model.shape_mut(&key)?.cover(t1, t1);
                }
                if state != s1 {
                    self.add_keyframe(name, from)?;
                }
            }
            Some(_) => {}
        }

        if self.last_keyframe(&key) != Some((t2, s2)) {
            self.add_keyframe(name, to)?;
        }
        Ok(self)
    }

    /// Finish building
    pub fn build(self) -> Model {
        tracing::debug!("Builder: built model with {} shapes", self.model.len());
        self.model
    }

    fn resolve(&self, name: &str) -> Result<ShapeKey> {
        self.model
            .find(name)
            .map(|s| s.key().clone())
            .ok_or_else(|| AnimatorError::not_found(format!("undeclared shape '{}'", name)))
    }

    fn keyframe_ends(&self, key: &ShapeKey) -> Vec<Tick> {
        self.model
            .get(key)
            .map(|s| s.keyframes().iter().map(Keyframe::end_time).collect())
            .unwrap_or_default()
    }

    /// End time and state of the latest-ending keyframe
    fn last_keyframe(&self, key: &ShapeKey) -> Option<(Tick, ShapeState)> {
        self.model
            .get(key)
            .and_then(|s| s.keyframes().last())
            .map(|k| (k.end_time(), k.snapshot()))
    }

    /// Take the first snapshot of a shape as its origin and visibility start
    fn seed(&mut self, key: &ShapeKey, tick: Tick, state: ShapeState) -> Result<()> {
        if self.seeded.contains(key) {
            return Ok(());
        }
        let shape = self.model.shape_mut(key)?;
        let end = tick.max(shape.end_time());
        shape.set_origin(state)?;
        shape.set_end_time(end)?;
        shape.set_start_time(tick)?;
        self.seeded.push(key.clone());
        Ok(())
    }
}

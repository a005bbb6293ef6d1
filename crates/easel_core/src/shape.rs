//! Shapes
//!
//! A [`Shape`] owns its identity, live geometry, visibility window, and the
//! ordered lists of animations and keyframes that drive it. Identity is the
//! `(kind, name)` pair; geometry, color and timing do not take part in
//! equality or hashing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::animation::{guard_no_conflict, Animation};
use crate::error::{AnimatorError, Result};
use crate::geometry::{guard_dimension, guard_interval, Rgb, ShapeState, Tick};
use crate::keyframe::Keyframe;

/// Supported shape geometries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = AnimatorError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("rectangle") {
            Ok(ShapeKind::Rectangle)
        } else if s.eq_ignore_ascii_case("ellipse") {
            Ok(ShapeKind::Ellipse)
        } else {
            Err(AnimatorError::invalid(format!("unknown shape kind '{}'", s)))
        }
    }
}

/// Identity of a shape: its kind and case-sensitive name
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeKey {
    pub kind: ShapeKind,
    pub name: String,
}

impl ShapeKey {
    pub fn new(kind: ShapeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

/// An animated rectangle or ellipse
#[derive(Clone, Debug)]
pub struct Shape {
    key: ShapeKey,
    /// Geometry the timeline starts from
    origin: ShapeState,
    /// Live geometry, mutated by [`Shape::apply`] and the field setters
    state: ShapeState,
    start_time: Tick,
    end_time: Tick,
    /// Sorted by `(start, end)`, insertion order among ties
    animations: Vec<Animation>,
    /// Sorted by `end`, insertion order among ties
    keyframes: Vec<Keyframe>,
}

impl Shape {
    /// Create a shape visible over `[start_time, end_time]`
    pub fn new(
        kind: ShapeKind,
        name: &str,
        state: ShapeState,
        start_time: Tick,
        end_time: Tick,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(AnimatorError::invalid("shape name cannot be empty"));
        }
        guard_dimension(state.width)?;
        guard_dimension(state.height)?;
        guard_interval(start_time, end_time)?;

        Ok(Self {
            key: ShapeKey::new(kind, name),
            origin: state,
            state,
            start_time,
            end_time,
            animations: Vec::new(),
            keyframes: Vec::new(),
        })
    }

    pub fn rectangle(
        name: &str,
        state: ShapeState,
        start_time: Tick,
        end_time: Tick,
    ) -> Result<Self> {
        Self::new(ShapeKind::Rectangle, name, state, start_time, end_time)
    }

    pub fn ellipse(
        name: &str,
        state: ShapeState,
        start_time: Tick,
        end_time: Tick,
    ) -> Result<Self> {
        Self::new(ShapeKind::Ellipse, name, state, start_time, end_time)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn key(&self) -> &ShapeKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn kind(&self) -> ShapeKind {
        self.key.kind
    }

    /// Current live geometry
    pub fn state(&self) -> ShapeState {
        self.state
    }

    /// Geometry at the beginning of the timeline
    pub fn origin(&self) -> ShapeState {
        self.origin
    }

    pub fn x(&self) -> i32 {
        self.state.x
    }

    pub fn y(&self) -> i32 {
        self.state.y
    }

    pub fn width(&self) -> u32 {
        self.state.width
    }

    pub fn height(&self) -> u32 {
        self.state.height
    }

    pub fn color(&self) -> Rgb {
        self.state.color
    }

    pub fn start_time(&self) -> Tick {
        self.start_time
    }

    pub fn end_time(&self) -> Tick {
        self.end_time
    }

    pub fn is_visible_at(&self, tick: Tick) -> bool {
        self.start_time <= tick && tick <= self.end_time
    }

    /// Explicitly registered animations, excluding keyframe-derived ones
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutators
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_x(&mut self, x: i32) {
        self.state.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.state.y = y;
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) -> Result<()> {
        guard_dimension(width)?;
        guard_dimension(height)?;
        self.state.width = width;
        self.state.height = height;
        Ok(())
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.state.color = color;
    }

    /// Replace both the timeline origin and the live state
    pub fn set_origin(&mut self, state: ShapeState) -> Result<()> {
        guard_dimension(state.width)?;
        guard_dimension(state.height)?;
        self.origin = state;
        self.state = state;
        Ok(())
    }

    /// Reset the live state back to the timeline origin
    pub fn rewind(&mut self) {
        self.state = self.origin;
    }

    pub fn set_start_time(&mut self, time: Tick) -> Result<()> {
        guard_interval(time, self.end_time)?;
        self.start_time = time;
        Ok(())
    }

    pub fn set_end_time(&mut self, time: Tick) -> Result<()> {
        guard_interval(self.start_time, time)?;
        self.end_time = time;
        Ok(())
    }

    /// Grow the visibility window so it covers `[start, end]`
    pub fn cover(&mut self, start: Tick, end: Tick) {
        self.start_time = self.start_time.min(start);
        self.end_time = self.end_time.max(end);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Animations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register an animation on this shape
    ///
    /// Fails with `InvalidArgument` when the animation belongs to another
    /// shape, and with `Conflict` when it overlaps or duplicates an animation
    /// of the same kind (keyframe-derived ones included).
    pub fn add_animation(&mut self, animation: Animation) -> Result<()> {
        if animation.shape() != &self.key {
            return Err(AnimatorError::invalid(format!(
                "{} cannot be added to {}",
                animation, self.key
            )));
        }
        guard_no_conflict(&animation, &self.timeline())?;

        let index = self
            .animations
            .partition_point(|a| (a.start(), a.end()) <= (animation.start(), animation.end()));
        tracing::debug!("{}: registered {}", self.key, animation);
        self.animations.insert(index, animation);
        Ok(())
    }

    /// Every animation acting on this shape: registered ones plus the triple
    /// derived from each keyframe, ordered by `(start, end)`
    pub fn timeline(&self) -> Vec<Animation> {
        let mut timeline: Vec<Animation> = self.animations.clone();
        for keyframe in &self.keyframes {
            timeline.extend(keyframe.animations());
        }
        timeline.sort_by_key(|a| (a.start(), a.end()));
        timeline
    }

    /// Advance the live state to `tick`, applying every animation whose
    /// interval contains it
    pub fn apply(&mut self, tick: Tick) {
        for animation in self.timeline().iter().filter(|a| a.contains(tick)) {
            animation.apply(&mut self.state, tick);
        }
    }

    /// Evaluate the state at `tick` from the origin, without touching the
    /// live state
    ///
    /// Finished animations contribute their targets, the active one is tweened
    /// from the value its fields held when it started.
    pub fn state_at(&self, tick: Tick) -> ShapeState {
        let mut state = self.origin;
        for animation in self.timeline() {
            if animation.start() > tick {
                break;
            }
            state = animation.interpolate(&state, tick);
        }
        state
    }

    /// Evaluate the state at `tick` before any zero-length animation at
    /// `tick` lands
    ///
    /// Equal to [`Shape::state_at`] unless the timeline jumps at `tick`.
    pub fn state_entering(&self, tick: Tick) -> ShapeState {
        self.timeline()
            .iter()
            .take_while(|a| a.start() <= tick)
            .filter(|a| !(a.is_instant() && a.start() == tick))
            .fold(self.origin, |state, a| a.interpolate(&state, tick))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyframes
    // ─────────────────────────────────────────────────────────────────────────

    /// Position a keyframe ending at `end` would take in the sorted list
    pub(crate) fn keyframe_slot(&self, end: Tick) -> usize {
        self.keyframes.partition_point(|k| k.end_time() <= end)
    }

    /// Insert a keyframe, keeping the list sorted by end time
    ///
    /// Keyframes ending at the same tick keep their insertion order. No
    /// neighbour repair happens here; see [`Model::insert_keyframe`](crate::Model::insert_keyframe).
    pub fn add_keyframe(&mut self, keyframe: Keyframe) -> Result<usize> {
        if keyframe.shape() != &self.key {
            return Err(AnimatorError::invalid(format!(
                "keyframe for {} cannot be added to {}",
                keyframe.shape(),
                self.key
            )));
        }
        for derived in keyframe.animations() {
            guard_no_conflict(&derived, &self.animations)?;
        }

        let index = self.keyframe_slot(keyframe.end_time());
        self.keyframes.insert(index, keyframe);
        Ok(index)
    }

    /// Remove the first keyframe equal to `keyframe`
    pub fn remove_keyframe(&mut self, keyframe: &Keyframe) -> Result<Keyframe> {
        let index = self.keyframe_index(keyframe)?;
        Ok(self.keyframes.remove(index))
    }

    pub(crate) fn keyframe_index(&self, keyframe: &Keyframe) -> Result<usize> {
        self.keyframes
            .iter()
            .position(|k| k == keyframe)
            .ok_or_else(|| AnimatorError::not_found(format!("{} on {}", keyframe, self.key)))
    }

    pub(crate) fn keyframes_mut(&mut self) -> &mut Vec<Keyframe> {
        &mut self.keyframes
    }

    /// Largest tick any part of this shape reaches
    pub fn final_tick(&self) -> Tick {
        let animated = self.timeline().iter().map(Animation::end).max();
        animated.unwrap_or(0).max(self.end_time)
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

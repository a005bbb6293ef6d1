//! Timed shape animations
//!
//! An [`Animation`] drives one group of a shape's fields toward a target over
//! an inclusive `[start, end]` tick interval:
//!
//! - [`Change::Move`] - position `(x, y)`
//! - [`Change::Resize`] - dimensions `(width, height)`
//! - [`Change::Recolor`] - fill color
//!
//! Animations refer back to their shape through its [`ShapeKey`]; the shape
//! itself is resolved by whoever owns it (a [`Shape`](crate::Shape) or the
//! [`Model`](crate::Model)).

use std::fmt;

use crate::error::{AnimatorError, Result};
use crate::geometry::{
    guard_dimension, guard_interval, tween_i32, tween_u32, tween_u8, Rgb, ShapeState, Tick,
};
use crate::shape::ShapeKey;

/// The three animation variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationKind {
    Move,
    Resize,
    ColorChange,
}

impl AnimationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationKind::Move => "move",
            AnimationKind::Resize => "resize",
            AnimationKind::ColorChange => "color-change",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target payload of an animation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Change {
    /// Move toward `(x, y)`
    Move { x: i32, y: i32 },
    /// Resize toward `(width, height)`
    Resize { width: u32, height: u32 },
    /// Fade toward a color
    Recolor(Rgb),
}

impl Change {
    pub fn kind(&self) -> AnimationKind {
        match self {
            Change::Move { .. } => AnimationKind::Move,
            Change::Resize { .. } => AnimationKind::Resize,
            Change::Recolor(_) => AnimationKind::ColorChange,
        }
    }
}

/// A time-bounded transformation of one shape
///
/// Equality is by `(kind, shape, start, end)`; the target is not compared,
/// so two animations of the same kind over the same interval on the same
/// shape are duplicates regardless of where they go.
#[derive(Clone, Debug)]
pub struct Animation {
    shape: ShapeKey,
    start: Tick,
    end: Tick,
    change: Change,
}

impl Animation {
    /// Create an animation of `shape` over `[start, end]`
    pub fn new(shape: &ShapeKey, start: Tick, end: Tick, change: Change) -> Result<Self> {
        guard_interval(start, end)?;
        if let Change::Resize { width, height } = change {
            guard_dimension(width)?;
            guard_dimension(height)?;
        }
        Ok(Self::from_parts(shape.clone(), start, end, change))
    }

    pub(crate) fn from_parts(shape: ShapeKey, start: Tick, end: Tick, change: Change) -> Self {
        Self {
            shape,
            start,
            end,
            change,
        }
    }

    /// Move `shape` to `(x, y)` over `[start, end]`
    pub fn moving(shape: &ShapeKey, start: Tick, end: Tick, x: i32, y: i32) -> Result<Self> {
        Self::new(shape, start, end, Change::Move { x, y })
    }

    /// Resize `shape` to `width` x `height` over `[start, end]`
    pub fn resizing(
        shape: &ShapeKey,
        start: Tick,
        end: Tick,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        Self::new(shape, start, end, Change::Resize { width, height })
    }

    /// Fade `shape` to `color` over `[start, end]`
    pub fn recoloring(shape: &ShapeKey, start: Tick, end: Tick, color: Rgb) -> Result<Self> {
        Self::new(shape, start, end, Change::Recolor(color))
    }

    pub fn kind(&self) -> AnimationKind {
        self.change.kind()
    }

    pub fn shape(&self) -> &ShapeKey {
        &self.shape
    }

    pub fn start(&self) -> Tick {
        self.start
    }

    pub fn end(&self) -> Tick {
        self.end
    }

    pub fn change(&self) -> Change {
        self.change
    }

    /// Whether `tick` falls inside the inclusive interval
    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick <= self.end
    }

    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Whether adding `self` next to `existing` violates the overlap rule
    ///
    /// The rule flags `self` when it starts no earlier and ends strictly
    /// earlier than `existing`, or starts strictly later and ends no later.
    /// Identical intervals pass this test and are caught as duplicates by
    /// equality instead. Only animations of the same kind on the same shape
    /// can conflict.
    pub fn conflicts_with(&self, existing: &Animation) -> bool {
        if self.kind() != existing.kind() || self.shape != existing.shape {
            return false;
        }
        (self.start >= existing.start && self.end < existing.end)
            || (self.start > existing.start && self.end <= existing.end)
    }

    /// `base` with this animation's target written over the fields it controls
    pub fn target_over(&self, base: &ShapeState) -> ShapeState {
        let mut state = *base;
        match self.change {
            Change::Move { x, y } => {
                state.x = x;
                state.y = y;
            }
            Change::Resize { width, height } => {
                state.width = width;
                state.height = height;
            }
            Change::Recolor(color) => state.color = color,
        }
        state
    }

    /// Tween the controlled fields of `from` toward the target at `tick`
    ///
    /// `from` is taken as the value at `start`. Ticks past `end` snap to the
    /// target; a zero-length animation always resolves to its target.
    pub fn interpolate(&self, from: &ShapeState, tick: Tick) -> ShapeState {
        let tick = tick.clamp(self.start, self.end);
        let (start, end) = (self.start, self.end);
        let mut state = *from;
        match self.change {
            Change::Move { x, y } => {
                state.x = tween_i32(from.x, x, start, end, tick);
                state.y = tween_i32(from.y, y, start, end, tick);
            }
            Change::Resize { width, height } => {
                state.width = tween_u32(from.width, width, start, end, tick);
                state.height = tween_u32(from.height, height, start, end, tick);
            }
            Change::Recolor(color) => {
                state.color = Rgb::new(
                    tween_u8(from.color.r, color.r, start, end, tick),
                    tween_u8(from.color.g, color.g, start, end, tick),
                    tween_u8(from.color.b, color.b, start, end, tick),
                );
            }
        }
        state
    }

    /// Advance a live shape state to `tick`, reading the current fields as
    /// the starting values
    ///
    /// Callers are expected to range-check with [`Animation::contains`] first.
    pub fn apply(&self, state: &mut ShapeState, tick: Tick) {
        *state = self.interpolate(state, tick);
    }

    /// Textual motion fragment for this animation
    ///
    /// The start snapshot is `current` at `start`; the end snapshot is
    /// `current` with this animation's target laid over it, at `end`.
    pub fn text_fragment(&self, current: &ShapeState) -> String {
        let target = self.target_over(current);
        format!(
            "motion {} {} {} {} {}\n",
            self.shape.name,
            self.start,
            state_fields(current),
            self.end,
            state_fields(&target)
        )
    }

    /// `begin` offset in milliseconds at `tempo` ticks per second
    ///
    /// Tick division truncates before scaling to milliseconds.
    pub fn begin_ms(&self, tempo: u32) -> u64 {
        u64::from(self.start / tempo.max(1)) * 1000
    }

    /// Duration in milliseconds at `tempo` ticks per second
    pub fn duration_ms(&self, tempo: u32) -> u64 {
        u64::from((self.end - self.start) / tempo.max(1)) * 1000
    }
}

impl PartialEq for Animation {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.shape == other.shape
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Animation {}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} over [{}, {}]",
            self.kind(),
            self.shape,
            self.start,
            self.end
        )
    }
}

/// `x y w h r g b` of a state, space separated
pub fn state_fields(state: &ShapeState) -> String {
    format!(
        "{} {} {} {} {} {} {}",
        state.x, state.y, state.width, state.height, state.color.r, state.color.g, state.color.b
    )
}

pub(crate) fn guard_no_conflict(candidate: &Animation, existing: &[Animation]) -> Result<()> {
    for other in existing {
        if candidate.conflicts_with(other) {
            return Err(AnimatorError::Conflict(format!(
                "{} overlaps {}",
                candidate, other
            )));
        }
        if candidate == other {
            return Err(AnimatorError::Conflict(format!(
                "{} duplicates an existing animation",
                candidate
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn key() -> ShapeKey {
        ShapeKey::new(ShapeKind::Rectangle, "r")
    }

    fn state() -> ShapeState {
        ShapeState::new(0, 1, 3, 4, Rgb::RED).unwrap()
    }

    #[test]
    fn test_rejects_end_before_start() {
        assert!(matches!(
            Animation::moving(&key(), 5, 4, 0, 0),
            Err(AnimatorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_resize_target() {
        assert!(Animation::resizing(&key(), 0, 4, 0, 3).is_err());
        assert!(Animation::resizing(&key(), 0, 4, 3, 0).is_err());
        assert!(Animation::resizing(&key(), 0, 4, 3, 3).is_ok());
    }

    #[test]
    fn test_equality_ignores_target() {
        let a = Animation::moving(&key(), 0, 10, 5, 5).unwrap();
        let b = Animation::moving(&key(), 0, 10, 9, 9).unwrap();
        let c = Animation::resizing(&key(), 0, 10, 9, 9).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_conflict_predicate() {
        let existing = Animation::moving(&key(), 0, 10, 5, 5).unwrap();

        // Strictly nested
        let nested = Animation::moving(&key(), 2, 8, 1, 1).unwrap();
        assert!(nested.conflicts_with(&existing));

        // Shares the start, ends earlier
        let prefix = Animation::moving(&key(), 0, 4, 1, 1).unwrap();
        assert!(prefix.conflicts_with(&existing));

        // Starts later, shares the end
        let suffix = Animation::moving(&key(), 4, 10, 1, 1).unwrap();
        assert!(suffix.conflicts_with(&existing));

        // Identical interval is left to the equality check
        let same = Animation::moving(&key(), 0, 10, 1, 1).unwrap();
        assert!(!same.conflicts_with(&existing));

        // Enclosing and abutting intervals pass
        let enclosing = Animation::moving(&key(), 0, 20, 1, 1).unwrap();
        assert!(!enclosing.conflicts_with(&existing));
        let abutting = Animation::moving(&key(), 10, 20, 1, 1).unwrap();
        assert!(!abutting.conflicts_with(&existing));

        // Other kinds never conflict
        let resize = Animation::resizing(&key(), 2, 8, 1, 1).unwrap();
        assert!(!resize.conflicts_with(&existing));
    }

    #[test]
    fn test_apply_identity_at_boundaries() {
        let anim = Animation::moving(&key(), 0, 10, 10, 21).unwrap();

        let mut at_start = state();
        anim.apply(&mut at_start, 0);
        assert_eq!(at_start, state());

        let mut at_end = state();
        anim.apply(&mut at_end, 10);
        assert_eq!((at_end.x, at_end.y), (10, 21));
        assert_eq!(at_end.width, 3);
        assert_eq!(at_end.color, Rgb::RED);
    }

    #[test]
    fn test_apply_midpoint() {
        let anim = Animation::resizing(&key(), 0, 4, 7, 8).unwrap();
        let mut s = state();
        anim.apply(&mut s, 2);
        assert_eq!((s.width, s.height), (5, 6));

        let fade = Animation::recoloring(&key(), 10, 20, Rgb::new(0, 100, 255)).unwrap();
        let mut s = state();
        fade.apply(&mut s, 15);
        assert_eq!(s.color, Rgb::new(128, 50, 128));
    }

    #[test]
    fn test_instant_animation_snaps_to_target() {
        let anim = Animation::moving(&key(), 3, 3, 40, 50).unwrap();
        let mut s = state();
        anim.apply(&mut s, 3);
        assert_eq!((s.x, s.y), (40, 50));
    }

    #[test]
    fn test_text_fragment() {
        let anim = Animation::recoloring(&key(), 0, 10, Rgb::new(1, 1, 1)).unwrap();
        assert_eq!(
            anim.text_fragment(&state()),
            "motion r 0 0 1 3 4 255 0 0 10 0 1 3 4 1 1 1\n"
        );
    }

    #[test]
    fn test_millisecond_timing_truncates() {
        let anim = Animation::moving(&key(), 3, 10, 0, 0).unwrap();
        assert_eq!(anim.begin_ms(1), 3000);
        assert_eq!(anim.duration_ms(1), 7000);
        assert_eq!(anim.begin_ms(2), 1000);
        assert_eq!(anim.duration_ms(2), 3000);
    }
}

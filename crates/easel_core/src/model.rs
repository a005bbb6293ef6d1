//! Animation model
//!
//! The [`Model`] aggregates shapes keyed by `(kind, name)`, owns the canvas
//! bounds and the playback tempo, and performs keyframe edits that keep each
//! shape's keyframe timeline contiguous.
//!
//! Reads hand out copies ([`Model::shapes`]) or shared borrows
//! ([`Model::iter`]); every mutation goes through a model operation.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::animation::{guard_no_conflict, Animation};
use crate::error::{AnimatorError, Result};
use crate::geometry::{Bounds, Tick};
use crate::keyframe::Keyframe;
use crate::shape::{Shape, ShapeKey, ShapeKind};

/// Default playback rate in ticks per second
pub const DEFAULT_TEMPO: u32 = 1;

/// A set of animated shapes on a canvas
#[derive(Clone, Debug)]
pub struct Model {
    /// Shapes in declaration order
    shapes: IndexMap<ShapeKey, Shape, FxBuildHasher>,
    bounds: Bounds,
    tempo: u32,
}

impl Model {
    pub fn new() -> Self {
        Self {
            shapes: IndexMap::default(),
            bounds: Bounds::default(),
            tempo: DEFAULT_TEMPO,
        }
    }

    /// Create a model holding `shapes`, failing on the first duplicate
    pub fn with_shapes(shapes: impl IntoIterator<Item = Shape>) -> Result<Self> {
        let mut model = Self::new();
        for shape in shapes {
            model.add_shape(shape)?;
        }
        Ok(model)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Canvas & Tempo
    // ─────────────────────────────────────────────────────────────────────────

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Playback rate in ticks per second
    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Set the playback rate
    ///
    /// Not validated here; millisecond conversions downstream expect a
    /// positive value.
    pub fn set_tempo(&mut self, tempo: u32) {
        self.tempo = tempo;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Shapes
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a shape, rejecting another with the same kind and name
    pub fn add_shape(&mut self, shape: Shape) -> Result<()> {
        if self.shapes.contains_key(shape.key()) {
            return Err(AnimatorError::DuplicateShape {
                kind: shape.kind(),
                name: shape.name().to_string(),
            });
        }
        tracing::debug!("Model: added {}", shape.key());
        self.shapes.insert(shape.key().clone(), shape);
        Ok(())
    }

    /// Remove a shape, returning it
    pub fn remove_shape(&mut self, key: &ShapeKey) -> Result<Shape> {
        let shape = self
            .shapes
            .shift_remove(key)
            .ok_or_else(|| AnimatorError::not_found(format!("{}", key)))?;
        tracing::debug!("Model: removed {}", key);
        Ok(shape)
    }

    /// Deep copies of every shape, in declaration order
    pub fn shapes(&self) -> Vec<Shape> {
        self.shapes.values().cloned().collect()
    }

    /// Read-only view of every shape, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn get(&self, key: &ShapeKey) -> Option<&Shape> {
        self.shapes.get(key)
    }

    pub fn shape(&self, kind: ShapeKind, name: &str) -> Option<&Shape> {
        self.get(&ShapeKey::new(kind, name))
    }

    /// First shape with this name, of any kind
    pub fn find(&self, name: &str) -> Option<&Shape> {
        self.shapes.values().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub(crate) fn shape_mut(&mut self, key: &ShapeKey) -> Result<&mut Shape> {
        self.shapes
            .get_mut(key)
            .ok_or_else(|| AnimatorError::not_found(format!("{}", key)))
    }

    /// Register an animation on the shape it refers to
    pub fn add_animation(&mut self, animation: Animation) -> Result<()> {
        let key = animation.shape().clone();
        self.shape_mut(&key)?.add_animation(animation)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyframes
    // ─────────────────────────────────────────────────────────────────────────

    /// Copies of a shape's keyframes, ordered by end time
    pub fn keyframes(&self, key: &ShapeKey) -> Result<Vec<Keyframe>> {
        self.get(key)
            .map(|s| s.keyframes().to_vec())
            .ok_or_else(|| AnimatorError::not_found(format!("{}", key)))
    }

    /// Insert a keyframe into its shape's timeline
    ///
    /// The previous keyframe's end is pulled to the new keyframe's start and
    /// the next keyframe's start is pushed to its end, so intervals keep
    /// meeting without gaps or overlaps. Fails without modifying anything
    /// when the previous keyframe would end before it starts.
    pub fn insert_keyframe(&mut self, keyframe: Keyframe) -> Result<()> {
        let shape = self.shape_mut(keyframe.shape())?;

        let index = shape.keyframe_slot(keyframe.end_time());
        if index > 0 {
            let previous = &shape.keyframes()[index - 1];
            if keyframe.start_time() < previous.start_time() {
                return Err(AnimatorError::invalid(format!(
                    "{} starts before the preceding {}",
                    keyframe, previous
                )));
            }
        }

        let (start, end) = (keyframe.start_time(), keyframe.end_time());
        let index = shape.add_keyframe(keyframe)?;
        let keyframes = shape.keyframes_mut();
        if index > 0 {
            keyframes[index - 1].set_end_time(start)?;
        }
        if let Some(next) = keyframes.get_mut(index + 1) {
            next.set_start_time(end)?;
        }

        tracing::debug!(
            "Model: inserted keyframe [{}, {}] at #{} of {}",
            start,
            end,
            index,
            shape.key()
        );
        Ok(())
    }

    /// Delete a keyframe from its shape's timeline
    ///
    /// Deleting the first keyframe pulls the next one's start back to the
    /// deleted start; deleting any other extends the previous one's end to
    /// the deleted end.
    pub fn delete_keyframe(&mut self, keyframe: &Keyframe) -> Result<Keyframe> {
        let shape = self.shape_mut(keyframe.shape())?;
        let index = shape.keyframe_index(keyframe)?;

        let keyframes = shape.keyframes_mut();
        if keyframes.len() > 1 {
            if index == 0 {
                keyframes[1].set_start_time(keyframe.start_time())?;
            } else {
                keyframes[index - 1].set_end_time(keyframe.end_time())?;
            }
        }
        let removed = keyframes.remove(index);

        tracing::debug!(
            "Model: deleted keyframe [{}, {}] from {}",
            removed.start_time(),
            removed.end_time(),
            removed.shape()
        );
        Ok(removed)
    }

    /// Edit a keyframe in place and return the edited copy
    ///
    /// `edit` runs on a copy; the stored keyframe is replaced only when it
    /// succeeds, leaves the shape unchanged, and its derived animations do not
    /// conflict with the shape's registered ones. The list is re-sorted if the
    /// end time moved. Neighbouring intervals are not repaired.
    pub fn update_keyframe<F>(&mut self, keyframe: &Keyframe, edit: F) -> Result<Keyframe>
    where
        F: FnOnce(&mut Keyframe) -> Result<()>,
    {
        let shape = self.shape_mut(keyframe.shape())?;
        let index = shape.keyframe_index(keyframe)?;

        let mut edited = keyframe.clone();
        edit(&mut edited)?;
        if edited.shape() != keyframe.shape() {
            return Err(AnimatorError::invalid("a keyframe cannot change shapes"));
        }
        for derived in edited.animations() {
            guard_no_conflict(&derived, shape.animations())?;
        }

        let keyframes = shape.keyframes_mut();
        keyframes[index] = edited.clone();
        keyframes.sort_by_key(Keyframe::end_time);
        Ok(edited)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Playback
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance every shape's live state to `tick`
    pub fn apply(&mut self, tick: Tick) {
        for shape in self.shapes.values_mut() {
            shape.apply(tick);
        }
    }

    /// Reset every shape's live state to its origin
    pub fn rewind(&mut self) {
        for shape in self.shapes.values_mut() {
            shape.rewind();
        }
    }

    /// Largest tick any shape, animation or keyframe reaches
    pub fn final_tick(&self) -> Tick {
        self.iter().map(Shape::final_tick).max().unwrap_or(0)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

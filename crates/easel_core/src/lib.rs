//! Easel Core Model
//!
//! A 2D shape animation timeline: named shapes carrying time-bounded
//! transformations, evaluated at discrete ticks.
//!
//! # Features
//!
//! - **Shapes**: Axis-aligned rectangles and ellipses with a visibility window
//! - **Animations**: Move, Resize and ColorChange over `[start, end]` tick intervals
//! - **Keyframes**: Full-state snapshots derived into a synchronized animation triple
//! - **Contiguous Timelines**: Keyframe insert/delete repairs neighbouring intervals
//! - **Deterministic Tweening**: Linear interpolation rounded half away from zero
//! - **Builder**: Replays shape/motion/keyframe declarations into a [`Model`]
//!
//! # Example
//!
//! ```rust
//! use easel_core::{Builder, Snapshot};
//!
//! let mut builder = Builder::new();
//! builder.set_bounds(0, 0, 200, 200);
//! builder.declare_shape("r", "rectangle").unwrap();
//! builder
//!     .add_keyframe("r", Snapshot::new(0, 10, 10, 20, 20, 255, 0, 0))
//!     .unwrap()
//!     .add_keyframe("r", Snapshot::new(10, 110, 10, 20, 20, 0, 0, 255))
//!     .unwrap();
//! let model = builder.build();
//!
//! let shape = model.find("r").unwrap();
//! assert_eq!(shape.state_at(5).x, 60);
//! ```

pub mod animation;
pub mod builder;
pub mod error;
pub mod geometry;
pub mod keyframe;
pub mod model;
pub mod shape;

pub use animation::{Animation, AnimationKind, Change};
pub use builder::{Builder, Snapshot};
pub use error::{AnimatorError, Result};
pub use geometry::{Bounds, Rgb, ShapeState, Tick};
pub use keyframe::Keyframe;
pub use model::Model;
pub use shape::{Shape, ShapeKey, ShapeKind};

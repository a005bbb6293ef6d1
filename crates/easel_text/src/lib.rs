//! Easel textual format
//!
//! Line-oriented description of an animation model, in both directions:
//!
//! - [`render`] writes a [`Model`](easel_core::Model) as `canvas`, `shape`
//!   and `motion` lines
//! - [`read_script`] / [`read_file`] replay a script through the
//!   [`Builder`](easel_core::Builder)
//!
//! ```text
//! canvas 0 0 200 200
//! shape r rectangle
//! motion r 1 0 0 10 10 255 0 0 1 0 0 10 10 255 0 0
//! motion r 1 0 0 10 10 255 0 0 10 90 0 10 10 255 0 0
//! keyframe r 20 90 90 10 10 0 0 255
//! ```
//!
//! Writing a model and reading the text back reproduces its keyframes, and
//! the evaluated state of shapes driven by registered animations.

mod error;
mod reader;
mod writer;

pub use error::ScriptError;
pub use reader::{read_file, read_script, ScriptReader};
pub use writer::{render, render_shape, write_model, write_shape};

//! SVG animation export for Easel
//!
//! Renders a [`Model`](easel_core::Model) as a standalone SVG document: one
//! `<rect>`/`<ellipse>` per shape, `<set>` tags for its visibility window and
//! SMIL `<animate>` tags for every animation, timed in milliseconds at the
//! model's tempo.
//!
//! # Example
//!
//! ```ignore
//! use easel_svg::{render, SvgOptions};
//!
//! let svg = render(&model, &SvgOptions::default().looping(true))?;
//! std::fs::write("out.svg", svg)?;
//! ```

mod animate;
mod document;
mod error;

pub use animate::{SvgAnimate, Timing};
pub use document::{render, write_svg, SvgOptions, SVG_NAMESPACE};
pub use error::SvgError;

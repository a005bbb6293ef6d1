//! SVG error types

use std::{fmt, io};
use thiserror::Error;

/// Errors that can occur when exporting a model as SVG
#[derive(Error, Debug)]
pub enum SvgError {
    /// IO error when writing the document
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Formatting error while assembling the document
    #[error("Formatting error: {0}")]
    Fmt(#[from] fmt::Error),

    /// Tick to millisecond conversion needs a positive tempo
    #[error("Invalid tempo: {0} ticks per second")]
    InvalidTempo(u32),
}

//! Script error types

use std::io;

use easel_core::AnimatorError;
use thiserror::Error;

/// Errors that can occur when reading an animation script
#[derive(Error, Debug)]
pub enum ScriptError {
    /// IO error when reading the script
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed line
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Well-formed line rejected by the model
    #[error("line {line}: {source}")]
    Model {
        line: usize,
        #[source]
        source: AnimatorError,
    },

    /// Model error outside of any particular line
    #[error(transparent)]
    Animator(#[from] AnimatorError),
}

impl ScriptError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// 1-based line the error was raised at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } | Self::Model { line, .. } => Some(*line),
            Self::Io(_) | Self::Animator(_) => None,
        }
    }
}

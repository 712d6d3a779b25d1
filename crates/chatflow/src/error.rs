//! Error types for Chatflow operations.
//!
//! This module provides the main error type [`ChatflowError`] which wraps
//! the error conditions that can occur while building and rendering the
//! diagram. With the built-in pipeline and default configuration none of
//! them occur; they surface invalid user configuration or output failures.

use std::io;

use thiserror::Error;

use crate::pipeline::PipelineError;

/// The main error type for Chatflow operations.
#[derive(Debug, Error)]
pub enum ChatflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for ChatflowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

//! Error adapter for converting ChatflowError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Each error
//! variant gets a stable diagnostic code and, where the fix is known, a help
//! message.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use chatflow::ChatflowError;

/// Adapter rendering a [`ChatflowError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a ChatflowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ChatflowError::Io(_) => "chatflow::io",
            ChatflowError::Config(_) => "chatflow::config",
            ChatflowError::Pipeline(_) => "chatflow::pipeline",
            ChatflowError::Export(_) => "chatflow::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ChatflowError::Io(_) => "check that the output directory exists and is writable",
            ChatflowError::Config(_) => {
                "fix the value in the configuration file, or remove it to use the default"
            }
            ChatflowError::Pipeline(_) => return None,
            ChatflowError::Export(_) => "check the [canvas] and [style] configuration sections",
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

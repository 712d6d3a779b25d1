//! Export of a computed [`Layout`] into an output format.
//!
//! ```text
//! Pipeline + AppConfig
//!     ↓ layout
//! Layout (data units)
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! Export operations return [`Error`], which converts into
//! [`ChatflowError::Export`] at the crate boundary.
//!
//! [`ChatflowError::Export`]: crate::ChatflowError::Export

/// SVG export backend.
pub mod svg;

use crate::layout::Layout;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Renders `layout` and returns the serialized document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format.
    fn export_layout(&self, layout: &Layout) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

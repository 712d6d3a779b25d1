//! Chatflow - the chatbot NLP stages flow chart
//!
//! This library lays out and renders a vertical flow chart of the stages a
//! chatbot goes through, from input processing to learning. Each stage is a
//! numbered box with the ML techniques it relies on in satellite boxes, the
//! stages are linked by downward arrows, and a feedback loop returns from
//! the last stage to the first.

pub mod config;
pub mod layout;
pub mod pipeline;

mod error;
mod export;

pub use chatflow_core::{color, draw, geometry};

pub use error::ChatflowError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use layout::Layout;
use pipeline::Pipeline;

/// Builder for laying out and rendering Chatflow diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use chatflow::{DiagramBuilder, config::AppConfig, pipeline::Pipeline};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// let layout = builder.layout(&Pipeline::chatbot())
///     .expect("Failed to lay out");
///
/// let svg = builder.render_svg(&layout)
///     .expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compute the data-space layout of `pipeline`.
    ///
    /// # Errors
    ///
    /// Returns `ChatflowError::Config` if the configuration is invalid.
    pub fn layout(&self, pipeline: &Pipeline) -> Result<Layout, ChatflowError> {
        info!(steps = pipeline.len(); "Building diagram layout");
        let layout = Layout::compute(pipeline, &self.config)?;
        debug!(arrows = layout.arrows().len(); "Layout calculated");
        trace!(layout:?; "Computed layout");
        Ok(layout)
    }

    /// Render a computed layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `ChatflowError::Export` if the canvas or style cannot be
    /// rendered.
    pub fn render_svg(&self, layout: &Layout) -> Result<String, ChatflowError> {
        let svg_exporter = export::svg::SvgBuilder::new()
            .with_canvas(self.config.canvas())
            .with_style(self.config.style())
            .build()?;

        let svg_string = svg_exporter.export_layout(layout)?;

        info!("SVG rendered successfully");
        Ok(svg_string)
    }
}

/// Renders the built-in chatbot pipeline with the default configuration.
///
/// # Errors
///
/// Returns `ChatflowError` only if the environment cannot render SVG text.
///
/// ```rust,no_run
/// let svg = chatflow::render_chatbot_diagram().expect("Failed to render");
/// assert!(svg.contains("Knowledge Base Retrieval"));
/// ```
pub fn render_chatbot_diagram() -> Result<String, ChatflowError> {
    let builder = DiagramBuilder::default();
    let layout = builder.layout(&Pipeline::chatbot())?;
    builder.render_svg(&layout)
}

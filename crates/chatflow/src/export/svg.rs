//! SVG export backend.
//!
//! [`SvgBuilder`] configures an [`Svg`] exporter from the canvas and style
//! sections of the application configuration. The exporter maps every
//! layout element to a `chatflow-core` drawable at its pixel position,
//! collects the output per render layer and fits the document's view box
//! to the drawn content.

mod flow;
mod viewport;

use viewport::Viewport;

use log::{debug, info};
use svg::{self, node::element as svg_element};

use chatflow_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets},
};

use crate::{
    config::{CanvasConfig, StyleConfig},
    export::{self, Error},
    layout::Layout,
};

/// Builder for [`Svg`] exporters.
#[derive(Debug, Clone, Default)]
pub struct SvgBuilder {
    canvas: CanvasConfig,
    style: StyleConfig,
}

impl SvgBuilder {
    /// Creates a builder with the default canvas and style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the canvas geometry.
    pub fn with_canvas(mut self, canvas: &CanvasConfig) -> Self {
        self.canvas = canvas.clone();
        self
    }

    /// Sets the document-level style (background and font family).
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the canvas is degenerate or the
    /// background color does not parse.
    pub fn build(self) -> Result<Svg, Error> {
        let viewport = Viewport::new(&self.canvas)?;
        let background_color = self.style.background_color().map_err(Error::Render)?;

        Ok(Svg {
            viewport,
            margin: self.canvas.margin(),
            background_color,
            font_family: self.style.font_family().to_string(),
        })
    }
}

/// SVG exporter for flow chart layouts.
#[derive(Debug, Clone)]
pub struct Svg {
    viewport: Viewport,
    margin: f32,
    background_color: Option<Color>,
    font_family: String,
}

/// Rendered nodes together with the pixel bounds they cover.
#[derive(Debug, Default)]
struct Scene {
    output: LayeredOutput,
    bounds: Option<Bounds>,
}

impl Scene {
    fn add(&mut self, output: LayeredOutput, bounds: Bounds) {
        self.output.merge(output);
        self.bounds = Some(match self.bounds {
            Some(current) => current.merge(&bounds),
            None => bounds,
        });
    }
}

impl Svg {
    /// Renders the complete layout to an SVG document.
    pub fn render_layout(&self, layout: &Layout) -> Result<svg::Document, Error> {
        let mut scene = Scene::default();

        for step in layout.steps() {
            self.render_step(&mut scene, step);
        }
        for arrow in layout.arrows() {
            self.render_arrow(&mut scene, arrow);
        }
        self.render_feedback(&mut scene, layout.feedback());
        self.render_label(&mut scene, layout.title());

        let content_bounds = scene
            .bounds
            .ok_or_else(|| Error::Render("layout has no drawable content".to_string()))?;
        let view = content_bounds.add_padding(Insets::uniform(self.margin));
        debug!(
            min_x = view.min_x(),
            min_y = view.min_y(),
            width = view.width(),
            height = view.height();
            "Fitted view box to content"
        );

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view.min_x(),
                    view.min_y(),
                    view.width(),
                    view.height()
                ),
            )
            .set("width", view.width())
            .set("height", view.height());

        let mut output = scene.output;
        if let Some(background) = self.background_color {
            output.add_to_layer(RenderLayer::Background, Box::new(background_rect(view, background)));
        }

        for node in output.render() {
            doc = doc.add(node);
        }

        Ok(doc)
    }
}

fn background_rect(view: Bounds, color: Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", view.min_x())
        .set("y", view.min_y())
        .set("width", view.width())
        .set("height", view.height())
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha())
}

impl export::Exporter for Svg {
    fn export_layout(&self, layout: &Layout) -> Result<String, Error> {
        let doc = self.render_layout(layout)?;
        debug!("SVG document rendered");

        let svg_string = doc.to_string();
        info!(bytes = svg_string.len(); "SVG serialized");
        Ok(svg_string)
    }
}

//! Configuration types for Chatflow diagram rendering.
//!
//! This module provides configuration structures that control the canvas,
//! the layout metrics and the colors of the rendered diagram. All types
//! implement [`serde::Deserialize`] so they can be loaded from external
//! sources, and every field falls back to the value of the reference
//! diagram when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`CanvasConfig`] - Figure size, resolution and data-space limits.
//! - [`LayoutConfig`] - Box sizes, offsets and spacings in data units.
//! - [`StyleConfig`] - Colors and font family.
//!
//! # Example
//!
//! ```
//! # use chatflow::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.layout().vertical_spacing(), 1.4);
//! ```

use serde::Deserialize;

use chatflow_core::color::Color;

use crate::ChatflowError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(canvas: CanvasConfig, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            canvas,
            layout,
            style,
        }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks that every section describes a drawable diagram.
    ///
    /// # Errors
    ///
    /// Returns [`ChatflowError::Config`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ChatflowError> {
        self.canvas.validate()?;
        self.layout.validate()?;
        self.style.palette()?;
        self.style
            .background_color()
            .map(|_| ())
            .map_err(ChatflowError::Config)
    }
}

fn ensure_positive(name: &str, value: f32) -> Result<(), ChatflowError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChatflowError::Config(format!(
            "`{name}` must be a positive number, got {value}"
        )))
    }
}

fn ensure_non_negative(name: &str, value: f32) -> Result<(), ChatflowError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChatflowError::Config(format!(
            "`{name}` must not be negative, got {value}"
        )))
    }
}

/// Figure size, resolution and the data-space coordinate limits.
///
/// The figure is `width x height` inches at `dpi` pixels per inch; the data
/// space spans `x_limits` horizontally and `y_limits` vertically, Y upward.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    width: f32,
    height: f32,
    dpi: f32,
    x_limits: [f32; 2],
    y_limits: [f32; 2],
    margin: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 7.0,
            height: 10.0,
            dpi: 100.0,
            x_limits: [0.0, 10.0],
            y_limits: [0.0, 10.0],
            margin: 10.0,
        }
    }
}

impl CanvasConfig {
    /// Figure width in inches.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Figure height in inches.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Pixels per inch.
    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Data-space `[min, max]` along X.
    pub fn x_limits(&self) -> [f32; 2] {
        self.x_limits
    }

    /// Data-space `[min, max]` along Y.
    pub fn y_limits(&self) -> [f32; 2] {
        self.y_limits
    }

    /// Pixel margin kept around the content by the tight layout.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Returns a copy with a different tight-layout margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Returns a copy rendered at a different resolution.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    fn validate(&self) -> Result<(), ChatflowError> {
        ensure_positive("canvas.width", self.width)?;
        ensure_positive("canvas.height", self.height)?;
        ensure_positive("canvas.dpi", self.dpi)?;
        ensure_non_negative("canvas.margin", self.margin)?;
        ensure_positive("canvas.x_limits span", self.x_limits[1] - self.x_limits[0])?;
        ensure_positive("canvas.y_limits span", self.y_limits[1] - self.y_limits[0])
    }
}

/// Box sizes, offsets and spacings of the flow chart, in data units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    top_margin: f32,
    vertical_spacing: f32,
    main_x: f32,
    box_width: f32,
    box_height: f32,
    box_pad: f32,
    number_offset: f32,
    label_offset: f32,
    component_offset: f32,
    component_width: f32,
    component_height: f32,
    component_spacing: f32,
    component_pad: f32,
    arrow_gap: f32,
    arrow_head_width: f32,
    arrow_head_length: f32,
    feedback_offset: f32,
    feedback_arrow_length: f32,
    caption_gap: f32,
    title_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_margin: 9.0,
            vertical_spacing: 1.4,
            main_x: 3.5,
            box_width: 3.1,
            box_height: 0.5,
            box_pad: 0.2,
            number_offset: 0.2,
            label_offset: 0.6,
            component_offset: 0.4,
            component_width: 2.2,
            component_height: 0.2,
            component_spacing: 0.5,
            component_pad: 0.1,
            arrow_gap: 0.05,
            arrow_head_width: 0.15,
            arrow_head_length: 0.15,
            feedback_offset: 1.2,
            feedback_arrow_length: 0.5,
            caption_gap: 0.1,
            title_height: 0.98,
        }
    }
}

impl LayoutConfig {
    /// Y of the first step's center.
    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    /// Distance between consecutive step centers.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// X of the left edge of the step boxes.
    pub fn main_x(&self) -> f32 {
        self.main_x
    }

    /// Width of a step box, excluding the rounding pad.
    pub fn box_width(&self) -> f32 {
        self.box_width
    }

    /// Height of a step box, excluding the rounding pad.
    pub fn box_height(&self) -> f32 {
        self.box_height
    }

    /// Rounding pad (and corner radius) of step boxes.
    pub fn box_pad(&self) -> f32 {
        self.box_pad
    }

    /// Offset of the step number from the box's left edge.
    pub fn number_offset(&self) -> f32 {
        self.number_offset
    }

    /// Offset of the step label from the box's left edge.
    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    /// Horizontal gap between a step box and its component column.
    pub fn component_offset(&self) -> f32 {
        self.component_offset
    }

    /// Width of a component box, excluding the rounding pad.
    pub fn component_width(&self) -> f32 {
        self.component_width
    }

    /// Height of a component box, excluding the rounding pad.
    pub fn component_height(&self) -> f32 {
        self.component_height
    }

    /// Distance between consecutive component centers of one step.
    pub fn component_spacing(&self) -> f32 {
        self.component_spacing
    }

    /// Rounding pad (and corner radius) of component boxes.
    pub fn component_pad(&self) -> f32 {
        self.component_pad
    }

    /// Clearance between a step box and the flow arrow ends.
    pub fn arrow_gap(&self) -> f32 {
        self.arrow_gap
    }

    /// Arrowhead width, perpendicular to the arrow.
    pub fn arrow_head_width(&self) -> f32 {
        self.arrow_head_width
    }

    /// Arrowhead length, along the arrow.
    pub fn arrow_head_length(&self) -> f32 {
        self.arrow_head_length
    }

    /// Distance of the feedback channel left of the step boxes.
    pub fn feedback_offset(&self) -> f32 {
        self.feedback_offset
    }

    /// Length of the arrow marking the feedback loop's re-entry.
    pub fn feedback_arrow_length(&self) -> f32 {
        self.feedback_arrow_length
    }

    /// Gap between the feedback channel and its caption.
    pub fn caption_gap(&self) -> f32 {
        self.caption_gap
    }

    /// Title position as a fraction of the canvas height.
    pub fn title_height(&self) -> f32 {
        self.title_height
    }

    /// Returns a copy with a different first-step center.
    pub fn with_top_margin(mut self, top_margin: f32) -> Self {
        self.top_margin = top_margin;
        self
    }

    /// Returns a copy with a different step spacing.
    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Returns a copy with a different component spacing.
    pub fn with_component_spacing(mut self, spacing: f32) -> Self {
        self.component_spacing = spacing;
        self
    }

    fn validate(&self) -> Result<(), ChatflowError> {
        ensure_positive("layout.vertical_spacing", self.vertical_spacing)?;
        ensure_positive("layout.box_width", self.box_width)?;
        ensure_positive("layout.box_height", self.box_height)?;
        ensure_positive("layout.component_width", self.component_width)?;
        ensure_positive("layout.component_height", self.component_height)?;
        ensure_positive("layout.component_spacing", self.component_spacing)?;
        ensure_non_negative("layout.box_pad", self.box_pad)?;
        ensure_non_negative("layout.component_pad", self.component_pad)?;
        ensure_non_negative("layout.arrow_gap", self.arrow_gap)?;
        ensure_non_negative("layout.arrow_head_width", self.arrow_head_width)?;
        ensure_non_negative("layout.arrow_head_length", self.arrow_head_length)?;
        ensure_non_negative("layout.feedback_arrow_length", self.feedback_arrow_length)?;

        for (name, value) in [
            ("layout.top_margin", self.top_margin),
            ("layout.main_x", self.main_x),
            ("layout.number_offset", self.number_offset),
            ("layout.label_offset", self.label_offset),
            ("layout.component_offset", self.component_offset),
            ("layout.feedback_offset", self.feedback_offset),
            ("layout.caption_gap", self.caption_gap),
            ("layout.title_height", self.title_height),
        ] {
            if !value.is_finite() {
                return Err(ChatflowError::Config(format!(
                    "`{name}` must be finite, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Colors of the rendered diagram, resolved from [`StyleConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Fill of even-indexed step boxes.
    pub main: Color,
    /// Fill of odd-indexed step boxes.
    pub secondary: Color,
    /// Step number and label text.
    pub text: Color,
    /// Borders, connectors, flow arrows and component text.
    pub line: Color,
    /// Fill of component boxes.
    pub component: Color,
    /// Border of component boxes.
    pub component_border: Color,
    /// Feedback loop path, arrowhead and caption.
    pub feedback: Color,
}

/// Visual styling configuration for rendered diagrams.
///
/// Colors are CSS color strings. `background_color` is unset by default,
/// which leaves the SVG transparent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    main_color: String,
    secondary_color: String,
    text_color: String,
    line_color: String,
    component_color: String,
    component_border: String,
    feedback_color: String,
    background_color: Option<String>,
    font_family: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            main_color: "#3498db".to_string(),
            secondary_color: "#2980b9".to_string(),
            text_color: "#ffffff".to_string(),
            line_color: "#34495e".to_string(),
            component_color: "#e8f4fc".to_string(),
            component_border: "#7fb3d5".to_string(),
            feedback_color: "#e74c3c".to_string(),
            background_color: None,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl StyleConfig {
    /// Parses every configured color into a [`Palette`].
    ///
    /// # Errors
    ///
    /// Returns [`ChatflowError::Config`] for the first color that does not parse.
    pub fn palette(&self) -> Result<Palette, ChatflowError> {
        let parse = |name: &str, value: &str| {
            Color::new(value)
                .map_err(|err| ChatflowError::Config(format!("Invalid {name} in config: {err}")))
        };

        Ok(Palette {
            main: parse("main_color", &self.main_color)?,
            secondary: parse("secondary_color", &self.secondary_color)?,
            text: parse("text_color", &self.text_color)?,
            line: parse("line_color", &self.line_color)?,
            component: parse("component_color", &self.component_color)?,
            component_border: parse("component_border", &self.component_border)?,
            feedback: parse("feedback_color", &self.feedback_color)?,
        })
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the font family used for all text.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns a copy with the given background color string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns a copy with the given step fill colors.
    pub fn with_step_colors(mut self, main: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.main_color = main.into();
        self.secondary_color = secondary.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas().x_limits(), [0.0, 10.0]);
        assert_eq!(config.canvas().y_limits(), [0.0, 10.0]);
        assert_eq!(config.layout().top_margin(), 9.0);
        assert_eq!(config.layout().box_width(), 3.1);
    }

    #[test]
    fn test_palette_parses_defaults() {
        let palette = StyleConfig::default().palette().unwrap();
        assert_eq!(palette.main, Color::new("#3498db").unwrap());
        assert_eq!(palette.secondary, Color::new("#2980b9").unwrap());
        assert_eq!(palette.feedback, Color::new("#e74c3c").unwrap());
        assert_ne!(palette.main, palette.secondary);
    }

    #[test]
    fn test_invalid_step_color_rejected() {
        let style = StyleConfig::default().with_step_colors("not-a-color", "#2980b9");
        let config = AppConfig::new(CanvasConfig::default(), LayoutConfig::default(), style);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ChatflowError::Config(_)));
        assert!(err.to_string().contains("main_color"));
    }

    #[test]
    fn test_background_color() {
        assert_eq!(StyleConfig::default().background_color(), Ok(None));

        let style = StyleConfig::default().with_background_color("white");
        assert!(matches!(style.background_color(), Ok(Some(_))));

        let style = StyleConfig::default().with_background_color("nope");
        assert!(style.background_color().is_err());
    }

    #[test]
    fn test_non_positive_spacing_rejected() {
        for spacing in [0.0, -1.4, f32::NAN] {
            let layout = LayoutConfig::default().with_vertical_spacing(spacing);
            let config = AppConfig::new(CanvasConfig::default(), layout, StyleConfig::default());
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("vertical_spacing"), "{err}");
        }
    }

    #[test]
    fn test_negative_margin_rejected() {
        let canvas = CanvasConfig::default().with_margin(-1.0);
        let config = AppConfig::new(canvas, LayoutConfig::default(), StyleConfig::default());
        assert!(config.validate().is_err());
    }
}

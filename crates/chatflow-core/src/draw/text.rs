//! Text rendering for step labels, component labels and captions.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! Text is measured with cosmic-text against the system fonts so callers can
//! align it and fit the canvas around it. When rendered, a [`Text`] produces an
//! SVG `<text>` element on the [`Text`](crate::draw::RenderLayer::Text)
//! layer, centered on the given position and optionally rotated about it.
//!
//! ```
//! # use chatflow_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(9);
//!
//! let text = Text::new(&style, "Intent Classification");
//! assert!(text.calculate_size().width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// CSS pixels per typographic point at 96 dpi.
const DEFAULT_PIXELS_PER_POINT: f32 = 96.0 / 72.0;

/// Defines the visual style for text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `10` pt |
/// | Bold | `false` |
/// | Text color | `None` (SVG default, black) |
/// | Pixels per point | `96 / 72` |
///
/// Font sizes are given in points and emitted in pixels, so the output
/// resolution decides how large a point is.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    bold: bool,
    color: Option<Color>,
    pixels_per_point: f32,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Switches between bold and regular weight.
    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Sets the text color. `None` leaves the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets how many output pixels one point spans, usually `dpi / 72`.
    pub fn set_pixels_per_point(&mut self, pixels_per_point: f32) {
        self.pixels_per_point = pixels_per_point;
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the font family.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns true if the text renders in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns the text color, if set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the font size in output pixels.
    pub fn font_size_px(&self) -> f32 {
        f32::from(self.font_size) * self.pixels_per_point
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 10,
            bold: false,
            color: None,
            pixels_per_point: DEFAULT_PIXELS_PER_POINT,
        }
    }
}

/// A renderable text element combining content with styling.
///
/// Rotation is in degrees, counterclockwise as seen on screen.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    rotation: f32,
}

impl<'a> Text<'a> {
    /// Creates a new, unrotated text element.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            rotation: 0.0,
        }
    }

    /// Returns the element rotated counterclockwise by `degrees`.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Returns the rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Calculate the unrotated size of this text in pixels.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let lines: Vec<&str> = self.content.lines().collect();
        let text_size = self.calculate_size();
        let line_height = if lines.is_empty() {
            0.0
        } else {
            text_size.height() / lines.len() as f32
        };

        // Lines are laid out around the unrotated center, then the whole block
        // is rotated about that same center.
        let y_offset = -(text_size.height() + line_height) / 2.0;

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y() + y_offset)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", format!("{}px", self.definition.font_size_px()));

        if self.definition.is_bold() {
            rendered_text = rendered_text.set("font-weight", "bold");
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        if self.rotation != 0.0 {
            // SVG rotates clockwise for positive angles in a Y-down space
            rendered_text = rendered_text.set(
                "transform",
                format!(
                    "rotate({} {} {})",
                    -self.rotation,
                    position.x(),
                    position.y()
                ),
            );
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    /// Returns the axis-aligned footprint of the (possibly rotated) text.
    fn size(&self) -> Size {
        let size = self.calculate_size();
        if self.rotation == 0.0 {
            return size;
        }

        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        Size::new(
            size.width().mul_add(cos, size.height() * sin),
            size.width().mul_add(sin, size.height() * cos),
        )
    }
}

/// TextManager handles text measurement and font operations.
/// It keeps one FontSystem alive because loading system fonts is expensive.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculate the size of text in pixels using cosmic-text shaping.
    ///
    /// Falls back to a width estimate from the character count when no
    /// layout runs are produced (for example when no fonts are installed).
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size_px = text_def.font_size_px();
        let line_height = font_size_px * 1.15;
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = if text_def.is_bold() {
            Weight::BOLD
        } else {
            Weight::NORMAL
        };
        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(weight);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        } else {
            let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            max_width = longest as f32 * (font_size_px * 0.55);
            total_height = metrics.line_height * text.lines().count().max(1) as f32;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

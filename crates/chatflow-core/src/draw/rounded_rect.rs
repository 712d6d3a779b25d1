//! Rounded rectangle used for step boxes and component boxes.

use std::rc::Rc;

use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// A filled rectangle with rounded corners and a border.
///
/// Corner radii are given per axis so that a radius defined in data units
/// stays correct after a non-uniform data-to-pixel scaling.
#[derive(Debug, Clone)]
pub struct RoundedRect {
    size: Size,
    corner_radii: Size,
    fill_color: Option<Color>,
    stroke: Rc<StrokeDefinition>,
}

impl RoundedRect {
    /// Creates a square-cornered rectangle with no fill.
    pub fn new(size: Size, stroke: Rc<StrokeDefinition>) -> Self {
        Self {
            size,
            corner_radii: Size::default(),
            fill_color: None,
            stroke,
        }
    }

    /// Sets the horizontal and vertical corner radii.
    pub fn with_corner_radii(mut self, radii: Size) -> Self {
        self.corner_radii = radii;
        self
    }

    /// Sets the fill color.
    pub fn with_fill_color(mut self, color: Option<Color>) -> Self {
        self.fill_color = color;
        self
    }

    /// Returns the fill color, if any.
    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    /// Returns the border stroke.
    pub fn stroke(&self) -> &Rc<StrokeDefinition> {
        &self.stroke
    }

    /// Returns the corner radii.
    pub fn corner_radii(&self) -> Size {
        self.corner_radii
    }
}

impl Drawable for RoundedRect {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = position.to_bounds(self.size);

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("rx", self.corner_radii.width())
            .set("ry", self.corner_radii.height());

        let mut rect = crate::apply_stroke!(rect, self.stroke);

        rect = match self.fill_color {
            Some(fill) => rect
                .set("fill", &fill)
                .set("fill-opacity", fill.alpha()),
            None => rect.set("fill", "none"),
        };

        output.add_to_layer(RenderLayer::Content, Box::new(rect));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(rect: &RoundedRect, position: Point) -> String {
        rect.render_to_layers(position)
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_rounded_rect_centered_on_position() {
        let stroke = Rc::new(StrokeDefinition::default());
        let rect = RoundedRect::new(Size::new(40.0, 20.0), stroke);

        let svg = rendered(&rect, Point::new(100.0, 50.0));

        assert!(svg.contains("x=\"80\""));
        assert!(svg.contains("y=\"40\""));
        assert!(svg.contains("width=\"40\""));
        assert!(svg.contains("height=\"20\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_rounded_rect_fill_and_radii() {
        let stroke = Rc::new(StrokeDefinition::new(Color::new("blue").unwrap(), 0.8));
        let rect = RoundedRect::new(Size::new(10.0, 10.0), stroke)
            .with_corner_radii(Size::new(14.0, 20.0))
            .with_fill_color(Some(Color::new("red").unwrap()));

        assert_eq!(rect.corner_radii(), Size::new(14.0, 20.0));
        assert!(rect.fill_color().is_some());

        let svg = rendered(&rect, Point::default());
        assert!(svg.contains("rx=\"14\""));
        assert!(svg.contains("ry=\"20\""));
        assert!(svg.contains("fill=\"red\""));
        assert!(svg.contains("stroke-width=\"0.8\""));
    }

    #[test]
    fn test_rounded_rect_renders_on_content_layer() {
        let rect = RoundedRect::new(Size::new(1.0, 1.0), Rc::new(StrokeDefinition::default()));
        let output = rect.render_to_layers(Point::default());
        assert_eq!(output.count_in(RenderLayer::Content), 1);
    }
}

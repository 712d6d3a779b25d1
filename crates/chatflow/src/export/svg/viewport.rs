//! Mapping from data units to SVG pixels.

use chatflow_core::geometry::{Point, Size};

use crate::{config::CanvasConfig, export::Error};

/// Typographic points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Maps the data-space canvas onto a `width x height` inch figure.
///
/// X grows to the right in both spaces; Y grows upward in data space and
/// downward in pixel space. The two axes scale independently, so a data
/// unit is usually not square on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x_min: f32,
    y_max: f32,
    scale_x: f32,
    scale_y: f32,
    dpi: f32,
}

impl Viewport {
    /// Builds the viewport for `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if either axis has an empty data range or
    /// the figure has no area.
    pub fn new(canvas: &CanvasConfig) -> Result<Self, Error> {
        let [x_min, x_max] = canvas.x_limits();
        let [y_min, y_max] = canvas.y_limits();
        let (x_span, y_span) = (x_max - x_min, y_max - y_min);

        if !(x_span > 0.0 && y_span > 0.0) {
            return Err(Error::Render(format!(
                "canvas limits must span a positive range, got x {x_span} and y {y_span}"
            )));
        }
        let scale_x = canvas.width() * canvas.dpi() / x_span;
        let scale_y = canvas.height() * canvas.dpi() / y_span;
        if !(scale_x > 0.0 && scale_y > 0.0) {
            return Err(Error::Render(
                "canvas must have a positive size and resolution".to_string(),
            ));
        }

        Ok(Self {
            x_min,
            y_max,
            scale_x,
            scale_y,
            dpi: canvas.dpi(),
        })
    }

    /// Converts a data-space point to pixels.
    pub fn to_pixels(&self, point: Point) -> Point {
        Point::new(
            (point.x() - self.x_min) * self.scale_x,
            (self.y_max - point.y()) * self.scale_y,
        )
    }

    /// Converts a data-space extent to pixels.
    pub fn scale_size(&self, size: Size) -> Size {
        Size::new(size.width() * self.scale_x, size.height() * self.scale_y)
    }

    /// Converts a line width in points to pixels.
    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi / POINTS_PER_INCH
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_canvas_scales() {
        let viewport = Viewport::new(&CanvasConfig::default()).unwrap();
        let unit = viewport.scale_size(Size::new(1.0, 1.0));
        assert_approx_eq!(f32, unit.width(), 70.0);
        assert_approx_eq!(f32, unit.height(), 100.0);
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let viewport = Viewport::new(&CanvasConfig::default()).unwrap();

        let top_left = viewport.to_pixels(Point::new(0.0, 10.0));
        assert_approx_eq!(f32, top_left.x(), 0.0);
        assert_approx_eq!(f32, top_left.y(), 0.0);

        let step = viewport.to_pixels(Point::new(3.5, 9.0));
        assert_approx_eq!(f32, step.x(), 245.0, epsilon = 1e-3);
        assert_approx_eq!(f32, step.y(), 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_size_and_stroke_conversion() {
        let viewport = Viewport::new(&CanvasConfig::default()).unwrap();
        let size = viewport.scale_size(Size::new(3.1, 0.5));

        assert_approx_eq!(f32, size.width(), 217.0, epsilon = 1e-3);
        assert_approx_eq!(f32, size.height(), 50.0, epsilon = 1e-3);
        assert_approx_eq!(f32, viewport.points_to_pixels(0.72), 1.0, epsilon = 1e-5);
    }
}

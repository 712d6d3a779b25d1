//! Open and closed point paths: connectors, arrow shafts, the feedback loop
//! and arrowheads.
//!
//! Both [`Polyline`] and [`Polygon`] store their points relative to the center
//! of their bounding box, so they fit the center-positioned [`Drawable`]
//! model. Use the `positioned` constructors to build one from absolute
//! coordinates.

use std::rc::Rc;

use svg::{self, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, PositionedDrawable, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Point, Size},
};

/// Splits absolute points into a bounding-box center and center-relative offsets.
fn center_points(points: &[Point]) -> (Point, Vec<Point>, Size) {
    match Bounds::from_points(points) {
        Some(bounds) => {
            let center = bounds.center();
            let offsets = points.iter().map(|p| p.sub_point(center)).collect();
            (center, offsets, bounds.to_size())
        }
        None => (Point::default(), Vec::new(), Size::default()),
    }
}

fn path_data(points: &[Point], position: Point, closed: bool) -> Option<String> {
    let (first, rest) = points.split_first()?;
    let first = first.add_point(position);
    let mut data = format!("M {} {}", first.x(), first.y());
    for point in rest {
        let point = point.add_point(position);
        data.push_str(&format!(" L {} {}", point.x(), point.y()));
    }
    if closed {
        data.push_str(" Z");
    }
    Some(data)
}

/// An open path through a sequence of points.
#[derive(Debug, Clone)]
pub struct Polyline {
    offsets: Vec<Point>,
    size: Size,
    stroke: Rc<StrokeDefinition>,
    layer: RenderLayer,
}

impl Polyline {
    /// Builds a polyline through absolute `points`, positioned at the center
    /// of their bounding box. Renders on the [`RenderLayer::Arrow`] layer.
    ///
    /// ```
    /// # use std::rc::Rc;
    /// # use chatflow_core::draw::{Polyline, StrokeDefinition};
    /// # use chatflow_core::geometry::Point;
    /// let line = Polyline::positioned(
    ///     &[Point::new(0.0, 0.0), Point::new(10.0, 4.0)],
    ///     Rc::new(StrokeDefinition::default()),
    /// );
    /// assert_eq!(line.position(), Point::new(5.0, 2.0));
    /// assert_eq!(line.bounds().width(), 10.0);
    /// ```
    pub fn positioned(points: &[Point], stroke: Rc<StrokeDefinition>) -> PositionedDrawable<Self> {
        let (center, offsets, size) = center_points(points);
        PositionedDrawable::new(Self {
            offsets,
            size,
            stroke,
            layer: RenderLayer::Arrow,
        })
        .with_position(center)
    }

    /// Moves the polyline to another render layer.
    pub fn on_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns true if the polyline has no points.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl Drawable for Polyline {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let Some(data) = path_data(&self.offsets, position, false) else {
            return output;
        };

        let path = svg_element::Path::new()
            .set("d", data)
            .set("fill", "none");
        let path = crate::apply_stroke!(path, self.stroke);

        output.add_to_layer(self.layer, Box::new(path));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// A closed, filled path. Arrowheads are triangles drawn with this type.
#[derive(Debug, Clone)]
pub struct Polygon {
    offsets: Vec<Point>,
    size: Size,
    fill_color: Color,
}

impl Polygon {
    /// Builds a polygon from absolute `points`, positioned at the center of
    /// their bounding box.
    pub fn positioned(points: &[Point], fill_color: Color) -> PositionedDrawable<Self> {
        let (center, offsets, size) = center_points(points);
        PositionedDrawable::new(Self {
            offsets,
            size,
            fill_color,
        })
        .with_position(center)
    }

    /// Returns the fill color.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Returns the number of vertices.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns true if the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl Drawable for Polygon {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let Some(data) = path_data(&self.offsets, position, true) else {
            return output;
        };

        let path = svg_element::Path::new()
            .set("d", data)
            .set("fill", &self.fill_color)
            .set("fill-opacity", self.fill_color.alpha())
            .set("stroke", "none");

        output.add_to_layer(RenderLayer::Arrow, Box::new(path));
        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

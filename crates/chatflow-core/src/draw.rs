//! Drawable primitives for diagram rendering.
//!
//! Every primitive implements the [`Drawable`] trait: it reports its size and
//! renders itself, centered on a given position, into a [`LayeredOutput`].
//! [`PositionedDrawable`] pairs a drawable with that position so bounds can be
//! computed before anything is emitted.
//!
//! All coordinates handled here are SVG pixels with Y increasing downward.

mod layer;
mod path;
mod positioned;
mod rounded_rect;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use path::{Polygon, Polyline};
pub use positioned::PositionedDrawable;
pub use rounded_rect::RoundedRect;
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin};
pub use text::{Text, TextDefinition};

use crate::geometry::{Point, Size};

/// A renderable diagram element.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of the element's footprint.
    fn size(&self) -> Size;
}

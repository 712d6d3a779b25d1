//! Layer-based rendering system for SVG output.
//!
//! Drawables push their SVG nodes into a [`LayeredOutput`] tagged with a
//! [`RenderLayer`]. When the output is rendered, nodes are grouped per layer
//! and emitted bottom to top, so boxes never hide the lines, arrows and text
//! drawn over them regardless of the order in which elements were visited.
//!
//! # Example
//!
//! ```
//! # use chatflow_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));
//! output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));
//!
//! // Content renders before Connector even though it was added later
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// The `Ord` derive uses declaration order: the first variant renders first
/// (bottom) and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background fill
    Background,
    /// Step and component boxes
    Content,
    /// Lines joining a step to its components
    Connector,
    /// Flow arrows and the feedback loop
    Arrow,
    /// Labels, numbers, captions and the title
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Connector => "connector",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves all nodes from `other` into this output, preserving their layers.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes added to `layer`.
    pub fn count_in(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g>` element with a `data-layer`
    /// attribute. Within a layer, nodes keep their insertion order.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order inside each layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle};

    use super::*;

    #[test]
    fn test_layered_output_new_is_empty() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_count_in() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));

        assert_eq!(output.count_in(RenderLayer::Content), 2);
        assert_eq!(output.count_in(RenderLayer::Connector), 1);
        assert_eq!(output.count_in(RenderLayer::Text), 0);
    }

    #[test]
    fn test_layered_output_merge_same_layer() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Arrow, Box::new(Line::new()));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Arrow, Box::new(Line::new()));

        first.merge(second);

        assert_eq!(first.count_in(RenderLayer::Arrow), 2);
        assert_eq!(first.render().len(), 1);
    }

    #[test]
    fn test_layered_output_render_orders_layers() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Arrow, Box::new(Line::new()));

        let rendered: Vec<String> = output.render().iter().map(|n| n.to_string()).collect();

        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains("data-layer=\"background\""));
        assert!(rendered[1].contains("data-layer=\"arrow\""));
        assert!(rendered[2].contains("data-layer=\"text\""));
    }
}

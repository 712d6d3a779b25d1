//! SVG rendering for flow chart elements.

use std::rc::Rc;

use log::trace;

use chatflow_core::{
    color::Color,
    draw::{
        Drawable as _, Polygon, Polyline, PositionedDrawable, RenderLayer, RoundedRect,
        StrokeDefinition, Text, TextDefinition,
    },
    geometry::{Point, Size},
};

use super::{Scene, Svg};
use crate::layout::{
    ArrowLayout, BoxShape, Connector, FeedbackLoop, HorizontalAlign, Label, StepLayout,
    VerticalAlign,
};

impl Svg {
    pub(super) fn render_step(&self, scene: &mut Scene, step: &StepLayout) {
        trace!(index = step.index(); "Rendering step");

        self.render_box(scene, step.shape());
        self.render_label(scene, step.number());
        self.render_label(scene, step.label());

        for component in step.components() {
            self.render_connector(scene, component.connector());
            self.render_box(scene, component.shape());
            self.render_label(scene, component.label());
        }
    }

    fn render_box(&self, scene: &mut Scene, shape: &BoxShape) {
        let outer = shape.outer_bounds();
        let stroke = StrokeDefinition::new(
            shape.border(),
            self.viewport.points_to_pixels(shape.border_width()),
        );

        let rect = RoundedRect::new(self.viewport.scale_size(outer.to_size()), Rc::new(stroke))
            .with_corner_radii(self.viewport.scale_size(Size::new(shape.pad(), shape.pad())))
            .with_fill_color(Some(shape.fill()));
        let positioned =
            PositionedDrawable::new(rect).with_position(self.viewport.to_pixels(outer.center()));

        scene.add(positioned.render_to_layers(), positioned.bounds());
    }

    fn render_connector(&self, scene: &mut Scene, connector: &Connector) {
        let stroke = self.line_stroke(connector.color(), connector.width());
        let points = [
            self.viewport.to_pixels(connector.start()),
            self.viewport.to_pixels(connector.end()),
        ];

        let line = Polyline::positioned(&points, stroke)
            .map(|line| line.on_layer(RenderLayer::Connector));
        scene.add(line.render_to_layers(), line.bounds());
    }

    pub(super) fn render_arrow(&self, scene: &mut Scene, arrow: &ArrowLayout) {
        if arrow.width() > 0.0 && arrow.length() > arrow.head_length() {
            let stroke = self.line_stroke(arrow.color(), arrow.width());
            let shaft = Polyline::positioned(
                &[
                    self.viewport.to_pixels(arrow.tail()),
                    self.viewport.to_pixels(arrow.head_base()),
                ],
                stroke,
            );
            scene.add(shaft.render_to_layers(), shaft.bounds());
        }

        let head: Vec<Point> = arrow
            .head_points()
            .iter()
            .map(|point| self.viewport.to_pixels(*point))
            .collect();
        let head = Polygon::positioned(&head, arrow.color());
        scene.add(head.render_to_layers(), head.bounds());
    }

    pub(super) fn render_feedback(&self, scene: &mut Scene, feedback: &FeedbackLoop) {
        let stroke = self.line_stroke(feedback.color(), feedback.width());
        let points: Vec<Point> = feedback
            .path()
            .iter()
            .map(|point| self.viewport.to_pixels(*point))
            .collect();

        let path = Polyline::positioned(&points, stroke);
        scene.add(path.render_to_layers(), path.bounds());

        self.render_arrow(scene, feedback.arrow());
        self.render_label(scene, feedback.caption());
    }

    /// Renders `label` so that its footprint is aligned on the anchor.
    pub(super) fn render_label(&self, scene: &mut Scene, label: &Label) {
        let mut definition = TextDefinition::new();
        definition.set_font_family(&self.font_family);
        definition.set_font_size(label.font_size());
        definition.set_bold(label.is_bold());
        definition.set_color(Some(label.color()));
        definition.set_pixels_per_point(self.viewport.points_to_pixels(1.0));

        let text = Text::new(&definition, label.text()).with_rotation(label.rotation());
        let center = aligned_center(
            self.viewport.to_pixels(label.anchor()),
            text.size(),
            label.h_align(),
            label.v_align(),
        );

        let positioned = PositionedDrawable::new(text).with_position(center);
        scene.add(positioned.render_to_layers(), positioned.bounds());
    }

    fn line_stroke(&self, color: Color, width: f32) -> Rc<StrokeDefinition> {
        Rc::new(StrokeDefinition::line(
            color,
            self.viewport.points_to_pixels(width),
        ))
    }
}

/// Center of a `size` footprint aligned on a pixel-space `anchor`.
fn aligned_center(
    anchor: Point,
    size: Size,
    h_align: HorizontalAlign,
    v_align: VerticalAlign,
) -> Point {
    let x = match h_align {
        HorizontalAlign::Left => anchor.x() + size.width() / 2.0,
        HorizontalAlign::Center => anchor.x(),
        HorizontalAlign::Right => anchor.x() - size.width() / 2.0,
    };
    // Pixel Y grows downward
    let y = match v_align {
        VerticalAlign::Top => anchor.y() + size.height() / 2.0,
        VerticalAlign::Center => anchor.y(),
        VerticalAlign::Bottom => anchor.y() - size.height() / 2.0,
    };
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        config::{AppConfig, CanvasConfig},
        export::svg::SvgBuilder,
        layout::Layout,
        pipeline::Pipeline,
    };

    fn exporter() -> Svg {
        SvgBuilder::new().build().unwrap()
    }

    fn chatbot_layout() -> Layout {
        Layout::compute(&Pipeline::chatbot(), &AppConfig::default()).unwrap()
    }

    fn rendered(scene: Scene) -> String {
        scene
            .output
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_aligned_center() {
        let anchor = Point::new(100.0, 50.0);
        let size = Size::new(40.0, 10.0);

        let left = aligned_center(anchor, size, HorizontalAlign::Left, VerticalAlign::Center);
        assert_eq!(left, Point::new(120.0, 50.0));

        let right = aligned_center(anchor, size, HorizontalAlign::Right, VerticalAlign::Center);
        assert_eq!(right, Point::new(80.0, 50.0));

        let top = aligned_center(anchor, size, HorizontalAlign::Center, VerticalAlign::Top);
        assert_eq!(top, Point::new(100.0, 55.0));

        let bottom = aligned_center(anchor, size, HorizontalAlign::Center, VerticalAlign::Bottom);
        assert_eq!(bottom, Point::new(100.0, 45.0));
    }

    #[test]
    fn test_step_box_pixel_bounds() {
        let svg = exporter();
        let layout = chatbot_layout();
        let mut scene = Scene::default();

        svg.render_box(&mut scene, layout.steps()[0].shape());
        let bounds = scene.bounds.unwrap();

        // Inner box 3.1 x 0.5 plus a 0.2 pad on each side, at 70 x 100 px per unit
        assert_approx_eq!(f32, bounds.min_x(), 231.0, epsilon = 1e-2);
        assert_approx_eq!(f32, bounds.width(), 245.0, epsilon = 1e-2);
        assert_approx_eq!(f32, bounds.height(), 90.0, epsilon = 1e-2);
        assert_approx_eq!(f32, bounds.center().y(), 100.0, epsilon = 1e-2);

        let out = rendered(scene);
        assert!(out.contains("rx=\"14"));
        assert!(out.contains("ry=\"20"));
        assert!(out.contains(&Color::new("#3498db").unwrap().to_string()));
    }

    #[test]
    fn test_step_renders_components_and_connectors() {
        let svg = exporter();
        let layout = chatbot_layout();
        let mut scene = Scene::default();

        let retrieval = &layout.steps()[4];
        svg.render_step(&mut scene, retrieval);

        let n = retrieval.components().len();
        assert_eq!(scene.output.count_in(RenderLayer::Content), 1 + n);
        assert_eq!(scene.output.count_in(RenderLayer::Connector), n);
        assert_eq!(scene.output.count_in(RenderLayer::Text), 2 + n);
    }

    #[test]
    fn test_flow_arrow_has_shaft_and_head() {
        let svg = exporter();
        let layout = chatbot_layout();
        let mut scene = Scene::default();

        svg.render_arrow(&mut scene, &layout.arrows()[0]);
        assert_eq!(scene.output.count_in(RenderLayer::Arrow), 2);

        let out = rendered(scene);
        assert!(out.contains(" Z"));
    }

    #[test]
    fn test_feedback_draws_path_head_and_caption() {
        let svg = exporter();
        let layout = chatbot_layout();
        let mut scene = Scene::default();

        svg.render_feedback(&mut scene, layout.feedback());
        // Path and head-only arrow
        assert_eq!(scene.output.count_in(RenderLayer::Arrow), 2);
        assert_eq!(scene.output.count_in(RenderLayer::Text), 1);

        let out = rendered(scene);
        assert!(out.contains(&Color::new("#e74c3c").unwrap().to_string()));
        assert!(out.contains("rotate(-90"));
        assert!(out.contains("Improvement"));
    }

    #[test]
    fn test_label_scales_with_boxes_across_dpi() {
        let layout = chatbot_layout();
        let step = &layout.steps()[0];

        let label_to_box = |dpi: f32| {
            let svg = SvgBuilder::new()
                .with_canvas(&CanvasConfig::default().with_dpi(dpi))
                .build()
                .unwrap();

            let mut label_scene = Scene::default();
            svg.render_label(&mut label_scene, step.label());
            let label_width = label_scene.bounds.unwrap().width();

            let mut box_scene = Scene::default();
            svg.render_box(&mut box_scene, step.shape());
            let box_width = box_scene.bounds.unwrap().width();

            let out = rendered(label_scene);
            assert!(out.contains("px\""));
            assert!(!out.contains("pt\""));

            label_width / box_width
        };

        let low = label_to_box(100.0);
        let high = label_to_box(200.0);
        assert_approx_eq!(f32, high / low, 1.0, epsilon = 0.02);
    }

    #[test]
    fn test_caption_right_aligned_left_of_channel() {
        let svg = exporter();
        let layout = chatbot_layout();
        let mut scene = Scene::default();

        svg.render_label(&mut scene, layout.feedback().caption());
        let bounds = scene.bounds.unwrap();
        let anchor = svg.viewport.to_pixels(layout.feedback().caption().anchor());

        assert_approx_eq!(f32, bounds.max_x(), anchor.x(), epsilon = 1e-2);
        assert_approx_eq!(f32, bounds.center().y(), anchor.y(), epsilon = 1e-2);
    }

    #[test]
    fn test_step_label_left_aligned() {
        let svg = exporter();
        let layout = chatbot_layout();
        let mut scene = Scene::default();

        let label = layout.steps()[0].label();
        svg.render_label(&mut scene, label);
        let bounds = scene.bounds.unwrap();
        let anchor = svg.viewport.to_pixels(label.anchor());

        assert_approx_eq!(f32, bounds.min_x(), anchor.x(), epsilon = 1e-2);
    }
}

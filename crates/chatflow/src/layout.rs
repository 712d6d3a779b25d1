//! Data-space layout of the flow chart.
//!
//! [`Layout::compute`] turns a [`Pipeline`] and an [`AppConfig`] into plain
//! shapes positioned in data units (Y upward). Nothing here knows about
//! pixels or SVG; the exporter maps the result onto a canvas.

use log::{debug, info, trace};

use chatflow_core::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
};

use crate::{
    ChatflowError,
    config::{AppConfig, LayoutConfig, Palette},
    pipeline::Pipeline,
};

const BOX_BORDER_WIDTH: f32 = 0.8;
const CONNECTOR_WIDTH: f32 = 0.6;
const FLOW_ARROW_WIDTH: f32 = 1.2;
const FEEDBACK_WIDTH: f32 = 1.1;

const TITLE_FONT_SIZE: u16 = 12;
const NUMBER_FONT_SIZE: u16 = 10;
const STEP_FONT_SIZE: u16 = 9;
const COMPONENT_FONT_SIZE: u16 = 7;
const CAPTION_FONT_SIZE: u16 = 7;

/// Horizontal placement of a label relative to its anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HorizontalAlign {
    /// The anchor is the left edge of the text.
    Left,
    /// The anchor is the horizontal center of the text.
    #[default]
    Center,
    /// The anchor is the right edge of the text.
    Right,
}

/// Vertical placement of a label relative to its anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    /// The anchor is the top edge of the text.
    Top,
    /// The anchor is the vertical center of the text.
    #[default]
    Center,
    /// The anchor is the bottom edge of the text.
    Bottom,
}

/// A piece of text anchored at a data-space point.
///
/// Alignment refers to the footprint of the text after rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    anchor: Point,
    font_size: u16,
    bold: bool,
    color: Color,
    h_align: HorizontalAlign,
    v_align: VerticalAlign,
    rotation: f32,
}

impl Label {
    /// Creates a centered, unrotated, regular-weight label.
    pub fn new(text: impl Into<String>, anchor: Point, font_size: u16, color: Color) -> Self {
        Self {
            text: text.into(),
            anchor,
            font_size,
            bold: false,
            color,
            h_align: HorizontalAlign::default(),
            v_align: VerticalAlign::default(),
            rotation: 0.0,
        }
    }

    /// Returns the label in bold weight.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Returns the label with the given alignment.
    pub fn with_align(mut self, h_align: HorizontalAlign, v_align: VerticalAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    /// Returns the label rotated counterclockwise by `degrees`.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn h_align(&self) -> HorizontalAlign {
        self.h_align
    }

    pub fn v_align(&self) -> VerticalAlign {
        self.v_align
    }

    /// Rotation in degrees, counterclockwise.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

/// A filled rectangle with rounded corners.
///
/// `origin` and `size` describe the inner rectangle; the drawn outline is
/// grown by `pad` on every side and its corners are rounded by `pad`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    origin: Point,
    size: Size,
    pad: f32,
    fill: Color,
    border: Color,
    border_width: f32,
}

impl BoxShape {
    /// Lower-left corner of the inner rectangle.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Size of the inner rectangle.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Rounding pad, also used as the corner radius.
    pub fn pad(&self) -> f32 {
        self.pad
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn border(&self) -> Color {
        self.border
    }

    /// Border width in points.
    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    /// Bounds of the inner rectangle.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.origin, self.size)
    }

    /// Bounds of the drawn outline, including the pad.
    pub fn outer_bounds(&self) -> Bounds {
        self.bounds().add_padding(Insets::uniform(self.pad))
    }
}

/// A straight line linking a step box to one of its component boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    start: Point,
    end: Point,
    color: Color,
    width: f32,
}

impl Connector {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Line width in points.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// A straight arrow from `tail` to `tip`, arrowhead included.
///
/// A `width` of zero draws the arrowhead alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowLayout {
    tail: Point,
    tip: Point,
    head_width: f32,
    head_length: f32,
    color: Color,
    width: f32,
}

impl ArrowLayout {
    pub fn tail(&self) -> Point {
        self.tail
    }

    pub fn tip(&self) -> Point {
        self.tip
    }

    pub fn head_width(&self) -> f32 {
        self.head_width
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Shaft width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Distance from tail to tip.
    pub fn length(&self) -> f32 {
        self.tip.sub_point(self.tail).hypot()
    }

    /// Arrowhead length, never longer than the arrow itself.
    pub fn head_length(&self) -> f32 {
        self.head_length.min(self.length())
    }

    /// Unit vector from tail to tip, or zero for a degenerate arrow.
    pub fn direction(&self) -> Point {
        let length = self.length();
        if length > 0.0 {
            self.tip.sub_point(self.tail).scale(1.0 / length)
        } else {
            Point::default()
        }
    }

    /// Point where the shaft meets the arrowhead.
    pub fn head_base(&self) -> Point {
        self.tip
            .sub_point(self.direction().scale(self.head_length()))
    }

    /// Arrowhead triangle: tip, then the two base corners.
    pub fn head_points(&self) -> [Point; 3] {
        let direction = self.direction();
        let normal = Point::new(-direction.y(), direction.x()).scale(self.head_width / 2.0);
        let base = self.head_base();
        [self.tip, base.add_point(normal), base.sub_point(normal)]
    }
}

/// A component box of a step, with its label and connector.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentLayout {
    shape: BoxShape,
    label: Label,
    connector: Connector,
}

impl ComponentLayout {
    pub fn shape(&self) -> &BoxShape {
        &self.shape
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Y of the component's center line.
    pub fn y(&self) -> f32 {
        self.label.anchor().y()
    }
}

/// One step of the chart: its box, number, label and components.
#[derive(Debug, Clone, PartialEq)]
pub struct StepLayout {
    index: usize,
    y: f32,
    shape: BoxShape,
    number: Label,
    label: Label,
    components: Vec<ComponentLayout>,
}

impl StepLayout {
    /// Zero-based position in the pipeline.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Y of the step's center line.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn shape(&self) -> &BoxShape {
        &self.shape
    }

    pub fn number(&self) -> &Label {
        &self.number
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn components(&self) -> &[ComponentLayout] {
        &self.components
    }
}

/// The L-shaped return path from the last step back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackLoop {
    path: [Point; 4],
    color: Color,
    width: f32,
    arrow: ArrowLayout,
    caption: Label,
}

impl FeedbackLoop {
    /// Path points: last step, channel bottom, channel top, first step.
    pub fn path(&self) -> &[Point; 4] {
        &self.path
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Path width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Arrowhead marking the re-entry into the first step.
    pub fn arrow(&self) -> &ArrowLayout {
        &self.arrow
    }

    pub fn caption(&self) -> &Label {
        &self.caption
    }

    /// Y where the loop leaves the pipeline.
    pub fn start_y(&self) -> f32 {
        self.path[0].y()
    }

    /// Y where the loop re-enters the pipeline.
    pub fn end_y(&self) -> f32 {
        self.path[3].y()
    }
}

/// The complete positioned chart in data units.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    canvas: Bounds,
    title: Label,
    steps: Vec<StepLayout>,
    arrows: Vec<ArrowLayout>,
    feedback: FeedbackLoop,
}

impl Layout {
    /// Lays out `pipeline` on the canvas described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatflowError::Config`] if the configuration is invalid.
    pub fn compute(pipeline: &Pipeline, config: &AppConfig) -> Result<Self, ChatflowError> {
        config.validate()?;
        let palette = config.style().palette()?;
        let metrics = config.layout();

        let [x_min, x_max] = config.canvas().x_limits();
        let [y_min, y_max] = config.canvas().y_limits();
        let canvas = Bounds::new_from_top_left(
            Point::new(x_min, y_min),
            Size::new(x_max - x_min, y_max - y_min),
        );

        info!(steps = pipeline.len(); "Computing layout");

        let steps: Vec<StepLayout> = pipeline
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let y = step_y(metrics, index);
                debug!(index = index, y = y, label = step.label(); "Placed step");
                layout_step(metrics, &palette, index, y, step.label(), step.components())
            })
            .collect();

        let arrows: Vec<ArrowLayout> = steps
            .windows(2)
            .map(|pair| flow_arrow(metrics, &palette, pair[0].y, pair[1].y))
            .collect();

        // Pipeline::new rejects empty pipelines
        let (first_y, last_y) = match (steps.first(), steps.last()) {
            (Some(first), Some(last)) => (first.y, last.y),
            _ => return Err(crate::pipeline::PipelineError::Empty.into()),
        };
        let feedback = feedback_loop(
            metrics,
            &palette,
            first_y,
            last_y,
            pipeline.feedback_caption(),
        );

        let title = Label::new(
            pipeline.title(),
            Point::new(
                canvas.center().x(),
                y_min + metrics.title_height() * canvas.height(),
            ),
            TITLE_FONT_SIZE,
            palette.line,
        )
        .bold()
        .with_align(HorizontalAlign::Center, VerticalAlign::Top);

        debug!(arrows = arrows.len(); "Layout complete");

        Ok(Self {
            canvas,
            title,
            steps,
            arrows,
            feedback,
        })
    }

    /// Data-space extent of the canvas.
    pub fn canvas(&self) -> Bounds {
        self.canvas
    }

    pub fn title(&self) -> &Label {
        &self.title
    }

    pub fn steps(&self) -> &[StepLayout] {
        &self.steps
    }

    /// Arrows between consecutive steps, top to bottom.
    pub fn arrows(&self) -> &[ArrowLayout] {
        &self.arrows
    }

    pub fn feedback(&self) -> &FeedbackLoop {
        &self.feedback
    }
}

fn step_y(metrics: &LayoutConfig, index: usize) -> f32 {
    metrics.top_margin() - index as f32 * metrics.vertical_spacing()
}

/// Y of the `index`-th of `count` components, centered on `step_y`.
fn component_y(metrics: &LayoutConfig, step_y: f32, index: usize, count: usize) -> f32 {
    let spacing = metrics.component_spacing();
    step_y + count.saturating_sub(1) as f32 * spacing / 2.0 - index as f32 * spacing
}

fn layout_step(
    metrics: &LayoutConfig,
    palette: &Palette,
    index: usize,
    y: f32,
    label: &str,
    components: &[String],
) -> StepLayout {
    let main_x = metrics.main_x();
    let fill = if index % 2 == 0 {
        palette.main
    } else {
        palette.secondary
    };

    let shape = BoxShape {
        origin: Point::new(main_x, y - metrics.box_height() / 2.0),
        size: Size::new(metrics.box_width(), metrics.box_height()),
        pad: metrics.box_pad(),
        fill,
        border: palette.line,
        border_width: BOX_BORDER_WIDTH,
    };

    let number = Label::new(
        (index + 1).to_string(),
        Point::new(main_x + metrics.number_offset(), y),
        NUMBER_FONT_SIZE,
        palette.text,
    )
    .bold()
    .with_align(HorizontalAlign::Left, VerticalAlign::Center);

    let step_label = Label::new(
        label,
        Point::new(main_x + metrics.label_offset(), y),
        STEP_FONT_SIZE,
        palette.text,
    )
    .with_align(HorizontalAlign::Left, VerticalAlign::Center);

    let component_x = main_x + metrics.box_width() + metrics.component_offset();
    let connector_start = Point::new(main_x + metrics.box_width(), y);
    let components = components
        .iter()
        .enumerate()
        .map(|(j, component)| {
            let comp_y = component_y(metrics, y, j, components.len());
            trace!(step = index, component = j, y = comp_y; "Placed component");

            ComponentLayout {
                shape: BoxShape {
                    origin: Point::new(component_x, comp_y - metrics.component_height() / 2.0),
                    size: Size::new(metrics.component_width(), metrics.component_height()),
                    pad: metrics.component_pad(),
                    fill: palette.component,
                    border: palette.component_border,
                    border_width: BOX_BORDER_WIDTH,
                },
                label: Label::new(
                    component.as_str(),
                    Point::new(component_x + metrics.component_width() / 2.0, comp_y),
                    COMPONENT_FONT_SIZE,
                    palette.line,
                ),
                connector: Connector {
                    start: connector_start,
                    end: Point::new(component_x, comp_y),
                    color: palette.line,
                    width: CONNECTOR_WIDTH,
                },
            }
        })
        .collect();

    StepLayout {
        index,
        y,
        shape,
        number,
        label: step_label,
        components,
    }
}

fn flow_arrow(metrics: &LayoutConfig, palette: &Palette, upper_y: f32, lower_y: f32) -> ArrowLayout {
    let x = metrics.main_x() + metrics.box_width() / 2.0;
    // Measured from the drawn outline, which extends `box_pad` past the box.
    let clearance = metrics.box_height() / 2.0 + metrics.box_pad() + metrics.arrow_gap();

    ArrowLayout {
        tail: Point::new(x, upper_y - clearance),
        tip: Point::new(x, lower_y + clearance),
        head_width: metrics.arrow_head_width(),
        head_length: metrics.arrow_head_length(),
        color: palette.line,
        width: FLOW_ARROW_WIDTH,
    }
}

fn feedback_loop(
    metrics: &LayoutConfig,
    palette: &Palette,
    first_y: f32,
    last_y: f32,
    caption: &str,
) -> FeedbackLoop {
    let main_x = metrics.main_x();
    let fx = main_x - metrics.feedback_offset();

    let path = [
        Point::new(main_x, last_y),
        Point::new(fx, last_y),
        Point::new(fx, first_y),
        Point::new(main_x, first_y),
    ];

    // The head starts where the vector ends and extends past it.
    let arrow = ArrowLayout {
        tail: Point::new(fx, first_y),
        tip: Point::new(
            fx + metrics.feedback_arrow_length() + metrics.arrow_head_length(),
            first_y,
        ),
        head_width: metrics.arrow_head_width(),
        head_length: metrics.arrow_head_length(),
        color: palette.feedback,
        width: 0.0,
    };

    let caption = Label::new(
        caption,
        Point::new(fx - metrics.caption_gap(), (first_y + last_y) / 2.0),
        CAPTION_FONT_SIZE,
        palette.feedback,
    )
    .with_align(HorizontalAlign::Right, VerticalAlign::Center)
    .with_rotation(90.0);

    FeedbackLoop {
        path,
        color: palette.feedback,
        width: FEEDBACK_WIDTH,
        arrow,
        caption,
    }
}

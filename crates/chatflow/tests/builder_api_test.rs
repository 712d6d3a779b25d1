//! Integration tests for the DiagramBuilder API
//!
//! These tests drive the public API end to end, from the pipeline to the
//! serialized SVG.

use chatflow::{
    ChatflowError, DiagramBuilder,
    config::{AppConfig, CanvasConfig, LayoutConfig, StyleConfig},
    pipeline::{Pipeline, PipelineError, StepSpec},
};

/// Matches `text` whether or not the serializer escaped `&`.
fn contains_text(svg: &str, text: &str) -> bool {
    svg.contains(text) || svg.contains(&text.replace('&', "&amp;"))
}

#[test]
fn test_render_chatbot_diagram() {
    let svg = chatflow::render_chatbot_diagram().expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("AI and Machine Learning in Chatbot Functionality"));
    assert!(svg.contains("Knowledge Base Retrieval"));
    assert!(svg.contains("Semantic search"));
}

#[test]
fn test_render_is_idempotent() {
    let first = chatflow::render_chatbot_diagram().expect("Failed to render");
    let second = chatflow::render_chatbot_diagram().expect("Failed to render");
    assert_eq!(first, second);
}

#[test]
fn test_builder_layout_then_render() {
    let builder = DiagramBuilder::default();
    let layout = builder
        .layout(&Pipeline::chatbot())
        .expect("Failed to lay out");

    assert_eq!(layout.steps().len(), 7);
    assert_eq!(layout.arrows().len(), 6);
    assert_eq!(layout.feedback().start_y(), layout.steps()[6].y());
    assert_eq!(layout.feedback().end_y(), layout.steps()[0].y());

    let svg = builder.render_svg(&layout).expect("Failed to render");
    for step in layout.steps() {
        assert!(contains_text(&svg, step.label().text()), "{}", step.label().text());
        assert!(svg.contains(&format!(">{}<", step.number().text())));
    }
}

#[test]
fn test_custom_pipeline() {
    let pipeline = Pipeline::new(
        "Support Bot",
        "Retrain",
        vec![
            StepSpec::new("Greet", ["Templates"]),
            StepSpec::new("Answer", ["FAQ lookup", "Escalation"]),
        ],
    )
    .expect("Failed to build pipeline");

    let builder = DiagramBuilder::default();
    let layout = builder.layout(&pipeline).expect("Failed to lay out");
    assert_eq!(layout.arrows().len(), 1);

    let svg = builder.render_svg(&layout).expect("Failed to render");
    assert!(svg.contains("Support Bot"));
    assert!(svg.contains("Escalation"));
    assert!(svg.contains("Retrain"));
}

#[test]
fn test_step_without_components_rejected() {
    let err = Pipeline::new(
        "T",
        "L",
        vec![StepSpec::new("Lonely", Vec::<String>::new())],
    )
    .unwrap_err();
    assert_eq!(
        err,
        PipelineError::NoComponents {
            step: "Lonely".to_string()
        }
    );
}

#[test]
fn test_invalid_config_is_reported() {
    let style = StyleConfig::default().with_step_colors("#3498db", "definitely-not-a-color");
    let config = AppConfig::new(CanvasConfig::default(), LayoutConfig::default(), style);

    let builder = DiagramBuilder::new(config);
    let err = builder.layout(&Pipeline::chatbot()).unwrap_err();
    assert!(matches!(err, ChatflowError::Config(_)), "{err:?}");
}

#[test]
fn test_background_color_from_config() {
    let style = StyleConfig::default().with_background_color("#fafafa");
    let config = AppConfig::new(CanvasConfig::default(), LayoutConfig::default(), style);

    let builder = DiagramBuilder::new(config);
    let layout = builder.layout(&Pipeline::chatbot()).expect("Failed to lay out");
    let svg = builder.render_svg(&layout).expect("Failed to render");
    assert!(svg.contains("data-layer=\"background\""));
}

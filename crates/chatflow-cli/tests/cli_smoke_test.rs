use std::fs;

use tempfile::tempdir;

use chatflow::color::Color;
use chatflow_cli::{Args, run};

fn args(output: String, config: Option<String>) -> Args {
    Args {
        output,
        config,
        log_level: "off".to_string(),
    }
}

#[test]
fn smoke_test_writes_svg() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("chatbot.svg");

    run(&args(output_path.to_string_lossy().to_string(), None)).expect("CLI run failed");

    let svg = fs::read_to_string(&output_path).expect("Output file missing");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("Knowledge Base Retrieval"));
}

#[test]
fn smoke_test_with_config_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    let output_path = temp_dir.path().join("styled.svg");
    fs::write(
        &config_path,
        r##"
[canvas]
margin = 20.0

[style]
background_color = "#ffffff"
feedback_color = "#8e44ad"
"##,
    )
    .expect("Failed to write config");

    run(&args(
        output_path.to_string_lossy().to_string(),
        Some(config_path.to_string_lossy().to_string()),
    ))
    .expect("CLI run failed");

    let svg = fs::read_to_string(&output_path).expect("Output file missing");
    let css = |hex: &str| Color::new(hex).expect("valid color").to_string();
    assert!(svg.contains(&css("#8e44ad")));
    assert!(!svg.contains(&css("#e74c3c")));
    assert!(svg.contains("data-layer=\"background\""));
}

#[test]
fn smoke_test_invalid_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    let output_path = temp_dir.path().join("never.svg");
    fs::write(&config_path, "[style]\nline_color = \"nope\"\n").expect("Failed to write config");

    let result = run(&args(
        output_path.to_string_lossy().to_string(),
        Some(config_path.to_string_lossy().to_string()),
    ));

    assert!(result.is_err());
    assert!(!output_path.exists());
}

#[test]
fn smoke_test_unwritable_output_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("missing-dir").join("out.svg");

    let result = run(&args(output_path.to_string_lossy().to_string(), None));
    assert!(matches!(result, Err(chatflow::ChatflowError::Io(_))));
}

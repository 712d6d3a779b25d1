//! Command-line argument definitions for the Chatflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output path, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Renders the chatbot NLP stages flow chart to SVG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output SVG file, or `-` for standard output
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns true if the SVG goes to standard output.
    pub fn writes_to_stdout(&self) -> bool {
        self.output == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["chatflow"]).unwrap();
        assert_eq!(args.output, "out.svg");
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
        assert!(!args.writes_to_stdout());
    }

    #[test]
    fn test_stdout_output() {
        let args = Args::try_parse_from(["chatflow", "-o", "-", "--log-level", "off"]).unwrap();
        assert!(args.writes_to_stdout());
        assert_eq!(args.log_level, "off");
    }

    #[test]
    fn test_unexpected_positional_rejected() {
        assert!(Args::try_parse_from(["chatflow", "diagram.txt"]).is_err());
    }
}

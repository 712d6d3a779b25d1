//! Color handling for Chatflow diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for emitting colors
//! into SVG attributes.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#3498db", "rgb(52, 152, 219)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatflow_core::color::Color;
    ///
    /// let blue = Color::new("#3498db").unwrap();
    /// let red = Color::new("red").unwrap();
    /// assert_ne!(blue, red);
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#3498db").is_ok());
        assert!(Color::new("rgb(231, 76, 60)").is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
        assert!(invalid.unwrap_err().contains("not-a-color"));
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn test_color_eq() {
        let first = Color::new("#2980b9").unwrap();
        let second = Color::new("#2980b9").unwrap();
        let other = Color::new("#3498db").unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_color_to_svg_value() {
        let color = Color::new("#e74c3c").unwrap();
        let value = svg::node::Value::from(&color);
        assert_eq!(value.to_string(), color.to_string());
    }
}

//! Chatflow Core Drawing Primitives
//!
//! This crate provides the rendering building blocks used by the Chatflow
//! diagram renderer. It includes:
//!
//! - **Colors**: CSS color parsing and SVG serialization ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and insets ([`geometry`] module)
//! - **Draw**: Rounded boxes, polylines, polygons, text and render layers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;

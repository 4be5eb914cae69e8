//! Color values shared between apps and renderers.

mod color;

pub use color::Color;

//! Kinema engine crate.
//!
//! This crate owns the platform + GPU runtime pieces the demos are built on:
//! window loop, input, frame timing, the wgpu device, and a small set of
//! renderers for meshes, lines and textures.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod camera;
pub mod geometry;
pub mod render;
pub mod paint;

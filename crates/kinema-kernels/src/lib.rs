//! Frame kernels for the **Kinema** demos.
//!
//! Everything in this crate is a pure function of static configuration and a
//! simulation time. Nothing here touches the GPU, the window, or the clock;
//! hosts feed in `elapsed` seconds and an anchor position each frame and read
//! back positions, line segments and matrices.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`wave`] | `WaveDescriptor`, `WaveField`, `compute_displacement` |
//! | [`grid`] | `SampleGrid`, `LineSegment`, `build_adjacency_lines` |
//! | [`orbit`] | `OrbitChain`, `OrbitingBody`, `ResolvedPlacement` |
//! | [`space`] | NDC ↔ screen-pixel conversions |
//!
//! # Quick start
//!
//! ```rust
//! use glam::{Vec2, Vec3};
//! use kinema_kernels::{compute_displacement, WaveDescriptor};
//!
//! let wave = WaveDescriptor::new(Vec2::new(1.0, 0.0), 0.35, 20.0, 0.8);
//! let out = compute_displacement(&[Vec3::ZERO], &[wave], 0.0);
//! assert!((out[0].x - 0.35 / wave.wavenumber()).abs() < 1e-5);
//! ```

pub mod grid;
pub mod orbit;
pub mod space;
pub mod wave;

pub use grid::{build_adjacency_lines, build_adjacency_lines_into, LineSegment, SampleGrid};
pub use orbit::{BodyId, FrameAnchor, OrbitChain, OrbitingBody, ResolvedPlacement, SpinAxis};
pub use space::ndc_to_screen;
pub use wave::{compute_displacement, WaveDescriptor, WaveField, GRAVITY};

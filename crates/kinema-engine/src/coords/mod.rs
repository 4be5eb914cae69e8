//! Window-space coordinate helpers.
//!
//! Canonical CPU pointer space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Scenes work in NDC (+Y up); [`Viewport`] converts between the two.

mod viewport;

pub use viewport::Viewport;

//! Window input for the demos.
//!
//! `platform` turns winit events into [`InputEvent`]s; [`InputState`] keeps
//! what persists between frames and [`InputFrame`] what happened since the
//! last one.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, ScrollDelta};

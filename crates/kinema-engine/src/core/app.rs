use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// What the runtime does after an app callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Close the window and leave the event loop.
    Exit,
}

/// A demo scene driven by [`crate::window::Runtime`].
pub trait App {
    /// Sees every window event after it has been folded into the input state.
    fn on_window_event(&mut self, _window: WindowId, _event: &WindowEvent) -> AppControl {
        AppControl::Continue
    }

    /// Advances and draws one frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}

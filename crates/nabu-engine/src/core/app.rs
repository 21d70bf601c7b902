use winit::event::WindowEvent;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime owns the app and drops it while the GL context is still
/// current, so GPU resources held by the app are released cleanly.
pub trait App {
    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called once per rendered frame. Buffers are swapped after it returns.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}

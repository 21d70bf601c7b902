use std::sync::Arc;

use winit::window::{Window, WindowId};

use crate::device::Gpu;
use crate::time::FrameTime;

/// Window handle and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

/// Handles available while the application is being constructed.
///
/// `gl` is the raw `glow` context for collaborators that talk to GL
/// themselves (the UI overlay painter). Engine resources use `gpu`.
pub struct SetupCtx<'a> {
    pub window: &'a Window,
    pub gpu: &'a Gpu,
    pub gl: &'a Arc<glow::Context>,
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a Gpu,
    pub time: FrameTime,
}

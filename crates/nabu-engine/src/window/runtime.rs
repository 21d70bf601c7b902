use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, SetupCtx, WindowCtx};
use crate::device::{GlContext, GlowBackend, Gpu, GpuInit, gl_sizei};
use crate::gl_call;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "nabu".to_string(),
            initial_size: LogicalSize::new(960.0, 540.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window with a current GL context and drives `A` until the
    /// window closes or the app asks to exit.
    ///
    /// `build` runs once the context exists. An error from it (or from
    /// context creation) ends the loop and is returned.
    pub fn run<A, F>(config: RuntimeConfig, gpu_init: GpuInit, build: F) -> Result<()>
    where
        A: CoreApp + 'static,
        F: FnOnce(&SetupCtx<'_>) -> Result<A>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            build: Some(build),
            entry: None,
            error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Everything tied to the one window.
///
/// Field order is drop order: the app releases its GL objects while the
/// context is still alive, and the window outlives its surface.
struct WindowEntry<A> {
    app: A,
    gpu: Gpu,
    clock: FrameClock,
    context: GlContext,
    window: Window,
}

struct AppState<A, F> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    build: Option<F>,
    entry: Option<WindowEntry<A>>,
    error: Option<anyhow::Error>,
}

impl<A, F> AppState<A, F>
where
    A: CoreApp + 'static,
    F: FnOnce(&SetupCtx<'_>) -> Result<A>,
{
    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry<A>> {
        let build = self
            .build
            .take()
            .context("application was already built")?;

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let (window, context, gl) = GlContext::create(event_loop, attrs, &self.gpu_init)?;
        let gl = Arc::new(gl);
        let gpu = Gpu::new(GlowBackend::new(Arc::clone(&gl)));
        set_viewport(&gpu, window.inner_size());

        let app = build(&SetupCtx {
            window: &window,
            gpu: &gpu,
            gl: &gl,
        })
        .context("failed to build the application")?;

        Ok(WindowEntry {
            app,
            gpu,
            clock: FrameClock::default(),
            context,
            window,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.entry = None;
        event_loop.exit();
    }
}

impl<A, F> ApplicationHandler for AppState<A, F>
where
    A: CoreApp + 'static,
    F: FnOnce(&SetupCtx<'_>) -> Result<A>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.build.is_none() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.window.request_redraw();
                self.entry = Some(entry);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: demos animate every frame.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.window.id() != window_id {
            return;
        }

        let window_ctx = WindowCtx {
            id: window_id,
            window: &entry.window,
        };
        if entry.app.on_window_event(&window_ctx, &event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(size) => {
                entry.context.resize(size);
                set_viewport(&entry.gpu, size);
                // Interactive resizes block the event loop.
                entry.clock.reset();
                entry.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.window.inner_size();
                entry.context.resize(size);
                set_viewport(&entry.gpu, size);
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: &entry.window,
                    },
                    gpu: &entry.gpu,
                    time: entry.clock.tick(),
                };

                if entry.app.on_frame(&mut ctx) == AppControl::Exit {
                    self.shutdown(event_loop);
                    return;
                }

                entry.window.pre_present_notify();
                if let Err(e) = entry.context.swap_buffers() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.entry = None;
    }
}

fn set_viewport(gpu: &Gpu, size: PhysicalSize<u32>) {
    if size.width == 0 || size.height == 0 {
        return;
    }
    let width = gl_sizei(size.width, "viewport width");
    let height = gl_sizei(size.height, "viewport height");
    gl_call!(gpu, viewport(0, 0, width, height));
}

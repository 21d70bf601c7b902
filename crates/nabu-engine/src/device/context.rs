use std::num::NonZeroU32;

use anyhow::{Context, Result, anyhow};
use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::GpuInit;

/// Owns the window surface and the GL context made current on it.
///
/// This type is the low-level platform context:
/// - picks a framebuffer config and creates the window with it
/// - creates a core-profile context and makes it current
/// - resizes the surface and presents frames
pub struct GlContext {
    /// Window surface the context renders into.
    ///
    /// Declared before `context` so it is released first.
    surface: Surface<WindowSurface>,

    /// Current context; stays current on the event-loop thread.
    context: PossiblyCurrentContext,
}

impl GlContext {
    /// Creates a window together with a current GL context and a `glow`
    /// function table loaded from it.
    pub fn create(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        init: &GpuInit,
    ) -> Result<(Window, Self, glow::Context)> {
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let samples = init.samples;

        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, |configs| pick_config(configs, samples))
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;

        let window = window.context("GL display was created without a window")?;
        let raw_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let display = config.display();
        let (major, minor) = init.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_handle));

        // SAFETY: `raw_handle` belongs to `window`, which outlives the context
        // (the runtime drops the context first).
        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .with_context(|| format!("failed to create an OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .context("failed to describe the window surface")?;

        // SAFETY: same window lifetime argument as above.
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .context("failed to create the window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make the GL context current")?;

        let interval = if init.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        // SAFETY: the context is current on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        log::info!("OpenGL {}", unsafe { gl.get_parameter_string(glow::VERSION) });

        Ok((window, Self { surface, context }, gl))
    }

    /// Resizes the surface. Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.surface.resize(&self.context, w, h);
        }
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Picks the config whose MSAA sample count is closest to `samples`.
///
/// `find_configs` fails with `BadConfig` when nothing matches the template,
/// and `DisplayBuilder::build` returns that error without calling the picker,
/// so `configs` is never empty here.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>, samples: u8) -> Config {
    configs
        .min_by_key(|c| c.num_samples().abs_diff(samples))
        .expect("glutin only calls the config picker with at least one config")
}

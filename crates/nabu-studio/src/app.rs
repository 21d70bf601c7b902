use std::sync::Arc;

use anyhow::Result;
use nabu_demos::{DemoAssets, DemoMenu, DemoSwitcher, register_builtin_demos};
use nabu_engine::core::{App, AppControl, FrameCtx, SetupCtx, WindowCtx};
use nabu_engine::render::Renderer;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::overlay::{EguiUi, Overlay};

/// Clear color behind every demo.
const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Hosts the demo switcher and draws its panel in an egui window.
///
/// Per frame: clear, update, render, then the overlay with the panel.
/// Escape leaves the running demo.
pub struct StudioApp {
    renderer: Renderer,
    switcher: DemoSwitcher,
    overlay: Overlay,
}

impl StudioApp {
    pub fn new(setup: &SetupCtx<'_>, assets: DemoAssets) -> Result<Self> {
        let mut menu = DemoMenu::new();
        register_builtin_demos(&mut menu, assets);

        Ok(Self {
            renderer: Renderer::new(setup.gpu),
            switcher: DemoSwitcher::new(setup.gpu, menu),
            overlay: Overlay::new(setup.window, Arc::clone(setup.gl))?,
        })
    }
}

impl App for StudioApp {
    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        if self.overlay.handle_input(window.window, event) {
            return AppControl::Continue;
        }

        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key: Key::Named(NamedKey::Escape),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } = event
        {
            self.switcher.back();
        }

        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.renderer.set_clear_color(BACKGROUND);
        self.renderer.clear();

        self.switcher.on_update(ctx.time.dt);
        self.switcher.on_render();

        let switcher = &mut self.switcher;
        let mut selection = Ok(());
        self.overlay.run(ctx.window.window, |egui_ctx| {
            egui::Window::new("Demos")
                .default_pos([10.0, 10.0])
                .resizable(false)
                .show(egui_ctx, |ui| {
                    selection = switcher.on_imgui_render(&mut EguiUi::new(ui));
                });
        });

        if let Err(e) = selection {
            log::error!("{e}");
        }

        AppControl::Continue
    }
}

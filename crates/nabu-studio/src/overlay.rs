use std::ops::RangeInclusive;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use nabu_demos::Ui;
use nabu_engine::glow;
use winit::event::WindowEvent;
use winit::window::Window;

/// egui on top of the demo's frame, painted with `egui_glow`.
///
/// Per frame: [`run`](Self::run) takes the queued input, builds the UI,
/// tessellates and paints it into the current framebuffer.
pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    painter: egui_glow::Painter,
}

impl Overlay {
    pub fn new(window: &Window, gl: Arc<glow::Context>) -> Result<Self> {
        let ctx = egui::Context::default();
        let id = ctx.viewport_id();
        let state = egui_winit::State::new(
            ctx.clone(),
            id,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let painter = egui_glow::Painter::new(gl, "", None, false)
            .map_err(|e| anyhow!("failed to create the egui painter: {e}"))?;

        Ok(Self {
            ctx,
            state,
            painter,
        })
    }

    /// Forwards a window event. Returns `true` if egui consumed it.
    pub fn handle_input(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn run(&mut self, window: &Window, build: impl FnOnce(&egui::Context)) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
        build(&self.ctx);

        let egui::FullOutput {
            platform_output,
            textures_delta,
            shapes,
            pixels_per_point,
            ..
        } = self.ctx.end_pass();
        self.state.handle_platform_output(window, platform_output);

        let primitives = self.ctx.tessellate(shapes, pixels_per_point);
        let size = window.inner_size();
        self.painter.paint_and_update_textures(
            [size.width, size.height],
            pixels_per_point,
            &primitives,
            &textures_delta,
        );
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.painter.destroy();
    }
}

/// Adapts an `egui::Ui` to the demos' widget contract.
pub struct EguiUi<'a> {
    ui: &'a mut egui::Ui,
}

impl<'a> EguiUi<'a> {
    pub fn new(ui: &'a mut egui::Ui) -> Self {
        Self { ui }
    }
}

impl Ui for EguiUi<'_> {
    fn button(&mut self, label: &str) -> bool {
        self.ui.button(label).clicked()
    }

    fn slider_f32(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        self.ui
            .add(egui::Slider::new(value, range).text(label))
            .changed()
    }

    fn slider_f32x3(
        &mut self,
        label: &str,
        value: &mut [f32; 3],
        range: RangeInclusive<f32>,
    ) -> bool {
        self.ui
            .push_id(label, |ui| {
                ui.label(label);
                let mut changed = false;
                for (axis, v) in ["x", "y", "z"].into_iter().zip(value.iter_mut()) {
                    changed |= ui
                        .add(egui::Slider::new(v, range.clone()).text(axis))
                        .changed();
                }
                changed
            })
            .inner
    }

    fn color_edit4(&mut self, label: &str, rgba: &mut [f32; 4]) -> bool {
        self.ui
            .horizontal(|ui| {
                let changed = ui.color_edit_button_rgba_unmultiplied(rgba).changed();
                ui.label(label);
                changed
            })
            .inner
    }

    fn text(&mut self, text: &str) {
        self.ui.label(text);
    }
}

use nabu_engine::device::Gpu;
use nabu_engine::render::Renderer;

use crate::demo::Demo;
use crate::ui::Ui;

pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.8, 1.0];

/// Fills the window with an editable color.
pub struct ClearColor {
    renderer: Renderer,
    color: [f32; 4],
}

impl ClearColor {
    pub fn new(gpu: &Gpu) -> Self {
        Self {
            renderer: Renderer::new(gpu),
            color: DEFAULT_CLEAR_COLOR,
        }
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }
}

impl Demo for ClearColor {
    fn on_render(&mut self) {
        self.renderer.set_clear_color(self.color);
        self.renderer.clear();
    }

    fn on_imgui_render(&mut self, ui: &mut dyn Ui) {
        ui.color_edit4("Clear Color", &mut self.color);
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::device::testing::{GlCall, RecordingGl};
    use nabu_engine::glow;

    use super::*;
    use crate::testing::ScriptedUi;

    #[test]
    fn clears_with_the_default_color() {
        let gl = RecordingGl::new();
        let mut demo = ClearColor::new(&gl.gpu());

        demo.on_update(0.016);
        demo.on_render();

        assert_eq!(
            gl.calls(),
            vec![
                GlCall::ClearColor(DEFAULT_CLEAR_COLOR),
                GlCall::Clear(glow::COLOR_BUFFER_BIT),
            ]
        );
    }

    #[test]
    fn picked_color_reaches_the_clear() {
        let gl = RecordingGl::new();
        let mut demo = ClearColor::new(&gl.gpu());
        let picked = [0.9, 0.1, 0.4, 0.5];
        let mut ui = ScriptedUi::picking(picked);

        demo.on_imgui_render(&mut ui);
        demo.on_render();

        assert_eq!(ui.sliders_shown, ["Clear Color"]);
        assert_eq!(demo.color(), picked);
        assert_eq!(
            gl.calls(),
            vec![GlCall::ClearColor(picked), GlCall::Clear(glow::COLOR_BUFFER_BIT)]
        );
    }

    #[test]
    fn untouched_panel_keeps_the_color() {
        let gl = RecordingGl::new();
        let mut demo = ClearColor::new(&gl.gpu());
        let mut ui = ScriptedUi::default();

        demo.on_imgui_render(&mut ui);

        assert_eq!(demo.color(), DEFAULT_CLEAR_COLOR);
    }
}

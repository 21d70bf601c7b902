use std::path::Path;

use anyhow::Result;
use nabu_engine::device::Gpu;
use nabu_engine::render::{
    IndexBuffer, Renderer, Shader, VertexArray, VertexBuffer, VertexBufferLayout,
};

use crate::demo::Demo;
use crate::ui::Ui;

/// Default red-channel change applied per update.
const RED_STEP: f32 = 0.05;

/// Upper bound of the step slider.
const MAX_RED_STEP: f32 = 0.2;

#[rustfmt::skip]
const POSITIONS: [f32; 8] = [
    -0.5, -0.5,
     0.5, -0.5,
     0.5,  0.5,
    -0.5,  0.5,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// A centered square whose `u_Color` red channel pulses between 0 and 1.
pub struct UniformColor {
    renderer: Renderer,
    va: VertexArray,
    _vb: VertexBuffer,
    ib: IndexBuffer,
    shader: Shader,
    red: f32,
    step: f32,
    rising: bool,
}

impl UniformColor {
    /// `shader` must expose `vec4 u_Color` and read a 2D position from slot 0.
    pub fn new(gpu: &Gpu, shader: Shader) -> Self {
        let va = VertexArray::new(gpu);
        let vb = VertexBuffer::from_slice(gpu, &POSITIONS);
        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2);
        va.add_buffer(&vb, &layout);
        let ib = IndexBuffer::new(gpu, &INDICES);

        va.unbind();
        vb.unbind();
        ib.unbind();

        Self {
            renderer: Renderer::new(gpu),
            va,
            _vb: vb,
            ib,
            shader,
            red: 0.0,
            step: RED_STEP,
            rising: true,
        }
    }

    pub fn from_file(gpu: &Gpu, shader_path: &Path) -> Result<Self> {
        let shader = Shader::from_file(gpu, shader_path)?;
        Ok(Self::new(gpu, shader))
    }

    pub fn red(&self) -> f32 {
        self.red
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Demo for UniformColor {
    fn on_update(&mut self, _dt: f32) {
        if self.red > 1.0 {
            self.rising = false;
        } else if self.red < 0.0 {
            self.rising = true;
        }
        self.red += if self.rising { self.step } else { -self.step };
    }

    fn on_render(&mut self) {
        self.shader.bind();
        self.shader.set_uniform_4f("u_Color", self.red, 0.3, 0.8, 1.0);
        self.renderer.draw(&self.va, &self.ib, &self.shader);
    }

    fn on_imgui_render(&mut self, ui: &mut dyn Ui) {
        ui.slider_f32("Step", &mut self.step, 0.0..=MAX_RED_STEP);
        ui.text(&format!("u_Color.r = {:.2}", self.red));
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::device::testing::{GlCall, RecordingGl};
    use nabu_engine::glow;

    use super::*;
    use crate::demos::test_shaders::COLOR_SHADER;
    use crate::testing::ScriptedUi;

    fn demo(gl: &RecordingGl) -> UniformColor {
        gl.declare_uniforms(&["u_Color"]);
        let gpu = gl.gpu();
        let shader = Shader::from_source(&gpu, "uniform_color", COLOR_SHADER).unwrap();
        UniformColor::new(&gpu, shader)
    }

    #[test]
    fn red_channel_bounces_between_zero_and_one() {
        let gl = RecordingGl::new();
        let mut demo = demo(&gl);

        let mut seen_max = f32::MIN;
        let mut seen_min = f32::MAX;
        for _ in 0..100 {
            demo.on_update(0.016);
            seen_max = seen_max.max(demo.red());
            seen_min = seen_min.min(demo.red());
        }

        assert!(seen_max > 1.0 && seen_max <= 1.0 + RED_STEP + 1e-4);
        assert!(seen_min < 0.0 && seen_min >= -RED_STEP - 1e-4);
    }

    #[test]
    fn first_update_steps_up() {
        let gl = RecordingGl::new();
        let mut demo = demo(&gl);

        demo.on_update(0.016);
        demo.on_update(0.016);

        assert!((demo.red() - 2.0 * RED_STEP).abs() < 1e-6);
    }

    #[test]
    fn step_slider_sets_the_pulse_speed() {
        let gl = RecordingGl::new();
        let mut demo = demo(&gl);
        let mut ui = ScriptedUi::dragging_to(0.1);

        demo.on_imgui_render(&mut ui);
        demo.on_update(0.016);

        assert_eq!(ui.sliders_shown, ["Step"]);
        assert_eq!(demo.step(), 0.1);
        assert!((demo.red() - 0.1).abs() < 1e-6);
        assert_eq!(ui.texts, ["u_Color.r = 0.00"]);
    }

    #[test]
    fn step_slider_is_capped() {
        let gl = RecordingGl::new();
        let mut demo = demo(&gl);

        demo.on_imgui_render(&mut ScriptedUi::dragging_to(5.0));

        assert_eq!(demo.step(), MAX_RED_STEP);
    }

    #[test]
    fn render_uploads_color_then_draws_the_square() {
        let gl = RecordingGl::new();
        let mut demo = demo(&gl);
        demo.on_update(0.016);
        gl.take_calls();

        demo.on_render();

        let calls = gl.calls();
        let color = calls
            .iter()
            .position(|c| matches!(c, GlCall::Uniform4f { values, .. } if values[0] == demo.red()))
            .unwrap();
        let draw = calls
            .iter()
            .position(|c| {
                *c == GlCall::DrawElements {
                    mode: glow::TRIANGLES,
                    count: 6,
                    index_type: glow::UNSIGNED_INT,
                    offset: 0,
                }
            })
            .unwrap();
        assert!(color < draw);
    }

    #[test]
    fn dropping_the_demo_releases_everything() {
        let gl = RecordingGl::new();
        let demo = demo(&gl);
        assert_eq!(gl.live_objects(), 4);

        drop(demo);

        assert_eq!(gl.live_objects(), 0);
    }
}

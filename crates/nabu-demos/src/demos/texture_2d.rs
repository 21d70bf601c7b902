use std::path::Path;

use anyhow::Result;
use glam::{Mat4, Vec3};
use nabu_engine::device::Gpu;
use nabu_engine::render::{
    IndexBuffer, Renderer, Shader, Texture, VertexArray, VertexBuffer, VertexBufferLayout,
};

use crate::demo::Demo;
use crate::ui::Ui;

/// Logical canvas the orthographic projection maps to the window.
pub const CANVAS: (f32, f32) = (960.0, 540.0);

/// Texture unit the quad samples from; `u_Texture` is set to match.
const TEXTURE_SLOT: u32 = 0;

/// Weight of the newest frame in the frame-time average.
const FRAME_TIME_SMOOTHING: f32 = 0.1;

/// 100x100 quad centered on the origin: position `xy`, then texture `uv`.
#[rustfmt::skip]
const QUAD: [f32; 16] = [
    -50.0, -50.0, 0.0, 0.0,
     50.0, -50.0, 1.0, 0.0,
     50.0,  50.0, 1.0, 1.0,
    -50.0,  50.0, 0.0, 1.0,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// One textured quad drawn twice, each copy with its own translation.
///
/// Coordinates are canvas pixels with the origin at the bottom left.
pub struct Texture2D {
    renderer: Renderer,
    va: VertexArray,
    _vb: VertexBuffer,
    ib: IndexBuffer,
    shader: Shader,
    texture: Texture,

    proj: Mat4,
    view: Mat4,
    translation_a: [f32; 3],
    translation_b: [f32; 3],

    avg_frame_time: Option<f32>,
}

impl Texture2D {
    /// `shader` must expose `u_MVP`, `u_Color` and `u_Texture`, and read
    /// position from slot 0 and texture coordinates from slot 1.
    pub fn new(gpu: &Gpu, shader: Shader, texture: Texture) -> Self {
        let renderer = Renderer::new(gpu);
        renderer.enable_alpha_blending();

        let va = VertexArray::new(gpu);
        let vb = VertexBuffer::from_slice(gpu, &QUAD);
        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);
        va.add_buffer(&vb, &layout);
        let ib = IndexBuffer::new(gpu, &INDICES);

        shader.bind();
        shader.set_uniform_4f("u_Color", 0.8, 0.3, 0.8, 1.0);
        shader.set_uniform_1i("u_Texture", TEXTURE_SLOT as i32);

        va.unbind();
        vb.unbind();
        ib.unbind();
        shader.unbind();

        Self {
            renderer,
            va,
            _vb: vb,
            ib,
            shader,
            texture,
            proj: Mat4::orthographic_rh_gl(0.0, CANVAS.0, 0.0, CANVAS.1, -1.0, 1.0),
            view: Mat4::from_translation(Vec3::ZERO),
            translation_a: [200.0, 200.0, 0.0],
            translation_b: [400.0, 200.0, 0.0],
            avg_frame_time: None,
        }
    }

    pub fn from_files(gpu: &Gpu, shader_path: &Path, texture_path: &Path) -> Result<Self> {
        let shader = Shader::from_file(gpu, shader_path)?;
        let texture = Texture::from_file(gpu, texture_path)?;
        Ok(Self::new(gpu, shader, texture))
    }

    pub fn translations(&self) -> ([f32; 3], [f32; 3]) {
        (self.translation_a, self.translation_b)
    }

    /// Model-view-projection matrix for a quad placed at `translation`.
    pub fn mvp(&self, translation: [f32; 3]) -> Mat4 {
        let model = Mat4::from_translation(Vec3::from_array(translation));
        self.proj * self.view * model
    }

    fn frame_stats(&self) -> Option<(f32, f32)> {
        self.avg_frame_time
            .filter(|dt| *dt > 0.0)
            .map(|dt| (dt * 1000.0, 1.0 / dt))
    }
}

impl Demo for Texture2D {
    fn on_update(&mut self, dt: f32) {
        self.avg_frame_time = Some(match self.avg_frame_time {
            Some(avg) => avg + (dt - avg) * FRAME_TIME_SMOOTHING,
            None => dt,
        });
    }

    fn on_render(&mut self) {
        self.renderer.set_clear_color([0.0, 0.0, 0.0, 1.0]);
        self.renderer.clear();
        // The overlay painter changes blend state every frame.
        self.renderer.enable_alpha_blending();

        self.texture.bind(TEXTURE_SLOT);
        for translation in [self.translation_a, self.translation_b] {
            let mvp = self.mvp(translation);
            self.shader.bind();
            self.shader.set_uniform_mat4f("u_MVP", &mvp);
            self.renderer.draw(&self.va, &self.ib, &self.shader);
        }
    }

    fn on_imgui_render(&mut self, ui: &mut dyn Ui) {
        ui.slider_f32x3("Translation A", &mut self.translation_a, 0.0..=CANVAS.0);
        ui.slider_f32x3("Translation B", &mut self.translation_b, 0.0..=CANVAS.0);

        if let Some((ms, fps)) = self.frame_stats() {
            ui.text(&format!("Application average {ms:.3} ms/frame ({fps:.1} FPS)"));
        }
    }
}

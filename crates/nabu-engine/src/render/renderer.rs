use crate::device::{Gpu, gl_sizei};
use crate::gl_call;

use super::{IndexBuffer, Shader, VertexArray};

/// Issues clears and indexed draws.
///
/// Stateless apart from the context handle: every draw re-binds program,
/// vertex array and index buffer, in that order.
#[derive(Debug, Clone)]
pub struct Renderer {
    gpu: Gpu,
}

impl Renderer {
    pub fn new(gpu: &Gpu) -> Self {
        Self { gpu: gpu.clone() }
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    /// Clears the color buffer with the current clear color.
    pub fn clear(&self) {
        gl_call!(self.gpu, clear(glow::COLOR_BUFFER_BIT));
    }

    pub fn set_clear_color(&self, rgba: [f32; 4]) {
        gl_call!(self.gpu, clear_color(rgba));
    }

    /// Draws `ib.count()` indices as a triangle list.
    pub fn draw(&self, va: &VertexArray, ib: &IndexBuffer, shader: &Shader) {
        shader.bind();
        va.bind();
        ib.bind();

        let count = gl_sizei(ib.count(), "index count");
        gl_call!(self.gpu, draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0));
    }

    /// Standard "over" blending for straight alpha.
    pub fn enable_alpha_blending(&self) {
        gl_call!(self.gpu, enable(glow::BLEND));
        gl_call!(self.gpu, blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA));
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        let width = gl_sizei(width, "viewport width");
        let height = gl_sizei(height, "viewport height");
        gl_call!(self.gpu, viewport(0, 0, width, height));
    }
}

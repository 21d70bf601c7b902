use bytemuck::Pod;

use crate::device::{Gpu, RawHandle, gl_sizei};
use crate::gl_call;

/// Static vertex data resident on the GPU (`GL_ARRAY_BUFFER`).
///
/// The contents are opaque bytes; their meaning comes from the
/// [`VertexBufferLayout`](super::VertexBufferLayout) it is paired with in a
/// [`VertexArray`](super::VertexArray). Uploaded once, never modified.
pub struct VertexBuffer {
    gpu: Gpu,
    id: RawHandle,
    size: usize,
}

impl VertexBuffer {
    /// Creates the buffer and uploads `data` as `STATIC_DRAW`.
    ///
    /// Leaves the new buffer bound to `GL_ARRAY_BUFFER`.
    pub fn new(gpu: &Gpu, data: &[u8]) -> Self {
        let id = gl_call!(create gpu, create_buffer());
        gl_call!(gpu, bind_buffer(glow::ARRAY_BUFFER, Some(id)));
        gl_call!(gpu, buffer_data(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW));

        Self {
            gpu: gpu.clone(),
            id,
            size: data.len(),
        }
    }

    /// Uploads a slice of plain-old-data vertices.
    pub fn from_slice<T: Pod>(gpu: &Gpu, vertices: &[T]) -> Self {
        Self::new(gpu, bytemuck::cast_slice(vertices))
    }

    pub fn bind(&self) {
        gl_call!(self.gpu, bind_buffer(glow::ARRAY_BUFFER, Some(self.id)));
    }

    pub fn unbind(&self) {
        gl_call!(self.gpu, bind_buffer(glow::ARRAY_BUFFER, None));
    }

    pub fn id(&self) -> RawHandle {
        self.id
    }

    /// Size of the uploaded data in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        gl_call!(self.gpu, delete_buffer(self.id));
    }
}

/// Static `u32` indices resident on the GPU (`GL_ELEMENT_ARRAY_BUFFER`).
pub struct IndexBuffer {
    gpu: Gpu,
    id: RawHandle,
    count: usize,
}

impl IndexBuffer {
    /// Creates the buffer and uploads `indices` as `STATIC_DRAW`.
    ///
    /// Only 32-bit indices are supported; draws always use `GL_UNSIGNED_INT`.
    ///
    /// # Panics
    /// If there are more than `i32::MAX` indices.
    pub fn new(gpu: &Gpu, indices: &[u32]) -> Self {
        gl_sizei(indices.len(), "index count");
        let id = gl_call!(create gpu, create_buffer());
        gl_call!(gpu, bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(id)));
        gl_call!(
            gpu,
            buffer_data(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW
            )
        );

        Self {
            gpu: gpu.clone(),
            id,
            count: indices.len(),
        }
    }

    pub fn bind(&self) {
        gl_call!(self.gpu, bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.id)));
    }

    pub fn unbind(&self) {
        gl_call!(self.gpu, bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None));
    }

    pub fn id(&self) -> RawHandle {
        self.id
    }

    /// Number of indices (not bytes, not triangles).
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        gl_call!(self.gpu, delete_buffer(self.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::{GlCall, RecordingGl};

    #[test]
    fn vertex_buffer_uploads_once_as_static_data() {
        let gl = RecordingGl::new();
        let gpu = gl.gpu();
        let positions: [f32; 4] = [-0.5, -0.5, 0.5, -0.5];

        let vb = VertexBuffer::from_slice(&gpu, &positions);

        assert_eq!(vb.size(), 16);
        assert_eq!(
            gl.calls(),
            vec![
                GlCall::CreateBuffer(vb.id()),
                GlCall::BindBuffer { target: glow::ARRAY_BUFFER, buffer: Some(vb.id()) },
                GlCall::BufferData {
                    target: glow::ARRAY_BUFFER,
                    bytes: bytemuck::cast_slice(&positions).to_vec(),
                    usage: glow::STATIC_DRAW,
                },
            ]
        );
    }

    #[test]
    fn index_buffer_keeps_element_count() {
        let gl = RecordingGl::new();
        let ib = IndexBuffer::new(&gl.gpu(), &[0, 1, 2, 2, 3, 0]);

        assert_eq!(ib.count(), 6);
        let uploaded = gl.count(|c| {
            matches!(c, GlCall::BufferData { target: glow::ELEMENT_ARRAY_BUFFER, bytes, .. } if bytes.len() == 24)
        });
        assert_eq!(uploaded, 1);
    }

    #[test]
    fn drop_releases_the_handle_exactly_once() {
        let gl = RecordingGl::new();
        let gpu = gl.gpu();
        let vb = VertexBuffer::new(&gpu, &[0u8; 8]);
        let ib = IndexBuffer::new(&gpu, &[0, 1, 2]);
        let (vb_id, ib_id) = (vb.id(), ib.id());
        assert_eq!(gl.live_objects(), 2);

        drop(vb);
        drop(ib);

        assert_eq!(gl.live_objects(), 0);
        assert_eq!(gl.count(|c| *c == GlCall::DeleteBuffer(vb_id)), 1);
        assert_eq!(gl.count(|c| *c == GlCall::DeleteBuffer(ib_id)), 1);
    }

    #[test]
    fn unbind_with_nothing_bound_is_not_an_error() {
        let gl = RecordingGl::new();
        let gpu = gl.gpu();
        let vb = VertexBuffer::new(&gpu, &[0u8; 4]);
        let ib = IndexBuffer::new(&gpu, &[0]);

        vb.unbind();
        vb.unbind();
        ib.unbind();
        ib.unbind();

        assert_eq!(gl.pending_errors(), 0);
    }

    #[test]
    fn rebinding_after_unbind_targets_the_same_handle() {
        let gl = RecordingGl::new();
        let gpu = gl.gpu();
        let vb = VertexBuffer::new(&gpu, &[0u8; 4]);
        vb.unbind();
        gl.take_calls();

        vb.bind();

        assert_eq!(
            gl.calls(),
            vec![GlCall::BindBuffer { target: glow::ARRAY_BUFFER, buffer: Some(vb.id()) }]
        );
    }
}

use crate::device::{Gpu, RawHandle, gl_sizei};
use crate::gl_call;

use super::{VertexBuffer, VertexBufferLayout};

/// Vertex array object: records which buffer feeds which attribute slot.
pub struct VertexArray {
    gpu: Gpu,
    id: RawHandle,
}

impl VertexArray {
    pub fn new(gpu: &Gpu) -> Self {
        let id = gl_call!(create gpu, create_vertex_array());
        Self {
            gpu: gpu.clone(),
            id,
        }
    }

    /// Couples the attributes described by `layout` to `buffer`.
    ///
    /// Attribute `i` of the layout goes to slot `i`. Slots start from 0 on
    /// every call, so all attributes of one buffer belong in one layout.
    /// Leaves this vertex array and `buffer` bound.
    pub fn add_buffer(&self, buffer: &VertexBuffer, layout: &VertexBufferLayout) {
        self.bind();
        buffer.bind();

        let stride = gl_sizei(layout.stride(), "vertex stride");
        let mut offset = 0u32;
        for (slot, element) in layout.elements().iter().enumerate() {
            let slot = slot as u32;
            gl_call!(self.gpu, enable_vertex_attrib_array(slot));
            gl_call!(
                self.gpu,
                vertex_attrib_pointer(
                    slot,
                    element.count as i32,
                    element.ty.gl_enum(),
                    element.normalized,
                    stride,
                    gl_sizei(offset, "attribute offset")
                )
            );
            offset += element.byte_width();
        }
    }

    pub fn bind(&self) {
        gl_call!(self.gpu, bind_vertex_array(Some(self.id)));
    }

    pub fn unbind(&self) {
        gl_call!(self.gpu, bind_vertex_array(None));
    }

    pub fn id(&self) -> RawHandle {
        self.id
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        gl_call!(self.gpu, delete_vertex_array(self.id));
    }
}

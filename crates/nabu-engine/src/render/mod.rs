//! GPU resources and the draw dispatcher.
//!
//! Each resource owns exactly one GL object and releases it on drop. Binding
//! is explicit and global, as in GL itself: `bind` changes what later calls
//! on that target operate on.
//!
//! Convention:
//! - Vertex data is uploaded once (`STATIC_DRAW`) and never modified.
//! - Index data is always `u32`.
//! - Textures are RGBA8 with their bottom row first.

mod buffer;
mod layout;
mod renderer;
mod shader;
mod texture;
mod vertex_array;

pub use buffer::{IndexBuffer, VertexBuffer};
pub use layout::{
    ComponentType, LayoutError, VertexBufferElement, VertexBufferLayout, VertexComponent,
};
pub use renderer::Renderer;
pub use shader::{Shader, ShaderError, ShaderProgramSource, ShaderStage, parse_shader};
pub use texture::{Texture, TextureError};
pub use vertex_array::VertexArray;

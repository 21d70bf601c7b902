//! GL context + error channel.
//!
//! This module is responsible for:
//! - creating the window surface and a current core-profile context
//! - the [`GlApi`] seam every GL call goes through, with its `glow` backend
//! - the [`Gpu`] handle that drains and checks GL errors around each call

mod api;
mod context;
mod error;
mod glow_backend;
mod gpu;
mod init;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{GlApi, RawHandle, UniformLocation};
pub use context::GlContext;
pub use error::GlErrorCode;
pub use glow_backend::GlowBackend;
pub use gpu::Gpu;
pub(crate) use gpu::gl_sizei;
pub use init::GpuInit;

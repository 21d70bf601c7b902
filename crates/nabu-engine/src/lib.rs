//! Nabu engine crate.
//!
//! A thin layer over OpenGL 3.3 core: an error-checked call channel, RAII
//! resources (buffers, vertex layouts, shaders, textures), an indexed draw
//! dispatcher, and the window/runtime loop that hosts an application.

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;

pub use glow;

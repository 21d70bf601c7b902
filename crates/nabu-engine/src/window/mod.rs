//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop, the single window and its GL context, and
//! drives the application callbacks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};

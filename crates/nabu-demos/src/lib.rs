//! Nabu demos crate.
//!
//! Interactive rendering scenarios built on `nabu-engine`, the registry that
//! lists them, and the switcher that runs one at a time behind a menu.
//!
//! The host drives a [`DemoSwitcher`] once per frame:
//!
//! ```ignore
//! renderer.clear();
//! switcher.on_update(dt);
//! switcher.on_render();
//! switcher.on_imgui_render(&mut ui)?;
//! ```

mod demo;
pub mod demos;
mod error;
mod menu;
mod switcher;
mod ui;

#[cfg(test)]
mod testing;

pub use demo::Demo;
pub use demos::{DemoAssets, register_builtin_demos};
pub use error::DemoError;
pub use menu::{DemoFactory, DemoMenu};
pub use switcher::{BACK_LABEL, DemoState, DemoSwitcher};
pub use ui::Ui;

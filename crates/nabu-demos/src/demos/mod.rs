//! Built-in demos.

mod clear_color;
mod texture_2d;
mod uniform_color;

use std::path::{Path, PathBuf};

use nabu_engine::device::Gpu;

use crate::demo::Demo;
use crate::menu::DemoMenu;

pub use clear_color::{ClearColor, DEFAULT_CLEAR_COLOR};
pub use texture_2d::{CANVAS, Texture2D};
pub use uniform_color::UniformColor;

/// Files the built-in demos load at construction.
#[derive(Debug, Clone)]
pub struct DemoAssets {
    /// Textured shader with `u_MVP`, `u_Color` and `u_Texture`.
    pub texture_shader: PathBuf,
    /// Flat shader with `u_Color`.
    pub color_shader: PathBuf,
    pub texture: PathBuf,
}

impl DemoAssets {
    /// The standard layout under a resource directory:
    /// `shaders/basic.shader`, `shaders/uniform_color.shader` and
    /// `textures/checker.png`.
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            texture_shader: root.join("shaders").join("basic.shader"),
            color_shader: root.join("shaders").join("uniform_color.shader"),
            texture: root.join("textures").join("checker.png"),
        }
    }
}

/// Registers "Clear Color", "Uniform Color" and "Texture 2D", in that order.
pub fn register_builtin_demos(menu: &mut DemoMenu, assets: DemoAssets) {
    menu.register("Clear Color", |gpu: &Gpu| {
        Ok(Box::new(ClearColor::new(gpu)) as Box<dyn Demo>)
    });

    let color_shader = assets.color_shader;
    menu.register("Uniform Color", move |gpu: &Gpu| {
        Ok(Box::new(UniformColor::from_file(gpu, &color_shader)?) as Box<dyn Demo>)
    });

    let (texture_shader, texture) = (assets.texture_shader, assets.texture);
    menu.register("Texture 2D", move |gpu: &Gpu| {
        Ok(Box::new(Texture2D::from_files(gpu, &texture_shader, &texture)?) as Box<dyn Demo>)
    });
}


#[cfg(test)]
mod tests {
    use nabu_engine::device::testing::RecordingGl;

    use super::*;
    use crate::{DemoError, DemoState, DemoSwitcher};

    #[test]
    fn builtins_register_in_order() {
        let mut menu = DemoMenu::new();
        register_builtin_demos(&mut menu, DemoAssets::in_dir("res"));

        assert_eq!(
            menu.names().collect::<Vec<_>>(),
            ["Clear Color", "Uniform Color", "Texture 2D"]
        );
    }

    #[test]
    fn clear_color_cycle_keeps_the_menu() {
        let gl = RecordingGl::new();
        let mut menu = DemoMenu::new();
        register_builtin_demos(&mut menu, DemoAssets::in_dir("res"));
        let mut switcher = DemoSwitcher::new(&gl.gpu(), menu);

        switcher.select_by_name("Clear Color").unwrap();
        switcher.on_update(0.016);
        switcher.on_render();
        assert_eq!(switcher.state(), DemoState::InsideDemo("Clear Color"));

        switcher.back();
        assert_eq!(switcher.state(), DemoState::AtMenu);
        assert_eq!(switcher.menu().len(), 3);
        assert_eq!(gl.live_objects(), 0);
    }

    #[test]
    fn bundled_assets_build_every_demo() {
        let gl = RecordingGl::new();
        gl.declare_uniforms(&["u_MVP", "u_Color", "u_Texture"]);
        let mut menu = DemoMenu::new();
        let res = Path::new(env!("CARGO_MANIFEST_DIR")).join("../nabu-studio/res");
        register_builtin_demos(&mut menu, DemoAssets::in_dir(res));
        let mut switcher = DemoSwitcher::new(&gl.gpu(), menu);

        for index in 0..switcher.menu().len() {
            switcher.select(index).unwrap();
            switcher.on_update(0.016);
            switcher.on_render();
            switcher.back();
        }

        assert_eq!(switcher.state(), DemoState::AtMenu);
        assert_eq!(gl.live_objects(), 0);
        assert_eq!(gl.pending_errors(), 0);
    }

    #[test]
    fn missing_assets_fail_construction() {
        let gl = RecordingGl::new();
        let mut menu = DemoMenu::new();
        let missing = std::env::temp_dir().join("nabu-demos-missing-assets");
        register_builtin_demos(&mut menu, DemoAssets::in_dir(&missing));
        let mut switcher = DemoSwitcher::new(&gl.gpu(), menu);

        for name in ["Uniform Color", "Texture 2D"] {
            let err = switcher.select_by_name(name).unwrap_err();
            assert!(matches!(err, DemoError::Construction { .. }), "{name}: {err}");
        }
        assert_eq!(switcher.state(), DemoState::AtMenu);
        assert_eq!(gl.live_objects(), 0);
    }
}

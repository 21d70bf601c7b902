use crate::ui::Ui;

/// One self-contained interactive rendering scenario.
///
/// Every hook has a no-op default, so a demo overrides only what it needs.
/// The host calls them once per frame in this order: `on_update`,
/// `on_render`, `on_imgui_render`.
pub trait Demo {
    /// Advances the simulation by `dt` seconds.
    fn on_update(&mut self, dt: f32) {
        let _ = dt;
    }

    /// Issues this frame's GL work. The color buffer is already cleared.
    fn on_render(&mut self) {}

    /// Describes the demo's control panel.
    fn on_imgui_render(&mut self, ui: &mut dyn Ui) {
        let _ = ui;
    }
}

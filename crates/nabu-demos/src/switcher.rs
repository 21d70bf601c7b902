use nabu_engine::device::Gpu;

use crate::demo::Demo;
use crate::error::DemoError;
use crate::menu::DemoMenu;
use crate::ui::Ui;

/// Label of the button that leaves a running demo.
pub const BACK_LABEL: &str = "<-";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DemoState<'a> {
    AtMenu,
    InsideDemo(&'a str),
}

struct ActiveDemo {
    name: String,
    demo: Box<dyn Demo>,
}

/// Runs at most one demo at a time on top of a permanent menu.
///
/// Starting at the menu, selecting an entry builds a new instance and makes
/// it current; [`back`](Self::back) destroys it and makes the menu current
/// again. Demo-to-demo switches always pass through the menu.
pub struct DemoSwitcher {
    gpu: Gpu,
    menu: DemoMenu,
    active: Option<ActiveDemo>,
}

impl DemoSwitcher {
    pub fn new(gpu: &Gpu, menu: DemoMenu) -> Self {
        Self {
            gpu: gpu.clone(),
            menu,
            active: None,
        }
    }

    pub fn state(&self) -> DemoState<'_> {
        match &self.active {
            Some(active) => DemoState::InsideDemo(&active.name),
            None => DemoState::AtMenu,
        }
    }

    pub fn menu(&self) -> &DemoMenu {
        &self.menu
    }

    /// The demo receiving the frame hooks: the running demo, else the menu.
    pub fn current(&mut self) -> &mut dyn Demo {
        match &mut self.active {
            Some(active) => active.demo.as_mut(),
            None => &mut self.menu,
        }
    }

    /// Builds entry `index` and makes it current.
    ///
    /// On failure the switcher stays at the menu.
    pub fn select(&mut self, index: usize) -> Result<(), DemoError> {
        if let Some(active) = &self.active {
            return Err(DemoError::NotAtMenu {
                current: active.name.clone(),
            });
        }

        let name = self
            .menu
            .name(index)
            .ok_or_else(|| DemoError::UnknownDemo(format!("#{index}")))?
            .to_string();

        let demo = match self.menu.build(index, &self.gpu) {
            Some(Ok(demo)) => demo,
            Some(Err(source)) => return Err(DemoError::Construction { name, source }),
            None => return Err(DemoError::UnknownDemo(name)),
        };

        log::info!("entering demo `{name}`");
        self.active = Some(ActiveDemo { name, demo });
        Ok(())
    }

    /// Selects the first entry called `name`.
    pub fn select_by_name(&mut self, name: &str) -> Result<(), DemoError> {
        if let Some(active) = &self.active {
            return Err(DemoError::NotAtMenu {
                current: active.name.clone(),
            });
        }

        let index = self
            .menu
            .position(name)
            .ok_or_else(|| DemoError::UnknownDemo(name.to_string()))?;
        self.select(index)
    }

    /// Drops the running demo and returns to the menu. No-op at the menu.
    pub fn back(&mut self) {
        if let Some(active) = self.active.take() {
            log::info!("leaving demo `{}`", active.name);
        }
    }

    pub fn on_update(&mut self, dt: f32) {
        self.current().on_update(dt);
    }

    pub fn on_render(&mut self) {
        self.current().on_render();
    }

    /// Draws the panel and applies what the user clicked.
    ///
    /// Inside a demo a [`BACK_LABEL`] button comes first; clicking it returns
    /// to the menu, which is then drawn in the same frame. A menu click is
    /// applied after the menu has been drawn.
    pub fn on_imgui_render(&mut self, ui: &mut dyn Ui) -> Result<(), DemoError> {
        if self.active.is_some() && ui.button(BACK_LABEL) {
            self.back();
        }

        self.current().on_imgui_render(ui);

        match self.menu.take_selection() {
            Some(index) if self.active.is_none() => self.select(index),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use nabu_engine::device::testing::RecordingGl;

    use super::*;
    use crate::testing::ScriptedUi;

    /// Counts live instances and hook calls through shared cells.
    #[derive(Clone, Default)]
    struct Probe {
        live: Rc<Cell<i32>>,
        updates: Rc<Cell<u32>>,
        renders: Rc<Cell<u32>>,
    }

    struct Counted(Probe);

    impl Counted {
        fn new(probe: &Probe) -> Self {
            probe.live.set(probe.live.get() + 1);
            Self(probe.clone())
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.live.set(self.0.live.get() - 1);
        }
    }

    impl Demo for Counted {
        fn on_update(&mut self, _dt: f32) {
            self.0.updates.set(self.0.updates.get() + 1);
        }

        fn on_render(&mut self) {
            self.0.renders.set(self.0.renders.get() + 1);
        }

        fn on_imgui_render(&mut self, ui: &mut dyn Ui) {
            ui.text("counted");
        }
    }

    fn switcher_with(probe: &Probe) -> DemoSwitcher {
        let mut menu = DemoMenu::new();
        let p = probe.clone();
        menu.register("Clear Color", move |_: &Gpu| {
            Ok(Box::new(Counted::new(&p)) as Box<dyn Demo>)
        });
        menu.register("Broken", |_: &Gpu| {
            Err::<Box<dyn Demo>, _>(anyhow::anyhow!("shader missing"))
        });
        DemoSwitcher::new(&RecordingGl::new().gpu(), menu)
    }

    #[test]
    fn select_then_back_destroys_only_the_demo() {
        let probe = Probe::default();
        let mut switcher = switcher_with(&probe);
        assert_eq!(switcher.state(), DemoState::AtMenu);

        switcher.select_by_name("Clear Color").unwrap();
        assert_eq!(switcher.state(), DemoState::InsideDemo("Clear Color"));
        assert_eq!(probe.live.get(), 1);

        switcher.back();
        assert_eq!(switcher.state(), DemoState::AtMenu);
        assert_eq!(probe.live.get(), 0);
        assert_eq!(switcher.menu().len(), 2);

        switcher.select(0).unwrap();
        assert_eq!(probe.live.get(), 1);
    }

    #[test]
    fn hooks_reach_the_running_demo_only() {
        let probe = Probe::default();
        let mut switcher = switcher_with(&probe);

        switcher.on_update(0.016);
        switcher.on_render();
        assert_eq!((probe.updates.get(), probe.renders.get()), (0, 0));

        switcher.select(0).unwrap();
        switcher.on_update(0.016);
        switcher.on_render();
        assert_eq!((probe.updates.get(), probe.renders.get()), (1, 1));
    }

    #[test]
    fn demo_to_demo_requires_going_back() {
        let probe = Probe::default();
        let mut switcher = switcher_with(&probe);
        switcher.select(0).unwrap();

        let err = switcher.select(0).unwrap_err();

        assert!(matches!(err, DemoError::NotAtMenu { ref current } if current == "Clear Color"));
        assert_eq!(probe.live.get(), 1);
    }

    #[test]
    fn unknown_entries_are_rejected() {
        let probe = Probe::default();
        let mut switcher = switcher_with(&probe);

        assert!(matches!(switcher.select(9), Err(DemoError::UnknownDemo(_))));
        assert!(matches!(
            switcher.select_by_name("Nope"),
            Err(DemoError::UnknownDemo(ref n)) if n == "Nope"
        ));
        assert_eq!(switcher.state(), DemoState::AtMenu);
    }

    #[test]
    fn failed_construction_stays_at_the_menu() {
        let probe = Probe::default();
        let mut switcher = switcher_with(&probe);

        let err = switcher.select_by_name("Broken").unwrap_err();

        assert!(matches!(err, DemoError::Construction { ref name, .. } if name == "Broken"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(switcher.state(), DemoState::AtMenu);
    }

    #[test]
    fn panel_click_enters_and_back_button_leaves() {
        let probe = Probe::default();
        let mut switcher = switcher_with(&probe);

        let mut ui = ScriptedUi::clicking("Clear Color");
        switcher.on_imgui_render(&mut ui).unwrap();
        assert_eq!(switcher.state(), DemoState::InsideDemo("Clear Color"));

        let mut ui = ScriptedUi::default();
        switcher.on_imgui_render(&mut ui).unwrap();
        assert_eq!(ui.buttons_shown, [BACK_LABEL]);
        assert_eq!(ui.texts, ["counted"]);

        let mut ui = ScriptedUi::clicking(BACK_LABEL);
        switcher.on_imgui_render(&mut ui).unwrap();
        assert_eq!(switcher.state(), DemoState::AtMenu);
        assert_eq!(probe.live.get(), 0);
        assert_eq!(ui.buttons_shown, [BACK_LABEL, "Clear Color", "Broken"]);
    }

    #[test]
    fn panel_reports_construction_failures() {
        let probe = Probe::default();
        let mut switcher = switcher_with(&probe);
        let mut ui = ScriptedUi::clicking("Broken");

        let result = switcher.on_imgui_render(&mut ui);

        assert!(matches!(result, Err(DemoError::Construction { .. })));
        assert_eq!(switcher.state(), DemoState::AtMenu);
    }

    #[test]
    fn current_is_the_menu_at_the_menu() {
        let probe = Probe::default();
        let mut switcher = switcher_with(&probe);
        let mut ui = ScriptedUi::default();

        switcher.current().on_imgui_render(&mut ui);

        assert_eq!(ui.buttons_shown, ["Clear Color", "Broken"]);
    }
}

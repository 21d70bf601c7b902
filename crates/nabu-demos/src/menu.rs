use nabu_engine::device::Gpu;

use crate::demo::Demo;
use crate::ui::Ui;

/// Builds a fresh demo instance on the current GL context.
pub type DemoFactory = Box<dyn Fn(&Gpu) -> anyhow::Result<Box<dyn Demo>>>;

struct DemoEntry {
    name: String,
    factory: DemoFactory,
}

/// Ordered registry of demos, and the panel that lists them.
///
/// Names are display labels only: duplicates are allowed and each entry is
/// addressed by its position. Clicking an entry records it as the pending
/// selection; the [`DemoSwitcher`](crate::DemoSwitcher) picks it up.
#[derive(Default)]
pub struct DemoMenu {
    entries: Vec<DemoEntry>,
    pending: Option<usize>,
}

impl DemoMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Gpu) -> anyhow::Result<Box<dyn Demo>> + 'static,
    {
        let name = name.into();
        log::info!("registering demo `{name}`");
        self.entries.push(DemoEntry {
            name,
            factory: Box::new(factory),
        });
        self
    }

    /// Registered names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.name.as_str())
    }

    /// Index of the first entry called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns and clears the entry clicked in the last panel draw.
    pub fn take_selection(&mut self) -> Option<usize> {
        self.pending.take()
    }

    pub(crate) fn build(&self, index: usize, gpu: &Gpu) -> Option<anyhow::Result<Box<dyn Demo>>> {
        self.entries.get(index).map(|e| (e.factory)(gpu))
    }
}

impl Demo for DemoMenu {
    fn on_imgui_render(&mut self, ui: &mut dyn Ui) {
        for (index, entry) in self.entries.iter().enumerate() {
            if ui.button(&entry.name) {
                self.pending = Some(index);
            }
        }
    }
}

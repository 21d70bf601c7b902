use std::ops::RangeInclusive;

use crate::ui::Ui;

/// A [`Ui`] that records what was drawn and clicks buttons by label.
#[derive(Default)]
pub struct ScriptedUi {
    pub click: Option<String>,
    /// Value every slider component is dragged to.
    pub drag_to: Option<f32>,
    /// Color every color picker is set to.
    pub pick_color: Option<[f32; 4]>,
    pub buttons_shown: Vec<String>,
    pub sliders_shown: Vec<String>,
    pub texts: Vec<String>,
}

impl ScriptedUi {
    pub fn clicking(label: &str) -> Self {
        Self {
            click: Some(label.to_string()),
            ..Self::default()
        }
    }

    pub fn dragging_to(value: f32) -> Self {
        Self {
            drag_to: Some(value),
            ..Self::default()
        }
    }

    pub fn picking(rgba: [f32; 4]) -> Self {
        Self {
            pick_color: Some(rgba),
            ..Self::default()
        }
    }
}

impl Ui for ScriptedUi {
    fn button(&mut self, label: &str) -> bool {
        self.buttons_shown.push(label.to_string());
        self.click.as_deref() == Some(label)
    }

    fn slider_f32(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        self.sliders_shown.push(label.to_string());
        match self.drag_to {
            Some(v) => {
                *value = v.clamp(*range.start(), *range.end());
                true
            }
            None => false,
        }
    }

    fn slider_f32x3(
        &mut self,
        label: &str,
        value: &mut [f32; 3],
        range: RangeInclusive<f32>,
    ) -> bool {
        self.sliders_shown.push(label.to_string());
        match self.drag_to {
            Some(v) => {
                *value = [v.clamp(*range.start(), *range.end()); 3];
                true
            }
            None => false,
        }
    }

    fn color_edit4(&mut self, label: &str, rgba: &mut [f32; 4]) -> bool {
        self.sliders_shown.push(label.to_string());
        match self.pick_color {
            Some(picked) => {
                *rgba = picked.map(|c| c.clamp(0.0, 1.0));
                true
            }
            None => false,
        }
    }

    fn text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }
}

use std::ops::RangeInclusive;

/// Immediate-mode widgets a demo can put in its panel.
///
/// Implemented by the studio's overlay; widgets return `true` when the user
/// interacted with them this frame.
pub trait Ui {
    fn button(&mut self, label: &str) -> bool;

    fn slider_f32(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool;

    /// Three sliders sharing one label and range.
    fn slider_f32x3(
        &mut self,
        label: &str,
        value: &mut [f32; 3],
        range: RangeInclusive<f32>,
    ) -> bool;

    /// Straight-alpha RGBA color picker.
    fn color_edit4(&mut self, label: &str, rgba: &mut [f32; 4]) -> bool;

    fn text(&mut self, text: &str);
}

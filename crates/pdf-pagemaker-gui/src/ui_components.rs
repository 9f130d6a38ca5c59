use eframe::egui;

/// Builder for creating sliders with automatic change tracking
pub struct SliderBuilder<'a, T> {
    value: &'a mut T,
    range: std::ops::RangeInclusive<T>,
    text: String,
    suffix: Option<String>,
}

impl<'a, T> SliderBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T, range: std::ops::RangeInclusive<T>) -> Self {
        Self {
            value,
            range,
            text: String::new(),
            suffix: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut slider = egui::Slider::new(self.value, self.range);

        if !self.text.is_empty() {
            slider = slider.text(self.text);
        }

        if let Some(suffix) = self.suffix {
            slider = slider.suffix(suffix);
        }

        ui.add(slider).changed()
    }
}

/// Enum selector using ComboBox
pub fn enum_selector<T>(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    value: &mut T,
    options: &[(T, &str)],
) -> bool
where
    T: PartialEq + Clone,
{
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);

        let current_text = options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, text)| *text)
            .unwrap_or("Unknown");

        egui::ComboBox::from_id_salt(id)
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                for (option_value, option_text) in options {
                    if ui
                        .selectable_value(value, option_value.clone(), *option_text)
                        .changed()
                    {
                        changed = true;
                    }
                }
            });
    });
    changed
}

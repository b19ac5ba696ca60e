use eframe::egui;

use super::data::SettingsData;

pub struct SettingsModal {
    open: bool,
    original: SettingsData,
    draft: SettingsData,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, original: SettingsData::default(), draft: SettingsData::default() }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.original = current_settings.clone();
        self.draft = current_settings;
        self.open = true;
    }

    fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Returns the new settings when the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut result: Option<SettingsData> = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Backend Settings");
            ui.add_space(10.0);

            egui::Grid::new("settings_grid").num_columns(2).spacing([10.0, 6.0]).show(ui, |ui| {
                ui.label("Backend URL:");
                ui.text_edit_singleline(&mut self.draft.backend_url);
                ui.end_row();

                ui.label("Request timeout:");
                ui.add(
                    egui::DragValue::new(&mut self.draft.request_timeout_secs)
                        .range(1..=300)
                        .suffix(" s"),
                );
                ui.end_row();
            });

            let url_valid = SettingsData::is_valid_backend_url(&self.draft.backend_url);
            if !url_valid {
                ui.colored_label(egui::Color32::RED, "⚠ URL must start with http:// or https://");
            }

            ui.add_space(5.0);
            ui.separator();

            ui.horizontal(|ui| {
                let save_clicked = ui
                    .add_enabled(url_valid && self.is_dirty(), egui::Button::new("Save Settings"))
                    .clicked();
                let cancel_clicked = ui.button("Cancel").clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Restore Default").clicked();
                });

                if save_clicked {
                    self.draft.backend_url = self.draft.backend_url.trim().to_string();
                    result = Some(self.draft.clone());
                    ui.close();
                } else if cancel_clicked {
                    self.draft = self.original.clone();
                    ui.close();
                } else if reset_clicked {
                    self.draft = SettingsData {
                        dark_mode: self.original.dark_mode,
                        ..SettingsData::default()
                    };
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}

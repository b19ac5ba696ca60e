use eframe::egui::{
    self,
    containers,
};

pub enum TopBarAction {
    OpenSettings,
    ReloadProgress,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        backend_url: &str,
        status: Option<&str>,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.button("Settings…").clicked() {
                        action = Some(TopBarAction::OpenSettings);
                    }
                    if ui.button("Reload Reading Progress").clicked() {
                        action = Some(TopBarAction::ReloadProgress);
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(backend_url);
                    if let Some(status) = status {
                        ui.separator();
                        ui.label(status);
                    }
                });
            });
        });

        action
    }
}

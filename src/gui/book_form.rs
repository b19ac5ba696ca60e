use eframe::egui;
use rfd::FileDialog;

use crate::{
    core::{
        capture::ReadTicket,
        image::IMAGE_EXTENSIONS,
        BookForm,
        Category,
        DraftField,
        SubmitOutcome,
    },
    gui::theme::Theme,
};

const GRID_HORIZONTAL_SPACING: f32 = 10.0;
const GRID_VERTICAL_SPACING: f32 = 6.0;
const PREVIEW_SIZE: egui::Vec2 = egui::Vec2::new(160.0, 220.0);

pub enum FormEvent {
    /// The user picked an image; the caller runs the read.
    ReadImage(ReadTicket),
    Submitted,
}

pub struct BookFormWidget;

impl BookFormWidget {
    pub fn show(ui: &mut egui::Ui, form: &mut BookForm, theme: &Theme) -> Option<FormEvent> {
        let mut event = None;

        ui.label(theme.heading(ui.ctx(), "Add a Book"));
        ui.add_space(6.0);

        egui::Grid::new("book_form_grid")
            .num_columns(2)
            .spacing([GRID_HORIZONTAL_SPACING, GRID_VERTICAL_SPACING])
            .show(ui, |ui| {
                required_label(ui, theme, DraftField::Title);
                text_field(ui, form, DraftField::Title, false);
                ui.end_row();

                required_label(ui, theme, DraftField::Author);
                text_field(ui, form, DraftField::Author, false);
                ui.end_row();

                required_label(ui, theme, DraftField::Synopsis);
                text_field(ui, form, DraftField::Synopsis, true);
                ui.end_row();

                ui.label("Category:");
                ui.horizontal(|ui| {
                    let mut category = form.draft().category;
                    for option in Category::ALL {
                        ui.radio_value(&mut category, option, option.label());
                    }
                    if category != form.draft().category {
                        form.set_category(category);
                    }
                });
                ui.end_row();

                ui.label("Cover image:");
                if let Some(ticket) = image_picker(ui, form, theme) {
                    event = Some(FormEvent::ReadImage(ticket));
                }
                ui.end_row();
            });

        ui.add_space(10.0);

        let missing = form.missing_fields();
        ui.horizontal(|ui| {
            let submit = ui.add_enabled(missing.is_empty(), egui::Button::new("Add Book"));
            if submit.clicked() && form.submit() == SubmitOutcome::Submitted {
                event = Some(FormEvent::Submitted);
            }

            if !missing.is_empty() {
                let names: Vec<_> = missing.iter().map(|field| field.label()).collect();
                ui.label(theme.muted(ui.ctx(), &format!("Required: {}", names.join(", "))));
            }
        });

        for uri in form.take_released_previews() {
            ui.ctx().forget_image(&uri);
        }

        event
    }
}

fn required_label(ui: &mut egui::Ui, theme: &Theme, field: DraftField) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        ui.label(format!("{}:", field.label()));
        ui.colored_label(theme.required(ui.ctx()), "*");
    });
}

fn text_field(ui: &mut egui::Ui, form: &mut BookForm, field: DraftField, multiline: bool) {
    let mut value = form.draft().field(field).to_string();

    let editor = if multiline {
        egui::TextEdit::multiline(&mut value).desired_rows(4)
    } else {
        egui::TextEdit::singleline(&mut value)
    };

    if ui.add(editor.desired_width(320.0)).changed() {
        form.edit(field, value);
    }
}

fn image_picker(ui: &mut egui::Ui, form: &mut BookForm, theme: &Theme) -> Option<ReadTicket> {
    let mut ticket = None;

    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            if ui.button("Choose Image…").clicked() {
                let picked = FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS).pick_file();
                ticket = form.select_image(picked);
            }

            let has_image = form.image_preview().is_some() || form.image_pending();
            if has_image && ui.button("Remove Image").clicked() {
                form.clear_image();
            }
        });

        if form.image_pending() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label(theme.muted(ui.ctx(), "Reading image…"));
            });
        } else if let Some(preview) = form.image_preview() {
            ui.add(
                egui::Image::from_bytes(
                    preview.uri.clone(),
                    egui::load::Bytes::Shared(preview.bytes.clone()),
                )
                .max_size(PREVIEW_SIZE)
                .corner_radius(4.0),
            );
        }
    });

    ticket
}

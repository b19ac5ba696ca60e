use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use crate::{
    core::{
        CreatedBook,
        ReadingProgressEntry,
    },
    gui::theme::Theme,
};

const TABLE_HEADER_HEIGHT: f32 = 22.0;
const TABLE_ROW_HEIGHT: f32 = 24.0;
const TITLE_COLUMN_WIDTH: f32 = 200.0;
const AUTHOR_COLUMN_WIDTH: f32 = 140.0;
const PROGRESS_COLUMN_WIDTH: f32 = 160.0;

/// Where the shelf's rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfSource {
    Seed,
    Backend,
}

pub struct ShelfWidget;

impl ShelfWidget {
    pub fn show(
        ui: &mut egui::Ui,
        entries: &[ReadingProgressEntry],
        source: ShelfSource,
        theme: &Theme,
    ) {
        ui.horizontal(|ui| {
            ui.label(theme.heading(ui.ctx(), "Reading Progress"));
            if source == ShelfSource::Seed {
                ui.label(theme.muted(ui.ctx(), "(offline sample data)"));
            }
        });
        ui.add_space(4.0);

        if entries.is_empty() {
            ui.label(theme.muted(ui.ctx(), "Nothing on the shelf yet."));
            return;
        }

        TableBuilder::new(ui)
            .id_salt("reading_progress_table")
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(TITLE_COLUMN_WIDTH).resizable(true))
            .column(Column::initial(AUTHOR_COLUMN_WIDTH).resizable(true))
            .column(Column::initial(PROGRESS_COLUMN_WIDTH))
            .column(Column::remainder())
            .header(TABLE_HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("Title");
                });
                header.col(|ui| {
                    ui.strong("Author");
                });
                header.col(|ui| {
                    ui.strong("Progress");
                });
                header.col(|ui| {
                    ui.strong("Last read");
                });
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, entries.len(), |mut row| {
                    let entry = &entries[row.index()];
                    row.col(|ui| {
                        ui.label(&entry.title).on_hover_text(&entry.cover);
                    });
                    row.col(|ui| {
                        ui.label(&entry.author);
                    });
                    row.col(|ui| {
                        let color = theme.progress(ui.ctx(), entry.is_finished());
                        ui.add(
                            egui::ProgressBar::new(entry.progress())
                                .desired_width(PROGRESS_COLUMN_WIDTH - 8.0)
                                .fill(color)
                                .text(format!("{}/{}", entry.current_page, entry.total_pages)),
                        );
                    });
                    row.col(|ui| {
                        ui.label(entry.format_last_read());
                    });
                });
            });
    }
}

pub struct RecentlyAddedWidget;

impl RecentlyAddedWidget {
    pub fn show(ui: &mut egui::Ui, books: &[CreatedBook], theme: &Theme) {
        ui.label(theme.heading(ui.ctx(), "Recently Added"));
        ui.add_space(4.0);

        if books.is_empty() {
            ui.label(theme.muted(ui.ctx(), "Books you add will show up here."));
            return;
        }

        for book in books.iter().rev() {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&book.title).strong());
                ui.label(format!("by {}", book.author));
                ui.label(theme.muted(ui.ctx(), book.category.label()));
                if book.image_url.is_some() {
                    ui.label(theme.muted(ui.ctx(), "🖼"));
                }
            });
        }
    }
}

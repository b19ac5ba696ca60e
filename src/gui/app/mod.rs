mod modals;

use std::{
    sync::mpsc,
    time::Duration,
};

use eframe::egui;
use modals::Modals;
use tracing::{
    info,
    warn,
};

use super::{
    book_form::{
        BookFormWidget,
        FormEvent,
    },
    settings::{
        data::{
            BACKEND_URL_ENV,
            SETTINGS_FILE,
        },
        SettingsData,
    },
    shelf::{
        RecentlyAddedWidget,
        ShelfSource,
        ShelfWidget,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
};
use crate::{
    core::{
        capture::ReadOutcome,
        seed::seed_progress,
        tasks::{
            TaskManager,
            TaskResult,
        },
        BookDraft,
        BookForm,
        CreatedBook,
        LibrisError,
        ReadingProgressEntry,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
};

const FORM_PANEL_WIDTH: f32 = 460.0;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct LibrisApp {
    // Configuration
    pub settings_data: SettingsData,

    // UI State
    pub theme: Theme,
    status: Option<String>,
    modals: Modals,

    // Library data
    shelf: Vec<ReadingProgressEntry>,
    shelf_source: ShelfSource,
    recently_added: Vec<CreatedBook>,

    // Book creation
    form: BookForm,
    outbox: mpsc::Receiver<BookDraft>,
    pending_submissions: usize,
    loading_progress: bool,

    task_manager: TaskManager,
}

impl LibrisApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, LibrisError> {
        let task_manager = TaskManager::new()?;

        let settings_data = load_json_or_default::<SettingsData>(SETTINGS_FILE)
            .with_backend_override(std::env::var(BACKEND_URL_ENV).ok());
        info!("Using backend at {}", settings_data.backend_url);

        // The form only knows it hands drafts to a callback; the app drains
        // them every frame and does the saving.
        let (sender, outbox) = mpsc::channel();
        let form = BookForm::new(move |draft| {
            if sender.send(draft).is_err() {
                warn!("Dropped a submitted book: the app is shutting down");
            }
        });

        let mut app = Self {
            settings_data,

            theme: Theme::library(),
            status: None,
            modals: Modals::default(),

            shelf: seed_progress().to_vec(),
            shelf_source: ShelfSource::Seed,
            recently_added: Vec::new(),

            form,
            outbox,
            pending_submissions: 0,
            loading_progress: false,

            task_manager,
        };

        egui_extras::install_image_loaders(&cc.egui_ctx);
        app.setup_theme(cc);
        app.reload_progress();

        Ok(app)
    }

    fn setup_theme(&self, cc: &eframe::CreationContext<'_>) {
        set_theme(&cc.egui_ctx, &self.theme);

        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = if self.settings_data.dark_mode {
                egui::ThemePreference::Dark
            } else {
                egui::ThemePreference::Light
            };
        });
    }

    fn reload_progress(&mut self) {
        self.loading_progress = true;
        self.task_manager.load_progress(
            self.settings_data.backend_url.clone(),
            self.settings_data.request_timeout(),
        );
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            warn!("Failed to save settings: {}", e);
        }
    }

    fn is_busy(&self) -> bool {
        self.form.image_pending() || self.pending_submissions > 0 || self.loading_progress
    }

    fn status_text(&self) -> Option<String> {
        if self.pending_submissions > 0 {
            return Some(match self.pending_submissions {
                1 => "Saving 1 book…".to_string(),
                n => format!("Saving {} books…", n),
            });
        }
        if self.loading_progress {
            return Some("Loading reading progress…".to_string());
        }
        self.status.clone()
    }

    fn dispatch_submissions(&mut self) {
        while let Ok(draft) = self.outbox.try_recv() {
            self.pending_submissions += 1;
            self.status = None;
            self.task_manager.create_book(
                self.settings_data.backend_url.clone(),
                self.settings_data.request_timeout(),
                draft,
            );
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::ImageRead { generation, result } => {
                if let ReadOutcome::Applied(image) = self.form.finish_image_read(generation, result)
                {
                    info!("Image ready ({}, {} bytes encoded)", image.mime(), image.len());
                }
            }

            TaskResult::BookCreated(result) => {
                self.pending_submissions = self.pending_submissions.saturating_sub(1);
                match result {
                    Ok(book) => {
                        self.status = Some(format!("Added \"{}\"", book.title));
                        self.recently_added.push(book);
                    }
                    Err(e) => {
                        warn!("Book creation failed: {}", e);
                        self.modals.error.show_error(
                            "Could Not Save Book",
                            format!(
                                "The backend at {} did not accept the book.",
                                self.settings_data.backend_url
                            ),
                            Some(e),
                        );
                    }
                }
            }

            TaskResult::ProgressLoaded(result) => {
                self.loading_progress = false;
                match result {
                    Ok(entries) => {
                        info!("Loaded {} reading progress entries", entries.len());
                        self.shelf = entries;
                        self.shelf_source = ShelfSource::Backend;
                    }
                    Err(e) => {
                        warn!(
                            "Keeping {:?} shelf data, live load failed: {}",
                            self.shelf_source, e
                        );
                    }
                }
            }
        }
    }

    fn sync_theme_preference(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.theme() == egui::Theme::Dark;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }
    }
}

impl eframe::App for LibrisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        let status = self.status_text();
        if let Some(action) =
            TopBar::show(ctx, &self.settings_data.backend_url, status.as_deref())
        {
            match action {
                TopBarAction::OpenSettings => {
                    self.modals.settings.open_settings(self.settings_data.clone());
                }
                TopBarAction::ReloadProgress => self.reload_progress(),
            }
        }
        self.sync_theme_preference(ctx);

        egui::SidePanel::left("book_form_panel")
            .resizable(false)
            .exact_width(FORM_PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match BookFormWidget::show(ui, &mut self.form, &self.theme) {
                        Some(FormEvent::ReadImage(ticket)) => self.task_manager.read_image(ticket),
                        Some(FormEvent::Submitted) | None => {}
                    }
                });
            });

        self.dispatch_submissions();

        egui::CentralPanel::default().show(ctx, |ui| {
            ShelfWidget::show(ui, &self.shelf, self.shelf_source, &self.theme);
            ui.add_space(12.0);
            ui.separator();
            RecentlyAddedWidget::show(ui, &self.recently_added, &self.theme);
        });

        self.modals.error.show(ctx);

        if let Some(settings) = self.modals.settings.show(ctx) {
            let backend_changed = settings.backend_url != self.settings_data.backend_url;
            self.settings_data = settings;
            self.save_settings();
            if backend_changed {
                self.reload_progress();
            }
        }

        if self.is_busy() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}

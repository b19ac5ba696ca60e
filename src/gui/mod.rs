pub mod app;
pub mod book_form;
pub mod error_modal;
pub mod settings;
pub mod shelf;
pub mod theme;
pub mod top_bar;

pub use app::LibrisApp;

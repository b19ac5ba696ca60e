pub mod capture;
pub mod errors;
pub mod form;
pub mod http;
pub mod image;
pub mod models;
pub mod seed;
pub mod tasks;

pub use errors::LibrisError;
pub use form::{ BookForm, SubmitOutcome };
pub use models::{ BookDraft, Category, CreatedBook, DraftField, ReadingProgressEntry };

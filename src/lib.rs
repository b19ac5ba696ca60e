pub mod core;
pub mod gui;
pub mod persistence;

pub use crate::core::{
    BookDraft,
    BookForm,
    Category,
    LibrisError,
    ReadingProgressEntry,
};

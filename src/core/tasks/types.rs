use crate::core::{
    image::EncodedImage,
    CreatedBook,
    ReadingProgressEntry,
};

#[derive(Debug, Clone)]
pub enum TaskResult {
    ImageRead { generation: u64, result: Result<EncodedImage, String> },
    BookCreated(Result<CreatedBook, String>),
    ProgressLoaded(Result<Vec<ReadingProgressEntry>, String>),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::ImageRead { .. } => "image_read",
            TaskResult::BookCreated(_) => "book_created",
            TaskResult::ProgressLoaded(_) => "progress_loaded",
        }
    }
}

use std::path::PathBuf;

use tracing::info;

use crate::core::{
    capture::{
        ImageCapture,
        ImagePreview,
        ReadOutcome,
        ReadTicket,
    },
    image::EncodedImage,
    BookDraft,
    Category,
    DraftField,
};

pub type SubmitCallback = Box<dyn FnMut(BookDraft)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Rejected { missing: Vec<DraftField> },
}

/// State behind the "add book" form.
///
/// Owns the draft being edited and hands a copy of it to `on_submit` once all
/// required fields are filled in. The callback is responsible for persisting
/// the book; the form neither waits for nor inspects the outcome.
pub struct BookForm {
    draft: BookDraft,
    capture: ImageCapture,
    on_submit: SubmitCallback,
}

impl BookForm {
    pub fn new(on_submit: impl FnMut(BookDraft) + 'static) -> Self {
        Self {
            draft: BookDraft::default(),
            capture: ImageCapture::new(),
            on_submit: Box::new(on_submit),
        }
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft = self.draft.with_field(field, value);
    }

    pub fn set_category(&mut self, category: Category) {
        self.draft = self.draft.with_category(category);
    }

    pub fn missing_fields(&self) -> Vec<DraftField> {
        self.draft.missing_fields()
    }

    pub fn can_submit(&self) -> bool {
        self.draft.is_complete()
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return SubmitOutcome::Rejected { missing };
        }

        info!("Submitting book \"{}\" by {}", self.draft.title, self.draft.author);
        (self.on_submit)(self.draft.clone());

        self.draft = BookDraft::default();
        self.capture.clear();
        SubmitOutcome::Submitted
    }

    pub fn select_image<I>(&mut self, paths: I) -> Option<ReadTicket>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.capture.select(paths)
    }

    pub fn finish_image_read<E: std::fmt::Display>(
        &mut self,
        generation: u64,
        result: Result<EncodedImage, E>,
    ) -> ReadOutcome {
        let outcome = self.capture.finish(generation, result);
        if let ReadOutcome::Applied(image) = &outcome {
            self.draft = self.draft.with_image(Some(image.clone()));
        }
        outcome
    }

    pub fn clear_image(&mut self) {
        self.capture.clear();
        self.draft = self.draft.with_image(None);
    }

    pub fn image_preview(&self) -> Option<&ImagePreview> {
        self.capture.preview()
    }

    pub fn image_pending(&self) -> bool {
        self.capture.is_pending()
    }

    /// Preview URIs the UI should evict; see [`ImageCapture::take_released`].
    pub fn take_released_previews(&mut self) -> Vec<String> {
        self.capture.take_released()
    }
}

impl std::fmt::Debug for BookForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookForm")
            .field("draft", &self.draft)
            .field("capture", &self.capture)
            .field("on_submit", &"Box<dyn FnMut(BookDraft)>")
            .finish()
    }
}

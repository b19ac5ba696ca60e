use chrono::NaiveDate;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

use crate::core::{
    image::{
        empty_as_none,
        EncodedImage,
    },
    LibrisError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Fiction,
    NonFiction,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Fiction, Category::NonFiction];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-Fiction",
        }
    }
}

/// The text fields of a draft. Category and image have dedicated setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Author,
    Synopsis,
}

impl DraftField {
    /// Required fields, in the order the form shows them.
    pub const REQUIRED: [DraftField; 3] =
        [DraftField::Title, DraftField::Author, DraftField::Synopsis];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Author => "Author",
            DraftField::Synopsis => "Synopsis",
        }
    }
}

/// A book being authored in the form.
///
/// Edits never mutate a draft in place: every `with_*` method returns a new
/// value with exactly one field replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub synopsis: String,
    pub category: Category,
    #[serde(with = "empty_as_none", default)]
    pub image_url: Option<EncodedImage>,
}

impl BookDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Author => &self.author,
            DraftField::Synopsis => &self.synopsis,
        }
    }

    pub fn with_field(&self, field: DraftField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            DraftField::Title => Self { title: value, ..self.clone() },
            DraftField::Author => Self { author: value, ..self.clone() },
            DraftField::Synopsis => Self { synopsis: value, ..self.clone() },
        }
    }

    pub fn with_category(&self, category: Category) -> Self {
        Self { category, ..self.clone() }
    }

    pub fn with_image(&self, image_url: Option<EncodedImage>) -> Self {
        Self { image_url, ..self.clone() }
    }

    /// Required fields that are empty or whitespace only.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::REQUIRED
            .into_iter()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// What the backend hands back for a created book.
///
/// Read leniently: the book already exists once this arrives, so the id may be
/// a string or a number and `imageUrl` is whatever reference the backend stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub image_url: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgressEntry {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover: String, // path reference, never embedded data
    pub current_page: u32,
    pub total_pages: u32,
    pub last_read: NaiveDate,
}

impl ReadingProgressEntry {
    pub fn validate(&self) -> Result<(), LibrisError> {
        if self.current_page > self.total_pages {
            return Err(LibrisError::InvalidProgress {
                id: self.id.clone(),
                current_page: self.current_page,
                total_pages: self.total_pages,
            });
        }
        Ok(())
    }

    pub fn progress(&self) -> f32 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.current_page as f32 / self.total_pages as f32).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.total_pages > 0 && self.current_page >= self.total_pages
    }

    /// Copy of this entry at another page, clamped to the book length.
    pub fn with_current_page(&self, page: u32) -> Self {
        Self { current_page: page.min(self.total_pages), ..self.clone() }
    }

    pub fn format_last_read(&self) -> String {
        self.last_read.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(current_page: u32, total_pages: u32) -> ReadingProgressEntry {
        ReadingProgressEntry {
            id: "7".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            cover: "/covers/dune.jpg".to_string(),
            current_page,
            total_pages,
            last_read: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        }
    }

    #[test]
    fn default_draft_is_empty_fiction() {
        let draft = BookDraft::default();
        assert_eq!(draft.title, "");
        assert_eq!(draft.author, "");
        assert_eq!(draft.synopsis, "");
        assert_eq!(draft.category, Category::Fiction);
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn edits_keep_last_value_per_field() {
        let edits = [
            (DraftField::Title, "T"),
            (DraftField::Author, "Ann"),
            (DraftField::Title, "Tw"),
            (DraftField::Synopsis, "short"),
            (DraftField::Title, "Two"),
            (DraftField::Author, "Anne"),
        ];

        let draft = edits
            .iter()
            .fold(BookDraft::default(), |draft, (field, value)| draft.with_field(*field, *value));

        assert_eq!(
            draft,
            BookDraft {
                title: "Two".to_string(),
                author: "Anne".to_string(),
                synopsis: "short".to_string(),
                category: Category::Fiction,
                image_url: None,
            }
        );
    }

    #[test]
    fn with_field_leaves_original_untouched() {
        let original = BookDraft::default().with_category(Category::NonFiction);
        let edited = original.with_field(DraftField::Author, "Someone");

        assert_eq!(original.author, "");
        assert_eq!(edited.author, "Someone");
        assert_eq!(edited.category, Category::NonFiction);
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        let draft = BookDraft::default().with_field(DraftField::Author, "A");
        assert_eq!(draft.missing_fields(), vec![DraftField::Title, DraftField::Synopsis]);

        let draft = draft
            .with_field(DraftField::Title, "   ")
            .with_field(DraftField::Synopsis, "S");
        assert_eq!(draft.missing_fields(), vec![DraftField::Title]);
        assert!(!draft.is_complete());
    }

    #[test]
    fn draft_serializes_with_camel_case_and_empty_image() {
        let draft = BookDraft {
            title: "Test".to_string(),
            author: "A".to_string(),
            synopsis: "S".to_string(),
            category: Category::NonFiction,
            image_url: None,
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Test",
                "author": "A",
                "synopsis": "S",
                "category": "NonFiction",
                "imageUrl": "",
            })
        );
    }

    #[test]
    fn created_book_tolerates_missing_optional_fields() {
        let book: CreatedBook =
            serde_json::from_str(r#"{"id":"42","title":"Dune","author":"Frank Herbert"}"#)
                .unwrap();
        assert_eq!(book.category, Category::Fiction);
        assert_eq!(book.image_url, None);
        assert_eq!(book.synopsis, "");
    }

    #[test]
    fn created_book_accepts_numeric_id() {
        let book: CreatedBook =
            serde_json::from_str(r#"{"id":42,"title":"Dune","author":"F"}"#).unwrap();
        assert_eq!(book.id, "42");
        assert_eq!(book.title, "Dune");
    }

    #[test]
    fn created_book_keeps_stored_image_reference() {
        let book: CreatedBook = serde_json::from_str(
            r#"{"id":"1","title":"Dune","author":"F","category":"NonFiction",
                "imageUrl":"/uploads/dune.png"}"#,
        )
        .unwrap();
        assert_eq!(book.image_url.as_deref(), Some("/uploads/dune.png"));
        assert_eq!(book.category, Category::NonFiction);

        for blank in ["\"\"", "null"] {
            let body = format!(r#"{{"id":"1","title":"T","author":"A","imageUrl":{}}}"#, blank);
            let book: CreatedBook = serde_json::from_str(&body).unwrap();
            assert_eq!(book.image_url, None);
        }
    }

    #[test]
    fn progress_entry_validation() {
        assert!(entry(0, 0).validate().is_ok());
        assert!(entry(100, 100).validate().is_ok());
        assert!(matches!(
            entry(101, 100).validate(),
            Err(LibrisError::InvalidProgress { current_page: 101, total_pages: 100, .. })
        ));
    }

    #[test]
    fn progress_fraction_and_completion() {
        assert_eq!(entry(0, 0).progress(), 0.0);
        assert_eq!(entry(50, 200).progress(), 0.25);
        assert!(entry(100, 100).is_finished());
        assert!(!entry(99, 100).is_finished());
        assert!(!entry(0, 0).is_finished());
    }

    #[test]
    fn with_current_page_copies_and_clamps() {
        let original = entry(10, 100);
        let updated = original.with_current_page(250);

        assert_eq!(original.current_page, 10);
        assert_eq!(updated.current_page, 100);
        assert!(updated.validate().is_ok());
    }

    #[test]
    fn progress_entry_uses_camel_case_dates() {
        let json = serde_json::to_value(entry(41, 100)).unwrap();
        assert_eq!(json["currentPage"], 41);
        assert_eq!(json["totalPages"], 100);
        assert_eq!(json["lastRead"], "2024-02-01");
    }
}

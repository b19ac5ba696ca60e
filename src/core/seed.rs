use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::core::ReadingProgressEntry;

#[rustfmt::skip]
static SEED_PROGRESS: LazyLock<Vec<ReadingProgressEntry>> = LazyLock::new(|| {
    vec![
        entry("1", "The Midnight Library", "Matt Haig", "/covers/midnight-library.jpg", 100, 100, (2024, 3, 15)),
        entry("2", "Atomic Habits", "James Clear", "/covers/atomic-habits.jpg", 41, 100, (2024, 3, 18)),
        entry("3", "Project Hail Mary", "Andy Weir", "/covers/project-hail-mary.jpg", 0, 320, (2024, 2, 27)),
    ]
});

/// Reading progress shown before any live data has been loaded.
///
/// The entries are shared for the whole process. Clone an entry to change it.
pub fn seed_progress() -> &'static [ReadingProgressEntry] {
    &SEED_PROGRESS
}

fn entry(
    id: &str,
    title: &str,
    author: &str,
    cover: &str,
    current_page: u32,
    total_pages: u32,
    (year, month, day): (i32, u32, u32),
) -> ReadingProgressEntry {
    ReadingProgressEntry {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        cover: cover.to_string(),
        current_page,
        total_pages,
        last_read: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}

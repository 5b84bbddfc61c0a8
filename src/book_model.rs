//! Data model definitions for the book library.
//!
//! This module defines the records stored by the library database. The
//! primary model is [`Book`], one catalogued book together with its reading
//! metadata. [`BookDraft`] and [`BookPatch`] are the write-side inputs for
//! creating and updating records, and [`LibraryStats`] is the derived
//! aggregate view computed over the collection (never stored).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reading status of a catalogued book.
///
/// Serialized in SCREAMING_SNAKE_CASE (`"WANT_TO_READ"`, `"READING"`, ...)
/// to match the persisted JSON format.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingStatus {
    /// Default status for newly catalogued books.
    #[default]
    WantToRead,
    Reading,
    Completed,
    Paused,
    Abandoned,
}

/// Genre of a catalogued book.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    BrazilianLiterature,
    ScienceFiction,
    MagicalRealism,
    Fiction,
    Fantasy,
    Romance,
    Biography,
    History,
    SelfHelp,
    Technology,
    Programming,
    Business,
    Psychology,
    Philosophy,
    Poetry,
}

/// One catalogued book and its reading metadata.
///
/// `Book` is the sole persisted entity. The collection is serialized as a
/// JSON array of these records, with field names in camelCase and the two
/// date fields as ISO-8601 strings.
///
/// # Field constraints
///
/// - **id**: unique within the collection, generated at creation (UUID v4),
///   immutable afterwards.
/// - **title / author**: required. Non-empty enforcement is the form layer's
///   job, the store persists what it is given.
/// - **current_page**: not clamped to `pages`. Consumers derive a progress
///   percentage opportunistically when both are present.
/// - **rating**: 1 to 5 stars. The range is not checked at the store level.
/// - **created_at / updated_at**: system-managed. `created_at` is set once,
///   `updated_at` is stamped on every create or update.
///
/// Absent optional fields are omitted from the serialized record, so
/// `currentPage: 0` and "no page data" remain distinct across round-trips.
///
/// # Examples
///
/// ```rust
/// use bookshelf_core::book_model::{BookDraft, ReadingStatus};
///
/// let draft = BookDraft {
///     title: "Dom Casmurro".to_string(),
///     author: "Machado de Assis".to_string(),
///     pages: Some(256),
///     ..BookDraft::default()
/// };
/// assert_eq!(draft.status, ReadingStatus::WantToRead);
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, the collection key.
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Total page count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Last page reached, for books in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    /// 1 to 5 stars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub status: ReadingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Merges the present fields of `patch` over this record.
    ///
    /// Absent patch fields leave the record untouched. The caller is
    /// responsible for stamping `updated_at`.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(genre) = patch.genre {
            self.genre = Some(genre);
        }
        if let Some(year) = patch.year {
            self.year = Some(year);
        }
        if let Some(pages) = patch.pages {
            self.pages = Some(pages);
        }
        if let Some(current_page) = patch.current_page {
            self.current_page = Some(current_page);
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }
        if let Some(synopsis) = patch.synopsis {
            self.synopsis = Some(synopsis);
        }
        if let Some(cover) = patch.cover {
            self.cover = Some(cover);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(isbn) = patch.isbn {
            self.isbn = Some(isbn);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
    }
}

/// Input for creating a new [`Book`]: every field except the three
/// system-managed ones (`id`, `created_at`, `updated_at`).
///
/// `status` falls back to [`ReadingStatus::WantToRead`] when absent.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub status: ReadingStatus,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for an existing [`Book`]. Absent fields are untouched.
///
/// The edit form typically sends the full field set, but any subset is
/// accepted, so a consumer can bump `currentPage` alone while reading.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<Genre>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub status: Option<ReadingStatus>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Aggregate view over the collection, recomputed on demand and never
/// persisted.
///
/// `total_pages_read` counts the full `pages` of COMPLETED books and the
/// `currentPage` of every other book that has one. `average_rating` is the
/// mean over rated books, `0.0` when none are rated.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total_books: usize,
    pub currently_reading: usize,
    pub completed: usize,
    pub total_pages_read: u64,
    pub average_rating: f64,
}

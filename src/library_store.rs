//! The library store: single source of truth for the book collection.
//!
//! The collection lives in memory for the whole session and is written back
//! to a single named slot in the embedded database after every mutation.
//! Consumers receive the store by reference and never touch the slot
//! directly.

use chrono::Utc;
use log::{info, warn};
use redb::{Database, Error as RedbError, TableDefinition, TableError};
use uuid::Uuid;

use crate::app_response::AppResponse;
use crate::book_model::{Book, BookDraft, BookPatch, LibraryStats, ReadingStatus};
use crate::seed_data;

const LIBRARY_TABLE: TableDefinition<&str, &str> = TableDefinition::new("bookshelf");

/// Fixed key of the persistence slot holding the serialized collection.
const STORAGE_KEY: &str = "bookshelf-books";

/// State container for one book library.
///
/// Created with [`LibraryStore::init`], which loads the persisted collection
/// (or installs the seed collection) before any consumer can read. All
/// mutations go through [`create`](Self::create), [`update`](Self::update)
/// and [`delete_by_id`](Self::delete_by_id); each one re-persists the whole
/// collection.
pub struct LibraryStore {
    db: Database,
    books: Vec<Book>,
    ready: bool,
}

impl LibraryStore {
    /// Opens (or creates) the library database `<name>.redb` and loads the
    /// collection from the persistence slot.
    ///
    /// A missing slot installs the built-in seed collection and persists it.
    /// A malformed payload is recovered silently: the fault is logged, the
    /// seed collection takes its place, and no error reaches the caller.
    pub fn init(name: &str) -> Result<Self, AppResponse> {
        let db = Database::create(format!("{name}.redb"))?;

        let mut store = Self {
            db,
            books: Vec::new(),
            ready: false,
        };

        match store.read_slot()? {
            Some(raw) => match serde_json::from_str::<Vec<Book>>(&raw) {
                Ok(books) => {
                    info!("Library '{name}' loaded with {} books", books.len());
                    store.books = books;
                    store.ready = true;
                }
                Err(e) => {
                    warn!("Stored library '{name}' is unreadable, falling back to seed data: {e}");
                    store.books = seed_data::initial_books();
                    store.ready = true;
                    store.persist()?;
                }
            },
            None => {
                info!("No stored library '{name}' found, installing seed collection");
                store.books = seed_data::initial_books();
                store.ready = true;
                store.persist()?;
            }
        }

        Ok(store)
    }

    /// Whether the initial load has finished. Always true for a store
    /// obtained from [`init`](Self::init).
    pub fn ready(&self) -> bool {
        self.ready
    }

    /// The full collection, newest first.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Creates a record from `draft`, prepends it to the collection and
    /// persists. Returns the created record with its generated id and
    /// matching `created_at` / `updated_at` stamps.
    pub fn create(&mut self, draft: BookDraft) -> Result<Book, AppResponse> {
        let now = Utc::now();

        let book = Book {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            author: draft.author,
            genre: draft.genre,
            year: draft.year,
            pages: draft.pages,
            current_page: draft.current_page,
            rating: draft.rating,
            synopsis: draft.synopsis,
            cover: draft.cover,
            status: draft.status,
            isbn: draft.isbn,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };

        self.books.insert(0, book.clone());
        self.persist()?;

        Ok(book)
    }

    /// Merges `patch` over the record matching `id`, stamps `updated_at` and
    /// persists. Returns `Ok(None)` without touching anything when no record
    /// matches.
    pub fn update(&mut self, id: &str, patch: BookPatch) -> Result<Option<Book>, AppResponse> {
        let index = match self.books.iter().position(|book| book.id == id) {
            Some(index) => index,
            None => return Ok(None),
        };

        let book = &mut self.books[index];
        book.apply(patch);
        book.updated_at = Utc::now();
        let updated = book.clone();

        self.persist()?;

        Ok(Some(updated))
    }

    /// Removes the record matching `id` and persists. Returns whether a
    /// record was removed; a second call with the same id is a no-op.
    pub fn delete_by_id(&mut self, id: &str) -> Result<bool, AppResponse> {
        let before = self.books.len();
        self.books.retain(|book| book.id != id);

        if self.books.len() == before {
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Pure in-memory lookup, no side effects.
    pub fn get_by_id(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Recomputes the aggregate view over the current collection.
    ///
    /// COMPLETED books contribute their full page count to
    /// `total_pages_read`; every other book contributes `current_page` when
    /// present. The average rating covers only rated books and is `0.0` when
    /// none are rated.
    pub fn statistics(&self) -> LibraryStats {
        let total_books = self.books.len();
        let currently_reading = self
            .books
            .iter()
            .filter(|book| book.status == ReadingStatus::Reading)
            .count();
        let completed = self
            .books
            .iter()
            .filter(|book| book.status == ReadingStatus::Completed)
            .count();

        let total_pages_read = self.books.iter().fold(0u64, |sum, book| {
            if book.status == ReadingStatus::Completed {
                if let Some(pages) = book.pages {
                    return sum + u64::from(pages);
                }
            }
            match book.current_page {
                Some(current) => sum + u64::from(current),
                None => sum,
            }
        });

        let ratings: Vec<u8> = self.books.iter().filter_map(|book| book.rating).collect();
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|rating| f64::from(*rating)).sum::<f64>() / ratings.len() as f64
        };

        LibraryStats {
            total_books,
            currently_reading,
            completed,
            total_pages_read,
            average_rating,
        }
    }

    /// Explicit teardown. Dropping the store has the same effect; this makes
    /// the intent visible at FFI call sites.
    pub fn close(self) {
        info!("Library database closed");
    }

    /// Serializes the whole collection into the persistence slot.
    ///
    /// Skipped while the initial load has not finished, so a half-initialized
    /// store can never overwrite data it has not read yet.
    fn persist(&self) -> Result<(), AppResponse> {
        if !self.ready {
            return Ok(());
        }

        let json = serde_json::to_string(&self.books)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LIBRARY_TABLE)?;
            table.insert(STORAGE_KEY, json.as_str())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Raw payload currently in the slot, `None` before the first persist.
    fn read_slot(&self) -> Result<Option<String>, AppResponse> {
        let read_txn = self.db.begin_read()?;

        let table = match read_txn.open_table(LIBRARY_TABLE) {
            Ok(table) => table,
            // First run: the table does not exist until the first commit.
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(RedbError::from(e).into()),
        };

        match table.get(STORAGE_KEY)? {
            Some(raw) => Ok(Some(raw.value().to_string())),
            None => Ok(None),
        }
    }
}

//! Fixed default collection, installed when no persisted library exists.

use chrono::Utc;

use crate::book_model::{Book, Genre, ReadingStatus};

/// Returns the built-in starter library.
///
/// Used on first run and as the silent fallback when the persisted payload
/// cannot be parsed. Ids are fixed so consumers can link to these records
/// right after the first launch; timestamps are stamped at call time.
pub fn initial_books() -> Vec<Book> {
    let now = Utc::now();

    vec![
        Book {
            id: "1".to_string(),
            title: "Dom Casmurro".to_string(),
            author: "Machado de Assis".to_string(),
            genre: Some(Genre::BrazilianLiterature),
            year: Some(1899),
            pages: Some(256),
            current_page: None,
            rating: Some(5),
            synopsis: Some(
                "Bento Santiago recalls his youth and his marriage to Capitu, \
                 consumed by a jealousy the reader can never quite verify."
                    .to_string(),
            ),
            cover: None,
            status: ReadingStatus::Completed,
            isbn: Some("9788535911664".to_string()),
            notes: None,
            created_at: now,
            updated_at: now,
        },
        Book {
            id: "2".to_string(),
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            genre: Some(Genre::ScienceFiction),
            year: Some(1949),
            pages: Some(328),
            current_page: Some(120),
            rating: None,
            synopsis: Some(
                "Winston Smith rewrites history for the Party while dreaming \
                 of rebellion against Big Brother."
                    .to_string(),
            ),
            cover: None,
            status: ReadingStatus::Reading,
            isbn: Some("9780451524935".to_string()),
            notes: Some("Re-read, the appendix on Newspeak is worth it.".to_string()),
            created_at: now,
            updated_at: now,
        },
        Book {
            id: "3".to_string(),
            title: "Cem Anos de Solidão".to_string(),
            author: "Gabriel García Márquez".to_string(),
            genre: Some(Genre::MagicalRealism),
            year: Some(1967),
            pages: Some(417),
            current_page: None,
            rating: None,
            synopsis: Some(
                "Seven generations of the Buendía family in the mythical town \
                 of Macondo."
                    .to_string(),
            ),
            cover: None,
            status: ReadingStatus::WantToRead,
            isbn: None,
            notes: None,
            created_at: now,
            updated_at: now,
        },
        Book {
            id: "4".to_string(),
            title: "O Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            genre: Some(Genre::Fantasy),
            year: Some(1937),
            pages: Some(310),
            current_page: None,
            rating: Some(4),
            synopsis: None,
            cover: None,
            status: ReadingStatus::Completed,
            isbn: None,
            notes: None,
            created_at: now,
            updated_at: now,
        },
        Book {
            id: "5".to_string(),
            title: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            genre: Some(Genre::Programming),
            year: Some(2008),
            pages: Some(464),
            current_page: Some(88),
            rating: None,
            synopsis: None,
            cover: None,
            status: ReadingStatus::Paused,
            isbn: Some("9780132350884".to_string()),
            notes: Some("Picked up again for the chapter on error handling.".to_string()),
            created_at: now,
            updated_at: now,
        },
        Book {
            id: "6".to_string(),
            title: "Grande Sertão: Veredas".to_string(),
            author: "João Guimarães Rosa".to_string(),
            genre: Some(Genre::BrazilianLiterature),
            year: Some(1956),
            pages: Some(608),
            current_page: None,
            rating: None,
            synopsis: None,
            cover: None,
            status: ReadingStatus::WantToRead,
            isbn: None,
            notes: None,
            created_at: now,
            updated_at: now,
        },
    ]
}

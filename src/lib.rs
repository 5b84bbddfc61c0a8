//! # Bookshelf Core
//!
//! A local-first storage core for personal book-tracking applications,
//! designed for FFI (Foreign Function Interface) integration with Flutter
//! and other cross-platform front ends. Built on redb, an embedded
//! ACID key-value database, so the catalogued library survives restarts
//! without any server or network dependency.
//!
//! ## Features
//!
//! - **Single-slot persistence**: the whole collection is serialized as one
//!   JSON array into a fixed slot and rewritten after every mutation
//! - **Seeded first run**: a built-in starter library is installed when no
//!   persisted data exists, and on silent recovery from a malformed payload
//! - **Reading statistics**: total books, books in progress, completed
//!   books, pages read and average rating, recomputed on demand
//! - **FFI-optimized**: C-compatible surface returning JSON-encoded
//!   responses, with the store passed as an explicit pointer
//! - **Safe error handling**: no `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use bookshelf_core::{create_library, create_book, get_statistics};
//! use std::ffi::CString;
//!
//! // Open (or create) the library database
//! let name = CString::new("my_library").unwrap();
//! let store = create_library(name.as_ptr());
//!
//! // Catalogue a book
//! let draft = CString::new(r#"{"title":"Dom Casmurro","author":"Machado de Assis"}"#).unwrap();
//! let result = create_book(store, draft.as_ptr());
//!
//! // Aggregate view over the collection
//! let stats = get_statistics(store);
//! ```
//!
//! ## FFI Functions
//!
//! This library exposes C-compatible functions for cross-language
//! integration:
//!
//! - [`create_library`] - Open the library database and load the collection
//! - [`library_is_ready`] - Whether the initial load has finished
//! - [`get_all_books`] - Retrieve the whole collection, newest first
//! - [`get_book_by_id`] - Retrieve one record by id
//! - [`create_book`] - Catalogue a new book from a draft
//! - [`update_book`] - Merge a partial update over an existing record
//! - [`delete_book`] - Remove a record by id
//! - [`get_statistics`] - Compute the derived library statistics
//! - [`close_library`] - Explicit teardown

pub mod book_model;
pub mod library_store;
pub mod seed_data;
mod app_response;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};

use crate::app_response::AppResponse;
use crate::book_model::{BookDraft, BookPatch};
use crate::library_store::LibraryStore;

/// Opens the library database with the specified name and loads the
/// collection.
///
/// The database is created as `<name>.redb` in the working directory. On
/// first run the built-in seed collection is installed and persisted; a
/// malformed persisted payload is recovered silently by falling back to the
/// seed collection.
///
/// # Parameters
///
/// * `name` - A null-terminated C string containing the library name
///
/// # Returns
///
/// Returns a pointer to the [`LibraryStore`] instance on success, or a null
/// pointer on failure. The caller owns the pointer and must release it with
/// [`close_library`].
///
/// # Safety
///
/// This function is unsafe because it:
/// - Dereferences a raw pointer without validation
/// - Returns a raw pointer that must be properly managed
/// - Requires the input string to be valid UTF-8
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use bookshelf_core::create_library;
///
/// let name = CString::new("my_library").unwrap();
/// let store = create_library(name.as_ptr());
///
/// if !store.is_null() {
///     // Library loaded, collection is ready
/// }
/// ```
///
/// # Errors
///
/// Returns null pointer if:
/// - Input name pointer is null
/// - Input string contains invalid UTF-8
/// - The database cannot be opened
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_library(name: *const c_char) -> *mut LibraryStore {
    if name.is_null() {
        warn!("Null name pointer passed to create_library");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match LibraryStore::init(name_str) {
        Ok(store) => {
            info!("Library '{name_str}' initialized successfully");
            Box::into_raw(Box::new(store))
        }
        Err(e) => {
            warn!("Failed to initialize library '{name_str}': {e}");
            std::ptr::null_mut()
        }
    }
}

/// Reports whether the store has finished its initial load.
///
/// Consumers must not read the collection before this returns true; a store
/// obtained from a non-null [`create_library`] pointer is always ready.
///
/// # Safety
///
/// The state parameter must be a valid pointer or null. Null reports false.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn library_is_ready(state: *mut LibraryStore) -> bool {
    match unsafe { state.as_ref() } {
        Some(store) => store.ready(),
        None => false,
    }
}

/// Retrieves the whole collection as a JSON array, newest first.
///
/// # Returns
///
/// Returns a JSON-formatted C string containing the operation result. The
/// returned string must be freed by the caller.
///
/// # Safety
///
/// The state parameter must be a valid pointer to a [`LibraryStore`]
/// instance.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_all_books(state: *mut LibraryStore) -> *const c_char {
    let store = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to get_all_books".to_string());
            return response_to_c_string(&error);
        }
    };

    match serde_json::to_string(store.books()) {
        Ok(json) => {
            let success = AppResponse::Ok(json);
            response_to_c_string(&success)
        }
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Error serializing books: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Retrieves one record by its id.
///
/// # Parameters
///
/// * `state` - Pointer to the library store instance
/// * `id` - Null-terminated C string containing the record id
///
/// # Returns
///
/// Returns a JSON-formatted C string containing the record if found, or a
/// `NotFound` response otherwise. Pure read, no side effects.
///
/// # Safety
///
/// Both parameters must be valid pointers. The id string must be valid
/// UTF-8.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_book_by_id(state: *mut LibraryStore, id: *const c_char) -> *const c_char {
    let store = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to get_book_by_id".to_string());
            return response_to_c_string(&error);
        }
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    match store.get_by_id(&id_str) {
        Some(book) => match serde_json::to_string(book) {
            Ok(json) => {
                let success = AppResponse::Ok(json);
                response_to_c_string(&success)
            }
            Err(e) => {
                let error = AppResponse::SerializationError(format!("Error serializing book: {e}"));
                response_to_c_string(&error)
            }
        },
        None => {
            let error = AppResponse::NotFound(format!("No book found with id: {id_str}"));
            response_to_c_string(&error)
        }
    }
}

/// Catalogues a new book from a draft.
///
/// The draft carries every record field except `id`, `createdAt` and
/// `updatedAt`; those are generated here. The new record is prepended to the
/// collection and the whole collection is persisted.
///
/// # Parameters
///
/// * `state` - Pointer to the library store instance
/// * `json_ptr` - Null-terminated C string containing the draft JSON
///
/// # Returns
///
/// Returns a JSON-formatted C string containing the created record, with its
/// generated id and matching timestamps. The returned string must be freed
/// by the caller.
///
/// # Safety
///
/// Both parameters must be valid pointers.
///
/// # JSON Format
///
/// Expected draft structure (only `title` and `author` are required;
/// `status` defaults to `"WANT_TO_READ"`):
///
/// ```json
/// {
///   "title": "Dom Casmurro",
///   "author": "Machado de Assis",
///   "genre": "BRAZILIAN_LITERATURE",
///   "year": 1899,
///   "pages": 256,
///   "status": "COMPLETED",
///   "rating": 5
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_book(state: *mut LibraryStore, json_ptr: *const c_char) -> *const c_char {
    let store = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to create_book".to_string());
            return response_to_c_string(&error);
        }
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(error_ptr) => return error_ptr,
    };

    let draft: BookDraft = match serde_json::from_str(&json_str) {
        Ok(d) => d,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid draft JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    match store.create(draft) {
        Ok(book) => match serde_json::to_string(&book) {
            Ok(json) => {
                let success = AppResponse::Ok(json);
                response_to_c_string(&success)
            }
            Err(e) => {
                let error = AppResponse::SerializationError(format!("Failed to serialize created book: {e}"));
                response_to_c_string(&error)
            }
        },
        Err(e) => response_to_c_string(&e),
    }
}

/// Merges a partial update over the record matching `id`.
///
/// Fields absent from the patch are left untouched; `updatedAt` is stamped
/// on success. Updating a nonexistent id is reported as `NotFound` and
/// leaves the collection unchanged.
///
/// # Parameters
///
/// * `state` - Pointer to the library store instance
/// * `id` - Null-terminated C string containing the record id
/// * `json_ptr` - Null-terminated C string containing the patch JSON
///
/// # Returns
///
/// Returns a JSON-formatted C string containing the updated record on
/// success.
///
/// # Safety
///
/// All parameters must be valid pointers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn update_book(
    state: *mut LibraryStore,
    id: *const c_char,
    json_ptr: *const c_char,
) -> *const c_char {
    let store = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to update_book".to_string());
            return response_to_c_string(&error);
        }
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(error_ptr) => return error_ptr,
    };

    let patch: BookPatch = match serde_json::from_str(&json_str) {
        Ok(p) => p,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid patch JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    match store.update(&id_str, patch) {
        Ok(Some(book)) => match serde_json::to_string(&book) {
            Ok(json) => {
                let success = AppResponse::Ok(json);
                response_to_c_string(&success)
            }
            Err(e) => {
                let error = AppResponse::SerializationError(format!("Failed to serialize updated book: {e}"));
                response_to_c_string(&error)
            }
        },
        Ok(None) => {
            let error = AppResponse::NotFound(format!("No book found with id: {id_str}"));
            response_to_c_string(&error)
        }
        Err(e) => response_to_c_string(&e),
    }
}

/// Removes the record matching `id` from the collection.
///
/// Deleting a nonexistent id is reported as `NotFound` and leaves the
/// collection unchanged; deleting the same id twice is therefore a no-op.
///
/// # Parameters
///
/// * `state` - Pointer to the library store instance
/// * `id` - Null-terminated C string containing the record id to delete
///
/// # Safety
///
/// Both parameters must be valid pointers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn delete_book(state: *mut LibraryStore, id: *const c_char) -> *const c_char {
    let store = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to delete_book".to_string());
            return response_to_c_string(&error);
        }
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    match store.delete_by_id(&id_str) {
        Ok(true) => {
            let success = AppResponse::success("Book deleted successfully");
            response_to_c_string(&success)
        }
        Ok(false) => {
            let not_found = AppResponse::NotFound(format!("No book found with id: {id_str}"));
            response_to_c_string(&not_found)
        }
        Err(e) => response_to_c_string(&e),
    }
}

/// Computes the derived library statistics over the current collection.
///
/// Pure read, recomputed on every call; nothing is cached or persisted.
///
/// # Returns
///
/// Returns a JSON-formatted C string containing the statistics:
///
/// ```json
/// {
///   "totalBooks": 6,
///   "currentlyReading": 1,
///   "completed": 2,
///   "totalPagesRead": 774,
///   "averageRating": 4.5
/// }
/// ```
///
/// # Safety
///
/// The state parameter must be a valid pointer to a [`LibraryStore`]
/// instance.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_statistics(state: *mut LibraryStore) -> *const c_char {
    let store = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to get_statistics".to_string());
            return response_to_c_string(&error);
        }
    };

    let stats = store.statistics();

    match serde_json::to_string(&stats) {
        Ok(json) => {
            let success = AppResponse::Ok(json);
            response_to_c_string(&success)
        }
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Error serializing statistics: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Releases the library store.
///
/// Takes ownership of the pointer and drops the store, closing the
/// underlying database. The pointer must not be used after this call.
///
/// # Parameters
///
/// * `state` - Pointer to the library store instance
///
/// # Safety
///
/// The state parameter must be a pointer previously returned by
/// [`create_library`] that has not been closed yet.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_library(state: *mut LibraryStore) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_library".to_string());
        return response_to_c_string(&error);
    }

    let store = unsafe { Box::from_raw(state) };
    store.close();

    let success = AppResponse::success("Library closed successfully");
    response_to_c_string(&success)
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Returns a pointer to a null-terminated C string containing the JSON
/// response. The caller is responsible for freeing this memory. Returns a
/// null pointer if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String, handling null pointers and
/// invalid UTF-8.
///
/// On failure the returned `Err` already carries a C-formatted error
/// response suitable for returning to the FFI caller directly.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}

//! Note repository and listing queries.
//!
//! # Responsibility
//! - Turn raw content source records into validated notes.
//! - Derive index/topic views from a loaded collection.
//!
//! # Invariants
//! - Loads are all-or-nothing; listing functions never fail.

pub mod listing;
pub mod note_repo;

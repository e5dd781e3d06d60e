//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define validated note, tag and status values shared by all layers.
//!
//! # Invariants
//! - Model values are immutable snapshots; nothing in core mutates them after
//!   validation.

pub mod note;
pub mod status;
pub mod tag;

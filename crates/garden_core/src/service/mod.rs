//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository loads into page-level views.
//! - Own the process-lifetime note cache and its invalidation rule.

pub mod note_service;

//! Note, folder and tag use-case services.
//!
//! # Responsibility
//! - Orchestrate id validation, integrity checks and repository calls.
//! - Report one consistent error taxonomy (`ServiceError`).
//! - Keep transport layers decoupled from storage details.
//!
//! # Invariants
//! - Malformed ids fail fast and never reach the store.
//! - Payload validation runs before any store write.
//! - Store failures are classified once and never retried.

pub mod error;
pub mod folder_service;
pub mod note_service;
pub mod tag_service;

//! Domain model for notes, folders and tags.
//!
//! # Responsibility
//! - Define the persisted entities and the typed client payloads.
//! - Own the identifier syntax every reference must satisfy.
//!
//! # Invariants
//! - Notes reference folders and tags by id only; no embedding.
//! - Folders and tags hold no back-references to notes.

pub mod folder;
pub mod id;
pub mod note;
pub mod tag;

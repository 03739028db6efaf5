//! Note listing query construction.
//!
//! # Responsibility
//! - Translate list parameters into a store-agnostic filter plus sort order.
//!
//! # Invariants
//! - Note listings always sort by `created_at` ascending.
//! - An empty filter matches every note; no-match is never an error.

pub mod filter;

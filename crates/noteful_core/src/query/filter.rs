//! Query filter builder for note listings.
//!
//! # Responsibility
//! - Validate list parameters (search pattern, folder/tag ids).
//! - Produce a conjunctive `NoteFilter` plus the fixed `SortSpec`.
//!
//! # Invariants
//! - Search is an unanchored, case-insensitive pattern match over title OR
//!   content. The term is not escaped: pattern syntax in the term is honored.
//! - Folder/tag filters check id syntax only, never existence.
//! - Empty-string parameters are treated as absent.

use crate::integrity::ValidationError;
use crate::model::id::EntityId;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Raw list parameters as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListParams {
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub tag_id: Option<String>,
}

impl NoteListParams {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn in_folder(folder_id: impl Into<String>) -> Self {
        Self {
            folder_id: Some(folder_id.into()),
            ..Self::default()
        }
    }

    pub fn with_tag(tag_id: impl Into<String>) -> Self {
        Self {
            tag_id: Some(tag_id.into()),
            ..Self::default()
        }
    }
}

/// Validated search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    term: String,
}

impl SearchPattern {
    /// Validates `term` as a case-insensitive pattern.
    pub fn new(term: impl Into<String>) -> Result<Self, ValidationError> {
        let term = term.into();
        RegexBuilder::new(&term)
            .case_insensitive(true)
            .build()
            .map_err(|err| ValidationError::InvalidSearchTerm {
                term: term.clone(),
                message: err.to_string(),
            })?;
        Ok(Self { term })
    }

    pub fn term(&self) -> &str {
        self.term.as_str()
    }

    /// Pattern source for the store's `REGEXP` operator.
    pub fn regex_source(&self) -> String {
        format!("(?i){}", self.term)
    }
}

/// One conjunct of a note filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteFilterClause {
    /// Title matches OR content matches.
    TextMatches(SearchPattern),
    /// `folder_id` equals the id.
    FolderEquals(EntityId),
    /// `tags` contains the id.
    TagsContain(EntityId),
}

/// Conjunction of clauses; empty matches every note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    clauses: Vec<NoteFilterClause>,
}

impl NoteFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a clause with AND semantics.
    pub fn and(mut self, clause: NoteFilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[NoteFilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            order: SortOrder::Ascending,
        }
    }
}

/// Filter + sort handed to `NoteRepository::find_notes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub filter: NoteFilter,
    pub sort: SortSpec,
}

/// Builds the store query for a note listing.
///
/// # Errors
/// - `InvalidSearchTerm` when the term is not a valid pattern.
/// - `InvalidIdentifier` when a non-empty folder/tag filter is malformed.
pub fn build_note_filter(params: &NoteListParams) -> Result<NoteQuery, ValidationError> {
    let mut filter = NoteFilter::all();

    if let Some(term) = non_empty(params.search_term.as_deref()) {
        filter = filter.and(NoteFilterClause::TextMatches(SearchPattern::new(term)?));
    }
    if let Some(folder_id) = non_empty(params.folder_id.as_deref()) {
        filter = filter.and(NoteFilterClause::FolderEquals(parse_filter_id(folder_id)?));
    }
    if let Some(tag_id) = non_empty(params.tag_id.as_deref()) {
        filter = filter.and(NoteFilterClause::TagsContain(parse_filter_id(tag_id)?));
    }

    Ok(NoteQuery {
        filter,
        sort: SortSpec::default(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn parse_filter_id(value: &str) -> Result<EntityId, ValidationError> {
    EntityId::parse(value).ok_or_else(|| ValidationError::InvalidIdentifier(value.to_string()))
}

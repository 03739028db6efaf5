//! Service error taxonomy.

use crate::integrity::{CascadeError, ValidationError};
use crate::model::id::EntityId;
use crate::repo::error::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Entity collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Note,
    Folder,
    Tag,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Note => f.write_str("note"),
            Self::Folder => f.write_str("folder"),
            Self::Tag => f.write_str("tag"),
        }
    }
}

/// Coarse error class for protocol mapping by external callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    InvalidIdentifier,
    MissingField,
    InvalidReference,
    InvalidInput,
    NotFound,
    Conflict,
    Store,
}

/// Error returned by every service operation.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before any store call.
    Validation(ValidationError),
    /// Target entity does not exist.
    NotFound { kind: EntityKind, id: EntityId },
    /// Name uniqueness violated.
    Conflict { kind: EntityKind },
    /// Tag row deleted, but its id could not be pulled from notes.
    CascadeIncomplete { tag_id: EntityId, source: RepoError },
    /// Unclassified store failure.
    Store(RepoError),
    /// Write succeeded but read-back did not find the entity.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::Validation(err) => match err {
                ValidationError::InvalidIdentifier(_) => ServiceErrorKind::InvalidIdentifier,
                ValidationError::MissingField(_) => ServiceErrorKind::MissingField,
                ValidationError::InvalidReference { .. } => ServiceErrorKind::InvalidReference,
                ValidationError::InvalidSearchTerm { .. } | ValidationError::IdMismatch { .. } => {
                    ServiceErrorKind::InvalidInput
                }
            },
            Self::NotFound { .. } => ServiceErrorKind::NotFound,
            Self::Conflict { .. } => ServiceErrorKind::Conflict,
            Self::CascadeIncomplete { .. } | Self::Store(_) | Self::InconsistentState(_) => {
                ServiceErrorKind::Store
            }
        }
    }

    /// Classifies a repository failure in the context of one collection.
    pub(crate) fn from_repo(kind: EntityKind, err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => Self::NotFound { kind, id },
            RepoError::Duplicate(_) => Self::Conflict { kind },
            other => Self::Store(other),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Conflict { kind } => write!(f, "The {kind} name already exists"),
            Self::CascadeIncomplete { tag_id, source } => write!(
                f,
                "tag {tag_id} deleted but note references were not removed: {source}"
            ),
            Self::Store(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::CascadeIncomplete { source, .. } => Some(source),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CascadeError> for ServiceError {
    fn from(value: CascadeError) -> Self {
        match value {
            CascadeError::TagDelete(err) => Self::from_repo(EntityKind::Tag, err),
            CascadeError::NotePull { tag_id, source } => Self::CascadeIncomplete { tag_id, source },
        }
    }
}

//! Entity identifier format and validation.
//!
//! # Responsibility
//! - Define the single identifier syntax shared by notes, folders and tags.
//! - Generate fresh identifiers for store inserts.
//!
//! # Invariants
//! - A well-formed id is exactly 24 lowercase hexadecimal characters.
//! - `EntityId` values can only be constructed from well-formed input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Number of characters in a well-formed identifier.
pub const ENTITY_ID_LEN: usize = 24;

static ENTITY_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{24}$").expect("valid entity id regex"));

/// Returns whether `value` is a well-formed entity identifier.
///
/// Pure syntax check; says nothing about whether the entity exists.
pub fn is_valid_id(value: &str) -> bool {
    ENTITY_ID_RE.is_match(value)
}

/// Validated identifier of a note, folder or tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Parses a well-formed identifier, returning `None` otherwise.
    pub fn parse(value: &str) -> Option<Self> {
        if is_valid_id(value) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    /// Generates a new identifier: 4-byte seconds timestamp + 8 random bytes.
    pub fn generate() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default() as u32;
        let random = Uuid::new_v4();

        let mut out = String::with_capacity(ENTITY_ID_LEN);
        for byte in seconds
            .to_be_bytes()
            .iter()
            .chain(random.as_bytes()[..8].iter())
        {
            out.push_str(&format!("{byte:02x}"));
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EntityId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_id(&value) {
            Ok(Self(value))
        } else {
            Err(format!("malformed entity id `{value}`"))
        }
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

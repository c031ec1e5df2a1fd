//! Repository object types

use crate::error::{Error, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Record field holding an object's CUID.
pub const FIELD_CUID: &str = "SI_CUID";
/// Record field holding an object's kind tag.
pub const FIELD_KIND: &str = "SI_KIND";
/// `SI_KIND` value of an expandable folder.
pub const KIND_FOLDER: &str = "Folder";

/// One raw result record as returned by the query service.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Repository object identifier (CUID) - cheaply cloneable
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Identifier(Arc<str>);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(Arc::from(s.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collect identifiers from user input: trims, splits on commas, drops blanks,
/// keeps the first occurrence of each.
pub fn parse_identifiers<I, S>(raw: I) -> IndexSet<Identifier>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .flat_map(|s| {
            s.as_ref()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Identifier::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Kind tag of a discovered child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Folder,
    /// Any non-expandable kind (reports, connections, universes, ...).
    Other(String),
}

impl ObjectKind {
    pub fn parse(kind: &str) -> Self {
        if kind == KIND_FOLDER {
            Self::Folder
        } else {
            Self::Other(kind.to_string())
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }
}

/// A child returned by a children query. The parent is implicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildRecord {
    pub id: Identifier,
    pub kind: ObjectKind,
}

impl ChildRecord {
    pub fn new(id: impl Into<Identifier>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Decode a raw record. Returns `None` when the CUID is absent, null,
    /// not a string, or empty. A missing kind is treated as a leaf.
    pub fn from_record(record: &Record) -> Option<Self> {
        let id = record
            .get(FIELD_CUID)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())?;
        let kind = match record.get(FIELD_KIND).and_then(|v| v.as_str()) {
            Some(k) => ObjectKind::parse(k),
            None => ObjectKind::Other(String::new()),
        };
        Some(Self::new(id, kind))
    }
}

/// Object type selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Folder,
    Report,
    Connection,
    Universe,
}

impl ObjectType {
    pub const ALL: [ObjectType; 4] = [
        ObjectType::Report,
        ObjectType::Connection,
        ObjectType::Universe,
        ObjectType::Folder,
    ];

    /// Whether the selected identifiers are folders whose descendants must be resolved.
    pub fn expands_descendants(self) -> bool {
        match self {
            ObjectType::Folder => true,
            ObjectType::Report | ObjectType::Connection | ObjectType::Universe => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Folder => "Folders",
            ObjectType::Report => "Reports",
            ObjectType::Connection => "Connections",
            ObjectType::Universe => "Universes",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "folders" | "folder" => Ok(ObjectType::Folder),
            "reports" | "report" => Ok(ObjectType::Report),
            "connections" | "connection" => Ok(ObjectType::Connection),
            "universes" | "universe" => Ok(ObjectType::Universe),
            _ => Err(Error::UnknownObjectType(s.to_string())),
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema;

/// One catalog object: a table, view, trigger, procedure, and so on.
///
/// `definition` may be empty until the object is expanded through a
/// definition lookup; source-backed kinds (procedures, functions,
/// triggers) carry their text from the initial catalog fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaObject {
    pub name: String,
    pub kind: ObjectKind,
    #[serde(default)]
    pub definition: String,
}

impl SchemaObject {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            definition: String::new(),
        }
    }

    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }
}

/// Catalog object kinds tracked by the cache.
///
/// Declaration order is the fixed order used by full cache refreshes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    Table,
    View,
    Column,
    Constraint,
    Index,
    Trigger,
    Synonym,
    Procedure,
    Function,
}

impl ObjectKind {
    pub const ALL: [Self; 9] = [
        Self::Table,
        Self::View,
        Self::Column,
        Self::Constraint,
        Self::Index,
        Self::Trigger,
        Self::Synonym,
        Self::Procedure,
        Self::Function,
    ];

    /// Uppercase catalog name for the kind, matching `ALL_DEPENDENCIES.TYPE`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Column => "COLUMN",
            Self::Constraint => "CONSTRAINT",
            Self::Index => "INDEX",
            Self::Trigger => "TRIGGER",
            Self::Synonym => "SYNONYM",
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
        }
    }

    /// Parses a kind from a user-supplied name, case-insensitively.
    /// Accepts both singular catalog names and plural tool-facing names.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "TABLE" | "TABLES" => Some(Self::Table),
            "VIEW" | "VIEWS" => Some(Self::View),
            "COLUMN" | "COLUMNS" => Some(Self::Column),
            "CONSTRAINT" | "CONSTRAINTS" => Some(Self::Constraint),
            "INDEX" | "INDEXES" => Some(Self::Index),
            "TRIGGER" | "TRIGGERS" => Some(Self::Trigger),
            "SYNONYM" | "SYNONYMS" => Some(Self::Synonym),
            "PROCEDURE" | "PROCEDURES" => Some(Self::Procedure),
            "FUNCTION" | "FUNCTIONS" => Some(Self::Function),
            _ => None,
        }
    }

    /// Fixed per-kind snapshot filename inside the cache directory.
    #[must_use]
    pub const fn snapshot_file(self) -> &'static str {
        match self {
            Self::Table => schema::SNAPSHOT_TABLES,
            Self::View => schema::SNAPSHOT_VIEWS,
            Self::Column => schema::SNAPSHOT_COLUMNS,
            Self::Constraint => schema::SNAPSHOT_CONSTRAINTS,
            Self::Index => schema::SNAPSHOT_INDEXES,
            Self::Trigger => schema::SNAPSHOT_TRIGGERS,
            Self::Synonym => schema::SNAPSHOT_SYNONYMS,
            Self::Procedure => schema::SNAPSHOT_PROCEDURES,
            Self::Function => schema::SNAPSHOT_FUNCTIONS,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reverse-dependency edge discovered live from the catalog.
///
/// Edges are constructed, consumed, and discarded within a single
/// resolver call; they are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DependencyEdge {
    pub dependent_name: String,
    pub dependent_type: String,
    pub referenced_name: String,
    pub referenced_type: String,
}

/// On-disk shape of one kind's snapshot: the complete universe for that
/// kind at the time it was written, plus a format version marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    pub version: u32,
    pub objects: Vec<SchemaObject>,
}

impl Snapshot {
    #[must_use]
    pub const fn new(objects: Vec<SchemaObject>) -> Self {
        Self {
            version: schema::SNAPSHOT_VERSION,
            objects,
        }
    }

    /// Whether this snapshot was written by the current format version.
    #[must_use]
    pub const fn is_current(&self) -> bool {
        self.version == schema::SNAPSHOT_VERSION
    }
}

//! Connection provider over a local catalog-mirror SQLite database.
//!
//! The mirror holds the catalog views (`all_tables`, `all_views`,
//! `all_tab_columns`, `all_constraints`, `all_indexes`, `all_triggers`,
//! `all_synonyms`, `all_source`, `all_dependencies`) as plain relations.
//! Every catalog operation opens a fresh read-only connection and drops
//! it afterward, matching the one-connection-per-operation contract.

use std::path::PathBuf;

use dbcat_core::provider::{CatalogConnection, ConnectionProvider, QueryError, Row};
use rusqlite::{Connection, OpenFlags, types::ValueRef};

pub struct MirrorProvider {
    path: PathBuf,
}

impl MirrorProvider {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConnectionProvider for MirrorProvider {
    type Conn = MirrorConnection;

    fn connect(&self) -> Result<Self::Conn, QueryError> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|err| QueryError::new(err.to_string()))?;
        Ok(MirrorConnection { conn })
    }
}

pub struct MirrorConnection {
    conn: Connection,
}

impl CatalogConnection for MirrorConnection {
    fn query(&self, sql: &str, binds: &[&str]) -> Result<Vec<Row>, QueryError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|err| QueryError::new(err.to_string()))?;
        let columns = stmt.column_count();
        let mut rows = stmt
            .query(rusqlite::params_from_iter(binds.iter()))
            .map_err(|err| QueryError::new(err.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|err| QueryError::new(err.to_string()))? {
            let mut values: Row = Vec::with_capacity(columns);
            for index in 0..columns {
                let value = row
                    .get_ref(index)
                    .map_err(|err| QueryError::new(err.to_string()))?;
                values.push(to_text(value));
            }
            out.push(values);
        }
        Ok(out)
    }
}

fn to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(value) | ValueRef::Blob(value) => {
            Some(String::from_utf8_lossy(value).into_owned())
        }
    }
}

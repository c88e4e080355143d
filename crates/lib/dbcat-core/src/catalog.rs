//! Catalog fetcher: read-only queries against the database's metadata
//! views, one object kind (or one object's definition) at a time.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use dbcat_store::models::{ObjectKind, SchemaObject};

use crate::provider::{CatalogConnection, ConnectionProvider, QueryError, Row};

/// Failure taxonomy for catalog-facing operations.
///
/// Invalid arguments are detected before any I/O. Fetch and dependency
/// failures carry the driver error unchanged so callers can distinguish
/// bad input from an unreachable catalog.
#[derive(Debug)]
pub enum CatalogError {
    InvalidArgument(String),
    Fetch(QueryError),
    Dependency(QueryError),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Fetch(err) => write!(f, "catalog fetch failed: {err}"),
            Self::Dependency(err) => write!(f, "dependency resolution failed: {err}"),
        }
    }
}

impl Error for CatalogError {}

pub type CatalogResult<T> = Result<T, CatalogError>;

pub(crate) fn ensure_non_empty(value: &str, field: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidArgument(format!(
            "{field} is required"
        )));
    }
    Ok(())
}

/// Issues per-kind catalog queries and maps rows into [`SchemaObject`]s.
///
/// Queries are scoped to the configured schema owner when one is set,
/// otherwise unscoped. A query failure aborts the call; no partial
/// results are ever returned.
pub struct CatalogFetcher<P> {
    provider: Arc<P>,
    owner: Option<String>,
}

impl<P> Clone for CatalogFetcher<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            owner: self.owner.clone(),
        }
    }
}

impl<P: ConnectionProvider> CatalogFetcher<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, owner: Option<String>) -> Self {
        let owner = owner
            .map(|value| value.trim().to_uppercase())
            .filter(|value| !value.is_empty());
        Self { provider, owner }
    }

    /// Fetches the complete universe for one kind, ordered by name.
    ///
    /// # Errors
    /// Returns `CatalogError::Fetch` on any connection or query failure.
    pub fn fetch_all(&self, kind: ObjectKind) -> CatalogResult<Vec<SchemaObject>> {
        let rows = self.run(&self.universe_sql(kind))?;
        Ok(match kind {
            ObjectKind::Table => map_names(&rows, kind),
            ObjectKind::View => map_named_text(&rows, kind),
            ObjectKind::Column => map_columns(&rows),
            ObjectKind::Constraint => map_constraints(&rows),
            ObjectKind::Index => map_indexes(&rows),
            ObjectKind::Trigger => map_triggers(&rows),
            ObjectKind::Synonym => map_synonyms(&rows),
            ObjectKind::Procedure | ObjectKind::Function => map_source_lines(&rows, kind),
        })
    }

    /// Retrieves a single object's full definition text.
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidArgument` for a blank name (before
    /// any I/O) and `CatalogError::Fetch` on query failure.
    pub fn fetch_definition(&self, kind: ObjectKind, name: &str) -> CatalogResult<String> {
        ensure_non_empty(name, "name")?;
        let name = name.trim().to_uppercase();
        match kind {
            ObjectKind::Procedure | ObjectKind::Function | ObjectKind::Trigger => {
                let sql = self.scoped(
                    format!(
                        "SELECT text FROM all_source WHERE type = '{}' AND name = ?",
                        kind.as_str()
                    ),
                    "line",
                );
                let rows = self.run_bound(&sql, &[&name])?;
                Ok(concat_text(&rows, 0))
            }
            ObjectKind::View => {
                let sql = self.scoped(
                    "SELECT text FROM all_views WHERE view_name = ?".to_string(),
                    "view_name",
                );
                let rows = self.run_bound(&sql, &[&name])?;
                Ok(rows
                    .first()
                    .map_or_else(String::new, |row| text(row, 0).to_string()))
            }
            ObjectKind::Table => {
                let sql = self.scoped(
                    "SELECT column_name, data_type, data_length, nullable \
                     FROM all_tab_columns WHERE table_name = ?"
                        .to_string(),
                    "column_id",
                );
                let rows = self.run_bound(&sql, &[&name])?;
                Ok(render_table_definition(&name, &rows))
            }
            ObjectKind::Column => {
                let Some((table, column)) = name.split_once('.') else {
                    return Err(CatalogError::InvalidArgument(
                        "column name must be TABLE.COLUMN".to_string(),
                    ));
                };
                let sql = self.scoped(
                    "SELECT data_type, data_length, nullable \
                     FROM all_tab_columns WHERE table_name = ? AND column_name = ?"
                        .to_string(),
                    "column_id",
                );
                let rows = self.run_bound(&sql, &[table, column])?;
                Ok(rows.first().map_or_else(String::new, |row| {
                    render_column_type(text(row, 0), text(row, 1), text(row, 2))
                }))
            }
            ObjectKind::Constraint => {
                let sql = self.scoped(
                    "SELECT constraint_type, table_name, search_condition \
                     FROM all_constraints WHERE constraint_name = ?"
                        .to_string(),
                    "constraint_name",
                );
                let rows = self.run_bound(&sql, &[&name])?;
                Ok(rows.first().map_or_else(String::new, |row| {
                    render_constraint(text(row, 0), text(row, 1), text(row, 2))
                }))
            }
            ObjectKind::Index => {
                let sql = self.scoped(
                    "SELECT table_name, uniqueness FROM all_indexes WHERE index_name = ?"
                        .to_string(),
                    "index_name",
                );
                let rows = self.run_bound(&sql, &[&name])?;
                Ok(rows
                    .first()
                    .map_or_else(String::new, |row| render_index(text(row, 0), text(row, 1))))
            }
            ObjectKind::Synonym => {
                let sql = self.scoped(
                    "SELECT table_owner, table_name FROM all_synonyms WHERE synonym_name = ?"
                        .to_string(),
                    "synonym_name",
                );
                let rows = self.run_bound(&sql, &[&name])?;
                Ok(rows
                    .first()
                    .map_or_else(String::new, |row| render_synonym(text(row, 0), text(row, 1))))
            }
        }
    }

    fn universe_sql(&self, kind: ObjectKind) -> String {
        match kind {
            ObjectKind::Table => {
                self.unscoped("SELECT table_name FROM all_tables".to_string(), "table_name")
            }
            ObjectKind::View => {
                self.unscoped("SELECT view_name, text FROM all_views".to_string(), "view_name")
            }
            ObjectKind::Column => self.unscoped(
                "SELECT table_name, column_name, data_type, data_length, nullable \
                 FROM all_tab_columns"
                    .to_string(),
                "table_name, column_id",
            ),
            ObjectKind::Constraint => self.unscoped(
                "SELECT constraint_name, constraint_type, table_name, search_condition \
                 FROM all_constraints"
                    .to_string(),
                "constraint_name",
            ),
            ObjectKind::Index => self.unscoped(
                "SELECT index_name, table_name, uniqueness FROM all_indexes".to_string(),
                "index_name",
            ),
            ObjectKind::Trigger => self.unscoped(
                "SELECT trigger_name, description, trigger_body FROM all_triggers".to_string(),
                "trigger_name",
            ),
            ObjectKind::Synonym => self.unscoped(
                "SELECT synonym_name, table_owner, table_name FROM all_synonyms".to_string(),
                "synonym_name",
            ),
            ObjectKind::Procedure | ObjectKind::Function => self.unscoped(
                format!(
                    "SELECT name, text FROM all_source WHERE type = '{}'",
                    kind.as_str()
                ),
                "name, line",
            ),
        }
    }

    /// Appends the owner predicate (when configured) and the ordering
    /// clause to a base query that already contains a WHERE clause.
    fn scoped(&self, base: String, order_by: &str) -> String {
        let mut sql = base;
        if self.owner.is_some() {
            sql.push_str(" AND owner = ?");
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
        sql
    }

    /// Like [`Self::scoped`] for base queries without a WHERE clause,
    /// unless the base already filters (source queries do).
    fn unscoped(&self, base: String, order_by: &str) -> String {
        let mut sql = base;
        if self.owner.is_some() {
            if sql.contains(" WHERE ") {
                sql.push_str(" AND owner = ?");
            } else {
                sql.push_str(" WHERE owner = ?");
            }
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
        sql
    }

    fn run(&self, sql: &str) -> CatalogResult<Vec<Row>> {
        self.run_bound(sql, &[])
    }

    fn run_bound(&self, sql: &str, binds: &[&str]) -> CatalogResult<Vec<Row>> {
        let mut all_binds: Vec<&str> = binds.to_vec();
        if let Some(owner) = self.owner.as_deref() {
            all_binds.push(owner);
        }
        let conn = self.provider.connect().map_err(CatalogError::Fetch)?;
        conn.query(sql, &all_binds).map_err(CatalogError::Fetch)
    }
}

pub(crate) fn text(row: &Row, index: usize) -> &str {
    row.get(index)
        .and_then(|value| value.as_deref())
        .unwrap_or("")
}

fn map_names(rows: &[Row], kind: ObjectKind) -> Vec<SchemaObject> {
    rows.iter()
        .map(|row| SchemaObject::new(text(row, 0), kind))
        .collect()
}

fn map_named_text(rows: &[Row], kind: ObjectKind) -> Vec<SchemaObject> {
    rows.iter()
        .map(|row| SchemaObject::new(text(row, 0), kind).with_definition(text(row, 1)))
        .collect()
}

fn map_columns(rows: &[Row]) -> Vec<SchemaObject> {
    rows.iter()
        .map(|row| {
            let name = format!("{}.{}", text(row, 0), text(row, 1));
            let definition = render_column_type(text(row, 2), text(row, 3), text(row, 4));
            SchemaObject::new(name, ObjectKind::Column).with_definition(definition)
        })
        .collect()
}

fn map_constraints(rows: &[Row]) -> Vec<SchemaObject> {
    rows.iter()
        .map(|row| {
            let definition = render_constraint(text(row, 1), text(row, 2), text(row, 3));
            SchemaObject::new(text(row, 0), ObjectKind::Constraint).with_definition(definition)
        })
        .collect()
}

fn map_indexes(rows: &[Row]) -> Vec<SchemaObject> {
    rows.iter()
        .map(|row| {
            let definition = render_index(text(row, 1), text(row, 2));
            SchemaObject::new(text(row, 0), ObjectKind::Index).with_definition(definition)
        })
        .collect()
}

fn map_triggers(rows: &[Row]) -> Vec<SchemaObject> {
    rows.iter()
        .map(|row| {
            let description = text(row, 1).trim();
            let body = text(row, 2).trim();
            let definition = if description.is_empty() {
                body.to_string()
            } else if body.is_empty() {
                description.to_string()
            } else {
                format!("{description}\n{body}")
            };
            SchemaObject::new(text(row, 0), ObjectKind::Trigger).with_definition(definition)
        })
        .collect()
}

fn map_synonyms(rows: &[Row]) -> Vec<SchemaObject> {
    rows.iter()
        .map(|row| {
            let definition = render_synonym(text(row, 1), text(row, 2));
            SchemaObject::new(text(row, 0), ObjectKind::Synonym).with_definition(definition)
        })
        .collect()
}

/// Folds ordered `all_source` rows (name, text) into one object per name,
/// concatenating the source lines in order.
fn map_source_lines(rows: &[Row], kind: ObjectKind) -> Vec<SchemaObject> {
    let mut objects: Vec<SchemaObject> = Vec::new();
    for row in rows {
        let name = text(row, 0);
        let line = text(row, 1);
        match objects.last_mut() {
            Some(last) if last.name == name => last.definition.push_str(line),
            _ => {
                objects.push(
                    SchemaObject::new(name, kind).with_definition(line),
                );
            }
        }
    }
    objects
}

fn concat_text(rows: &[Row], index: usize) -> String {
    rows.iter().map(|row| text(row, index)).collect()
}

fn render_column_type(data_type: &str, data_length: &str, nullable: &str) -> String {
    let mut rendered = data_type.to_string();
    if !data_length.is_empty() && (data_type.contains("CHAR") || data_type.contains("RAW")) {
        rendered.push_str(&format!("({data_length})"));
    }
    if nullable == "N" {
        rendered.push_str(" NOT NULL");
    }
    rendered
}

fn render_constraint(constraint_type: &str, table: &str, condition: &str) -> String {
    let described = match constraint_type {
        "P" => "PRIMARY KEY",
        "R" => "FOREIGN KEY",
        "U" => "UNIQUE",
        "C" => "CHECK",
        other => other,
    };
    let condition = condition.trim();
    if described == "CHECK" && !condition.is_empty() {
        format!("{described} on {table}: {condition}")
    } else {
        format!("{described} on {table}")
    }
}

fn render_index(table: &str, uniqueness: &str) -> String {
    if uniqueness.is_empty() {
        format!("on {table}")
    } else {
        format!("{uniqueness} on {table}")
    }
}

fn render_synonym(table_owner: &str, table: &str) -> String {
    if table_owner.is_empty() {
        format!("FOR {table}")
    } else {
        format!("FOR {table_owner}.{table}")
    }
}

fn render_table_definition(table: &str, rows: &[Row]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let mut lines = vec![format!("TABLE {table} (")];
    for row in rows {
        let rendered = render_column_type(text(row, 1), text(row, 2), text(row, 3));
        lines.push(format!("  {} {rendered}", text(row, 0)));
    }
    lines.push(")".to_string());
    lines.join("\n")
}

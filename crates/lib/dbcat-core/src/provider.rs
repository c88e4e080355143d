//! Connection-provider boundary.
//!
//! The catalog driver itself is an external collaborator: this subsystem
//! only asks the provider for a live connection, runs one read-only query,
//! and drops the connection. Pooling, retries, authentication, and
//! timeouts are the provider's concern.

use std::error::Error;
use std::fmt;

/// One catalog result row: positional, text-typed columns.
///
/// The fetcher authors every statement, so positional access is
/// unambiguous. `None` is a SQL NULL.
pub type Row = Vec<Option<String>>;

/// Driver-level failure reported by a provider or connection.
#[derive(Debug, Clone)]
pub struct QueryError {
    message: String,
}

impl QueryError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for QueryError {}

/// An open catalog connection able to run one read-only query.
pub trait CatalogConnection {
    /// Executes `sql` with positional text binds and returns all rows.
    ///
    /// # Errors
    /// Returns `QueryError` if statement preparation or execution fails.
    fn query(&self, sql: &str, binds: &[&str]) -> Result<Vec<Row>, QueryError>;
}

/// A capability yielding an open, live catalog connection on demand.
pub trait ConnectionProvider {
    type Conn: CatalogConnection;

    /// Opens a fresh connection for a single catalog operation.
    ///
    /// # Errors
    /// Returns `QueryError` if the connection cannot be established.
    fn connect(&self) -> Result<Self::Conn, QueryError>;
}

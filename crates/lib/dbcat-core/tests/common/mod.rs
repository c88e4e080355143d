//! Scripted in-memory connection provider for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dbcat_core::provider::{CatalogConnection, ConnectionProvider, QueryError, Row};

struct Rule {
    fragment: &'static str,
    outcome: Result<Vec<Row>, &'static str>,
}

/// A provider that answers queries by matching SQL fragments against a
/// fixed script, and counts how many connections it hands out.
#[derive(Clone)]
pub struct ScriptedProvider {
    connects: Arc<AtomicUsize>,
    rules: Arc<Vec<Rule>>,
}

impl ScriptedProvider {
    pub fn script() -> ScriptBuilder {
        ScriptBuilder { rules: Vec::new() }
    }

    /// How many connections have been opened so far. Every catalog
    /// operation opens exactly one.
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

pub struct ScriptBuilder {
    rules: Vec<Rule>,
}

impl ScriptBuilder {
    #[must_use]
    pub fn rows(mut self, fragment: &'static str, rows: Vec<Row>) -> Self {
        self.rules.push(Rule {
            fragment,
            outcome: Ok(rows),
        });
        self
    }

    #[must_use]
    pub fn failure(mut self, fragment: &'static str, message: &'static str) -> Self {
        self.rules.push(Rule {
            fragment,
            outcome: Err(message),
        });
        self
    }

    pub fn build(self) -> ScriptedProvider {
        ScriptedProvider {
            connects: Arc::new(AtomicUsize::new(0)),
            rules: Arc::new(self.rules),
        }
    }
}

pub struct ScriptedConnection {
    rules: Arc<Vec<Rule>>,
}

impl ConnectionProvider for ScriptedProvider {
    type Conn = ScriptedConnection;

    fn connect(&self) -> Result<Self::Conn, QueryError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedConnection {
            rules: self.rules.clone(),
        })
    }
}

impl CatalogConnection for ScriptedConnection {
    fn query(&self, sql: &str, _binds: &[&str]) -> Result<Vec<Row>, QueryError> {
        let rule = self
            .rules
            .iter()
            .find(|rule| sql.contains(rule.fragment))
            .ok_or_else(|| QueryError::new(format!("unscripted query: {sql}")))?;
        match &rule.outcome {
            Ok(rows) => Ok(rows.clone()),
            Err(message) => Err(QueryError::new(*message)),
        }
    }
}

/// Builds a row of non-null text columns.
pub fn row(values: &[&str]) -> Row {
    values.iter().map(|value| Some((*value).to_string())).collect()
}

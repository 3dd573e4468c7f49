// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::loader::{is_yaml, TableLoader};
use super::rule::RuleTable;
use crate::error::DecisionError;

/// Named rule tables shared between concurrent evaluations.
///
/// Tables are immutable once registered; callers get an `Arc` and evaluate
/// against their own contexts.
#[derive(Clone)]
pub struct TableRegistry {
    tables: Arc<RwLock<HashMap<String, Arc<RuleTable>>>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a table under `name`, replacing any previous one
    pub async fn register(&self, name: impl Into<String>, table: RuleTable) {
        let mut tables = self.tables.write().await;
        tables.insert(name.into(), Arc::new(table));
    }

    pub async fn get(&self, name: &str) -> Option<Arc<RuleTable>> {
        let tables = self.tables.read().await;
        tables.get(name).cloned()
    }

    /// Registered table names, sorted
    pub async fn names(&self) -> Vec<String> {
        let tables = self.tables.read().await;
        let mut names: Vec<String> = tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Load every `.csv`, `.yaml` and `.yml` file in `dir`, keyed by file stem.
    ///
    /// The first table that fails to load aborts the whole load.
    pub async fn load_dir<P: AsRef<Path>>(&self, dir: P) -> Result<usize, DecisionError> {
        let dir = dir.as_ref();
        let loader = TableLoader::new();
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            DecisionError::config(format!("Cannot read tables dir {}: {}", dir.display(), e))
        })?;

        let mut loaded = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_table = is_yaml(&path) || path.extension().is_some_and(|ext| ext == "csv");
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_table {
                continue;
            }

            let table = loader
                .load(&path)
                .map_err(|e| DecisionError::load(stem, e))?;
            log::info!("Registered table: {}", stem);
            self.register(stem, table).await;
            loaded += 1;
        }

        Ok(loaded)
    }
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

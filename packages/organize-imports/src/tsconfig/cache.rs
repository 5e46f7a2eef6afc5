use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::alias_table::AliasTable;
use crate::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
use crate::logging::Logger;

/// Alias tables keyed by resolved tsconfig path.
///
/// Tables never change once inserted. Two threads missing the same key at
/// once both build the table and one of the (identical) results is kept.
/// A tsconfig that cannot be read or parsed is cached as an empty table, so
/// the failure is reported once per cache.
#[derive(Debug, Default)]
pub struct AliasTableCache {
    tables: RwLock<HashMap<AbsoluteFsPath, Arc<AliasTable>>>,
}

impl AliasTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &self,
        fs: &dyn ReadonlyFileSystem,
        tsconfig_path: &AbsoluteFsPath,
        logger: &dyn Logger,
    ) -> Arc<AliasTable> {
        if let Some(table) = self.get(tsconfig_path) {
            return table;
        }

        let table = match AliasTable::load(fs, tsconfig_path) {
            Ok(table) => {
                logger.debug(&format!(
                    "Loaded {} path alias(es) from {}",
                    table.entries().len(),
                    tsconfig_path
                ));
                table
            }
            Err(e) => {
                logger.warn(&format!(
                    "Ignoring path aliases from {}: {:#}",
                    tsconfig_path, e
                ));
                AliasTable::empty()
            }
        };

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables
            .entry(tsconfig_path.clone())
            .or_insert_with(|| Arc::new(table))
            .clone()
    }

    pub fn get(&self, tsconfig_path: &AbsoluteFsPath) -> Option<Arc<AliasTable>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.get(tsconfig_path).cloned()
    }

    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every table, e.g. after tsconfig files changed on disk.
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

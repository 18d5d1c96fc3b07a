// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Table catalog
//!
//! Hands out table identifiers and resolves tables by id or name. Scan
//! operators carry the identifier into the node-initialization hook, where
//! it is matched against output column sources.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::table::MemoryTable;
use crate::core::{Error, Result, Row, Schema, TableId};

/// Registry of in-memory tables
#[derive(Debug, Default)]
pub struct Catalog {
    tables: FxHashMap<TableId, Arc<MemoryTable>>,
    /// Lowercase table name -> id
    names: FxHashMap<String, TableId>,
    next_id: u32,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a table
    pub fn create_table(&mut self, schema: Schema, rows: Vec<Row>) -> Result<Arc<MemoryTable>> {
        let key = schema.table_name.to_lowercase();
        if self.names.contains_key(&key) {
            return Err(Error::TableAlreadyExists(schema.table_name));
        }

        self.next_id += 1;
        let id = TableId(self.next_id);
        let table = Arc::new(MemoryTable::new(id, schema, rows)?);

        self.tables.insert(id, Arc::clone(&table));
        self.names.insert(key, id);
        Ok(table)
    }

    /// Look up a table by id
    pub fn table(&self, id: TableId) -> Result<Arc<MemoryTable>> {
        self.tables
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::TableNotFound(id.to_string()))
    }

    /// Look up a table by name (case-insensitive)
    pub fn table_by_name(&self, name: &str) -> Result<Arc<MemoryTable>> {
        let id = self
            .names
            .get(&name.to_lowercase())
            .ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        self.table(*id)
    }

    /// Number of registered tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataType, SchemaBuilder, Value};

    #[test]
    fn test_create_and_lookup() {
        let mut catalog = Catalog::new();
        let albums = catalog
            .create_table(
                SchemaBuilder::new("Albums")
                    .add("id", DataType::Integer)
                    .build(),
                vec![Row::from_values(vec![Value::integer(1)])],
            )
            .unwrap();
        let tracks = catalog
            .create_table(
                SchemaBuilder::new("tracks")
                    .add("id", DataType::Integer)
                    .build(),
                Vec::new(),
            )
            .unwrap();

        assert_ne!(albums.id(), tracks.id());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.table_by_name("albums").unwrap().id(), albums.id());
        assert_eq!(catalog.table(tracks.id()).unwrap().name(), "tracks");
        assert!(matches!(
            catalog.table_by_name("artists"),
            Err(Error::TableNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut catalog = Catalog::new();
        let schema = SchemaBuilder::new("t").add("id", DataType::Integer).build();
        catalog.create_table(schema.clone(), Vec::new()).unwrap();
        assert!(matches!(
            catalog.create_table(schema, Vec::new()),
            Err(Error::TableAlreadyExists(_))
        ));
        assert_eq!(catalog.len(), 1);
    }
}

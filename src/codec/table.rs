//! The three-column (Key, Value, Type) property table.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// One encoded property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyRow {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
    /// Type tag, e.g. `"Array of int"`.
    #[serde(rename = "Type")]
    pub type_tag: String,
}

impl PropertyRow {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            type_tag: type_tag.into(),
        }
    }
}

/// Rows indexed by their Key column.
///
/// Keys are unique: inserting a row whose key is already present replaces the
/// earlier row. On the wire the table is a sequence of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PropertyRow>", into = "Vec<PropertyRow>")]
pub struct PropertyTable {
    rows: BTreeMap<String, PropertyRow>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `row`, returning the row it replaced.
    pub fn insert(&mut self, row: PropertyRow) -> Option<PropertyRow> {
        self.rows.insert(row.key.clone(), row)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyRow> {
        self.rows.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in key order.
    pub fn rows(&self) -> btree_map::Values<'_, String, PropertyRow> {
        self.rows.values()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, PropertyRow> {
        self.rows.keys()
    }
}

impl FromIterator<PropertyRow> for PropertyTable {
    fn from_iter<I: IntoIterator<Item = PropertyRow>>(iter: I) -> Self {
        let mut table = PropertyTable::new();
        for row in iter {
            table.insert(row);
        }
        table
    }
}

impl From<Vec<PropertyRow>> for PropertyTable {
    fn from(rows: Vec<PropertyRow>) -> Self {
        rows.into_iter().collect()
    }
}

impl From<PropertyTable> for Vec<PropertyRow> {
    fn from(table: PropertyTable) -> Self {
        table.rows.into_values().collect()
    }
}

impl IntoIterator for PropertyTable {
    type Item = PropertyRow;
    type IntoIter = btree_map::IntoValues<String, PropertyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_values()
    }
}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = &'a PropertyRow;
    type IntoIter = btree_map::Values<'a, String, PropertyRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.values()
    }
}

use crate::infrastructure::marketplace::RawCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MISSING_NAME: &str = "N/A";

/// One node of the marketplace taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category_id: i64,
    pub display_name: String,
    pub original_name: String,
    pub parent_id: Option<i64>,
    pub has_children: bool,
}

impl CategoryEntry {
    /// Returns `None` for records without a usable id (absent or zero).
    pub fn from_raw(raw: RawCategory) -> Option<Self> {
        let category_id = raw.category_id.filter(|id| *id != 0)?;

        Some(Self {
            category_id,
            display_name: raw
                .display_category_name
                .unwrap_or_else(|| MISSING_NAME.to_string()),
            original_name: raw
                .original_category_name
                .unwrap_or_else(|| MISSING_NAME.to_string()),
            parent_id: raw.parent_category_id,
            has_children: raw.has_children.unwrap_or(false),
        })
    }
}

/// Category id lookup over one shop's taxonomy in one language.
///
/// Keeps the taxonomy order for listing. A repeated id keeps its first
/// position and takes the values of the last record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    entries: Vec<CategoryEntry>,
    positions: HashMap<i64, usize>,
}

impl CategoryIndex {
    pub fn build(entries: impl IntoIterator<Item = CategoryEntry>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            match index.positions.get(&entry.category_id) {
                Some(&position) => index.entries[position] = entry,
                None => {
                    index.positions.insert(entry.category_id, index.entries.len());
                    index.entries.push(entry);
                }
            }
        }
        index
    }

    pub fn get(&self, category_id: i64) -> Option<&CategoryEntry> {
        self.positions
            .get(&category_id)
            .map(|&position| &self.entries[position])
    }

    pub fn contains(&self, category_id: i64) -> bool {
        self.positions.contains_key(&category_id)
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for `ids` in input order; unknown ids are skipped.
    pub fn resolve(&self, ids: &[i64]) -> Vec<CategoryEntry> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .cloned()
            .collect()
    }
}

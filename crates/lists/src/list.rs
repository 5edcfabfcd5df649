use serde::{Deserialize, Serialize};

use listkeep_core::ListId;

/// A named, ordered list of items.
///
/// Absent fields decode to their zero values (`0`, `""`, `[]`); only a
/// wrongly typed field is a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    #[serde(default)]
    pub id: ListId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl ShoppingList {
    pub fn new(id: i64, name: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            id: ListId::new(id),
            name: name.into(),
            items,
        }
    }
}

/// Partial update: present fields replace, absent (or `null`) fields are kept.
///
/// `items` replaces the whole sequence, even when it is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<String>>,
}

impl ShoppingListPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.items.is_none()
    }

    /// Apply to `list` in place.
    pub fn apply_to(self, list: &mut ShoppingList) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(items) = self.items {
            list.items = items;
        }
    }
}

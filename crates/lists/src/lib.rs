//! `listkeep-lists` — the shopping list resource and its in-memory store.

pub mod list;
pub mod store;

pub use list::{ShoppingList, ShoppingListPatch};
pub use store::ListStore;

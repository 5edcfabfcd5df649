//! In-memory, insertion-ordered list store.
//!
//! Every operation takes the lock exactly once, so the scan for an id and
//! the write at the found index cannot interleave with another request.
//! Lookups are linear scans; the store is sized for small collections.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use listkeep_core::{DomainError, DomainResult, ListId};

use crate::{ShoppingList, ShoppingListPatch};

#[derive(Debug, Default)]
pub struct ListStore {
    lists: RwLock<Vec<ShoppingList>>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<ShoppingList>> {
        self.lists.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ShoppingList>> {
        self.lists.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn position(lists: &[ShoppingList], id: ListId) -> Option<usize> {
        lists.iter().position(|l| l.id == id)
    }

    /// Append `list` verbatim. Ids stay unique: a taken id is a conflict.
    pub fn create(&self, list: ShoppingList) -> DomainResult<ShoppingList> {
        let mut lists = self.write();
        if Self::position(&lists, list.id).is_some() {
            return Err(DomainError::conflict(format!("list {} already exists", list.id)));
        }
        lists.push(list.clone());
        Ok(list)
    }

    /// Every list, in store order.
    pub fn list_all(&self) -> Vec<ShoppingList> {
        self.read().clone()
    }

    pub fn get(&self, id: ListId) -> DomainResult<ShoppingList> {
        let lists = self.read();
        Self::position(&lists, id)
            .map(|i| lists[i].clone())
            .ok_or(DomainError::not_found(id))
    }

    pub fn contains(&self, id: ListId) -> bool {
        Self::position(&self.read(), id).is_some()
    }

    /// Overwrite id, name and items of the list at `id`.
    ///
    /// The stored id becomes `list.id`; moving onto an id held by another
    /// list is a conflict.
    pub fn replace(&self, id: ListId, list: ShoppingList) -> DomainResult<ShoppingList> {
        let mut lists = self.write();
        let idx = Self::position(&lists, id).ok_or(DomainError::not_found(id))?;
        if list.id != id && Self::position(&lists, list.id).is_some() {
            return Err(DomainError::conflict(format!(
                "cannot move list {id} to id {}: already taken",
                list.id
            )));
        }
        lists[idx] = list.clone();
        Ok(list)
    }

    pub fn patch(&self, id: ListId, patch: ShoppingListPatch) -> DomainResult<ShoppingList> {
        let mut lists = self.write();
        let idx = Self::position(&lists, id).ok_or(DomainError::not_found(id))?;
        patch.apply_to(&mut lists[idx]);
        Ok(lists[idx].clone())
    }

    /// Append one item to the end of the list at `id`.
    pub fn push(&self, id: ListId, item: String) -> DomainResult<ShoppingList> {
        let mut lists = self.write();
        let idx = Self::position(&lists, id).ok_or(DomainError::not_found(id))?;
        lists[idx].items.push(item);
        Ok(lists[idx].clone())
    }

    /// Remove the list at `id`, keeping the relative order of the rest.
    pub fn delete(&self, id: ListId) -> DomainResult<ShoppingList> {
        let mut lists = self.write();
        let idx = Self::position(&lists, id).ok_or(DomainError::not_found(id))?;
        Ok(lists.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

use crate::data_models::{Category, Product};
use std::collections::VecDeque;

pub trait Keyed {
    fn key(&self) -> i32;
}

impl Keyed for Product {
    fn key(&self) -> i32 {
        self.id
    }
}

impl Keyed for Category {
    fn key(&self) -> i32 {
        self.id
    }
}

/// Client-side projection of a server list, keyed by primary key.
///
/// Newly created and freshly edited records go to the head, so an edit moves
/// its row to the top of the list.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalList<T> {
    items: VecDeque<T>,
}

impl<T> Default for LocalList<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T: Keyed> LocalList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps the whole projection for a fresh server listing.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = VecDeque::from(items);
    }

    pub fn insert_at_head(&mut self, item: T) {
        self.items.push_front(item);
    }

    pub fn replace_by_key(&mut self, item: T) {
        let key = item.key();
        self.items.retain(|existing| existing.key() != key);
        self.items.push_front(item);
    }

    pub fn remove_by_key(&mut self, key: i32) -> Option<T> {
        let position = self.items.iter().position(|item| item.key() == key)?;
        self.items.remove(position)
    }

    pub fn get(&self, key: i32) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> Vec<i32> {
        self.items.iter().map(Keyed::key).collect()
    }
}

impl<'a, T> IntoIterator for &'a LocalList<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

//! # Entity Collection
//!
//! A normalized, ordered container for cached entities.
//!
//! [`EntityCollection`] keeps two views of the same set of items:
//! - an id → item map for O(1) lookup
//! - an id sequence kept sorted by the collection's comparator
//!
//! Both views always describe exactly the same ids. All mutation goes through
//! methods that maintain the ordering, so callers never re-sort.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bulletin_app::views::EntityCollection;
//!
//! let mut posts = EntityCollection::new(Post::newest_first);
//! posts.upsert_all(fetched);
//! posts.patch_one(&post_id, |post| post.reactions.increment(ReactionName::Heart));
//! ```

use serde::ser::SerializeSeq;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// An item that carries its own identifier.
pub trait Entity {
    /// Identifier type.
    type Id: Eq + Hash + Clone;

    /// The item's identifier.
    fn entity_id(&self) -> &Self::Id;
}

impl Entity for bulletin_core::Post {
    type Id = bulletin_core::PostId;

    fn entity_id(&self) -> &Self::Id {
        &self.id
    }
}

impl Entity for bulletin_core::Notification {
    type Id = bulletin_core::NotificationId;

    fn entity_id(&self) -> &Self::Id {
        &self.id
    }
}

/// Total order used to keep the id sequence sorted.
pub type Comparator<Item> = fn(&Item, &Item) -> Ordering;

/// Normalized collection with a comparator-ordered id sequence.
///
/// # Invariants
///
/// - every id in the sequence has exactly one entry in the map and vice versa
/// - the sequence is sorted by the comparator; ties keep insertion order
///   (stable)
#[derive(Clone)]
pub struct EntityCollection<Id, Item>
where
    Id: Eq + Hash + Clone,
{
    entities: HashMap<Id, Item>,
    order: Vec<Id>,
    comparator: Comparator<Item>,
}

impl<Id, Item> EntityCollection<Id, Item>
where
    Id: Eq + Hash + Clone,
    Item: Entity<Id = Id>,
{
    /// Create an empty collection ordered by `comparator`.
    pub fn new(comparator: Comparator<Item>) -> Self {
        Self {
            entities: HashMap::new(),
            order: Vec::new(),
            comparator,
        }
    }

    // ─── Queries ─────────────────────────────────────────────

    /// Get an item by ID.
    pub fn get(&self, id: &Id) -> Option<&Item> {
        self.entities.get(id)
    }

    /// Check if an item exists.
    pub fn contains(&self, id: &Id) -> bool {
        self.entities.contains_key(id)
    }

    /// IDs in comparator order.
    pub fn ids(&self) -> &[Id] {
        &self.order
    }

    /// Items in comparator order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.order.iter().filter_map(|id| self.entities.get(id))
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ─── Mutations ───────────────────────────────────────────

    /// Replace the whole collection with `items`.
    ///
    /// Items are sorted stably, so comparator ties keep their relative input
    /// order. A duplicated id keeps its first position and its last value.
    pub fn upsert_all(&mut self, items: impl IntoIterator<Item = Item>) {
        let mut slots: HashMap<Id, usize> = HashMap::new();
        let mut deduped: Vec<Item> = Vec::new();
        for item in items {
            match slots.get(item.entity_id()).copied() {
                Some(slot) => deduped[slot] = item,
                None => {
                    slots.insert(item.entity_id().clone(), deduped.len());
                    deduped.push(item);
                }
            }
        }

        let comparator = self.comparator;
        deduped.sort_by(comparator);

        self.order = deduped.iter().map(|item| item.entity_id().clone()).collect();
        self.entities = deduped
            .into_iter()
            .map(|item| (item.entity_id().clone(), item))
            .collect();
    }

    /// Insert or replace a single item at its sorted position.
    ///
    /// The item lands after every existing item that does not sort after it.
    /// Returns the replaced item, if any.
    pub fn upsert_one(&mut self, item: Item) -> Option<Item> {
        let id = item.entity_id().clone();
        let previous = self.entities.remove(&id);
        if previous.is_some() {
            self.order.retain(|existing| existing != &id);
        }
        let position = self.insertion_point(&item);
        self.order.insert(position, id.clone());
        self.entities.insert(id, item);
        previous
    }

    /// Merge `items` into the collection, one [`upsert_one`](Self::upsert_one)
    /// at a time. Items not mentioned are kept.
    pub fn upsert_many(&mut self, items: impl IntoIterator<Item = Item>) {
        for item in items {
            self.upsert_one(item);
        }
    }

    /// Mutate every item, then restore the ordering (stably).
    pub fn patch_all(&mut self, mut f: impl FnMut(&mut Item)) {
        self.entities.values_mut().for_each(&mut f);
        let comparator = self.comparator;
        let entities = &self.entities;
        self.order.sort_by(|a, b| match (entities.get(a), entities.get(b)) {
            (Some(a), Some(b)) => comparator(a, b),
            _ => Ordering::Equal,
        });
    }

    /// Mutate an item in place. Returns `false` if the item is absent.
    ///
    /// The item keeps its slot unless the mutation broke the ordering, in
    /// which case it is moved to its new sorted position.
    pub fn patch_one(&mut self, id: &Id, f: impl FnOnce(&mut Item)) -> bool {
        let Some(item) = self.entities.get_mut(id) else {
            return false;
        };
        f(item);
        if !self.is_in_order(id) {
            if let Some(item) = self.entities.remove(id) {
                self.order.retain(|existing| existing != id);
                self.upsert_one(item);
            }
        }
        true
    }

    /// Remove an item, returning it if it existed.
    pub fn remove(&mut self, id: &Id) -> Option<Item> {
        let removed = self.entities.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.order.clear();
    }

    fn insertion_point(&self, item: &Item) -> usize {
        let comparator = self.comparator;
        self.order.partition_point(|existing| {
            self.entities
                .get(existing)
                .map_or(true, |existing| comparator(existing, item) != Ordering::Greater)
        })
    }

    fn is_in_order(&self, id: &Id) -> bool {
        let comparator = self.comparator;
        let Some(index) = self.order.iter().position(|existing| existing == id) else {
            return false;
        };
        let Some(item) = self.entities.get(id) else {
            return false;
        };
        let before = index
            .checked_sub(1)
            .and_then(|i| self.order.get(i))
            .and_then(|prev| self.entities.get(prev));
        let after = self
            .order
            .get(index + 1)
            .and_then(|next| self.entities.get(next));

        before.map_or(true, |prev| comparator(prev, item) != Ordering::Greater)
            && after.map_or(true, |next| comparator(item, next) != Ordering::Greater)
    }
}

// ─── Comparison / Debug ──────────────────────────────────────

impl<Id, Item> PartialEq for EntityCollection<Id, Item>
where
    Id: Eq + Hash + Clone,
    Item: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.entities == other.entities
    }
}

impl<Id, Item> fmt::Debug for EntityCollection<Id, Item>
where
    Id: Eq + Hash + Clone + fmt::Debug,
    Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.order.iter().filter_map(|id| self.entities.get(id)))
            .finish()
    }
}

// ─── Serde Support ───────────────────────────────────────────

/// Serializes as the ordered item list.
impl<Id, Item> Serialize for EntityCollection<Id, Item>
where
    Id: Eq + Hash + Clone,
    Item: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.order.len()))?;
        for item in self.order.iter().filter_map(|id| self.entities.get(id)) {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

// ─── Tests ───────────────────────────────────────────────────

#![forbid(unsafe_code)]

//! List-level configuration shared by many items.
//!
//! A [`SwipeableList`] holds list-wide [`ThresholdOverrides`] and owns the
//! registered items. Each item keeps its own overrides; the list re-resolves
//! every item whenever its own overrides change, so the item > list >
//! default order always holds.

use std::collections::BTreeMap;

use crate::config::ThresholdOverrides;
use crate::item::SwipeableItem;

/// Handle to an item registered in a [`SwipeableList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A list of swipeable items sharing list-level threshold overrides.
#[derive(Debug)]
pub struct SwipeableList<C = ()> {
    overrides: ThresholdOverrides,
    items: BTreeMap<ItemId, SwipeableItem<C>>,
    next_id: u64,
}

impl<C> Default for SwipeableList<C> {
    fn default() -> Self {
        Self::new(ThresholdOverrides::none())
    }
}

impl<C> SwipeableList<C> {
    #[must_use]
    pub fn new(overrides: ThresholdOverrides) -> Self {
        Self {
            overrides,
            items: BTreeMap::new(),
            next_id: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn overrides(&self) -> &ThresholdOverrides {
        &self.overrides
    }

    /// Replace the list-level overrides and re-resolve every item.
    pub fn set_overrides(&mut self, overrides: ThresholdOverrides) {
        self.overrides = overrides;
        for item in self.items.values_mut() {
            item.apply_list_overrides(&self.overrides);
        }
    }

    /// Register `item`, resolving its thresholds against this list.
    pub fn add(&mut self, mut item: SwipeableItem<C>) -> ItemId {
        item.apply_list_overrides(&self.overrides);
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, item);
        id
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&SwipeableItem<C>> {
        self.items.get(&id)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut SwipeableItem<C>> {
        self.items.get_mut(&id)
    }

    /// Replace one item's own overrides.
    ///
    /// Returns `false` if `id` is not registered.
    pub fn set_item_overrides(&mut self, id: ItemId, overrides: ThresholdOverrides) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.set_overrides(overrides, &self.overrides);
                true
            }
            None => false,
        }
    }

    /// Unregister an item, cancelling any pending frame it had.
    pub fn remove(&mut self, id: ItemId) -> Option<SwipeableItem<C>> {
        let mut item = self.items.remove(&id)?;
        item.teardown();
        Some(item)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registered items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &SwipeableItem<C>)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }
}

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::{ItemIdentity, Size};

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bounds required of item keys.
///
/// With `std` keys are hashed; without it they are ordered.
#[cfg(feature = "std")]
pub trait CarouselKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> CarouselKey for K {}

#[cfg(not(feature = "std"))]
pub trait CarouselKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> CarouselKey for K {}

/// Last measured size per materialized item.
///
/// Entries are written by the renderer after each layout pass and read before the next trim
/// decision. Entries for items that left the window are not pruned, except for the trimmed
/// item itself, which can never come back.
#[derive(Clone, Debug)]
pub struct SizeCache<K> {
    sizes: KeyMap<ItemIdentity<K>, Size>,
}

impl<K> Default for SizeCache<K> {
    fn default() -> Self {
        Self {
            sizes: KeyMap::new(),
        }
    }
}

impl<K: CarouselKey> SizeCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &ItemIdentity<K>) -> Option<Size> {
        self.sizes.get(identity).copied()
    }

    pub fn contains(&self, identity: &ItemIdentity<K>) -> bool {
        self.sizes.contains_key(identity)
    }

    /// Records a measurement, returning the previous one.
    pub fn insert(&mut self, identity: ItemIdentity<K>, size: Size) -> Option<Size> {
        self.sizes.insert(identity, size)
    }

    pub fn remove(&mut self, identity: &ItemIdentity<K>) -> Option<Size> {
        self.sizes.remove(identity)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemIdentity<K>, &Size)> {
        self.sizes.iter()
    }
}

impl<K: CarouselKey> Extend<(ItemIdentity<K>, Size)> for SizeCache<K> {
    fn extend<I: IntoIterator<Item = (ItemIdentity<K>, Size)>>(&mut self, iter: I) {
        for (identity, size) in iter {
            self.sizes.insert(identity, size);
        }
    }
}

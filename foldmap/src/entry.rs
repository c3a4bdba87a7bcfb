use std::hash::BuildHasher;
use std::mem;

use index_list::Index;

use crate::canon::Canonicalize;
use crate::map::{FoldingMap, Slot};

/// Entry API for the FoldingMap, similar to std::collections::HashMap
pub enum Entry<'a, K, V, C, S>
where
    C: Canonicalize<K>,
{
    Occupied(OccupiedEntry<'a, K, V, C, S>),
    Vacant(VacantEntry<'a, K, V, C, S>),
}

/// A view into an occupied equivalence class in the map
pub struct OccupiedEntry<'a, K, V, C, S>
where
    C: Canonicalize<K>,
{
    pub(crate) map: &'a mut FoldingMap<K, V, C, S>,
    pub(crate) at: Index,
    pub(crate) canonical: C::Canonical,
}

/// A view into a vacant equivalence class in the map
pub struct VacantEntry<'a, K, V, C, S>
where
    C: Canonicalize<K>,
{
    pub(crate) map: &'a mut FoldingMap<K, V, C, S>,
    pub(crate) key: K,
    pub(crate) canonical: C::Canonical,
}

impl<'a, K, V, C, S> Entry<'a, K, V, C, S>
where
    C: Canonicalize<K>,
    S: BuildHasher,
{
    /// Inserts `default` if the class is vacant; returns a mutable reference
    /// to the value either way.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(default),
        }
    }

    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(default()),
        }
    }

    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Applies `f` to the value if the class is occupied.
    pub fn and_modify(mut self, f: impl FnOnce(&mut V)) -> Self {
        if let Entry::Occupied(ref mut occupied) = self {
            f(occupied.get_mut());
        }
        self
    }

    /// The display key for an occupied class, the supplied raw key for a
    /// vacant one.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(occupied) => occupied.key(),
            Entry::Vacant(vacant) => vacant.key(),
        }
    }
}

impl<'a, K, V, C, S> OccupiedEntry<'a, K, V, C, S>
where
    C: Canonicalize<K>,
    S: BuildHasher,
{
    /// The display key of the class: the first raw spelling ever inserted,
    /// not necessarily the one this entry was looked up with.
    pub fn key(&self) -> &K {
        &self.map.order.get(self.at).unwrap().display
    }

    pub fn get(&self) -> &V {
        &self.map.order.get(self.at).unwrap().value
    }

    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.order.get_mut(self.at).unwrap().value
    }

    pub fn into_mut(self) -> &'a mut V {
        let Self { map, at, .. } = self;
        &mut map.order.get_mut(at).unwrap().value
    }

    /// Replaces the value, leaving the display key untouched.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the class, returning its display key and value.
    pub fn remove_entry(self) -> (K, V) {
        let Self { map, at, canonical } = self;
        map.index.remove(&canonical);
        let slot = map.order.remove(at).unwrap();
        (slot.display, slot.value)
    }
}

impl<'a, K, V, C, S> VacantEntry<'a, K, V, C, S>
where
    C: Canonicalize<K>,
    S: BuildHasher,
{
    /// The raw key this entry was created with; it becomes the display key
    /// on insertion.
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }

    pub fn insert(self, value: V) -> &'a mut V {
        let Self { map, key, canonical } = self;
        let at = map.order.insert_last(Slot { display: key, value });
        map.index.insert(canonical, at);
        &mut map.order.get_mut(at).unwrap().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_insert_vacant_then_occupied() {
        let mut d: FoldingMap<&str, u32> = FoldingMap::new();
        *d.entry("Clown").or_insert(1) += 10;
        assert_eq!(d["clown"], 11);

        // second spelling hits the same class, no new entry
        *d.entry("CLOWN").or_insert(99) += 1;
        assert_eq!(d["clown"], 12);
        assert_eq!(d.len(), 1);
        assert_eq!(d.keys().collect::<Vec<_>>(), [&"Clown"]);
    }

    #[test]
    fn test_and_modify_then_or_insert() {
        let mut d: FoldingMap<&str, u32> = FoldingMap::new();
        d.entry("word").and_modify(|count| *count += 1).or_insert(1);
        d.entry("WORD").and_modify(|count| *count += 1).or_insert(1);
        assert_eq!(d["Word"], 2);
    }

    #[test]
    fn test_occupied_key_is_display_key() {
        let mut d: FoldingMap<&str, u32> = FoldingMap::new();
        d.insert("Clown", 1);
        match d.entry("CLOWN") {
            Entry::Occupied(occupied) => assert_eq!(*occupied.key(), "Clown"),
            Entry::Vacant(_) => panic!("expected occupied"),
        }
    }

    #[test]
    fn test_vacant_key_becomes_display_key() {
        let mut d: FoldingMap<&str, u32> = FoldingMap::new();
        match d.entry("baNANA") {
            Entry::Occupied(_) => panic!("expected vacant"),
            Entry::Vacant(vacant) => {
                assert_eq!(*vacant.key(), "baNANA");
                vacant.insert(42);
            }
        }
        assert_eq!(d.keys().collect::<Vec<_>>(), [&"baNANA"]);
    }

    #[test]
    fn test_occupied_insert_keeps_display_key() {
        let mut d: FoldingMap<&str, &str> = FoldingMap::new();
        d.insert("Clown", "Bozo");
        match d.entry("CLOWN") {
            Entry::Occupied(mut occupied) => {
                assert_eq!(occupied.insert("Krusty"), "Bozo");
            }
            Entry::Vacant(_) => panic!("expected occupied"),
        }
        assert_eq!(d["clown"], "Krusty");
        assert_eq!(d.keys().collect::<Vec<_>>(), [&"Clown"]);
    }

    #[test]
    fn test_occupied_remove() {
        let mut d: FoldingMap<&str, u32> = FoldingMap::new();
        d.insert("Clown", 1);
        match d.entry("clown") {
            Entry::Occupied(occupied) => {
                assert_eq!(occupied.remove_entry(), ("Clown", 1));
            }
            Entry::Vacant(_) => panic!("expected occupied"),
        }
        assert!(d.is_empty());

        // removal through the entry resets the class like any other removal
        d.insert("cLOWn", 2);
        assert_eq!(d.keys().collect::<Vec<_>>(), [&"cLOWn"]);
    }

    #[test]
    fn test_or_default() {
        let mut d: FoldingMap<&str, Vec<u32>> = FoldingMap::new();
        d.entry("List").or_default().push(1);
        d.entry("LIST").or_default().push(2);
        assert_eq!(d["list"], vec![1, 2]);
    }
}

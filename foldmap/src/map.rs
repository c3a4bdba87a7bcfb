use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;
use std::ops;

use index_list::{Index, IndexList};
use rustc_hash::FxBuildHasher;

use crate::canon::{Canonicalize, CaseFold};
use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::iter::{IntoIter, Iter, Keys, Values};

/// One stored equivalence class: the first raw key seen for the class and
/// the most recently written value.
pub(crate) struct Slot<K, V> {
    pub(crate) display: K,
    pub(crate) value: V,
}

/// A map in which raw keys that fold to the same canonical form refer to the
/// same entry.
///
/// Keys are folded by a [`Canonicalize`] strategy, by default [`CaseFold`],
/// which makes lookups case-insensitive for textual keys. The first raw key
/// seen for each equivalence class is preserved as the *display key*: it is
/// what [`keys`](FoldingMap::keys) and [`iter`](FoldingMap::iter) yield, and
/// later writes through other spellings replace the value without touching
/// it. Removing an entry forgets its display key; a later re-insertion of an
/// equivalent key starts a fresh class at the current end of the iteration
/// order.
///
/// Iteration order is the order in which each equivalence class was first
/// inserted.
///
/// # Example
///
/// ```
/// use foldmap::FoldingMap;
///
/// let mut d: FoldingMap<&str, &str> = FoldingMap::new();
/// d.insert("Clown", "Bozo");
/// d.insert("clown", "Krusty");
/// assert_eq!(d["CLOWN"], "Krusty");
/// assert_eq!(d.keys().collect::<Vec<_>>(), [&"Clown"]);
/// ```
pub struct FoldingMap<K, V, C = CaseFold, S = FxBuildHasher>
where
    C: Canonicalize<K>,
{
    pub(crate) index: HashMap<C::Canonical, Index, S>,
    pub(crate) order: IndexList<Slot<K, V>>,
    pub(crate) canon: C,
}

impl<K, V> FoldingMap<K, V>
where
    CaseFold: Canonicalize<K>,
{
    /// Creates an empty map with case-insensitive key folding.
    pub fn new() -> Self {
        Self::with_canonicalizer(CaseFold)
    }
}

impl<K, V, C, S> FoldingMap<K, V, C, S>
where
    C: Canonicalize<K>,
    S: Default,
{
    /// Creates an empty map that folds keys with the given canonicalizer.
    pub fn with_canonicalizer(canon: C) -> Self {
        Self::with_canonicalizer_and_hasher(canon, S::default())
    }
}

impl<K, V, C, S> FoldingMap<K, V, C, S>
where
    C: Canonicalize<K>,
{
    /// Creates an empty map with the given canonicalizer and hash builder.
    pub fn with_canonicalizer_and_hasher(canon: C, hasher: S) -> Self {
        Self {
            index: HashMap::with_hasher(hasher),
            order: IndexList::new(),
            canon,
        }
    }

    /// Returns the canonicalizer this map folds keys with.
    pub fn canonicalizer(&self) -> &C {
        &self.canon
    }

    /// Returns the number of distinct equivalence classes in the map.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.index.len(), self.order.len());
        self.order.len()
    }

    /// Returns true if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterator over `(display key, value)` pairs in first-insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.order)
    }

    /// Iterator over display keys in first-insertion order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(&self.order)
    }

    /// Iterator over values in first-insertion order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(&self.order)
    }

    /// Calls `f` on every `(display key, value)` pair in first-insertion
    /// order, with mutable access to the value.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&K, &mut V)) {
        let mut at = self.order.first_index();
        while let Some(slot) = self.order.get_mut(at) {
            f(&slot.display, &mut slot.value);
            at = self.order.next_index(at);
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        let Self { index, order, .. } = self;
        index.clear();
        order.clear();
    }
}

impl<K, V, C, S> FoldingMap<K, V, C, S>
where
    C: Canonicalize<K>,
    S: BuildHasher,
{
    /// Returns a reference to the value of `key`'s equivalence class.
    ///
    /// Any spelling that folds to the same canonical form finds the entry.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized,
        C: Canonicalize<Q, Canonical = <C as Canonicalize<K>>::Canonical>,
    {
        let Self { index, order, canon } = self;
        let at = *index.get(&<C as Canonicalize<Q>>::canonicalize(canon, key))?;
        let slot = order.get(at).unwrap();
        Some(&slot.value)
    }

    /// Returns a mutable reference to the value of `key`'s equivalence class.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized,
        C: Canonicalize<Q, Canonical = <C as Canonicalize<K>>::Canonical>,
    {
        let Self { index, order, canon } = self;
        let at = *index.get(&<C as Canonicalize<Q>>::canonicalize(canon, key))?;
        let slot = order.get_mut(at).unwrap();
        Some(&mut slot.value)
    }

    /// Returns the display key and value of `key`'s equivalence class.
    ///
    /// The returned key is the first raw spelling ever inserted for the
    /// class, which may differ from `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        Q: ?Sized,
        C: Canonicalize<Q, Canonical = <C as Canonicalize<K>>::Canonical>,
    {
        let Self { index, order, canon } = self;
        let at = *index.get(&<C as Canonicalize<Q>>::canonicalize(canon, key))?;
        let slot = order.get(at).unwrap();
        Some((&slot.display, &slot.value))
    }

    /// Returns true if any spelling of `key`'s equivalence class is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized,
        C: Canonicalize<Q, Canonical = <C as Canonicalize<K>>::Canonical>,
    {
        self.index
            .contains_key(&<C as Canonicalize<Q>>::canonicalize(&self.canon, key))
    }

    /// Inserts a value for `key`'s equivalence class.
    ///
    /// If the class is absent a new entry is appended at the end of the
    /// iteration order and `key` becomes its display key. If the class is
    /// already present only the value is replaced; the display key recorded
    /// by the first insertion stays untouched and the supplied `key` is
    /// dropped. Returns the previous value, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Self { index, order, canon } = self;
        match index.entry(canon.canonicalize(&key)) {
            hash_map::Entry::Occupied(occupied) => {
                let slot = order.get_mut(*occupied.get()).unwrap();
                Some(mem::replace(&mut slot.value, value))
            }
            hash_map::Entry::Vacant(vacant) => {
                vacant.insert(order.insert_last(Slot { display: key, value }));
                None
            }
        }
    }

    /// Inserts a value for `key`'s equivalence class, using the canonical
    /// form of `key` as the display key.
    ///
    /// Useful when the preserved keys need to be predictable rather than
    /// whichever spelling happened to arrive first, for example to feed them
    /// into other, non-folding maps. Only the first insertion for a class
    /// records a display key, so a map populated exclusively through this
    /// method exposes canonical keys everywhere. Available when the
    /// canonical form is itself a valid key.
    pub fn insert_canonical(&mut self, key: K, value: V) -> Option<V>
    where
        C: Canonicalize<K, Canonical = K>,
    {
        let folded = self.canon.canonicalize(&key);
        self.insert(folded, value)
    }

    /// Inserts a value for `key`'s equivalence class, making `key` the new
    /// display key.
    ///
    /// Unlike [`insert`](FoldingMap::insert) this removes any existing entry
    /// for the class first, so the entry moves to the current end of the
    /// iteration order and the supplied spelling always wins. Returns the
    /// previous value, if any.
    pub fn insert_fresh(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.remove(&key);
        self.insert(key, value);
        previous
    }

    /// Removes `key`'s equivalence class and returns its value.
    ///
    /// A failed removal leaves the map untouched, including the display-key
    /// bookkeeping.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized,
        C: Canonicalize<Q, Canonical = <C as Canonicalize<K>>::Canonical>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`'s equivalence class and returns its display key and
    /// value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: ?Sized,
        C: Canonicalize<Q, Canonical = <C as Canonicalize<K>>::Canonical>,
    {
        let Self { index, order, canon } = self;
        let at = index.remove(&<C as Canonicalize<Q>>::canonicalize(canon, key))?;
        let slot = order.remove(at).unwrap();
        Some((slot.display, slot.value))
    }

    /// Returns the entry for `key`'s equivalence class, for in-place
    /// manipulation.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C, S> {
        let canonical = self.canon.canonicalize(&key);
        match self.index.get(&canonical).copied() {
            Some(at) => Entry::Occupied(OccupiedEntry {
                map: self,
                at,
                canonical,
            }),
            None => Entry::Vacant(VacantEntry {
                map: self,
                key,
                canonical,
            }),
        }
    }
}

impl<K, V, C, S> Default for FoldingMap<K, V, C, S>
where
    C: Canonicalize<K> + Default,
    S: Default,
{
    fn default() -> Self {
        Self::with_canonicalizer(C::default())
    }
}

impl<K, V, C, S> Clone for FoldingMap<K, V, C, S>
where
    K: Clone,
    V: Clone,
    C: Canonicalize<K> + Clone,
    S: BuildHasher + Default,
{
    fn clone(&self) -> Self {
        // Rebuild by re-insertion; canonicalization is pure so the clone
        // folds identically.
        let mut copy = Self::with_canonicalizer(self.canon.clone());
        for (key, value) in self.iter() {
            copy.insert(key.clone(), value.clone());
        }
        copy
    }
}

impl<K, V, C, S> fmt::Debug for FoldingMap<K, V, C, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Canonicalize<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two folding maps are equal when they associate the same canonical keys
/// with equal values, each side folded by its own canonicalizer. Display
/// keys and iteration order do not participate.
impl<K, V, C, S> PartialEq for FoldingMap<K, V, C, S>
where
    V: PartialEq,
    C: Canonicalize<K>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| {
                match other.index.get(&other.canon.canonicalize(key)) {
                    Some(&at) => other.order.get(at).unwrap().value == *value,
                    None => false,
                }
            })
    }
}

impl<K, V, C, S> Eq for FoldingMap<K, V, C, S>
where
    V: Eq,
    C: Canonicalize<K>,
    S: BuildHasher,
{
}

/// Comparison against a plain map goes by display keys: every display key
/// must be present in `other` verbatim, with an equal value.
impl<K, V, C, S, S2> PartialEq<HashMap<K, V, S2>> for FoldingMap<K, V, C, S>
where
    K: Hash + Eq,
    V: PartialEq,
    C: Canonicalize<K>,
    S2: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S2>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| *v == *value))
    }
}

impl<K, V, C, S, Q> ops::Index<&Q> for FoldingMap<K, V, C, S>
where
    Q: ?Sized,
    C: Canonicalize<K> + Canonicalize<Q, Canonical = <C as Canonicalize<K>>::Canonical>,
    S: BuildHasher,
{
    type Output = V;

    /// Panics if no entry exists for `key`'s equivalence class.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// Pairs are applied as sequential inserts in the source's own iteration
/// order: the first spelling seen for an equivalence class fixes the display
/// key, the last value wins. A source containing several spellings of one
/// class therefore produces a deterministic result for a given iterator, but
/// no particular outcome is promised across sources whose own order is
/// unspecified.
impl<K, V, C, S> FromIterator<(K, V)> for FoldingMap<K, V, C, S>
where
    C: Canonicalize<K> + Default,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// Applies sequential inserts in iteration order; see the `FromIterator`
/// impl for the folding rules.
impl<K, V, C, S> Extend<(K, V)> for FoldingMap<K, V, C, S>
where
    C: Canonicalize<K>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C, S, const N: usize> From<[(K, V); N]> for FoldingMap<K, V, C, S>
where
    C: Canonicalize<K> + Default,
    S: BuildHasher + Default,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<K, V, C, S> IntoIterator for FoldingMap<K, V, C, S>
where
    C: Canonicalize<K>,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.order)
    }
}

impl<'a, K, V, C, S> IntoIterator for &'a FoldingMap<K, V, C, S>
where
    C: Canonicalize<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

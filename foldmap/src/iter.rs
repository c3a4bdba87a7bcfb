use std::iter::FusedIterator;

use index_list::{Index, IndexList};

use crate::map::Slot;

/// Iterator over `(display key, value)` pairs of a FoldingMap, in
/// first-insertion order of their equivalence classes.
pub struct Iter<'a, K, V> {
    order: &'a IndexList<Slot<K, V>>,
    at: Index,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(order: &'a IndexList<Slot<K, V>>) -> Self {
        Self {
            order,
            at: order.first_index(),
            remaining: order.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.order.get(self.at)?;
        self.at = self.order.next_index(self.at);
        self.remaining -= 1;
        Some((&slot.display, &slot.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            at: self.at,
            remaining: self.remaining,
        }
    }
}

/// Iterator over the display keys of a FoldingMap
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(order: &'a IndexList<Slot<K, V>>) -> Self {
        Self {
            inner: Iter::new(order),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of a FoldingMap
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(order: &'a IndexList<Slot<K, V>>) -> Self {
        Self {
            inner: Iter::new(order),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Consuming iterator, yielding owned `(display key, value)` pairs in
/// first-insertion order.
pub struct IntoIter<K, V> {
    order: IndexList<Slot<K, V>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(order: IndexList<Slot<K, V>>) -> Self {
        Self { order }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.order.remove_first()?;
        Some((slot.display, slot.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.order.len();
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use crate::FoldingMap;

    fn sample() -> FoldingMap<&'static str, u32> {
        let mut d: FoldingMap<&str, u32> = FoldingMap::new();
        d.insert("One", 1);
        d.insert("Two", 2);
        d.insert("Three", 3);
        d.insert("TWO", 20);
        d
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let d = sample();
        let items: Vec<_> = d.iter().collect();
        assert_eq!(items, [(&"One", &1), (&"Two", &20), (&"Three", &3)]);
    }

    #[test]
    fn test_iter_is_exact_size_and_restartable() {
        let d = sample();
        let iter = d.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.count(), 3);
        // a fresh iterator starts over
        assert_eq!(d.iter().count(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let d = sample();
        assert_eq!(d.keys().collect::<Vec<_>>(), [&"One", &"Two", &"Three"]);
        assert_eq!(d.values().collect::<Vec<_>>(), [&1, &20, &3]);
    }

    #[test]
    fn test_into_iter_drains_in_order() {
        let d = sample();
        let pairs: Vec<_> = d.into_iter().collect();
        assert_eq!(pairs, [("One", 1), ("Two", 20), ("Three", 3)]);
    }

    #[test]
    fn test_borrowing_into_iterator() {
        let d = sample();
        let mut seen = Vec::new();
        for (key, value) in &d {
            seen.push((*key, *value));
        }
        assert_eq!(seen, [("One", 1), ("Two", 20), ("Three", 3)]);
    }

    #[test]
    fn test_empty_iterators() {
        let d: FoldingMap<&str, u32> = FoldingMap::new();
        assert_eq!(d.iter().next(), None);
        assert_eq!(d.keys().len(), 0);
        assert_eq!(d.into_iter().next(), None);
    }
}

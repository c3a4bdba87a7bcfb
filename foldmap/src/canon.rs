use std::hash::Hash;

/// Strategy that folds raw keys into their canonical form.
///
/// Two raw keys address the same entry of a [`FoldingMap`](crate::FoldingMap)
/// exactly when their canonical forms compare equal. The trait is implemented
/// for the borrowed form of the key, so one canonicalizer can serve both the
/// owned key type and the borrowed type used for lookups (`String` / `str`).
///
/// Implementations must be pure: the canonical form of a key may depend only
/// on the key itself, never on map state or interior mutability.
pub trait Canonicalize<K: ?Sized> {
    /// The folded key type used by the backing store.
    type Canonical: Hash + Eq;

    /// Returns the canonical representation of `key`.
    fn canonicalize(&self, key: &K) -> Self::Canonical;
}

/// Case-insensitive folding for textual keys; the default canonicalizer.
///
/// The canonical form is the Unicode lowercase of the text (locale
/// independent, not an ASCII-only byte lowering), so `"Clown"`, `"clown"`
/// and `"CLOWN"` all address the same entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseFold;

impl<K: AsRef<str> + ?Sized> Canonicalize<K> for CaseFold {
    type Canonical = String;

    fn canonicalize(&self, key: &K) -> String {
        key.as_ref().to_lowercase()
    }
}

/// No folding: every key is its own canonical form.
///
/// This is the conservative choice for keys that are not text, where no
/// natural equivalence exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<K: ToOwned + ?Sized> Canonicalize<K> for Identity
where
    K::Owned: Hash + Eq,
{
    type Canonical = K::Owned;

    fn canonicalize(&self, key: &K) -> K::Owned {
        key.to_owned()
    }
}

/// Folds textual keys by deleting all whitespace. Case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripWhitespace;

impl<K: AsRef<str> + ?Sized> Canonicalize<K> for StripWhitespace {
    type Canonical = String;

    fn canonicalize(&self, key: &K) -> String {
        key.as_ref().split_whitespace().collect()
    }
}

/// Folds sequence keys by sorting their elements, so `[1, 2, 3]` and
/// `[3, 2, 1]` address the same entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortElements;

impl<T: Ord + Clone + Hash> Canonicalize<[T]> for SortElements {
    type Canonical = Vec<T>;

    fn canonicalize(&self, key: &[T]) -> Vec<T> {
        let mut sorted = key.to_vec();
        sorted.sort();
        sorted
    }
}

impl<T: Ord + Clone + Hash> Canonicalize<Vec<T>> for SortElements {
    type Canonical = Vec<T>;

    fn canonicalize(&self, key: &Vec<T>) -> Vec<T> {
        <Self as Canonicalize<[T]>>::canonicalize(self, key)
    }
}

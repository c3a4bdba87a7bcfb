mod canon;
mod entry;
mod iter;
mod map;

pub use canon::{Canonicalize, CaseFold, Identity, SortElements, StripWhitespace};
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use map::FoldingMap;

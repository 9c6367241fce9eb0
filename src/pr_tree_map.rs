use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use alloc::boxed::Box;
use alloc::vec;

use crate::comparator::{Comparator, NaturalOrder};
use crate::protocol::{CapacityError, InsertOutcome, OrderedMap};
use crate::raw::{Descent, Handle, RawPrTree};

mod cursor;
mod entry;

pub use cursor::{Cursor, CursorMut, InvalidCursorError};
pub use entry::{Entry, OccupiedEntry, OccupiedError, VacantEntry};

/// Message for the one panic the convenience mutators share. The checked
/// protocol surface ([`OrderedMap::put`]/[`OrderedMap::probe`]) reports the
/// same condition as a [`CapacityError`] instead.
pub(crate) const CAPACITY_MSG: &str = "`PrTreeMap` - node handle space is exhausted!";

/// An ordered map based on a [path-reduction tree].
///
/// Entries are kept in the order defined by the map's [`Comparator`]; with the
/// default [`NaturalOrder`] comparator that is the key type's [`Ord`] order.
/// The comparator must be a strict total order over every key inserted, and a
/// key must never change its relative order while it is stored — violating
/// either is a logic error. The resulting behavior is unspecified (lookups
/// may fail, iteration order may be wrong) but never memory-unsafe.
///
/// Lookups, insertions, and removals take expected O(log n) comparisons. The
/// tree rebalances by rotating only when a rotation reduces its total
/// internal path length; a single operation may cascade O(n) rotations in
/// the worst case, but the amortized count per operation is below half a
/// rotation per level.
///
/// # Examples
///
/// ```
/// use prtree::PrTreeMap;
///
/// let mut movie_reviews = PrTreeMap::new();
///
/// // review some movies.
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key(&"Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove(&"The Blues Brothers");
///
/// // look up the values associated with some keys.
/// let to_find = ["Up!", "Office Space"];
/// for movie in &to_find {
///     match movie_reviews.get(movie) {
///        Some(review) => println!("{movie}: {review}"),
///        None => println!("{movie} is unreviewed.")
///     }
/// }
///
/// // iterate over everything.
/// for (movie, review) in &movie_reviews {
///     println!("{movie}: \"{review}\"");
/// }
/// ```
///
/// A map with a known list of entries can be initialized from an array:
///
/// ```
/// use prtree::PrTreeMap;
///
/// let solar_distance = PrTreeMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.first_key_value(), Some((&"Earth", &1.0)));
/// ```
///
/// [path-reduction tree]: crate
#[derive(Clone)]
pub struct PrTreeMap<K, V, C = NaturalOrder> {
    raw: RawPrTree<K, V>,
    cmp: C,
}

impl<K, V> PrTreeMap<K, V> {
    /// Creates an empty map ordered by the key type's [`Ord`] implementation.
    ///
    /// Allocates nothing until the first insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map: PrTreeMap<u32, &str> = PrTreeMap::new();
    /// map.insert(1, "one");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: RawPrTree::new(),
            cmp: NaturalOrder,
        }
    }

    /// Creates an empty map with node storage preallocated for `capacity`
    /// entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawPrTree::with_capacity(capacity),
            cmp: NaturalOrder,
        }
    }
}

impl<K, V, C> PrTreeMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`.
    ///
    /// Any `Fn(&K, &K) -> Ordering` closure works, as does any type
    /// implementing [`Comparator`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// // Order strings by length, then contents.
    /// let mut map = PrTreeMap::with_comparator(|a: &&str, b: &&str| {
    ///     a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    /// });
    /// map.insert("pear", 3);
    /// map.insert("fig", 1);
    /// map.insert("banana", 2);
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["fig", "pear", "banana"]);
    /// ```
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            raw: RawPrTree::new(),
            cmp,
        }
    }

    /// Creates an empty map ordered by `cmp`, with node storage preallocated
    /// for `capacity` entries.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            raw: RawPrTree::with_capacity(capacity),
            cmp,
        }
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns how many entries the map can hold without reallocating its
    /// node storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns a reference to the map's comparator.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Removes every entry, returning how many were removed. Dropped entries
    /// are torn down in bulk; node storage is released.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map = PrTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.clear(), 2);
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) -> usize {
        self.raw.clear()
    }

    /// Returns the entry with the smallest key under the comparator.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|h| self.raw.key_value(h))
    }

    /// Returns the entry with the largest key under the comparator.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|h| self.raw.key_value(h))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let handle = self.raw.first()?;
        Some(self.raw.remove_at(handle))
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let handle = self.raw.last()?;
        Some(self.raw.remove_at(handle))
    }

    /// Visits every entry in key order until `visit` returns `false`,
    /// returning how many entries were visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let map = PrTreeMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
    ///
    /// let mut seen = Vec::new();
    /// let visited = map.walk(|&k, _| {
    ///     seen.push(k);
    ///     k < 2 // stop after reaching key 2
    /// });
    /// assert_eq!(visited, 2);
    /// assert_eq!(seen, [1, 2]);
    /// ```
    pub fn walk<F>(&self, visit: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.raw.walk(visit)
    }

    /// Length in edges of the longest root-to-node path. Empty and
    /// single-entry maps report 0.
    ///
    /// Balance keeps this within a small constant factor of log2(len);
    /// exposed for diagnostics, not needed for map semantics.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Length in edges of the shortest path from the root to a node with an
    /// absent child.
    #[must_use]
    pub fn min_height(&self) -> usize {
        self.raw.min_height()
    }

    /// Internal path length: the sum over all entries of their depth. The
    /// rebalancing engine rotates exactly when doing so reduces this sum.
    #[must_use]
    pub fn path_length(&self) -> usize {
        self.raw.path_length()
    }

    /// Returns a cursor positioned at the first entry in key order (off-end
    /// when the map is empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let map = PrTreeMap::from([(1, "a"), (2, "b")]);
    /// let mut cur = map.cursor();
    /// assert_eq!(cur.key(), Some(&1));
    /// cur.move_next();
    /// assert_eq!(cur.key(), Some(&2));
    /// ```
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor {
            node: self.raw.first(),
            map: self,
        }
    }

    /// Returns a mutating cursor positioned at the first entry in key order.
    ///
    /// The cursor can replace values in place but cannot remove entries;
    /// removal under a live cursor is not supported by this backend — remove
    /// through the map and re-seek instead.
    #[must_use]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V, C> {
        CursorMut {
            node: self.raw.first(),
            map: self,
        }
    }

    /// Gets an iterator over the entries, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let map = PrTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let first = map.iter().next();
    /// assert_eq!(first, Some((&1, &"a")));
    /// ```
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.len(),
            map: self,
        }
    }

    /// Gets an iterator over the keys, in sorted order.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values, ordered by their keys.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }

    /// Panics unless every structural invariant holds: weight bookkeeping,
    /// parent back-references, strict key ordering, and entry accounting.
    #[doc(hidden)]
    pub fn assert_invariants(&self)
    where
        C: Comparator<K>,
    {
        self.raw.check_invariants(&self.cmp);
    }
}

impl<K, V, C> PrTreeMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let map = PrTreeMap::from([(1, "a")]);
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let handle = self.raw.find(&self.cmp, key)?;
        Some(self.raw.value(handle))
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.raw.find(&self.cmp, key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let handle = self.raw.find(&self.cmp, key)?;
        Some(self.raw.key_value(handle))
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.find(&self.cmp, key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present its value is replaced and the old
    /// value is returned; the stored key is not updated.
    ///
    /// # Panics
    ///
    /// Panics if the map already holds the maximum number of entries the
    /// node handle space can name. [`OrderedMap::put`] reports the same
    /// condition as a recoverable [`CapacityError`] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map = PrTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.descend(&self.cmp, &key) {
            Descent::Found(handle) => Some(self.raw.replace_value(handle, value)),
            Descent::Vacant(anchor) => match self.raw.try_insert_at(anchor, key, value) {
                Ok(_) => None,
                Err(_) => panic!("{}", CAPACITY_MSG),
            },
        }
    }

    /// Inserts a key-value pair only if the key is absent.
    ///
    /// On success returns a mutable reference to the inserted value. If the
    /// key is occupied, nothing is mutated and the error carries both the
    /// rejected value and an [`OccupiedEntry`] for the existing entry.
    ///
    /// # Panics
    ///
    /// Panics on node handle space exhaustion, like [`PrTreeMap::insert`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map = PrTreeMap::new();
    /// assert!(map.try_insert(5, "a").is_ok());
    ///
    /// let err = map.try_insert(5, "b").unwrap_err();
    /// assert_eq!(err.entry.get(), &"a");
    /// assert_eq!(err.value, "b");
    /// assert_eq!(map.get(&5), Some(&"a"));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<&mut V, OccupiedError<'_, K, V, C>> {
        match self.raw.descend(&self.cmp, &key) {
            Descent::Found(node) => Err(OccupiedError {
                entry: OccupiedEntry { node, map: self },
                value,
            }),
            Descent::Vacant(anchor) => match self.raw.try_insert_at(anchor, key, value) {
                Ok(handle) => Ok(self.raw.value_mut(handle)),
                Err(_) => panic!("{}", CAPACITY_MSG),
            },
        }
    }

    /// Returns a mutable reference to the value stored under `key`,
    /// inserting `value` first if the key is absent. An existing value is
    /// left untouched and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics on node handle space exhaustion, like [`PrTreeMap::insert`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map = PrTreeMap::new();
    /// *map.get_or_insert("counter", 0) += 1;
    /// *map.get_or_insert("counter", 0) += 1;
    /// assert_eq!(map.get(&"counter"), Some(&2));
    /// ```
    pub fn get_or_insert(&mut self, key: K, value: V) -> &mut V {
        self.get_or_insert_with(key, || value)
    }

    /// Like [`PrTreeMap::get_or_insert`], but the default value is only
    /// constructed when an insertion actually happens.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let handle = match self.raw.descend(&self.cmp, &key) {
            Descent::Found(handle) => handle,
            Descent::Vacant(anchor) => match self.raw.try_insert_at(anchor, key, default()) {
                Ok(handle) => handle,
                Err(_) => panic!("{}", CAPACITY_MSG),
            },
        };
        self.raw.value_mut(handle)
    }

    /// Gets the entry under `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut count: PrTreeMap<&str, usize> = PrTreeMap::new();
    ///
    /// for word in ["a", "b", "a", "c", "a"] {
    ///     *count.entry(word).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(count.get(&"a"), Some(&3));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        match self.raw.descend(&self.cmp, &key) {
            Descent::Found(node) => Entry::Occupied(OccupiedEntry { node, map: self }),
            Descent::Vacant(anchor) => Entry::Vacant(VacantEntry { key, anchor, map: self }),
        }
    }

    /// Removes the entry stored under `key`, returning its value.
    ///
    /// Returning `None` for an absent key is an ordinary negative result;
    /// the map is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map = PrTreeMap::from([(1, "a")]);
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry stored under `key`, returning the stored key and
    /// value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let handle = self.raw.find(&self.cmp, key)?;
        Some(self.raw.remove_at(handle))
    }
}

// ─── Iterators ───────────────────────────────────────────────────────────────

/// An iterator over the entries of a `PrTreeMap`, sorted by key.
///
/// This `struct` is created by the [`iter`] method on [`PrTreeMap`].
///
/// [`iter`]: PrTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, C = NaturalOrder> {
    map: &'a PrTreeMap<K, V, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.map.raw.successor(handle);
        }
        Some(self.map.raw.key_value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.map.raw.predecessor(handle);
        }
        Some(self.map.raw.key_value(handle))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {}
impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

/// An iterator over the keys of a `PrTreeMap`, in sorted order.
///
/// This `struct` is created by the [`keys`] method on [`PrTreeMap`].
///
/// [`keys`]: PrTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, C = NaturalOrder> {
    inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {}
impl<K, V, C> FusedIterator for Keys<'_, K, V, C> {}

/// An iterator over the values of a `PrTreeMap`, ordered by their keys.
///
/// This `struct` is created by the [`values`] method on [`PrTreeMap`].
///
/// [`values`]: PrTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, C = NaturalOrder> {
    inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {}
impl<K, V, C> FusedIterator for Values<'_, K, V, C> {}

/// An owning iterator over the entries of a `PrTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`PrTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<K, V> {
    inner: vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, C> IntoIterator for PrTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a PrTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Iter<'a, K, V, C> {
        self.iter()
    }
}

// ─── Trait implementations ───────────────────────────────────────────────────

impl<K, V, C: Default> Default for PrTreeMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for PrTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for PrTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for PrTreeMap<K, V, C> {}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for PrTreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for PrTreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for PrTreeMap<K, V> {
    /// Converts a `[(K, V); N]` into a `PrTreeMap<K, V>`. Later pairs
    /// overwrite earlier ones with equal keys.
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, C: Comparator<K>> Index<&K> for PrTreeMap<K, V, C> {
    type Output = V;

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V> for PrTreeMap<K, V, C> {
    fn count(&self) -> usize {
        self.len()
    }

    fn search(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn put(&mut self, key: K, value: V, overwrite: bool) -> Result<InsertOutcome<K, V>, CapacityError<(K, V)>> {
        match self.raw.descend(&self.cmp, &key) {
            Descent::Found(handle) => {
                if overwrite {
                    Ok(InsertOutcome::Replaced(self.raw.replace_value(handle, value)))
                } else {
                    Ok(InsertOutcome::Rejected(key, value))
                }
            }
            Descent::Vacant(anchor) => match self.raw.try_insert_at(anchor, key, value) {
                Ok(_) => Ok(InsertOutcome::Inserted),
                Err(pair) => Err(CapacityError(pair)),
            },
        }
    }

    fn probe(&mut self, key: K, default: V) -> Result<(&mut V, bool), CapacityError<(K, V)>> {
        match self.raw.descend(&self.cmp, &key) {
            Descent::Found(handle) => Ok((self.raw.value_mut(handle), false)),
            Descent::Vacant(anchor) => match self.raw.try_insert_at(anchor, key, default) {
                Ok(handle) => Ok((self.raw.value_mut(handle), true)),
                Err(pair) => Err(CapacityError(pair)),
            },
        }
    }

    fn take(&mut self, key: &K) -> Option<(K, V)> {
        self.remove_entry(key)
    }

    fn drain(&mut self) -> usize {
        self.clear()
    }

    fn walk(&self, visit: &mut dyn FnMut(&K, &V) -> bool) -> usize {
        self.raw.walk(visit)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

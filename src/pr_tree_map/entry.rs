use core::cmp::Ordering;
use core::error::Error;
use core::fmt;
use core::mem;

use crate::comparator::NaturalOrder;
use crate::raw::Handle;

use super::{CAPACITY_MSG, PrTreeMap};

/// A view into a single entry in a map, which may either be vacant or
/// occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`PrTreeMap`].
///
/// # Examples
///
/// ```
/// use prtree::PrTreeMap;
/// use prtree::pr_tree_map::Entry;
///
/// let mut map = PrTreeMap::new();
///
/// match map.entry("oz") {
///     Entry::Vacant(v) => {
///         v.insert(1);
///     }
///     Entry::Occupied(mut o) => {
///         *o.get_mut() += 1;
///     }
/// }
/// assert_eq!(map[&"oz"], 1);
/// ```
///
/// [`entry`]: PrTreeMap::entry
pub enum Entry<'a, K, V, C = NaturalOrder> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C>),

    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C>),
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Entry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(v) => f.debug_tuple("Entry").field(v).finish(),
            Entry::Occupied(o) => f.debug_tuple("Entry").field(o).finish(),
        }
    }
}

/// A view into a vacant entry in a `PrTreeMap`.
/// It is part of the [`Entry`] enum.
///
/// Holds the attachment point located by the descent that built it, so
/// inserting through it does not search again.
pub struct VacantEntry<'a, K, V, C = NaturalOrder> {
    pub(crate) key: K,
    pub(crate) anchor: Option<(Handle, Ordering)>,
    pub(crate) map: &'a mut PrTreeMap<K, V, C>,
}

impl<K: fmt::Debug, V, C> fmt::Debug for VacantEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacantEntry").field("key", &self.key).finish()
    }
}

/// A view into an occupied entry in a `PrTreeMap`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, C = NaturalOrder> {
    pub(crate) node: Handle,
    pub(crate) map: &'a mut PrTreeMap<K, V, C>,
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OccupiedEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry").field("key", self.key()).field("value", self.get()).finish()
    }
}

/// The error returned by [`PrTreeMap::try_insert`](super::PrTreeMap::try_insert)
/// when the key already exists.
///
/// Contains the occupied entry and the value that was not inserted.
pub struct OccupiedError<'a, K, V, C = NaturalOrder> {
    /// The entry in the map that was already occupied.
    pub entry: OccupiedEntry<'a, K, V, C>,
    /// The value which was not inserted, because the entry was already
    /// occupied.
    pub value: V,
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OccupiedError<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedError")
            .field("key", self.entry.key())
            .field("old_value", self.entry.get())
            .field("new_value", &self.value)
            .finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Display for OccupiedError<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to insert {:?}, key {:?} already holds {:?}",
            self.value,
            self.entry.key(),
            self.entry.get(),
        )
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> Error for OccupiedError<'_, K, V, C> {}

impl<'a, K, V, C> Entry<'a, K, V, C> {
    /// Ensures a value is in the entry by inserting the default if empty, and
    /// returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map: PrTreeMap<&str, usize> = PrTreeMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// assert_eq!(map[&"poneyland"], 12);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default
    /// function if empty, and returns a mutable reference to the value in the
    /// entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map: PrTreeMap<&str, String> = PrTreeMap::new();
    /// let s = "hoho".to_string();
    ///
    /// map.entry("poneyland").or_insert_with(|| s);
    ///
    /// assert_eq!(map[&"poneyland"], "hoho".to_string());
    /// ```
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of
    /// the default function, which gets a reference to the key that was moved
    /// in by the `.entry(key)` call.
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let value = default(&v.key);
                v.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(o) => o.key(),
            Entry::Vacant(v) => v.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map: PrTreeMap<&str, usize> = PrTreeMap::new();
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map[&"poneyland"], 42);
    ///
    /// map.entry("poneyland")
    ///    .and_modify(|e| { *e += 1 })
    ///    .or_insert(42);
    /// assert_eq!(map[&"poneyland"], 43);
    /// ```
    #[allow(clippy::return_self_not_must_use)]
    pub fn and_modify<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(ref mut o) = self {
            f(o.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an `OccupiedEntry`.
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        match self {
            Entry::Occupied(mut o) => {
                o.insert(value);
                o
            }
            Entry::Vacant(v) => v.insert_entry(value),
        }
    }
}

impl<'a, K, V: Default, C> Entry<'a, K, V, C> {
    /// Ensures a value is in the entry by inserting the default value if
    /// empty, and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    ///
    /// let mut map: PrTreeMap<&str, Option<usize>> = PrTreeMap::new();
    /// map.entry("poneyland").or_default();
    ///
    /// assert_eq!(map[&"poneyland"], None);
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(V::default()),
        }
    }
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    /// Gets a reference to the key that would be used when inserting a value
    /// through the `VacantEntry`.
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    #[allow(clippy::must_use_candidate)]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the `VacantEntry`'s key, and returns
    /// a mutable reference to it.
    ///
    /// The attachment point was located when the entry was created, so this
    /// does not descend again.
    ///
    /// # Panics
    ///
    /// Panics on node handle space exhaustion, like
    /// [`PrTreeMap::insert`](super::PrTreeMap::insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    /// use prtree::pr_tree_map::Entry;
    ///
    /// let mut map: PrTreeMap<&str, u32> = PrTreeMap::new();
    ///
    /// if let Entry::Vacant(o) = map.entry("poneyland") {
    ///     o.insert(37);
    /// }
    /// assert_eq!(map[&"poneyland"], 37);
    /// ```
    pub fn insert(self, value: V) -> &'a mut V {
        let handle = match self.map.raw.try_insert_at(self.anchor, self.key, value) {
            Ok(handle) => handle,
            Err(_) => panic!("{}", CAPACITY_MSG),
        };
        self.map.raw.value_mut(handle)
    }

    /// Sets the value of the entry with the `VacantEntry`'s key, and returns
    /// an `OccupiedEntry`.
    ///
    /// # Panics
    ///
    /// Panics on node handle space exhaustion, like
    /// [`PrTreeMap::insert`](super::PrTreeMap::insert).
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        let node = match self.map.raw.try_insert_at(self.anchor, self.key, value) {
            Ok(handle) => handle,
            Err(_) => panic!("{}", CAPACITY_MSG),
        };
        OccupiedEntry { node, map: self.map }
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    /// Gets a reference to the key in the entry.
    ///
    /// This is the key stored in the map, which for key types whose
    /// comparator ignores some fields may differ from the probe key.
    #[must_use]
    pub fn key(&self) -> &K {
        self.map.raw.key(self.node)
    }

    /// Take ownership of the key and value from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    /// use prtree::pr_tree_map::Entry;
    ///
    /// let mut map: PrTreeMap<&str, usize> = PrTreeMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     assert_eq!(o.remove_entry(), ("poneyland", 12));
    /// }
    /// assert!(!map.contains_key(&"poneyland"));
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn remove_entry(self) -> (K, V) {
        self.map.raw.remove_at(self.node)
    }

    /// Gets a reference to the value in the entry.
    #[must_use]
    pub fn get(&self) -> &V {
        self.map.raw.value(self.node)
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference that may outlive the destruction of the
    /// `Entry` value, see [`into_mut`].
    ///
    /// [`into_mut`]: OccupiedEntry::into_mut
    pub fn get_mut(&mut self) -> &mut V {
        self.map.raw.value_mut(self.node)
    }

    /// Converts the entry into a mutable reference to its value.
    ///
    /// If you need multiple references to the `OccupiedEntry`, see
    /// [`get_mut`].
    ///
    /// [`get_mut`]: OccupiedEntry::get_mut
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_mut(self) -> &'a mut V {
        self.map.raw.value_mut(self.node)
    }

    /// Sets the value of the entry with the `OccupiedEntry`'s key, and
    /// returns the entry's old value.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Takes the value of the entry out of the map, and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use prtree::PrTreeMap;
    /// use prtree::pr_tree_map::Entry;
    ///
    /// let mut map: PrTreeMap<&str, usize> = PrTreeMap::new();
    /// map.entry("poneyland").or_insert(12);
    ///
    /// if let Entry::Occupied(o) = map.entry("poneyland") {
    ///     assert_eq!(o.remove(), 12);
    /// }
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

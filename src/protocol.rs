use alloc::boxed::Box;
use core::error::Error;
use core::fmt;

/// What a checked insertion ([`OrderedMap::put`]) did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertOutcome<K, V> {
    /// The key was absent; a new entry was created.
    Inserted,
    /// The key was present and overwriting was requested; the displaced value
    /// is handed back.
    Replaced(V),
    /// The key was present and overwriting was not requested. Nothing was
    /// mutated; the rejected pair is handed back.
    Rejected(K, V),
}

/// The map cannot hold another entry: its node-handle space is exhausted.
///
/// Carries whatever the failed operation would otherwise have consumed, so
/// the caller loses nothing. The tree is exactly as it was before the call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CapacityError<T>(pub T);

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ordered map holds the maximum number of entries")
    }
}

impl<T: fmt::Debug> Error for CapacityError<T> {}

/// The uniform entry points an ordered-map backend exposes.
///
/// The trait is object-safe, so callers can hold a `Box<dyn OrderedMap<K, V>>`
/// and swap one balanced-tree backend for another at runtime without touching
/// call sites. [`PrTreeMap`](crate::PrTreeMap) implements it; the selection
/// machinery itself lives with the caller.
///
/// Failure reporting is uniform across backends: duplicate keys and capacity
/// exhaustion are ordinary values ([`InsertOutcome`], [`CapacityError`]), a
/// missing key is `None`, and every failed operation leaves the map
/// unchanged.
pub trait OrderedMap<K, V> {
    /// Number of entries in the map.
    fn count(&self) -> usize;

    /// `true` when the map holds no entries.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Looks up the value stored under `key`.
    fn search(&self, key: &K) -> Option<&V>;

    /// Inserts `value` under `key`.
    ///
    /// An occupied key either has its value replaced (`overwrite`) or rejects
    /// the pair untouched. See [`InsertOutcome`].
    fn put(&mut self, key: K, value: V, overwrite: bool) -> Result<InsertOutcome<K, V>, CapacityError<(K, V)>>;

    /// Get-or-insert: returns the value stored under `key`, inserting
    /// `default` first if the key is absent. The flag reports whether an
    /// insertion happened; an existing value is never touched.
    fn probe(&mut self, key: K, default: V) -> Result<(&mut V, bool), CapacityError<(K, V)>>;

    /// Removes the entry stored under `key`, yielding it to the caller.
    fn take(&mut self, key: &K) -> Option<(K, V)>;

    /// Removes every entry, returning how many were removed.
    fn drain(&mut self) -> usize;

    /// In-order traversal calling `visit` per entry until it returns `false`;
    /// returns the number of entries visited.
    fn walk(&self, visit: &mut dyn FnMut(&K, &V) -> bool) -> usize;

    /// An iterator over the entries in key order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;
}

use core::error::Error;
use core::fmt;

use crate::comparator::{Comparator, NaturalOrder};
use crate::raw::Handle;

use super::PrTreeMap;

/// A cursor over a [`PrTreeMap`].
///
/// A cursor is either *positioned* on an entry or *off-end*. It starts on the
/// first entry in key order (off-end when the map is empty), steps in either
/// direction, and can jump to the ends or to an exact key. Stepping past
/// either end goes off-end; stepping again from off-end re-anchors at the
/// first (or last) entry, so traversal is restartable rather than one-shot.
///
/// Because the cursor borrows the map, the tree cannot be mutated while any
/// cursor is live; the structural churn a rotation or splice causes can never
/// be observed through one.
///
/// # Examples
///
/// ```
/// use prtree::PrTreeMap;
///
/// let map = PrTreeMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
///
/// let mut cur = map.cursor();
/// assert_eq!(cur.key_value(), Some((&1, &'a')));
///
/// assert!(cur.move_next_n(2));
/// assert_eq!(cur.key(), Some(&3));
///
/// // Walk off the end, then restart from the front.
/// assert!(!cur.move_next());
/// assert!(cur.move_next());
/// assert_eq!(cur.key(), Some(&1));
/// ```
pub struct Cursor<'a, K, V, C = NaturalOrder> {
    pub(crate) map: &'a PrTreeMap<K, V, C>,
    pub(crate) node: Option<Handle>,
}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    /// Returns `true` while the cursor is positioned on an entry.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// Forces the cursor off-end.
    pub fn invalidate(&mut self) {
        self.node = None;
    }

    /// Returns the key at the cursor, or `None` off-end.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.node.map(|h| self.map.raw.key(h))
    }

    /// Returns the value at the cursor, or `None` off-end.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.node.map(|h| self.map.raw.value(h))
    }

    /// Returns the entry at the cursor, or `None` off-end.
    #[must_use]
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.node.map(|h| self.map.raw.key_value(h))
    }

    /// Steps to the in-order successor; from off-end, re-anchors at the
    /// first entry. Returns whether the cursor is still positioned.
    pub fn move_next(&mut self) -> bool {
        self.node = match self.node {
            Some(h) => self.map.raw.successor(h),
            None => self.map.raw.first(),
        };
        self.node.is_some()
    }

    /// Steps to the in-order predecessor; from off-end, re-anchors at the
    /// last entry. Returns whether the cursor is still positioned.
    pub fn move_prev(&mut self) -> bool {
        self.node = match self.node {
            Some(h) => self.map.raw.predecessor(h),
            None => self.map.raw.last(),
        };
        self.node.is_some()
    }

    /// Steps forward `n` times, stopping early (off-end) if the entries run
    /// out. Returns whether the cursor is still positioned. A re-anchoring
    /// step from off-end counts as one of the `n`.
    pub fn move_next_n(&mut self, mut n: usize) -> bool {
        while n > 0 && self.move_next() {
            n -= 1;
        }
        self.node.is_some()
    }

    /// Steps backward `n` times, the mirror of [`Cursor::move_next_n`].
    pub fn move_prev_n(&mut self, mut n: usize) -> bool {
        while n > 0 && self.move_prev() {
            n -= 1;
        }
        self.node.is_some()
    }

    /// Jumps to the first entry in key order. Returns whether the cursor is
    /// positioned (`false` only for an empty map).
    pub fn move_first(&mut self) -> bool {
        self.node = self.map.raw.first();
        self.node.is_some()
    }

    /// Jumps to the last entry in key order.
    pub fn move_last(&mut self) -> bool {
        self.node = self.map.raw.last();
        self.node.is_some()
    }

    /// Positions the cursor on the entry stored under `key`, or off-end when
    /// the key is absent. There is no nearest-match positioning.
    pub fn seek(&mut self, key: &K) -> bool
    where
        C: Comparator<K>,
    {
        self.node = self.map.raw.find(&self.map.cmp, key);
        self.node.is_some()
    }
}

/// A cursor over a [`PrTreeMap`] that can replace values in place.
///
/// Positioning behaves exactly like [`Cursor`]. The one mutation offered is
/// [`replace_value`]; removing the entry under the cursor is *not* supported
/// by this tree — remove through the map and re-seek instead.
///
/// [`replace_value`]: CursorMut::replace_value
///
/// # Examples
///
/// ```
/// use prtree::PrTreeMap;
///
/// let mut map = PrTreeMap::from([(1, "one"), (2, "two")]);
///
/// let mut cur = map.cursor_mut();
/// assert!(cur.seek(&2));
/// assert_eq!(cur.replace_value("TWO"), Ok("two"));
///
/// assert_eq!(map.get(&2), Some(&"TWO"));
/// ```
pub struct CursorMut<'a, K, V, C = NaturalOrder> {
    pub(crate) map: &'a mut PrTreeMap<K, V, C>,
    pub(crate) node: Option<Handle>,
}

impl<K, V, C> CursorMut<'_, K, V, C> {
    /// Returns `true` while the cursor is positioned on an entry.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// Forces the cursor off-end.
    pub fn invalidate(&mut self) {
        self.node = None;
    }

    /// Returns a read-only cursor at the same position.
    ///
    /// The `CursorMut` stays borrowed for the lifetime of the returned
    /// `Cursor`.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor {
            map: &*self.map,
            node: self.node,
        }
    }

    /// Returns the key at the cursor, or `None` off-end.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.node.map(|h| self.map.raw.key(h))
    }

    /// Returns the value at the cursor, or `None` off-end.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.node.map(|h| self.map.raw.value(h))
    }

    /// Returns a mutable reference to the value at the cursor, or `None`
    /// off-end.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.node.map(|h| self.map.raw.value_mut(h))
    }

    /// Returns the entry at the cursor, or `None` off-end.
    #[must_use]
    pub fn key_value(&self) -> Option<(&K, &V)> {
        self.node.map(|h| self.map.raw.key_value(h))
    }

    /// Replaces the value at the cursor, returning the previous value.
    ///
    /// Off-end, nothing is mutated and the rejected value comes back inside
    /// the error.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCursorError`] when the cursor is off-end.
    pub fn replace_value(&mut self, value: V) -> Result<V, InvalidCursorError<V>> {
        match self.node {
            Some(h) => Ok(self.map.raw.replace_value(h, value)),
            None => Err(InvalidCursorError(value)),
        }
    }

    /// Steps to the in-order successor; from off-end, re-anchors at the
    /// first entry. Returns whether the cursor is still positioned.
    pub fn move_next(&mut self) -> bool {
        self.node = match self.node {
            Some(h) => self.map.raw.successor(h),
            None => self.map.raw.first(),
        };
        self.node.is_some()
    }

    /// Steps to the in-order predecessor; from off-end, re-anchors at the
    /// last entry. Returns whether the cursor is still positioned.
    pub fn move_prev(&mut self) -> bool {
        self.node = match self.node {
            Some(h) => self.map.raw.predecessor(h),
            None => self.map.raw.last(),
        };
        self.node.is_some()
    }

    /// Steps forward `n` times, stopping early (off-end) if the entries run
    /// out. A re-anchoring step from off-end counts as one of the `n`.
    pub fn move_next_n(&mut self, mut n: usize) -> bool {
        while n > 0 && self.move_next() {
            n -= 1;
        }
        self.node.is_some()
    }

    /// Steps backward `n` times, the mirror of [`CursorMut::move_next_n`].
    pub fn move_prev_n(&mut self, mut n: usize) -> bool {
        while n > 0 && self.move_prev() {
            n -= 1;
        }
        self.node.is_some()
    }

    /// Jumps to the first entry in key order.
    pub fn move_first(&mut self) -> bool {
        self.node = self.map.raw.first();
        self.node.is_some()
    }

    /// Jumps to the last entry in key order.
    pub fn move_last(&mut self) -> bool {
        self.node = self.map.raw.last();
        self.node.is_some()
    }

    /// Positions the cursor on the entry stored under `key`, or off-end when
    /// the key is absent.
    pub fn seek(&mut self, key: &K) -> bool
    where
        C: Comparator<K>,
    {
        self.node = self.map.raw.find(&self.map.cmp, key);
        self.node.is_some()
    }
}

/// The error returned by [`CursorMut::replace_value`] on an off-end cursor.
///
/// Carries the value that was not stored, so the caller keeps ownership.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidCursorError<T>(pub T);

impl<T> fmt::Display for InvalidCursorError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cursor is not positioned on an entry")
    }
}

impl<T: fmt::Debug> Error for InvalidCursorError<T> {}

//! An ordered map backed by a path-reduction tree.
//!
//! This crate provides [`PrTreeMap`], a comparator-driven ordered map built on a
//! *path-reduction tree* (Gonnet 1983): a weight-balanced binary search tree in
//! the BB[1/3] class that performs a rotation only when doing so reduces the
//! tree's total internal path length. Every node tracks the weight of its
//! subtree (an absent child counts as weight 1), and the rebalancing rules
//! compare grandchild weights against the opposite subtree to decide when a
//! single or double rotation pays off.
//!
//! Although a single insertion or deletion can trigger O(n) rotations in the
//! worst case, the amortized worst case is .44042 lg(n) + O(1) rotations per
//! insertion and .42062 lg(n) + O(1) per deletion, which in practice makes the
//! tree competitive with stricter balance schemes while rotating less.
//!
//! # Example
//!
//! ```
//! use prtree::PrTreeMap;
//!
//! let mut ranks = PrTreeMap::new();
//! ranks.insert("gold", 1);
//! ranks.insert("silver", 2);
//! ranks.insert("bronze", 3);
//!
//! assert_eq!(ranks.get(&"silver"), Some(&2));
//! assert_eq!(ranks.len(), 3);
//!
//! // Keys come back in comparator order.
//! let keys: Vec<_> = ranks.keys().copied().collect();
//! assert_eq!(keys, ["bronze", "gold", "silver"]);
//! ```
//!
//! Ordering is injected rather than hard-wired to [`Ord`]: a map built with
//! [`PrTreeMap::with_comparator`] consults the supplied [`Comparator`] for every
//! descent, so the same key type can live in maps with different orders.
//!
//! ```
//! use prtree::PrTreeMap;
//!
//! let mut map = PrTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! map.insert(1, "one");
//! map.insert(2, "two");
//! map.insert(3, "three");
//!
//! // Descending under the reversed comparator.
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, [3, 2, 1]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Comparator-driven** - Ordering supplied at construction, `Ord` as the default
//! - **Pluggable backend** - Implements the object-safe [`OrderedMap`] protocol
//! - **Cursors** - Bidirectional, restartable positioning over the live tree
//!
//! # Implementation
//!
//! Nodes live in a slot arena and refer to each other by index handles, so the
//! parent back-reference is a niche-packed index and rotations relink in O(1)
//! without ownership cycles. The rebalancing engine is an explicit worklist
//! loop rather than recursion, keeping stack depth bounded.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod comparator;
mod protocol;
mod raw;

pub mod pr_tree_map;

pub use comparator::{Comparator, NaturalOrder};
pub use pr_tree_map::PrTreeMap;
pub use protocol::{CapacityError, InsertOutcome, OrderedMap};

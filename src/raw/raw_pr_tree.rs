use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::comparator::Comparator;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Weight};

/// The path-reduction tree engine backing `PrTreeMap`.
///
/// The engine is comparator-agnostic: operations that need an ordering take
/// the comparator as a parameter, so the public map owns exactly one copy of
/// it. All structure lives in the arena; `root` and `len` are the only other
/// state.
///
/// Balance discipline: every node's weight equals the sum of its children's
/// weights, where an absent child weighs 1. A rotation is performed only when
/// it reduces the tree's total internal path length, which keeps the tree in
/// class BB[1/3] while rotating strictly less often than a conventional
/// weight-balanced tree. The trigger comparisons are on *grandchild* weights:
/// a single rotation when the far grandchild alone outweighs the entire
/// opposite subtree, a double rotation when the near grandchild does.
#[derive(Clone)]
pub(crate) struct RawPrTree<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    len: usize,
}

/// Where a comparator-guided descent ended up.
pub(crate) enum Descent {
    /// The key is present at this node.
    Found(Handle),
    /// The key is absent. A new node would attach under the anchor node on
    /// the given side; `None` means the tree is empty.
    Vacant(Option<(Handle, Ordering)>),
}

/// Inline capacity for the traversal stacks. Balance keeps depth near
/// log2(n), so this covers trees of well past a million entries without
/// spilling to the heap.
const STACK_DEPTH: usize = 32;

impl<K, V> RawPrTree<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.nodes.get(handle).key
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &V {
        &self.nodes.get(handle).value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.nodes.get_mut(handle).value
    }

    #[inline]
    pub(crate) fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (&node.key, &node.value)
    }

    /// Swaps in a new value at `handle`, returning the previous one.
    pub(crate) fn replace_value(&mut self, handle: Handle, value: V) -> V {
        mem::replace(&mut self.nodes.get_mut(handle).value, value)
    }

    /// Drops every node and resets the tree to empty, returning how many
    /// entries were removed.
    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.len;
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        removed
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Weight of a possibly-absent subtree link: an absent child has the
    /// virtual weight 1.
    #[inline]
    fn link_weight(&self, link: Option<Handle>) -> Weight {
        link.map_or(1, |h| self.node(h).weight)
    }

    /// Recomputes one node's weight from its children.
    fn reweigh(&mut self, handle: Handle) {
        let (left, right) = {
            let node = self.node(handle);
            (node.left, node.right)
        };
        let weight = self.link_weight(left) + self.link_weight(right);
        self.node_mut(handle).weight = weight;
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// In-order minimum of the whole tree.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.subtree_min(root))
    }

    /// In-order maximum of the whole tree.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.subtree_max(root))
    }

    fn subtree_min(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left {
            handle = left;
        }
        handle
    }

    fn subtree_max(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right {
            handle = right;
        }
        handle
    }

    /// In-order successor: leftmost node of the right subtree when there is
    /// one, otherwise the nearest ancestor this node sits left of.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.node(handle).right {
            return Some(self.subtree_min(right));
        }
        let mut child = handle;
        let mut parent = self.node(handle).parent;
        while let Some(p) = parent
            && self.node(p).right == Some(child)
        {
            child = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// In-order predecessor, the mirror of [`RawPrTree::successor`].
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.node(handle).left {
            return Some(self.subtree_max(left));
        }
        let mut child = handle;
        let mut parent = self.node(handle).parent;
        while let Some(p) = parent
            && self.node(p).left == Some(child)
        {
            child = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// In-order traversal invoking `visit` per entry until it returns `false`
    /// or the entries run out; returns the number of entries visited.
    pub(crate) fn walk<F>(&self, mut visit: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut visited = 0;
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            visited += 1;
            let node = self.node(handle);
            if !visit(&node.key, &node.value) {
                break;
            }
            cursor = self.successor(handle);
        }
        visited
    }

    // ─── Lookup and mutation ────────────────────────────────────────────────

    /// Comparator-guided point lookup.
    pub(crate) fn find<C>(&self, cmp: &C, key: &K) -> Option<Handle>
    where
        C: Comparator<K>,
    {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            cursor = match cmp.cmp(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Full descent for `key`: either the node holding it, or the attachment
    /// point a new node for it would get.
    pub(crate) fn descend<C>(&self, cmp: &C, key: &K) -> Descent
    where
        C: Comparator<K>,
    {
        let mut anchor = None;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            let side = cmp.cmp(key, &node.key);
            cursor = match side {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Descent::Found(handle),
            };
            anchor = Some((handle, side));
        }
        Descent::Vacant(anchor)
    }

    /// Attaches a new leaf at a vacancy reported by [`RawPrTree::descend`],
    /// then walks the ancestor chain adding the leaf's unit of weight and
    /// rebalancing at every step.
    ///
    /// Fails without touching the tree when the handle space is exhausted;
    /// the key/value pair comes back to the caller.
    pub(crate) fn try_insert_at(
        &mut self,
        anchor: Option<(Handle, Ordering)>,
        key: K,
        value: V,
    ) -> Result<Handle, (K, V)> {
        let mut node = Node::new(key, value);
        node.parent = anchor.map(|(parent, _)| parent);
        let handle = match self.nodes.try_alloc(node) {
            Ok(handle) => handle,
            Err(node) => return Err((node.key, node.value)),
        };

        match anchor {
            None => {
                debug_assert!(self.root.is_none());
                self.root = Some(handle);
            }
            Some((parent, side)) => {
                if side == Ordering::Less {
                    self.node_mut(parent).left = Some(handle);
                } else {
                    self.node_mut(parent).right = Some(handle);
                }

                // Each ancestor gains one unit of weight. The next ancestor is
                // read before rebalancing because a rotation rewrites the
                // current node's parent link, while the set of original
                // ancestors (whose weights must grow) is unaffected by it.
                let mut cursor = Some(parent);
                while let Some(ancestor) = cursor {
                    cursor = self.node(ancestor).parent;
                    self.node_mut(ancestor).weight += 1;
                    self.fixup(ancestor);
                }
            }
        }

        self.len += 1;
        Ok(handle)
    }

    /// Detaches and returns the entry at `handle`.
    ///
    /// A node with at most one child is spliced out directly and the
    /// remaining ancestors shed one unit of weight each; no rotations are
    /// needed on that path because removing a leaf-like node cannot increase
    /// any path length. A node with two children is instead rotated downward,
    /// promoting the heavier side (pre-rotating that child when its outer
    /// side is lighter than its inner side), until it reaches a splice-able
    /// position. The descent re-applies itself to the same node, so deletion
    /// needs no second rebalancing pass.
    pub(crate) fn remove_at(&mut self, handle: Handle) -> (K, V) {
        loop {
            let (left, right) = {
                let node = self.node(handle);
                (node.left, node.right)
            };

            let (Some(l), Some(r)) = (left, right) else {
                // Splice: promote the sole child (or nothing) into place.
                let survivor = left.or(right);
                let parent = self.node(handle).parent;
                if let Some(s) = survivor {
                    self.node_mut(s).parent = parent;
                }
                match parent {
                    Some(p) => self.node_mut(p).replace_child(handle, survivor),
                    None => self.root = survivor,
                }

                let mut cursor = parent;
                while let Some(ancestor) = cursor {
                    self.node_mut(ancestor).weight -= 1;
                    cursor = self.node(ancestor).parent;
                }

                self.len -= 1;
                let node = self.nodes.take(handle);
                return (node.key, node.value);
            };

            if self.node(l).weight > self.node(r).weight {
                let (ll, lr) = {
                    let lnode = self.node(l);
                    (lnode.left, lnode.right)
                };
                if self.link_weight(ll) < self.link_weight(lr) {
                    self.rotate_left(l);
                }
                self.rotate_right(handle);
            } else {
                let (rl, rr) = {
                    let rnode = self.node(r);
                    (rnode.left, rnode.right)
                };
                if self.link_weight(rr) < self.link_weight(rl) {
                    self.rotate_right(r);
                }
                self.rotate_left(handle);
            }
            // `handle` is one level further down now, still holding the
            // doomed entry; go around again.
        }
    }

    /// Empties the tree in key order into a vector. Used by the owning
    /// iterator, which hands out pairs the tree no longer needs to index.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut handles = Vec::with_capacity(self.len);
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            handles.push(handle);
            cursor = self.successor(handle);
        }

        self.root = None;
        self.len = 0;

        let pairs = handles
            .into_iter()
            .map(|handle| {
                let node = self.nodes.take(handle);
                (node.key, node.value)
            })
            .collect();
        self.nodes.clear();
        pairs
    }

    // ─── Rebalancing engine ─────────────────────────────────────────────────

    /// Restores the path-reduction balance criterion at `handle` and at any
    /// positions a rotation disturbs.
    ///
    /// For a node with child weights `wl`/`wr` (absent child = 1), taking the
    /// right-heavy case (`wr > wl`):
    ///
    /// - `weight(right.right) > wl`: the far grandchild alone outweighs the
    ///   whole left side, so a single left rotation shortens more paths than
    ///   it lengthens. The demoted node is re-checked: one rotation can
    ///   expose another violation at the same position.
    /// - `weight(right.left) > wl`: the near grandchild outweighs the left
    ///   side, so the mass sits in the inner subtree and a double rotation
    ///   (right child right, then this node left) is needed. The outer
    ///   subtree left hanging below the old right child is re-checked first,
    ///   then the demoted node, matching the recursive formulation's order.
    ///
    /// The left-heavy case mirrors both rules. Expressed as a LIFO worklist
    /// instead of recursion so stack depth stays bounded.
    fn fixup(&mut self, handle: Handle) {
        let mut pending: SmallVec<[Handle; STACK_DEPTH]> = SmallVec::new();
        pending.push(handle);

        while let Some(n) = pending.pop() {
            let (left, right) = {
                let node = self.node(n);
                (node.left, node.right)
            };
            let wl = self.link_weight(left);
            let wr = self.link_weight(right);

            if let Some(r) = right
                && wr > wl
            {
                let (rl, rr) = {
                    let rnode = self.node(r);
                    (rnode.left, rnode.right)
                };
                if self.link_weight(rr) > wl {
                    self.rotate_left(n);
                    pending.push(n);
                } else if self.link_weight(rl) > wl {
                    self.rotate_right(r);
                    self.rotate_left(n);
                    pending.push(n);
                    if let Some(dangling) = self.node(r).right {
                        pending.push(dangling);
                    }
                }
            } else if let Some(l) = left
                && wl > wr
            {
                let (ll, lr) = {
                    let lnode = self.node(l);
                    (lnode.left, lnode.right)
                };
                if self.link_weight(ll) > wr {
                    self.rotate_right(n);
                    pending.push(n);
                } else if self.link_weight(lr) > wr {
                    self.rotate_left(l);
                    self.rotate_right(n);
                    pending.push(n);
                    if let Some(dangling) = self.node(l).left {
                        pending.push(dangling);
                    }
                }
            }
        }
    }

    /// Left rotation at `node`:
    ///
    /// ```text
    ///     /             /
    ///    B             D
    ///   / \           / \
    ///  A   D   ==>   B   E
    ///     / \       / \
    ///    C   E     A   C
    /// ```
    ///
    /// Only B and D are reweighed; the rotation conserves the subtree's total
    /// weight, so every ancestor's weight is already correct.
    fn rotate_left(&mut self, node: Handle) {
        let right = self.node(node).right.expect("`rotate_left()` - node has no right child!");

        let inner = self.node(right).left;
        self.node_mut(node).right = inner;
        if let Some(c) = inner {
            self.node_mut(c).parent = Some(node);
        }

        let parent = self.node(node).parent;
        self.node_mut(right).parent = parent;
        match parent {
            Some(p) => self.node_mut(p).replace_child(node, Some(right)),
            None => self.root = Some(right),
        }

        self.node_mut(right).left = Some(node);
        self.node_mut(node).parent = Some(right);

        self.reweigh(node);
        self.reweigh(right);
    }

    /// Right rotation at `node`, the mirror of [`RawPrTree::rotate_left`].
    fn rotate_right(&mut self, node: Handle) {
        let left = self.node(node).left.expect("`rotate_right()` - node has no left child!");

        let inner = self.node(left).right;
        self.node_mut(node).left = inner;
        if let Some(c) = inner {
            self.node_mut(c).parent = Some(node);
        }

        let parent = self.node(node).parent;
        self.node_mut(left).parent = parent;
        match parent {
            Some(p) => self.node_mut(p).replace_child(node, Some(left)),
            None => self.root = Some(left),
        }

        self.node_mut(left).right = Some(node);
        self.node_mut(node).parent = Some(left);

        self.reweigh(node);
        self.reweigh(left);
    }

    // ─── Structural introspection ───────────────────────────────────────────

    /// Longest root-to-node path, in edges. An empty tree and a single-node
    /// tree both report 0.
    pub(crate) fn height(&self) -> usize {
        let Some(root) = self.root else { return 0 };
        let mut max_depth = 0;
        let mut stack: SmallVec<[(Handle, usize); STACK_DEPTH]> = SmallVec::new();
        stack.push((root, 0));
        while let Some((handle, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            let node = self.node(handle);
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        max_depth
    }

    /// Shortest root-to-missing-child path, in edges: the depth of the
    /// shallowest node with at least one absent child.
    pub(crate) fn min_height(&self) -> usize {
        let Some(root) = self.root else { return 0 };
        let mut best = usize::MAX;
        let mut stack: SmallVec<[(Handle, usize); STACK_DEPTH]> = SmallVec::new();
        stack.push((root, 0));
        while let Some((handle, depth)) = stack.pop() {
            if depth >= best {
                continue;
            }
            let node = self.node(handle);
            match (node.left, node.right) {
                (Some(left), Some(right)) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                _ => best = depth,
            }
        }
        best
    }

    /// Internal path length: the sum of the depths of all nodes. This is the
    /// quantity the rebalancing engine's rotations monotonically reduce.
    pub(crate) fn path_length(&self) -> usize {
        let Some(root) = self.root else { return 0 };
        let mut total = 0;
        let mut stack: SmallVec<[(Handle, usize); STACK_DEPTH]> = SmallVec::new();
        stack.push((root, 0));
        while let Some((handle, depth)) = stack.pop() {
            total += depth;
            let node = self.node(handle);
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        total
    }

    /// Verifies every structural invariant; panics on the first violation.
    /// Test support, wired through `PrTreeMap::assert_invariants`.
    pub(crate) fn check_invariants<C>(&self, cmp: &C)
    where
        C: Comparator<K>,
    {
        assert_eq!(self.nodes.len(), self.len, "arena population diverged from len");

        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "rootless tree with nonzero len");
            return;
        };
        assert!(self.node(root).parent.is_none(), "root has a parent link");

        let mut reachable = 0;
        let mut stack: SmallVec<[Handle; STACK_DEPTH]> = SmallVec::new();
        stack.push(root);
        while let Some(handle) = stack.pop() {
            reachable += 1;
            let node = self.node(handle);
            assert_eq!(
                node.weight,
                self.link_weight(node.left) + self.link_weight(node.right),
                "node weight diverged from its children's virtual weights"
            );
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(
                    self.node(child).parent,
                    Some(handle),
                    "child's parent link does not name its structural parent"
                );
                stack.push(child);
            }
        }
        assert_eq!(reachable, self.len, "reachable node count diverged from len");

        // In-order traversal must yield strictly increasing keys.
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            let next = self.successor(handle);
            if let Some(n) = next {
                assert_eq!(
                    cmp.cmp(self.key(handle), self.key(n)),
                    Ordering::Less,
                    "in-order neighbors out of order"
                );
            }
            cursor = next;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use alloc::vec;

    fn insert(tree: &mut RawPrTree<i32, i32>, key: i32) -> Handle {
        match tree.descend(&NaturalOrder, &key) {
            Descent::Found(handle) => handle,
            Descent::Vacant(anchor) => tree.try_insert_at(anchor, key, key * 10).unwrap(),
        }
    }

    fn keys_in_order(tree: &RawPrTree<i32, i32>) -> Vec<i32> {
        let mut keys = Vec::new();
        tree.walk(|&k, _| {
            keys.push(k);
            true
        });
        keys
    }

    #[test]
    fn ascending_run_triggers_single_left_rotation() {
        let mut tree = RawPrTree::new();
        for key in [1, 2, 3] {
            insert(&mut tree, key);
        }
        tree.check_invariants(&NaturalOrder);

        // 1-2-3 inserted in order would be a right spine without the
        // rotation; the engine must have promoted 2.
        let root = tree.root().unwrap();
        assert_eq!(*tree.key(root), 2);
        assert_eq!(tree.node(root).weight, 4);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn zig_zag_triggers_double_rotation() {
        let mut tree = RawPrTree::new();
        // Build the RL shape: mass in the inner grandchild.
        for key in [1, 3, 2] {
            insert(&mut tree, key);
        }
        tree.check_invariants(&NaturalOrder);
        assert_eq!(*tree.key(tree.root().unwrap()), 2);
        assert_eq!(keys_in_order(&tree), vec![1, 2, 3]);
    }

    #[test]
    fn weights_track_subtree_population() {
        let mut tree = RawPrTree::new();
        for key in [5, 3, 8, 1, 4, 7, 9] {
            insert(&mut tree, key);
        }
        tree.check_invariants(&NaturalOrder);
        assert_eq!(tree.len(), 7);
        // weight = node count + 1 at the root.
        assert_eq!(tree.node(tree.root().unwrap()).weight, 8);
    }

    #[test]
    fn removal_splices_and_sheds_ancestor_weight() {
        let mut tree = RawPrTree::new();
        for key in [5, 3, 8, 1, 4, 7, 9] {
            insert(&mut tree, key);
        }

        // Leaf removal.
        let h = tree.find(&NaturalOrder, &1).unwrap();
        assert_eq!(tree.remove_at(h), (1, 10));
        tree.check_invariants(&NaturalOrder);
        assert_eq!(tree.len(), 6);

        // Two-children removal has to rotate the target down first.
        let h = tree.find(&NaturalOrder, &5).unwrap();
        assert_eq!(tree.remove_at(h), (5, 50));
        tree.check_invariants(&NaturalOrder);
        assert_eq!(keys_in_order(&tree), vec![3, 4, 7, 8, 9]);
    }

    #[test]
    fn remove_everything_round_trips_to_empty() {
        let mut tree = RawPrTree::new();
        for key in 0..64 {
            insert(&mut tree, key);
        }
        // Interleave removals from both ends of the key space.
        for key in (0..32).chain((32..64).rev()) {
            let h = tree.find(&NaturalOrder, &key).unwrap();
            tree.remove_at(h);
            tree.check_invariants(&NaturalOrder);
        }
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn successor_predecessor_walk_the_same_sequence() {
        let mut tree = RawPrTree::new();
        for key in [6, 2, 9, 1, 4, 8, 11, 3, 5, 7, 10] {
            insert(&mut tree, key);
        }

        let mut forward = Vec::new();
        let mut cursor = tree.first();
        while let Some(h) = cursor {
            forward.push(*tree.key(h));
            cursor = tree.successor(h);
        }
        assert_eq!(forward, (1..=11).collect::<Vec<_>>());

        let mut backward = Vec::new();
        let mut cursor = tree.last();
        while let Some(h) = cursor {
            backward.push(*tree.key(h));
            cursor = tree.predecessor(h);
        }
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn insert_failure_leaves_tree_untouched() {
        let mut tree = RawPrTree::new();
        for key in 0..Handle::MAX as i32 {
            insert(&mut tree, key);
        }
        let len = tree.len();

        let key = Handle::MAX as i32;
        let Descent::Vacant(anchor) = tree.descend(&NaturalOrder, &key) else {
            panic!("key unexpectedly present");
        };
        assert_eq!(tree.try_insert_at(anchor, key, 0), Err((key, 0)));
        assert_eq!(tree.len(), len);
        tree.check_invariants(&NaturalOrder);
    }

    #[test]
    fn drain_yields_sorted_pairs_and_empties() {
        let mut tree = RawPrTree::new();
        for key in [4, 1, 3, 2, 5] {
            insert(&mut tree, key);
        }
        let pairs = tree.drain_to_vec();
        assert_eq!(pairs, vec![(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]);
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
    }

    #[test]
    fn introspection_on_known_shapes() {
        let mut tree: RawPrTree<i32, i32> = RawPrTree::new();
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.min_height(), 0);
        assert_eq!(tree.path_length(), 0);

        insert(&mut tree, 2);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.path_length(), 0);

        insert(&mut tree, 1);
        insert(&mut tree, 3);
        // Perfect three-node tree: both depth-1 children.
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.min_height(), 1);
        assert_eq!(tree.path_length(), 2);
    }
}

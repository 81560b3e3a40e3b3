//! The link primitive underneath every queue.
//!
//! A [`Link`] is a `(next, prev)` pair of node ids stored *inside* each node,
//! kernel-list style. Nodes live in an arena and are addressed by [`NodeId`],
//! so splicing is a handful of index writes and never touches the payload.
//!
//! Any storage that can hand out the link of a node implements [`Links`] and
//! gets the whole primitive set for free:
//!
//! ```
//! use lab_queue::link::{Link, Links, NodeId};
//!
//! struct Arena(Vec<Link>);
//!
//! impl Links for Arena {
//!     fn link(&self, node: NodeId) -> &Link {
//!         &self.0[node.index()]
//!     }
//!     fn link_mut(&mut self, node: NodeId) -> &mut Link {
//!         &mut self.0[node.index()]
//!     }
//! }
//!
//! let (head, a, b) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));
//! let mut arena = Arena(vec![Link::detached(head), Link::detached(a), Link::detached(b)]);
//!
//! arena.insert_before(head, a);
//! arena.insert_before(head, b);
//! assert_eq!(arena.walk(head).collect::<Vec<_>>(), vec![a, b]);
//!
//! arena.move_to_front(b, head);
//! assert_eq!(arena.walk(head).collect::<Vec<_>>(), vec![b, a]);
//! ```

use std::fmt;
use std::iter::FusedIterator;

/// Stable address of a node inside an arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The `(next, prev)` pair embedded in a node.
///
/// A link whose both ends point back to its own node is *detached*: as a
/// list head it denotes an empty list, as an element it is a valid
/// standalone node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub next: NodeId,
    pub prev: NodeId,
}

impl Link {
    /// A self-referencing link for `node`.
    #[inline]
    pub const fn detached(node: NodeId) -> Self {
        Self {
            next: node,
            prev: node,
        }
    }
}

/// Link surgery over an arena of nodes.
///
/// Every method is *O*(1) except the iterators. The methods never check that
/// the ids handed to them belong to the same list; passing nodes from
/// different lists, or a node which is not currently linked where a linked
/// one is expected, makes the lists ill-formed (but never unsafe).
pub trait Links {
    fn link(&self, node: NodeId) -> &Link;

    fn link_mut(&mut self, node: NodeId) -> &mut Link;

    #[inline]
    fn next(&self, node: NodeId) -> NodeId {
        self.link(node).next
    }

    #[inline]
    fn prev(&self, node: NodeId) -> NodeId {
        self.link(node).prev
    }

    /// Point both ends of `node` at itself.
    #[inline]
    fn init(&mut self, node: NodeId) {
        *self.link_mut(node) = Link::detached(node);
    }

    /// Make `prev` and `next` adjacent.
    #[inline]
    fn connect(&mut self, prev: NodeId, next: NodeId) {
        self.link_mut(prev).next = next;
        self.link_mut(next).prev = prev;
    }

    /// Splice the detached `node` right after `at`.
    fn insert_after(&mut self, at: NodeId, node: NodeId) {
        let next = self.next(at);
        #[cfg(debug_assertions)]
        assert_adjacent(&*self, at, next);
        self.connect(node, next);
        self.connect(at, node);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(&*self, at, node);
            assert_adjacent(&*self, node, next);
        }
    }

    /// Splice the detached `node` right before `at`.
    fn insert_before(&mut self, at: NodeId, node: NodeId) {
        let prev = self.prev(at);
        self.insert_after(prev, node);
    }

    /// Splice `node` out of its list.
    ///
    /// The link of `node` is left stale: it still names its old neighbours
    /// and must not be used as a list head until [`Links::init`] is called.
    fn unlink(&mut self, node: NodeId) {
        let Link { next, prev } = *self.link(node);
        self.connect(prev, next);
        #[cfg(debug_assertions)]
        assert_adjacent(&*self, prev, next);
    }

    /// Splice `node` out of its list and leave it detached.
    fn unlink_init(&mut self, node: NodeId) {
        self.unlink(node);
        self.init(node);
    }

    /// Move `node` to the front of the list headed by `head`.
    fn move_to_front(&mut self, node: NodeId, head: NodeId) {
        self.unlink(node);
        self.insert_after(head, node);
    }

    /// Move `node` to the back of the list headed by `head`.
    fn move_to_back(&mut self, node: NodeId, head: NodeId) {
        self.unlink(node);
        self.insert_before(head, node);
    }

    #[inline]
    fn is_empty(&self, head: NodeId) -> bool {
        self.next(head) == head
    }

    /// Returns `true` if the list headed by `head` holds exactly one node.
    #[inline]
    fn is_singular(&self, head: NodeId) -> bool {
        !self.is_empty(head) && self.next(head) == self.prev(head)
    }

    /// Forward iteration over the nodes after `head`, stopping when the walk
    /// comes back around to `head`.
    fn walk(&self, head: NodeId) -> Walk<'_, Self> {
        Walk {
            links: self,
            head,
            current: self.next(head),
        }
    }

    /// A forward walk which does not borrow the list. See [`SafeWalk`].
    fn safe_walk(&self, head: NodeId) -> SafeWalk {
        SafeWalk {
            head,
            next: self.next(head),
        }
    }
}

/// Borrowing forward iterator created by [`Links::walk`].
pub struct Walk<'a, L: ?Sized> {
    links: &'a L,
    head: NodeId,
    current: NodeId,
}

impl<L: Links + ?Sized> Iterator for Walk<'_, L> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.head {
            return None;
        }
        let node = self.current;
        self.current = self.links.next(node);
        Some(node)
    }
}

impl<L: Links + ?Sized> FusedIterator for Walk<'_, L> {}

/// Forward walk that tolerates removal of the node it just yielded.
///
/// The successor is read *before* the current node is handed out, so the
/// caller is free to unlink, move or recycle that node before asking for
/// the next one. Mutating any other node of the list during the walk is not
/// supported.
///
/// ```
/// use lab_queue::link::{Link, Links, NodeId};
///
/// let ids: Vec<NodeId> = (0..4).map(NodeId::new).collect();
/// let links: Vec<Link> = ids.iter().map(|&id| Link::detached(id)).collect();
/// # struct Arena(Vec<Link>);
/// # impl Links for Arena {
/// #     fn link(&self, node: NodeId) -> &Link { &self.0[node.index()] }
/// #     fn link_mut(&mut self, node: NodeId) -> &mut Link { &mut self.0[node.index()] }
/// # }
/// let mut arena = Arena(links);
/// for &id in &ids[1..] {
///     arena.insert_before(ids[0], id);
/// }
///
/// // Unlink everything while walking.
/// let mut walk = arena.safe_walk(ids[0]);
/// while let Some(node) = walk.next(&arena) {
///     arena.unlink_init(node);
/// }
/// assert!(arena.is_empty(ids[0]));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SafeWalk {
    head: NodeId,
    next: NodeId,
}

impl SafeWalk {
    pub fn next<L: Links + ?Sized>(&mut self, links: &L) -> Option<NodeId> {
        if self.next == self.head {
            return None;
        }
        let current = self.next;
        self.next = links.next(current);
        Some(current)
    }
}

#[cfg(debug_assertions)]
fn assert_adjacent<L: Links + ?Sized>(links: &L, prev: NodeId, next: NodeId) {
    assert_eq!(links.next(prev), next);
    assert_eq!(links.prev(next), prev);
}

#[cfg(test)]
mod tests {
    use super::{Link, Links, NodeId};

    struct Arena(Vec<Link>);

    impl Links for Arena {
        fn link(&self, node: NodeId) -> &Link {
            &self.0[node.index()]
        }
        fn link_mut(&mut self, node: NodeId) -> &mut Link {
            &mut self.0[node.index()]
        }
    }

    fn arena(n: usize) -> (Arena, Vec<NodeId>) {
        let ids: Vec<NodeId> = (0..n).map(NodeId::new).collect();
        let links = ids.iter().map(|&id| Link::detached(id)).collect();
        (Arena(links), ids)
    }

    fn assert_well_formed(arena: &Arena, head: NodeId) {
        let mut node = head;
        loop {
            let next = arena.next(node);
            assert_eq!(arena.prev(next), node);
            node = next;
            if node == head {
                break;
            }
        }
    }

    #[test]
    fn link_init_is_empty() {
        let (mut arena, ids) = arena(2);
        let head = ids[0];
        assert!(arena.is_empty(head));
        assert!(!arena.is_singular(head));

        arena.insert_after(head, ids[1]);
        assert!(!arena.is_empty(head));
        assert!(arena.is_singular(head));

        arena.init(head);
        assert!(arena.is_empty(head));
    }

    #[test]
    fn link_insert_and_unlink() {
        let (mut arena, ids) = arena(5);
        let head = ids[0];
        arena.insert_after(head, ids[1]); // [1]
        arena.insert_before(head, ids[2]); // [1, 2]
        arena.insert_after(head, ids[3]); // [3, 1, 2]
        arena.insert_before(ids[1], ids[4]); // [3, 4, 1, 2]
        assert_well_formed(&arena, head);
        assert_eq!(
            arena.walk(head).collect::<Vec<_>>(),
            vec![ids[3], ids[4], ids[1], ids[2]]
        );
        assert!(!arena.is_singular(head));

        arena.unlink(ids[4]);
        assert_well_formed(&arena, head);
        assert_eq!(
            arena.walk(head).collect::<Vec<_>>(),
            vec![ids[3], ids[1], ids[2]]
        );

        arena.unlink_init(ids[1]);
        assert_eq!(*arena.link(ids[1]), Link::detached(ids[1]));
        assert!(arena.is_empty(ids[1]));
        assert_eq!(arena.walk(head).collect::<Vec<_>>(), vec![ids[3], ids[2]]);
    }

    #[test]
    fn link_move() {
        let (mut arena, ids) = arena(4);
        let head = ids[0];
        for &id in &ids[1..] {
            arena.insert_before(head, id);
        }
        arena.move_to_front(ids[3], head);
        assert_eq!(
            arena.walk(head).collect::<Vec<_>>(),
            vec![ids[3], ids[1], ids[2]]
        );
        arena.move_to_back(ids[3], head);
        assert_eq!(
            arena.walk(head).collect::<Vec<_>>(),
            vec![ids[1], ids[2], ids[3]]
        );
        // moving the only front node to the front is a no-op
        arena.move_to_front(ids[1], head);
        assert_eq!(
            arena.walk(head).collect::<Vec<_>>(),
            vec![ids[1], ids[2], ids[3]]
        );
        assert_well_formed(&arena, head);
    }

    #[test]
    fn link_move_between_lists() {
        let (mut arena, ids) = arena(4);
        let (left, right) = (ids[0], ids[1]);
        arena.insert_before(left, ids[2]);
        arena.insert_before(left, ids[3]);

        arena.move_to_back(ids[2], right);
        assert_eq!(arena.walk(left).collect::<Vec<_>>(), vec![ids[3]]);
        assert_eq!(arena.walk(right).collect::<Vec<_>>(), vec![ids[2]]);
        assert_well_formed(&arena, left);
        assert_well_formed(&arena, right);
    }

    #[test]
    fn link_safe_walk_tolerates_removal() {
        let (mut arena, ids) = arena(6);
        let head = ids[0];
        for &id in &ids[1..] {
            arena.insert_before(head, id);
        }
        let mut seen = Vec::new();
        let mut walk = arena.safe_walk(head);
        while let Some(node) = walk.next(&arena) {
            seen.push(node);
            if node.index() % 2 == 0 {
                arena.unlink_init(node);
            }
        }
        assert_eq!(seen, ids[1..].to_vec());
        assert_eq!(
            arena.walk(head).collect::<Vec<_>>(),
            vec![ids[1], ids[3], ids[5]]
        );
        assert_well_formed(&arena, head);
    }

    #[test]
    fn link_safe_walk_reinserting_at_front() {
        let (mut arena, ids) = arena(4);
        let head = ids[0];
        for &id in &ids[1..] {
            arena.insert_before(head, id);
        }
        let mut walk = arena.safe_walk(head);
        while let Some(node) = walk.next(&arena) {
            arena.move_to_front(node, head);
        }
        assert_eq!(
            arena.walk(head).collect::<Vec<_>>(),
            vec![ids[3], ids[2], ids[1]]
        );
    }
}

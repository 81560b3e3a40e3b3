use std::collections::TryReserveError;
use std::fmt::{Debug, Formatter};

use crate::element::{copy_out, Element, Escaped};
use crate::error::QueueError;
use crate::link::{Link, Links, NodeId};
use crate::queue::iterator::Iter;

pub mod iterator;

mod algorithms;

/// The ghost node of every queue: slot 0 of its arena.
pub(crate) const GHOST: NodeId = NodeId::new(0);

/// A double-ended queue of byte strings on a cyclic, intrusive, doubly-linked
/// list.
///
/// Nodes are slots of an arena owned by the queue. Every node embeds its own
/// [`Link`], and the ghost node in slot 0 (which carries no payload) closes
/// the cycle: `ghost.next` is the head and `ghost.prev` is the tail.
///
/// The `Queue` contains:
/// - the arena of nodes, whose slot 0 is the ghost node;
/// - the head of the free chain, threading vacated slots through their own
///   `next` links so later insertions reuse them.
///
/// No length is cached; [`Queue::size`] walks the list.
///
/// Payloads are arbitrary bytes, not necessarily UTF-8: anything that is
/// `AsRef<[u8]>` (`&str`, `&[u8]`, `String`, byte literals, ...) can be
/// inserted, and is copied byte for byte.
pub struct Queue {
    nodes: Arena,
}

/// Node storage of a queue.
pub(crate) struct Arena {
    slots: Vec<Node>,
    free: Option<NodeId>,
}

pub(crate) struct Node {
    link: Link,
    value: Option<Vec<u8>>,
}

impl Links for Arena {
    #[inline]
    fn link(&self, node: NodeId) -> &Link {
        &self.slots[node.index()].link
    }

    #[inline]
    fn link_mut(&mut self, node: NodeId) -> &mut Link {
        &mut self.slots[node.index()].link
    }
}

// private methods
impl Arena {
    fn with_ghost() -> Self {
        Self {
            slots: vec![ghost()],
            free: None,
        }
    }

    fn try_with_ghost() -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(1)?;
        slots.push(ghost());
        Ok(Self { slots, free: None })
    }

    /// The payload of `node`, or `""` for the ghost node.
    #[inline]
    pub(crate) fn value(&self, node: NodeId) -> &[u8] {
        self.slots[node.index()].value.as_deref().unwrap_or_default()
    }

    /// Pop a slot off the free chain and leave it detached.
    fn pop_free(&mut self) -> Option<NodeId> {
        let node = self.free?;
        let next = self.next(node);
        self.free = if next == GHOST { None } else { Some(next) };
        self.init(node);
        Some(node)
    }

    fn push_slot(&mut self) -> NodeId {
        let node = NodeId::new(self.slots.len());
        self.slots.push(Node {
            link: Link::detached(node),
            value: None,
        });
        node
    }

    /// Take a detached slot, reusing the free chain before growing the arena.
    fn acquire(&mut self) -> Result<NodeId, TryReserveError> {
        if let Some(node) = self.pop_free() {
            return Ok(node);
        }
        self.slots.try_reserve(1)?;
        Ok(self.push_slot())
    }

    /// Build a detached node holding a copy of `s`.
    ///
    /// If the copy cannot be allocated, the slot is handed back before the
    /// error is returned.
    fn try_new_node(&mut self, s: &[u8]) -> Result<NodeId, QueueError> {
        let node = self.acquire()?;
        let mut value = Vec::new();
        if let Err(err) = value.try_reserve_exact(s.len()) {
            self.recycle(node);
            return Err(err.into());
        }
        value.extend_from_slice(s);
        self.slots[node.index()].value = Some(value);
        Ok(node)
    }

    /// Like [`Arena::try_new_node`], but aborts on allocation failure like
    /// any std collection.
    pub(crate) fn new_node(&mut self, value: Vec<u8>) -> NodeId {
        let node = match self.pop_free() {
            Some(node) => node,
            None => self.push_slot(),
        };
        self.slots[node.index()].value = Some(value);
        node
    }

    /// Put a detached slot on the free chain and hand back its payload.
    fn recycle(&mut self, node: NodeId) -> Option<Vec<u8>> {
        debug_assert_ne!(node, GHOST, "the ghost node is never recycled");
        let slot = &mut self.slots[node.index()];
        let value = slot.value.take();
        slot.link = Link {
            next: self.free.unwrap_or(GHOST),
            prev: node,
        };
        self.free = Some(node);
        value
    }

    /// Splice `node` out of the list and free both its payload and its slot.
    pub(crate) fn release(&mut self, node: NodeId) {
        self.unlink_init(node);
        drop(self.recycle(node));
    }

    /// Splice `node` out of the list and move its payload into an [`Element`].
    fn take(&mut self, node: NodeId, buf: Option<&mut [u8]>) -> Option<Element> {
        self.unlink_init(node);
        let value = self.recycle(node)?;
        if let Some(buf) = buf {
            copy_out(&value, buf);
        }
        Some(Element::new(value))
    }

    /// Drop every vacant slot. Only valid on an empty list.
    fn compact(&mut self) {
        debug_assert!(Links::is_empty(self, GHOST));
        self.slots.truncate(1);
        self.slots.shrink_to_fit();
        self.free = None;
    }
}

fn ghost() -> Node {
    Node {
        link: Link::detached(GHOST),
        value: None,
    }
}

impl Queue {
    /// Create an empty `Queue`.
    ///
    /// # Examples
    /// ```
    /// use lab_queue::Queue;
    /// let queue = Queue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes: Arena::with_ghost(),
        }
    }

    /// Create an empty `Queue`, reporting a failed allocation of the ghost
    /// node instead of aborting.
    ///
    /// # Examples
    /// ```
    /// use lab_queue::Queue;
    /// let queue = Queue::try_new().unwrap();
    /// assert_eq!(queue.size(), 0);
    /// ```
    pub fn try_new() -> Result<Self, QueueError> {
        Ok(Self {
            nodes: Arena::try_with_ghost()?,
        })
    }

    /// Release every element, then the ghost node.
    ///
    /// This is what dropping the queue does as well; it exists to make the
    /// end of a queue's life explicit at the call site.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn destroy(mut self) {
        self.clear();
    }

    /// Release every element, keeping the queue itself.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "b"]);
    /// queue.clear();
    /// assert!(queue.is_empty());
    /// assert_eq!(queue.front(), None);
    /// ```
    pub fn clear(&mut self) {
        let mut walk = self.nodes.safe_walk(GHOST);
        while let Some(node) = walk.next(&self.nodes) {
            self.nodes.release(node);
        }
        self.nodes.compact();
    }

    /// Returns `true` if the `Queue` holds no element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        Links::is_empty(&self.nodes, GHOST)
    }

    /// Returns `true` if the `Queue` holds exactly one element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_singular(&self) -> bool {
        Links::is_singular(&self.nodes, GHOST)
    }

    /// Returns the number of elements, counted by walking the whole list.
    ///
    /// Nothing is cached, so the count is always that of the nodes actually
    /// linked when the call is made.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_head("b").unwrap();
    /// queue.insert_tail("c").unwrap();
    /// assert_eq!(queue.size(), 2);
    /// ```
    pub fn size(&self) -> usize {
        self.nodes.walk(GHOST).count()
    }

    /// Provides the front payload, or `None` if the queue is empty.
    #[inline]
    pub fn front(&self) -> Option<&[u8]> {
        self.iter().next()
    }

    /// Provides the back payload, or `None` if the queue is empty.
    #[inline]
    pub fn back(&self) -> Option<&[u8]> {
        self.iter().next_back()
    }

    /// Copy the bytes of `s` into a new element at the head of the queue.
    ///
    /// The caller's buffer is never retained. On
    /// [`QueueError::AllocationFailure`] the queue is left unchanged.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_head("b").unwrap();
    /// queue.insert_head(b"a\xff").unwrap();
    /// assert_eq!(queue.front(), Some(&b"a\xff"[..]));
    /// assert_eq!(queue.back(), Some(&b"b"[..]));
    /// ```
    pub fn insert_head<S>(&mut self, s: &S) -> Result<(), QueueError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        let node = self.nodes.try_new_node(s.as_ref())?;
        self.nodes.insert_after(GHOST, node);
        Ok(())
    }

    /// Copy the bytes of `s` into a new element at the tail of the queue.
    ///
    /// See [`Queue::insert_head`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.insert_tail("a").unwrap();
    /// queue.insert_tail("b").unwrap();
    /// assert_eq!(queue.back(), Some(&b"b"[..]));
    /// ```
    pub fn insert_tail<S>(&mut self, s: &S) -> Result<(), QueueError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        let node = self.nodes.try_new_node(s.as_ref())?;
        self.nodes.insert_before(GHOST, node);
        Ok(())
    }

    /// Unlink the head element and hand it over, or return `None` if the
    /// queue is empty.
    ///
    /// If `buf` is given, at most `buf.len() - 1` bytes of the payload are
    /// copied into it, followed by a NUL byte. Nothing is freed: the
    /// returned [`Element`] owns the payload.
    ///
    /// Removing the last element also drops the vacant slots, so a drained
    /// queue is back to its initial footprint.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["gnu", "yak"]);
    /// let mut buf = [0u8; 3];
    ///
    /// let element = queue.remove_head(Some(&mut buf)).unwrap();
    /// assert_eq!(element.value(), b"gnu");
    /// assert_eq!(&buf, b"gn\0");
    /// element.release();
    ///
    /// assert_eq!(queue.size(), 1);
    /// ```
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        let front = self.nodes.next(GHOST);
        let element = self.nodes.take(front, buf);
        self.shrink_if_empty();
        element
    }

    /// Unlink the tail element and hand it over, or return `None` if the
    /// queue is empty.
    ///
    /// See [`Queue::remove_head`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["gnu", "yak"]);
    /// let mut buf = [0u8; 8];
    ///
    /// let element = queue.remove_tail(Some(&mut buf)).unwrap();
    /// assert_eq!(element, "yak");
    /// assert_eq!(&buf[..4], b"yak\0");
    /// assert_eq!(queue.remove_tail(None).unwrap(), "gnu");
    /// assert!(queue.remove_tail(None).is_none());
    /// ```
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        if self.is_empty() {
            return None;
        }
        let back = self.nodes.prev(GHOST);
        let element = self.nodes.take(back, buf);
        self.shrink_if_empty();
        element
    }

    /// Provides a forward iterator over the payloads.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let queue = Queue::from_iter(["a", "b", "c"]);
    /// let mut iter = queue.iter();
    /// assert_eq!(iter.next(), Some(&b"a"[..]));
    /// assert_eq!(iter.next_back(), Some(&b"c"[..]));
    /// assert_eq!(iter.next(), Some(&b"b"[..]));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Give back the vacant slots once the last element is gone.
    pub(crate) fn shrink_if_empty(&mut self) {
        if self.is_empty() {
            self.nodes.compact();
        }
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(Escaped)).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Queue {
    /// Check every link invariant and return the payloads front to back.
    pub(crate) fn checked_bytes(&self) -> Vec<&[u8]> {
        let nodes = &self.nodes;
        let mut seen = Vec::new();
        let mut node = GHOST;
        loop {
            let next = nodes.next(node);
            assert_eq!(nodes.prev(next), node, "broken prev link at {:?}", next);
            assert_eq!(nodes.next(nodes.prev(node)), node);
            node = next;
            if node == GHOST {
                break;
            }
            assert!(nodes.slots[node.index()].value.is_some());
            seen.push(nodes.value(node));
            assert!(seen.len() < nodes.slots.len(), "cycle skips the ghost node");
        }
        assert_eq!(seen.len(), self.size());
        seen
    }

    /// [`Queue::checked_bytes`] for queues holding UTF-8 text only.
    pub(crate) fn checked(&self) -> Vec<&str> {
        self.checked_bytes()
            .into_iter()
            .map(|s| std::str::from_utf8(s).unwrap())
            .collect()
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.slots.len()
    }

    /// Number of slots on the free chain.
    pub(crate) fn vacant(&self) -> usize {
        let mut count = 0;
        let mut free = self.nodes.free;
        while let Some(node) = free {
            count += 1;
            let next = self.nodes.next(node);
            free = if next == GHOST { None } else { Some(next) };
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use crate::queue::Queue;

    #[test]
    fn queue_create() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        assert!(!queue.is_singular());
        assert_eq!(queue.size(), 0);
        queue.insert_tail("a").unwrap();
        assert!(!queue.is_empty());
        assert!(queue.is_singular());
        assert_eq!(queue.remove_tail(None).unwrap(), "a");
        assert!(queue.is_empty());
        assert!(queue.checked().is_empty());

        let queue = Queue::try_new().unwrap();
        assert!(queue.is_empty());
        queue.destroy();
    }

    #[test]
    fn queue_insert_and_remove() {
        let mut queue = Queue::new();
        assert_eq!(queue.front(), None);
        assert_eq!(queue.back(), None);
        assert!(queue.remove_head(None).is_none());
        assert!(queue.remove_tail(None).is_none());

        queue.insert_tail("b").unwrap();
        queue.insert_head("a").unwrap();
        queue.insert_tail("c").unwrap();
        assert_eq!(queue.checked(), ["a", "b", "c"]);
        assert_eq!(queue.front(), Some(&b"a"[..]));
        assert_eq!(queue.back(), Some(&b"c"[..]));

        assert_eq!(queue.remove_head(None).unwrap(), "a");
        assert_eq!(queue.remove_tail(None).unwrap(), "c");
        assert_eq!(queue.checked(), ["b"]);
        assert_eq!(queue.remove_head(None).unwrap(), "b");
        assert!(queue.remove_head(None).is_none());
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn queue_insert_copies() {
        let mut queue = Queue::new();
        let mut s = String::from("heron");
        queue.insert_head(&s).unwrap();
        s.clear();
        s.push_str("egret");
        assert_eq!(queue.checked(), ["heron"]);

        queue.insert_tail("").unwrap();
        assert_eq!(queue.checked(), ["heron", ""]);
    }

    #[test]
    fn queue_remove_copy_out() {
        let mut queue = Queue::from_iter(["kangaroo", "emu"]);

        let mut buf = [0xffu8; 5];
        let element = queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(&buf, b"kang\0");
        assert_eq!(element.value(), b"kangaroo");

        let mut buf = [0xffu8; 16];
        let element = queue.remove_tail(Some(&mut buf)).unwrap();
        assert_eq!(&buf[..4], b"emu\0");
        assert_eq!(element.value(), b"emu");

        // empty queue leaves the buffer alone
        let mut buf = [0xffu8; 4];
        assert!(queue.remove_head(Some(&mut buf)).is_none());
        assert_eq!(buf, [0xff; 4]);
    }

    #[test]
    fn queue_insert_head_then_remove_head() {
        for s in ["", "a", "ostrich", "a much longer string than the buffer"] {
            let mut queue = Queue::from_iter(["x", "y"]);
            queue.insert_head(s).unwrap();
            let mut buf = [0u8; 8];
            let element = queue.remove_head(Some(&mut buf)).unwrap();
            assert_eq!(element.value(), s.as_bytes());
            let copied = s.len().min(buf.len() - 1);
            assert_eq!(&buf[..copied], &s.as_bytes()[..copied]);
            assert_eq!(buf[copied], 0);
            assert_eq!(queue.checked(), ["x", "y"]);
        }
    }

    #[test]
    fn queue_size_tracks_links() {
        let mut queue = Queue::new();
        let mut expected = 0;
        for i in 1..50 {
            let s = i.to_string();
            if i % 3 == 0 {
                queue.insert_head(&s).unwrap();
            } else {
                queue.insert_tail(&s).unwrap();
            }
            expected += 1;
            if i % 4 == 0 {
                queue.remove_tail(None).unwrap().release();
                expected -= 1;
            }
            if i % 7 == 0 {
                queue.remove_head(None).unwrap().release();
                expected -= 1;
            }
            assert_eq!(queue.size(), expected);
        }
        assert_eq!(queue.checked().len(), expected);
    }

    #[test]
    fn queue_reuses_slots() {
        let mut queue = Queue::from_iter(["a", "b", "c"]);
        queue.remove_head(None).unwrap();
        queue.remove_head(None).unwrap();
        assert_eq!(queue.vacant(), 2);

        queue.insert_tail("d").unwrap();
        assert_eq!(queue.vacant(), 1);
        queue.insert_head("e").unwrap();
        assert_eq!(queue.vacant(), 0);
        assert_eq!(queue.checked(), ["e", "c", "d"]);
        assert_eq!(queue.nodes.slots.len(), 4);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.vacant(), 0);
        assert_eq!(queue.nodes.slots.len(), 1);

        queue.insert_tail("f").unwrap();
        assert_eq!(queue.checked(), ["f"]);
    }

    #[test]
    fn queue_debug() {
        let queue = Queue::from_iter(["a", "b"]);
        assert_eq!(format!("{:?}", queue), r#"["a", "b"]"#);
        assert_eq!(format!("{:?}", Queue::new()), "[]");
        let payloads: [&[u8]; 2] = [b"caf\xe9", b"\"q\""];
        let queue = Queue::from_iter(payloads);
        assert_eq!(format!("{:?}", queue), r#"["caf\xe9", "\"q\""]"#);
    }

    #[test]
    fn queue_byte_payload_round_trip() {
        let payload: &[u8] = b"caf\xe9";
        assert!(std::str::from_utf8(payload).is_err());

        let mut queue = Queue::new();
        queue.insert_head(payload).unwrap();
        queue.insert_tail(b"\x00\xff").unwrap();
        assert_eq!(queue.checked_bytes(), vec![payload, &b"\x00\xff"[..]]);

        let mut buf = [0xffu8; 8];
        let element = queue.remove_head(Some(&mut buf)).unwrap();
        assert_eq!(element, payload);
        assert_eq!(&buf[..5], b"caf\xe9\0");

        // truncation counts bytes, not characters
        let mut buf = [0xffu8; 2];
        let element = queue.remove_tail(Some(&mut buf)).unwrap();
        assert_eq!(element.into_bytes(), b"\x00\xff");
        assert_eq!(buf, [0x00, 0x00]);
    }

    #[test]
    fn queue_drained_by_removal_gives_slots_back() {
        let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
        assert_eq!(queue.slot_count(), 5);
        queue.remove_head(None).unwrap();
        queue.remove_tail(None).unwrap();
        assert_eq!(queue.vacant(), 2);
        assert_eq!(queue.slot_count(), 5);

        queue.remove_tail(None).unwrap();
        queue.remove_head(None).unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.vacant(), 0);
        assert_eq!(queue.slot_count(), 1);

        queue.insert_head("e").unwrap();
        assert_eq!(queue.checked(), ["e"]);
        assert_eq!(queue.slot_count(), 2);
    }
}

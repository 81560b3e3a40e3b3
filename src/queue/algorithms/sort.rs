use crate::link::{Links, NodeId};
use crate::queue::{Arena, Queue, GHOST};
use std::cmp::Ordering;

/// End of a singly-linked chain while sorting.
///
/// The ghost node is not part of any chain during the sort, so its id is
/// free to mean "no node". The back element already points at it, which
/// makes the list a NIL-terminated chain as soon as the sort starts
/// ignoring `prev` links.
const NIL: NodeId = GHOST;

impl Queue {
    /// Sort the queue in ascending byte-wise order.
    ///
    /// This sort is stable (i.e., does not reorder equal elements), and
    /// only rewrites links: no payload is copied or moved.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1)
    /// memory.
    ///
    /// # Current Implementation
    ///
    /// A bottom-up merge sort over the `next` links. Sorted runs wait on a
    /// stack threaded through the `prev` links of their first nodes, and two
    /// runs are merged as soon as a third run of the same size shows up, so
    /// merges stay balanced. The `prev` links are rebuilt in one final pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["pear", "fig", "apple", "fig"]);
    /// queue.sort();
    /// assert_eq!(queue, Queue::from_iter(["apple", "fig", "fig", "pear"]));
    /// ```
    pub fn sort(&mut self) {
        merge_sort(&mut self.nodes, |a, b| a < b);
    }

    /// Sort the queue with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the queue. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1)
    /// memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["bb", "a", "ccc", "dd"]);
    /// queue.sort_by(|a, b| a.len().cmp(&b.len()));
    /// assert_eq!(queue, Queue::from_iter(["a", "bb", "dd", "ccc"]));
    ///
    /// // reverse sorting
    /// queue.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(queue, Queue::from_iter(["dd", "ccc", "bb", "a"]));
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        merge_sort(&mut self.nodes, |a, b| compare(a, b) == Ordering::Less);
    }
}

fn merge_sort<F>(nodes: &mut Arena, mut less: F)
where
    F: FnMut(&[u8], &[u8]) -> bool,
{
    if Links::is_empty(nodes, GHOST) || Links::is_singular(nodes, GHOST) {
        return;
    }

    let mut list = nodes.next(GHOST);
    let mut pending = NIL;
    let mut count: usize = 0;
    while list != NIL {
        // The trailing one bits of `count` tell how many runs on top of the
        // stack are already unbalanced; skip them. If a clear bit remains,
        // the two runs right below have equal size: merge them.
        let mut bits = count;
        let mut holder = NIL;
        let mut top = pending;
        while bits & 1 == 1 {
            holder = top;
            top = nodes.prev(top);
            bits >>= 1;
        }
        if bits != 0 {
            let older = nodes.prev(top);
            let below = nodes.prev(older);
            let merged = merge(nodes, &mut less, older, top);
            nodes.link_mut(merged).prev = below;
            if holder == NIL {
                pending = merged;
            } else {
                nodes.link_mut(holder).prev = merged;
            }
        }

        // Push the next node as a run of length one.
        let next = nodes.next(list);
        let link = nodes.link_mut(list);
        link.prev = pending;
        link.next = NIL;
        pending = list;
        list = next;
        count += 1;
    }

    // Fold the remaining runs, newest into older.
    let mut list = pending;
    let mut pending = nodes.prev(list);
    while pending != NIL {
        let next = nodes.prev(pending);
        list = merge(nodes, &mut less, pending, list);
        pending = next;
    }

    relink(nodes, list);
}

/// Merge two NIL-terminated sorted runs, `a` being the one that came first
/// in the input. Returns the head of the merged run.
///
/// Only `next` links are written.
fn merge<F>(nodes: &mut Arena, less: &mut F, mut a: NodeId, mut b: NodeId) -> NodeId
where
    F: FnMut(&[u8], &[u8]) -> bool,
{
    let mut head = NIL;
    let mut tail = NIL;
    loop {
        // Ties take from `a`, which keeps the sort stable.
        if less(nodes.value(b), nodes.value(a)) {
            append(nodes, &mut head, &mut tail, b);
            b = nodes.next(b);
            if b == NIL {
                nodes.link_mut(tail).next = a;
                break;
            }
        } else {
            append(nodes, &mut head, &mut tail, a);
            a = nodes.next(a);
            if a == NIL {
                nodes.link_mut(tail).next = b;
                break;
            }
        }
    }
    head
}

#[inline]
fn append(nodes: &mut Arena, head: &mut NodeId, tail: &mut NodeId, node: NodeId) {
    if *tail == NIL {
        *head = node;
    } else {
        nodes.link_mut(*tail).next = node;
    }
    *tail = node;
}

/// Restore `prev` links along the chain starting at `first`, and close the
/// cycle through the ghost node.
fn relink(nodes: &mut Arena, first: NodeId) {
    let mut prev = GHOST;
    let mut node = first;
    while node != NIL {
        let next = nodes.next(node);
        nodes.connect(prev, node);
        prev = node;
        node = next;
    }
    nodes.connect(prev, GHOST);
}

use crate::error::QueueError;
use crate::link::Links;
use crate::queue::{Queue, GHOST};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::hash::{Hash, Hasher};

mod sort;

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl Eq for Queue {}

impl Clone for Queue {
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

impl Hash for Queue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl Queue {
    /// Returns `true` if the `Queue` contains a payload equal to `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let queue = Queue::from_iter(["ant", "bee"]);
    /// assert!(queue.contains("bee"));
    /// assert!(!queue.contains("cow"));
    /// assert!(!queue.contains(b"ant\0"));
    /// ```
    pub fn contains<S>(&self, x: &S) -> bool
    where
        S: AsRef<[u8]> + ?Sized,
    {
        let x = x.as_ref();
        self.iter().any(|e| e == x)
    }

    /// Delete the middle element, the ⌊*n* / 2⌋-th one counting from 0 at
    /// the head.
    ///
    /// Returns [`QueueError::InvalidArgument`] if the queue is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time: one walk to count,
    /// and one walk of half the length to reach the middle.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e", "f"]);
    /// queue.delete_mid().unwrap();
    /// assert_eq!(queue, Queue::from_iter(["a", "b", "c", "e", "f"]));
    /// ```
    pub fn delete_mid(&mut self) -> Result<(), QueueError> {
        if self.is_empty() {
            return Err(QueueError::InvalidArgument);
        }
        // One step per two units of `remaining`: `n + 1` units take
        // ⌊n / 2⌋ + 1 steps from the ghost node, landing on the middle.
        let mut remaining = self.size() + 1;
        let mut node = GHOST;
        while remaining > 0 {
            node = self.nodes.next(node);
            remaining = remaining.saturating_sub(2);
        }
        self.nodes.release(node);
        self.shrink_if_empty();
        Ok(())
    }

    /// Delete every payload that occurs more than once in a row, keeping
    /// only those that were distinct from both of their neighbours.
    ///
    /// The queue is expected to be sorted in ascending order already, so
    /// that equal strings are adjacent. This is not checked: on an unsorted
    /// queue only the runs of equal neighbours are removed.
    ///
    /// Returns `Ok` on an empty or singular queue without touching it.
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
    /// let mut queue = Queue::from_iter(["a", "b", "b", "c", "d", "d", "d"]);
    /// queue.delete_dup().unwrap();
    /// assert_eq!(queue, Queue::from_iter(["a", "c"]));
    /// ```
    pub fn delete_dup(&mut self) -> Result<(), QueueError> {
        if self.is_empty() || self.is_singular() {
            return Ok(());
        }
        let nodes = &mut self.nodes;
        // number of elements from `node` to the back, inclusive
        let mut remaining = nodes.walk(GHOST).count();
        let mut node = nodes.next(GHOST);
        while remaining > 1 {
            let mut next = nodes.next(node);
            if nodes.value(node) != nodes.value(next) {
                node = next;
                remaining -= 1;
                continue;
            }
            while remaining > 1 && nodes.value(node) == nodes.value(next) {
                nodes.release(next);
                remaining -= 1;
                next = nodes.next(node);
            }
            nodes.release(node);
            node = next;
            remaining -= 1;
        }
        self.shrink_if_empty();
        Ok(())
    }

    /// Swap every two adjacent elements: the 1st with the 2nd, the 3rd with
    /// the 4th, and so on. A trailing odd element stays in place.
    ///
    /// Only links are rewritten; no payload is copied or moved.
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
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// queue.swap();
    /// assert_eq!(queue, Queue::from_iter(["b", "a", "d", "c", "e"]));
    /// ```
    pub fn swap(&mut self) {
        let nodes = &mut self.nodes;
        let mut left = nodes.next(GHOST);
        while left != GHOST {
            let right = nodes.next(left);
            if right == GHOST {
                break;
            }
            nodes.unlink(left);
            nodes.insert_after(right, left);
            left = nodes.next(left);
        }
    }

    /// Reverse the order of the elements in place.
    ///
    /// Each element, in the original front-to-back order, is detached and
    /// put back at the head. Nothing is allocated or freed.
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
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    /// queue.reverse();
    /// assert_eq!(queue, Queue::from_iter(["c", "b", "a"]));
    /// ```
    pub fn reverse(&mut self) {
        let mut walk = self.nodes.safe_walk(GHOST);
        while let Some(node) = walk.next(&self.nodes) {
            self.nodes.move_to_front(node, GHOST);
        }
    }

    /// Shuffle the queue with a generator freshly seeded from the operating
    /// system's entropy source.
    ///
    /// Use [`Queue::shuffle_with`] to supply the generator, e.g. a seeded one
    /// for reproducible permutations.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
    /// queue.shuffle();
    /// queue.sort();
    /// assert_eq!(queue, Queue::from_iter(["a", "b", "c", "d"]));
    /// ```
    pub fn shuffle(&mut self) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let mut rng = SmallRng::from_os_rng();
        self.shuffle_with(&mut rng);
    }

    /// Shuffle the queue into a uniformly random permutation drawn from
    /// `rng`.
    ///
    /// This is a Fisher–Yates shuffle without an index array: the
    /// unshuffled elements stay at the front, and at each round one of them
    /// is picked uniformly, reached by walking the list, and moved to the
    /// back where the shuffled elements accumulate.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*²) time, since every pick
    /// walks the unshuffled part of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use lab_queue::Queue;
    /// use rand::rngs::SmallRng;
    /// use rand::SeedableRng;
    ///
    /// let mut a = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// let mut b = a.clone();
    /// a.shuffle_with(&mut SmallRng::seed_from_u64(7));
    /// b.shuffle_with(&mut SmallRng::seed_from_u64(7));
    /// assert_eq!(a, b);
    /// ```
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        let nodes = &mut self.nodes;
        let len = nodes.walk(GHOST).count();
        for remaining in (2..=len).rev() {
            let steps = rng.random_range(0..remaining);
            let mut picked = nodes.next(GHOST);
            for _ in 0..steps {
                picked = nodes.next(picked);
            }
            nodes.move_to_back(picked, GHOST);
        }
    }
}

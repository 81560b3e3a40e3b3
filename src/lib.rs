//! This crate provides a double-ended queue of byte strings, implemented as
//! a cyclic, intrusive, doubly-linked list.
//!
//! The [`Queue`] inserts and removes at either end in constant time, and
//! rearranges itself (reverse, swap, sort, shuffle, ...) by rewriting links
//! only: a payload, once copied into the queue, never moves until it is
//! removed. Payloads are raw bytes (`&str`, `&[u8]` and byte literals all
//! go in unchanged) and compare byte-wise.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use lab_queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.insert_tail("b").unwrap();
//! queue.insert_tail("a").unwrap();
//! queue.insert_head("c").unwrap();
//! assert_eq!(queue.size(), 3);
//!
//! queue.sort();
//! assert_eq!(queue, Queue::from_iter(["a", "b", "c"]));
//!
//! let mut buf = [0u8; 8];
//! let element = queue.remove_head(Some(&mut buf)).unwrap();
//! assert_eq!(element.value(), b"a");
//! assert_eq!(&buf[..2], b"a\0");
//! element.release();
//! ```
//!
//! # Memory Layout
//!
//! The nodes of a queue live in an arena, addressed by [`NodeId`]s. The
//! layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Slot 0  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢                        ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║  Vec<u8>  ║           ║  Vec<u8>  ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │     Head                                                          ↑
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//! Each node embeds its own [`Link`] (the `next` and `prev` ids), so linking
//! a node into the list needs no allocation beyond the node itself. Slot 0
//! of the arena is the ghost node: it carries no payload, and in an empty
//! queue both of its links point back to itself.
//!
//! Slots vacated by removals are chained through their own `next` links and
//! reused by later insertions.
//!
//! # Ownership
//!
//! - [`Queue::insert_head`] and [`Queue::insert_tail`] copy the payload;
//! - [`Queue::remove_head`] and [`Queue::remove_tail`] hand the payload over
//!   as an [`Element`], to be released by the caller;
//! - [`Queue::delete_mid`] and [`Queue::delete_dup`] free what they remove;
//! - [`Queue::destroy`] (or dropping the queue) frees everything.
//!
//! # Algorithms
//!
//! - [`delete_mid`]: delete the ⌊*n* / 2⌋-th element;
//! - [`delete_dup`]: on a sorted queue, delete every payload that occurs more
//!   than once;
//! - [`swap`]: swap every two adjacent elements;
//! - [`reverse`]: reverse the queue in place;
//! - [`sort`]: stable bottom-up merge sort;
//! - [`shuffle`]: Fisher–Yates shuffle without an index array.
//!
//! # Absent Queues
//!
//! The [`handle`] module offers the same operations over `Option<&mut Queue>`,
//! answering an absent queue with a neutral value instead of a panic.
//!
//! [`Queue`]: crate::Queue
//! [`Element`]: crate::Element
//! [`Link`]: crate::link::Link
//! [`NodeId`]: crate::link::NodeId
//! [`delete_mid`]: crate::Queue::delete_mid
//! [`delete_dup`]: crate::Queue::delete_dup
//! [`swap`]: crate::Queue::swap
//! [`reverse`]: crate::Queue::reverse
//! [`sort`]: crate::Queue::sort
//! [`shuffle`]: crate::Queue::shuffle

#[doc(inline)]
pub use element::Element;
#[doc(inline)]
pub use error::QueueError;
#[doc(inline)]
pub use queue::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use queue::Queue;

pub mod handle;
pub mod link;
pub mod queue;

mod element;
mod error;

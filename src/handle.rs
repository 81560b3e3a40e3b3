//! The queue operations over a handle that may be absent.
//!
//! Every function here accepts `None` where a queue is expected and answers
//! with a neutral value: `0`, `None`, a no-op, or
//! [`QueueError::InvalidArgument`] for operations that report success. An
//! absent handle is never a panic.
//!
//! ```
//! use lab_queue::handle;
//!
//! let mut queue = handle::create();
//! handle::insert_tail(queue.as_mut(), "owl").unwrap();
//! assert_eq!(handle::size(queue.as_ref()), 1);
//!
//! handle::destroy(queue.take());
//! assert_eq!(handle::size(queue.as_ref()), 0);
//! assert!(handle::insert_head(queue.as_mut(), "owl").is_err());
//! assert!(handle::remove_head(queue.as_mut(), None).is_none());
//! ```

use crate::element::Element;
use crate::error::QueueError;
use crate::queue::Queue;
use rand::Rng;

/// Create an empty queue, or `None` if the ghost node cannot be allocated.
pub fn create() -> Option<Queue> {
    Queue::try_new().ok()
}

/// Release every element of the queue, then the queue itself.
pub fn destroy(queue: Option<Queue>) {
    if let Some(queue) = queue {
        queue.destroy();
    }
}

pub fn insert_head<S>(queue: Option<&mut Queue>, s: &S) -> Result<(), QueueError>
where
    S: AsRef<[u8]> + ?Sized,
{
    queue.ok_or(QueueError::InvalidArgument)?.insert_head(s)
}

pub fn insert_tail<S>(queue: Option<&mut Queue>, s: &S) -> Result<(), QueueError>
where
    S: AsRef<[u8]> + ?Sized,
{
    queue.ok_or(QueueError::InvalidArgument)?.insert_tail(s)
}

/// See [`Queue::remove_head`].
pub fn remove_head(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    queue?.remove_head(buf)
}

/// See [`Queue::remove_tail`].
pub fn remove_tail(queue: Option<&mut Queue>, buf: Option<&mut [u8]>) -> Option<Element> {
    queue?.remove_tail(buf)
}

/// Free an element handed out by a remove.
pub fn release(element: Element) {
    element.release();
}

pub fn size(queue: Option<&Queue>) -> usize {
    queue.map_or(0, Queue::size)
}

pub fn delete_mid(queue: Option<&mut Queue>) -> Result<(), QueueError> {
    queue.ok_or(QueueError::InvalidArgument)?.delete_mid()
}

pub fn delete_dup(queue: Option<&mut Queue>) -> Result<(), QueueError> {
    queue.ok_or(QueueError::InvalidArgument)?.delete_dup()
}

pub fn swap(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.swap();
    }
}

pub fn reverse(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

pub fn sort(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.sort();
    }
}

pub fn shuffle(queue: Option<&mut Queue>) {
    if let Some(queue) = queue {
        queue.shuffle();
    }
}

pub fn shuffle_with<R: Rng + ?Sized>(queue: Option<&mut Queue>, rng: &mut R) {
    if let Some(queue) = queue {
        queue.shuffle_with(rng);
    }
}

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::str::Utf8Error;

/// An element removed from a [`Queue`](crate::Queue).
///
/// Removing from a queue never frees the payload: ownership of the byte
/// string moves into the returned `Element`, and the caller reclaims it with
/// [`Element::release`] (or by dropping it).
///
/// # Examples
///
/// ```
/// use lab_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("gerbil").unwrap();
///
/// let element = queue.remove_head(None).unwrap();
/// assert_eq!(element.value(), b"gerbil");
/// assert_eq!(element.to_str(), Ok("gerbil"));
/// element.release();
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element {
    value: Vec<u8>,
}

impl Element {
    pub(crate) fn new(value: Vec<u8>) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The payload as text, if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.value)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.value
    }

    /// Frees the payload and the element.
    #[inline]
    pub fn release(self) {
        drop(self)
    }
}

impl Deref for Element {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.value
    }
}

impl Borrow<[u8]> for Element {
    fn borrow(&self) -> &[u8] {
        &self.value
    }
}

impl AsRef<[u8]> for Element {
    fn as_ref(&self) -> &[u8] {
        &self.value
    }
}

impl PartialEq<[u8]> for Element {
    fn eq(&self, other: &[u8]) -> bool {
        self.value == other
    }
}

impl PartialEq<&[u8]> for Element {
    fn eq(&self, other: &&[u8]) -> bool {
        self.value == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Element {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.value == other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Element {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.value == *other
    }
}

impl PartialEq<str> for Element {
    fn eq(&self, other: &str) -> bool {
        self.value == other.as_bytes()
    }
}

impl PartialEq<&str> for Element {
    fn eq(&self, other: &&str) -> bool {
        self.value == other.as_bytes()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Escaped(&self.value), f)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.value))
    }
}

/// Debug view of a byte string: quoted, with non-printable and non-ASCII
/// bytes escaped (`"caf\xe9"`).
#[derive(Clone, Copy)]
pub(crate) struct Escaped<'a>(pub(crate) &'a [u8]);

impl fmt::Debug for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

/// Copies at most `buf.len() - 1` bytes of `value` into `buf`, followed by a
/// NUL terminator. A zero-length buffer is left untouched.
pub(crate) fn copy_out(value: &[u8], buf: &mut [u8]) {
    let Some(limit) = buf.len().checked_sub(1) else {
        return;
    };
    let len = value.len().min(limit);
    buf[..len].copy_from_slice(&value[..len]);
    buf[len] = 0;
}

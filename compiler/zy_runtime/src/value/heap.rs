//! Shared immutable allocation for heap-backed values.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Reference-counted payload of a `Value` variant.
///
/// The constructor is crate-private so heap values are only built through
/// the `Value` factory methods.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Rc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(value))
    }

    /// The payload, if this is the last handle to it.
    #[inline]
    pub(crate) fn into_inner(this: Self) -> Option<T> {
        Rc::into_inner(this.0)
    }
}

impl Heap<str> {
    #[inline]
    pub(crate) fn from_text(text: &str) -> Self {
        Heap(Rc::from(text))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_allocation() {
        let a = Heap::new(vec![1, 2, 3]);
        let b = a.clone();
        let c = Heap::new(vec![1, 2, 3]);
        assert!(Heap::ptr_eq(&a, &b));
        assert!(!Heap::ptr_eq(&a, &c));
        assert_eq!(*a, *c);
    }

    #[test]
    fn str_payload_derefs() {
        let s = Heap::from_text("abc");
        assert_eq!(&*s, "abc");
    }
}

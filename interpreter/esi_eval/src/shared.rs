//! Single-threaded shared mutable storage.
//!
//! Objects, arrays, and scope frames are reference types: any number of
//! values may hold the same storage and observe each other's writes.
//! `Shared<T>` wraps `Rc<RefCell<T>>` behind a factory so all such
//! allocations go through one place.
//!
//! # Thread Safety
//! `Shared<T>` is NOT thread-safe. Evaluation is single-threaded and
//! synchronous, so `Rc` is used instead of `Arc` deliberately.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Reference-counted interior-mutable cell used for object/array
/// backing storage and scope frames.
#[repr(transparent)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    /// Allocate new shared storage holding `value`.
    #[inline]
    pub fn new(value: T) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    ///
    /// Borrows must not be held across recursive evaluation; every
    /// caller takes one, reads or writes, and releases.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Identity comparison: do both handles point at the same storage?
    ///
    /// This is what `===` means for objects and arrays.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Shared<T> {
    #[inline]
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&self.0).finish()
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Shared::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let a = Shared::new(vec![1, 2]);
        let b = a.clone();
        b.borrow_mut().push(3);
        assert_eq!(*a.borrow(), vec![1, 2, 3]);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn separate_allocations_are_not_identical() {
        let a = Shared::new(1);
        let b = Shared::new(1);
        assert!(!a.ptr_eq(&b));
    }
}

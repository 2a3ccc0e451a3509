//! Iteration traits shared by the collections in this crate, so code can be
//! generic over what it walks.

pub trait Iterable {
    type Item;
    type Iter<'a>: Iterator<Item = &'a Self::Item> + 'a
    where
        Self: 'a;
    fn iter<'a>(&'a self) -> Self::Iter<'a>;
}

pub trait IterableMut {
    type Item;
    type IterMut<'a>: Iterator<Item = &'a mut Self::Item> + 'a
    where
        Self: 'a;
    fn iter_mut<'a>(&'a mut self) -> Self::IterMut<'a>;
}

/// Empties the collection, yielding every element by value.
pub trait Drainable {
    type Item;
    type Drain<'a>: Iterator<Item = Self::Item> + 'a
    where
        Self: 'a;
    fn drain<'a>(&'a mut self) -> Self::Drain<'a>;
}

mod impls {
    use super::*;
    use alloc::vec::Vec;

    impl<T> Iterable for Vec<T> {
        type Item = T;
        type Iter<'a> = core::slice::Iter<'a, T> where T: 'a;
        fn iter<'a>(&'a self) -> Self::Iter<'a> {
            self.as_slice().iter()
        }
    }

    impl<T> IterableMut for Vec<T> {
        type Item = T;
        type IterMut<'a> = core::slice::IterMut<'a, T> where T: 'a;
        fn iter_mut<'a>(&'a mut self) -> Self::IterMut<'a> {
            self.as_mut_slice().iter_mut()
        }
    }

    impl<T> Drainable for Vec<T> {
        type Item = T;
        type Drain<'a> = alloc::vec::Drain<'a, T> where T: 'a;
        fn drain<'a>(&'a mut self) -> Self::Drain<'a> {
            self.drain(..)
        }
    }
}

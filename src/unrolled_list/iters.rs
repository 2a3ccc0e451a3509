use super::{
    node::{Node, NodePtr},
    UnrolledList,
};
use allocator_api2::alloc::{Allocator, Global};
use core::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    marker::PhantomData,
    slice,
};

/// Borrowing iterator over the elements of an [`UnrolledList`].
///
/// Blocks are loaded lazily from either end. `head` and `tail` delimit the
/// blocks that have not been loaded yet and are both cleared once they meet.
pub struct Iter<'a, T, const N: usize = 10> {
    head: Option<NodePtr<T, N>>,
    tail: Option<NodePtr<T, N>>,
    front: slice::Iter<'a, T>,
    back: slice::Iter<'a, T>,
    len: usize,
}

impl<'a, T, const N: usize> Iter<'a, T, N> {
    pub(crate) fn new(head: Option<NodePtr<T, N>>, tail: Option<NodePtr<T, N>>, len: usize) -> Self {
        Self {
            head,
            tail,
            front: Default::default(),
            back: Default::default(),
            len,
        }
    }
}

impl<'a, T: 'a, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(elem) = self.front.next() {
                self.len -= 1;
                return Some(elem);
            }
            let Some(node) = self.head else {
                let elem = self.back.next()?;
                self.len -= 1;
                return Some(elem);
            };
            self.front = unsafe { Node::as_slice(node) }.iter();
            if self.tail == Some(node) {
                self.head = None;
                self.tail = None;
            } else {
                self.head = unsafe { (*node.as_ptr()).next };
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T: 'a, const N: usize> DoubleEndedIterator for Iter<'a, T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(elem) = self.back.next_back() {
                self.len -= 1;
                return Some(elem);
            }
            let Some(node) = self.tail else {
                let elem = self.front.next_back()?;
                self.len -= 1;
                return Some(elem);
            };
            self.back = unsafe { Node::as_slice(node) }.iter();
            if self.head == Some(node) {
                self.head = None;
                self.tail = None;
            } else {
                self.tail = unsafe { (*node.as_ptr()).prev };
            }
        }
    }
}

impl<'a, T: 'a, const N: usize> ExactSizeIterator for Iter<'a, T, N> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T: 'a, const N: usize> FusedIterator for Iter<'a, T, N> {}

impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            ..*self
        }
    }
}

impl<T: Debug, const N: usize> Debug for Iter<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

unsafe impl<T: Sync, const N: usize> Send for Iter<'_, T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for Iter<'_, T, N> {}

/// Mutable iterator over the elements of an [`UnrolledList`].
pub struct IterMut<'a, T, const N: usize = 10> {
    head: Option<NodePtr<T, N>>,
    tail: Option<NodePtr<T, N>>,
    front: slice::IterMut<'a, T>,
    back: slice::IterMut<'a, T>,
    len: usize,
}

impl<'a, T, const N: usize> IterMut<'a, T, N> {
    pub(crate) fn new(head: Option<NodePtr<T, N>>, tail: Option<NodePtr<T, N>>, len: usize) -> Self {
        Self {
            head,
            tail,
            front: Default::default(),
            back: Default::default(),
            len,
        }
    }
}

impl<'a, T: 'a, const N: usize> Iterator for IterMut<'a, T, N> {
    type Item = &'a mut T;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(elem) = self.front.next() {
                self.len -= 1;
                return Some(elem);
            }
            let Some(node) = self.head else {
                let elem = self.back.next()?;
                self.len -= 1;
                return Some(elem);
            };
            // each block is handed out once, so the slices never alias
            self.front = unsafe { Node::as_mut_slice(node) }.iter_mut();
            if self.tail == Some(node) {
                self.head = None;
                self.tail = None;
            } else {
                self.head = unsafe { (*node.as_ptr()).next };
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T: 'a, const N: usize> DoubleEndedIterator for IterMut<'a, T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(elem) = self.back.next_back() {
                self.len -= 1;
                return Some(elem);
            }
            let Some(node) = self.tail else {
                let elem = self.front.next_back()?;
                self.len -= 1;
                return Some(elem);
            };
            self.back = unsafe { Node::as_mut_slice(node) }.iter_mut();
            if self.head == Some(node) {
                self.head = None;
                self.tail = None;
            } else {
                self.tail = unsafe { (*node.as_ptr()).prev };
            }
        }
    }
}

impl<'a, T: 'a, const N: usize> ExactSizeIterator for IterMut<'a, T, N> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T: 'a, const N: usize> FusedIterator for IterMut<'a, T, N> {}

impl<T: Debug, const N: usize> Debug for IterMut<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

unsafe impl<T: Send, const N: usize> Send for IterMut<'_, T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for IterMut<'_, T, N> {}

/// Iterator over the blocks of an [`UnrolledList`], each as a slice.
pub struct Blocks<'a, T, const N: usize = 10> {
    next: Option<NodePtr<T, N>>,
    marker: PhantomData<&'a T>,
}

impl<'a, T, const N: usize> Blocks<'a, T, N> {
    pub(crate) fn new(head: Option<NodePtr<T, N>>) -> Self {
        Self {
            next: head,
            marker: PhantomData,
        }
    }
}

impl<'a, T: 'a, const N: usize> Iterator for Blocks<'a, T, N> {
    type Item = &'a [T];
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = unsafe { (*node.as_ptr()).next };
        Some(unsafe { Node::as_slice(node) })
    }
}

impl<'a, T: 'a, const N: usize> FusedIterator for Blocks<'a, T, N> {}

impl<T, const N: usize> Clone for Blocks<'_, T, N> {
    fn clone(&self) -> Self {
        Self::new(self.next)
    }
}

unsafe impl<T: Sync, const N: usize> Send for Blocks<'_, T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for Blocks<'_, T, N> {}

/// Removes the elements of a list front to back. Dropping it clears the list.
pub struct Drain<'a, T, const N: usize = 10, A: Allocator = Global> {
    inner: &'a mut UnrolledList<T, N, A>,
}

impl<'a, T, const N: usize, A: Allocator> Drain<'a, T, N, A> {
    pub(crate) fn new(inner: &'a mut UnrolledList<T, N, A>) -> Self {
        Self { inner }
    }
}

impl<'a, T: 'a, const N: usize, A: Allocator> Iterator for Drain<'a, T, N, A> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }
}

impl<'a, T: 'a, const N: usize, A: Allocator> DoubleEndedIterator for Drain<'a, T, N, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.pop_back().ok()
    }
}

impl<'a, T: 'a, const N: usize, A: Allocator> ExactSizeIterator for Drain<'a, T, N, A> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, T: 'a, const N: usize, A: Allocator> FusedIterator for Drain<'a, T, N, A> {}

impl<'a, T, const N: usize, A: Allocator> Drop for Drain<'a, T, N, A> {
    fn drop(&mut self) {
        self.inner.clear();
    }
}

/// Owning iterator over the elements of an [`UnrolledList`].
pub struct IntoIter<T, const N: usize = 10, A: Allocator = Global> {
    inner: UnrolledList<T, N, A>,
}

impl<T, const N: usize, A: Allocator> IntoIter<T, N, A> {
    pub(crate) fn new(inner: UnrolledList<T, N, A>) -> Self {
        Self { inner }
    }
}

impl<T, const N: usize, A: Allocator> Iterator for IntoIter<T, N, A> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.inner.len(), Some(self.inner.len()))
    }
}

impl<T, const N: usize, A: Allocator> DoubleEndedIterator for IntoIter<T, N, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.pop_back().ok()
    }
}

impl<T, const N: usize, A: Allocator> ExactSizeIterator for IntoIter<T, N, A> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T, const N: usize, A: Allocator> FusedIterator for IntoIter<T, N, A> {}

impl<T: Debug, const N: usize, A: Allocator> Debug for IntoIter<T, N, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{rc::Rc, vec::Vec};

    #[test]
    fn iter_both_ends_meet() {
        let list: UnrolledList<u32, 3> = (0..20).collect();
        for split in 0..=20 {
            let mut iter = list.iter();
            let mut front: Vec<u32> = iter.by_ref().take(split).copied().collect();
            assert_eq!(iter.len(), 20 - split);
            let back: Vec<u32> = iter.rev().copied().collect();
            front.extend(back.into_iter().rev());
            assert_eq!(front, (0..20).collect::<Vec<_>>());
        }
    }

    #[test]
    fn iter_alternating() {
        let list: UnrolledList<u32, 4> = (0..11).collect();
        let mut iter = list.iter();
        let mut seen = Vec::new();
        loop {
            match (iter.next(), iter.next_back()) {
                (Some(a), Some(b)) => seen.extend([*a, *b]),
                (Some(a), None) => seen.push(*a),
                (None, _) => break,
            }
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        seen.sort();
        assert_eq!(seen, (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn empty_iterators() {
        let mut list: UnrolledList<u32> = UnrolledList::new();
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.iter().next_back(), None);
        assert_eq!(list.iter_mut().next(), None);
        assert_eq!(list.blocks().next(), None);
        assert_eq!(list.drain().next(), None);
        assert_eq!(list.into_iter().next(), None);
    }

    #[test]
    fn iter_mut_updates() {
        let mut list: UnrolledList<u32, 4> = (0..10).collect();
        for (i, x) in list.iter_mut().rev().enumerate() {
            *x += i as u32;
        }
        assert!(list.iter().all(|&x| x == 9));
        for x in &mut list {
            *x = 0;
        }
        assert_eq!(list.iter().sum::<u32>(), 0);
    }

    #[test]
    fn iter_clone_is_independent() {
        let list: UnrolledList<u32, 2> = (0..7).collect();
        let mut a = list.iter();
        a.next();
        let b = a.clone();
        assert_eq!(a.count(), 6);
        assert_eq!(b.copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn blocks_cover_every_element() {
        let list: UnrolledList<u32, 5> = (0..23).collect();
        let flat: Vec<u32> = list.blocks().flatten().copied().collect();
        assert_eq!(flat, (0..23).collect::<Vec<_>>());
        assert!(list.blocks().all(|b| !b.is_empty() && b.len() <= 5));
    }

    #[test]
    fn into_iter_both_ends() {
        let list: UnrolledList<String, 3> = (0..9).map(|i| i.to_string()).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 9);
        assert_eq!(iter.next().as_deref(), Some("0"));
        assert_eq!(iter.next_back().as_deref(), Some("8"));
        assert_eq!(iter.len(), 7);
        let rest: Vec<String> = iter.collect();
        assert_eq!(rest, ["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn into_iter_drops_rest() {
        let tracker = Rc::new(());
        let list: UnrolledList<Rc<()>, 4> = (0..10).map(|_| tracker.clone()).collect();
        let mut iter = list.into_iter();
        iter.next();
        drop(iter);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn drain_partial_clears() {
        let tracker = Rc::new(());
        let mut list: UnrolledList<Rc<()>, 4> = (0..10).map(|_| tracker.clone()).collect();
        {
            let mut drain = list.drain();
            assert_eq!(drain.len(), 10);
            drain.next();
            drain.next_back();
            assert_eq!(drain.len(), 8);
        }
        assert!(list.is_empty());
        assert_eq!(Rc::strong_count(&tracker), 1);
        list.push_back(tracker.clone());
        assert_eq!(list.len(), 1);
    }
}

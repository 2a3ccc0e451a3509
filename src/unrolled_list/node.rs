use allocator_api2::alloc::{AllocError, Allocator};
use core::{
    alloc::Layout,
    mem::MaybeUninit,
    ptr::{self, NonNull},
    slice,
};

pub(crate) type NodePtr<T, const N: usize> = NonNull<Node<T, N>>;

/// A block of up to `N` elements in the chain.
///
/// Only `data[..len]` is initialised. The links do not own their targets, the
/// list that owns the chain is in charge of freeing every node.
pub(crate) struct Node<T, const N: usize> {
    pub(crate) len: usize,
    pub(crate) prev: Option<NodePtr<T, N>>,
    pub(crate) next: Option<NodePtr<T, N>>,
    data: [MaybeUninit<T>; N],
}

/// Hands a node's memory back to the allocator, even if dropping its elements panics.
struct Release<'a, T, const N: usize, A: Allocator> {
    ptr: NodePtr<T, N>,
    alloc: &'a A,
}

impl<'a, T, const N: usize, A: Allocator> Drop for Release<'a, T, N, A> {
    fn drop(&mut self) {
        unsafe { self.alloc.deallocate(self.ptr.cast(), Node::<T, N>::LAYOUT) }
    }
}

impl<T, const N: usize> Node<T, N> {
    pub(crate) const LAYOUT: Layout = Layout::new::<Self>();

    /// Allocates an empty, unlinked node.
    pub(crate) fn allocate<A: Allocator>(alloc: &A) -> Result<NodePtr<T, N>, AllocError> {
        let ptr: NodePtr<T, N> = alloc.allocate(Self::LAYOUT)?.cast();
        // the element slots stay uninitialised, only the header is written
        unsafe {
            let raw = ptr.as_ptr();
            ptr::addr_of_mut!((*raw).len).write(0);
            ptr::addr_of_mut!((*raw).prev).write(None);
            ptr::addr_of_mut!((*raw).next).write(None);
        }
        Ok(ptr)
    }

    /// Drops the initialised elements of the node and frees it.
    ///
    /// # Safety
    /// `ptr` must come from [`Node::allocate`] with an allocator equivalent to
    /// `alloc` and must not be used afterwards.
    pub(crate) unsafe fn destroy<A: Allocator>(ptr: NodePtr<T, N>, alloc: &A) {
        let _release = Release { ptr, alloc };
        let elems = Self::as_mut_slice(ptr) as *mut [T];
        (*ptr.as_ptr()).len = 0;
        ptr::drop_in_place(elems);
    }

    /// # Safety
    /// `ptr` must point to a live node, and no mutable reference to its
    /// elements may exist for `'a`.
    pub(crate) unsafe fn as_slice<'a>(ptr: NodePtr<T, N>) -> &'a [T] {
        let raw = ptr.as_ptr();
        slice::from_raw_parts(ptr::addr_of!((*raw).data).cast::<T>(), (*raw).len)
    }

    /// # Safety
    /// `ptr` must point to a live node, and no other reference to its elements
    /// may exist for `'a`.
    pub(crate) unsafe fn as_mut_slice<'a>(ptr: NodePtr<T, N>) -> &'a mut [T] {
        let raw = ptr.as_ptr();
        slice::from_raw_parts_mut(ptr::addr_of_mut!((*raw).data).cast::<T>(), (*raw).len)
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == N
    }

    /// Pointer to the first slot. All pointers used by one shift come from a
    /// single call.
    fn base(&mut self) -> *mut T {
        self.data.as_mut_ptr().cast()
    }

    /// Writes `value` past the last element.
    ///
    /// # Safety
    /// The node must not be full.
    pub(crate) unsafe fn push(&mut self, value: T) {
        debug_assert!(self.len < N);
        let len = self.len;
        self.base().add(len).write(value);
        self.len += 1;
    }

    /// Shifts `[index, len)` up one slot and writes `value` at `index`.
    ///
    /// # Safety
    /// The node must not be full and `index <= len`.
    pub(crate) unsafe fn insert(&mut self, index: usize, value: T) {
        debug_assert!(self.len < N && index <= self.len);
        let len = self.len;
        let at = self.base().add(index);
        ptr::copy(at, at.add(1), len - index);
        at.write(value);
        self.len += 1;
    }

    /// Takes the element at `index` out and closes the gap.
    ///
    /// # Safety
    /// `index < len`.
    pub(crate) unsafe fn remove(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        let len = self.len;
        let at = self.base().add(index);
        let value = at.read();
        ptr::copy(at.add(1), at, len - index - 1);
        self.len -= 1;
        value
    }

    /// Drops `[from, to)` and shifts the remainder down to `from`.
    ///
    /// The length is cut to `from` before anything is dropped, so a panicking
    /// destructor leaks the remainder instead of dropping it twice.
    ///
    /// # Safety
    /// `from <= to <= len`.
    pub(crate) unsafe fn remove_range(&mut self, from: usize, to: usize) {
        debug_assert!(from <= to && to <= self.len);
        let rest = self.len - to;
        self.len = from;
        let base = self.base();
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(from), to - from));
        ptr::copy(base.add(to), base.add(from), rest);
        self.len = from + rest;
    }

    /// Moves `[at, len)` into the empty node `other`, keeping their order.
    ///
    /// # Safety
    /// `at <= len` and `other` must be empty.
    pub(crate) unsafe fn split_off(&mut self, at: usize, other: &mut Self) {
        debug_assert!(at <= self.len && other.len == 0);
        let moved = self.len - at;
        ptr::copy_nonoverlapping(self.base().add(at), other.base(), moved);
        other.len = moved;
        self.len = at;
    }

    /// Moves every element of `other` behind the elements of `self`.
    ///
    /// # Safety
    /// Both nodes together must hold at most `N` elements.
    pub(crate) unsafe fn append(&mut self, other: &mut Self) {
        debug_assert!(self.len + other.len <= N);
        let len = self.len;
        ptr::copy_nonoverlapping(other.base(), self.base().add(len), other.len);
        self.len += other.len;
        other.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocator_api2::alloc::Global;
    use std::rc::Rc;

    #[test]
    fn allocate_destroy_empty() {
        let node = Node::<String, 4>::allocate(&Global).expect("alloc failed");
        unsafe {
            assert_eq!(node.as_ref().len, 0);
            assert!(node.as_ref().prev.is_none());
            assert!(node.as_ref().next.is_none());
            Node::destroy(node, &Global);
        }
    }

    #[test]
    fn destroy_drops_only_live_slots() {
        let tracker = Rc::new(());
        let mut node = Node::<Rc<()>, 8>::allocate(&Global).expect("alloc failed");
        unsafe {
            for _ in 0..3 {
                node.as_mut().push(tracker.clone());
            }
            assert_eq!(Rc::strong_count(&tracker), 4);
            Node::destroy(node, &Global);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn insert_remove_shift() {
        let mut node = Node::<u32, 6>::allocate(&Global).expect("alloc failed");
        unsafe {
            let n = node.as_mut();
            n.push(1);
            n.push(3);
            n.insert(1, 2);
            n.insert(0, 0);
            n.insert(4, 4);
            assert_eq!(Node::as_slice(node), &[0, 1, 2, 3, 4]);
            assert_eq!(node.as_mut().remove(2), 2);
            assert_eq!(Node::as_slice(node), &[0, 1, 3, 4]);
            Node::destroy(node, &Global);
        }
    }

    #[test]
    fn remove_range_closes_gap() {
        let tracker = Rc::new(());
        let mut node = Node::<(usize, Rc<()>), 6>::allocate(&Global).expect("alloc failed");
        unsafe {
            for i in 0..6 {
                node.as_mut().push((i, tracker.clone()));
            }
            node.as_mut().remove_range(1, 4);
            assert_eq!(Rc::strong_count(&tracker), 4);
            let left: Vec<usize> = Node::as_slice(node).iter().map(|(i, _)| *i).collect();
            assert_eq!(left, [0, 4, 5]);
            Node::destroy(node, &Global);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn remove_range_shifts_remainder() {
        let mut node = Node::<String, 10>::allocate(&Global).expect("alloc failed");
        unsafe {
            for i in 0..6 {
                node.as_mut().push(i.to_string());
            }
            node.as_mut().remove_range(1, 3);
            assert_eq!(Node::as_slice(node), ["0", "3", "4", "5"]);
            node.as_mut().remove_range(3, 4);
            node.as_mut().remove_range(0, 0);
            assert_eq!(Node::as_slice(node), ["0", "3", "4"]);
            Node::destroy(node, &Global);
        }
    }

    #[test]
    fn split_and_append() {
        let mut a = Node::<u8, 10>::allocate(&Global).expect("alloc failed");
        let mut b = Node::<u8, 10>::allocate(&Global).expect("alloc failed");
        unsafe {
            for i in 0..10 {
                a.as_mut().push(i);
            }
            assert!(a.as_ref().is_full());
            a.as_mut().split_off(5, b.as_mut());
            assert_eq!(Node::as_slice(a), &[0, 1, 2, 3, 4]);
            assert_eq!(Node::as_slice(b), &[5, 6, 7, 8, 9]);
            a.as_mut().append(b.as_mut());
            assert_eq!(Node::as_slice(a), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
            assert_eq!(b.as_ref().len, 0);
            Node::destroy(a, &Global);
            Node::destroy(b, &Global);
        }
    }
}

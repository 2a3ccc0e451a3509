use crate::{
    error::{Error, Result},
    traits::iter::{Drainable, Iterable, IterableMut},
};
use alloc::alloc::handle_alloc_error;
use allocator_api2::alloc::{AllocError, Allocator, Global};
use core::{
    cmp,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    iter,
    marker::PhantomData,
    mem,
    ops::{Bound, Index, IndexMut, RangeBounds},
    ptr,
};

mod cursor;
mod iters;
mod node;

pub use cursor::{Cursor, CursorMut};
pub use iters::{Blocks, Drain, IntoIter, Iter, IterMut};
use node::{Node, NodePtr};

/// A sequence stored as a doubly linked chain of blocks holding up to `N`
/// elements each.
///
/// Pushing and popping at either end is amortized O(1), inserting or removing
/// in the middle costs a walk over the blocks plus a shift of at most `N`
/// elements. A full block is split in half when it overflows, a block is freed
/// as soon as it becomes empty. Neighbouring blocks are never merged behind
/// your back, see [`compact`](UnrolledList::compact).
///
/// # Examples
/// ```
/// use unrolled_list::UnrolledList;
///
/// let mut list: UnrolledList<i32, 4> = UnrolledList::new();
/// list.push_back(10);
/// list.push_front(5);
/// assert_eq!(list.back(), Ok(&10));
/// assert_eq!(list.front(), Ok(&5));
///
/// list.push_back(15);
/// list.remove(1);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [5, 15]);
/// ```
pub struct UnrolledList<T, const N: usize = 10, A: Allocator = Global> {
    head: Option<NodePtr<T, N>>,
    tail: Option<NodePtr<T, N>>,
    len: usize,
    alloc: A,
    marker: PhantomData<T>,
}

/// A place in the chain: a block and an offset into it. The end position has
/// no block.
pub(crate) struct Position<T, const N: usize> {
    pub(crate) node: Option<NodePtr<T, N>>,
    pub(crate) index: usize,
}

impl<T, const N: usize> Position<T, N> {
    pub(crate) fn new(node: Option<NodePtr<T, N>>, index: usize) -> Self {
        Self { node, index }
    }

    pub(crate) fn end() -> Self {
        Self::new(None, 0)
    }

    pub(crate) fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl<T, const N: usize> Clone for Position<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Position<T, N> {}

impl<T, const N: usize> PartialEq for Position<T, N> {
    fn eq(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b && self.index == other.index,
            _ => false,
        }
    }
}

impl<T, const N: usize> Eq for Position<T, N> {}

impl<T, const N: usize> UnrolledList<T, N, Global> {
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates a list holding `count` clones of `value`.
    pub fn from_elem(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(value, count, Global)
    }
}

impl<T, const N: usize, A: Allocator> UnrolledList<T, N, A> {
    const NONEMPTY_BLOCKS: () = assert!(N > 0, "blocks must hold at least one element");

    pub fn new_in(alloc: A) -> Self {
        let () = Self::NONEMPTY_BLOCKS;
        Self {
            head: None,
            tail: None,
            len: 0,
            alloc,
            marker: PhantomData,
        }
    }

    pub fn from_elem_in(value: T, count: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut list = Self::new_in(alloc);
        list.extend(iter::repeat(value).take(count));
        list
    }

    pub fn from_iter_in<I: IntoIterator<Item = T>>(iter: I, alloc: A) -> Self {
        let mut list = Self::new_in(alloc);
        list.extend(iter);
        list
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_size(&self) -> usize {
        usize::MAX
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Number of blocks currently in the chain.
    pub fn node_count(&self) -> usize {
        self.blocks().count()
    }

    /// Moves the contents out, leaving `self` empty with a clone of its allocator.
    ///
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    ///
    /// let mut a: UnrolledList<u8> = (0..20).collect();
    /// let b = a.take();
    /// assert!(a.is_empty());
    /// assert_eq!(b.len(), 20);
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::new_in(self.alloc.clone());
        mem::replace(self, empty)
    }

    /// Finds the block holding `index` and the offset inside it.
    fn locate(&self, index: usize) -> Option<(NodePtr<T, N>, usize)> {
        if index >= self.len {
            return None;
        }
        let mut offset = 0;
        let mut cur = self.head;
        while let Some(node) = cur {
            let r = unsafe { node.as_ref() };
            if offset + r.len > index {
                return Some((node, index - offset));
            }
            offset += r.len;
            cur = r.next;
        }
        None
    }

    /// Position of `index`, or the end position when `index == len`.
    pub(crate) fn position(&self, index: usize) -> Option<Position<T, N>> {
        match self.locate(index) {
            Some((node, i)) => Some(Position::new(Some(node), i)),
            None if index == self.len => Some(Position::end()),
            None => None,
        }
    }

    /// Walks `count` elements forward from `pos`, stopping at the end position.
    pub(crate) fn advance(&self, pos: Position<T, N>, count: usize) -> Position<T, N> {
        let (mut cur, mut index, mut count) = (pos.node, pos.index, count);
        while let Some(node) = cur {
            let r = unsafe { node.as_ref() };
            if count < r.len - index {
                return Position::new(Some(node), index + count);
            }
            count -= r.len - index;
            cur = r.next;
            index = 0;
        }
        Position::end()
    }

    pub(crate) fn next_position(&self, pos: Position<T, N>) -> Position<T, N> {
        match pos.node {
            None => pos,
            Some(node) => {
                let r = unsafe { node.as_ref() };
                if pos.index + 1 < r.len {
                    Position::new(Some(node), pos.index + 1)
                } else {
                    Position::new(r.next, 0)
                }
            }
        }
    }

    pub(crate) fn prev_position(&self, pos: Position<T, N>) -> Position<T, N> {
        let last_of = |node: Option<NodePtr<T, N>>| match node {
            Some(n) => Position::new(Some(n), unsafe { n.as_ref().len }.saturating_sub(1)),
            None => Position::end(),
        };
        match pos.node {
            None => last_of(self.tail),
            Some(node) if pos.index > 0 => Position::new(Some(node), pos.index - 1),
            Some(node) => last_of(unsafe { node.as_ref().prev }),
        }
    }

    /// Element at `pos`, `None` at the end position.
    pub(crate) fn element(&self, pos: Position<T, N>) -> Option<&T> {
        pos.node
            .and_then(|node| unsafe { Node::as_slice(node) }.get(pos.index))
    }

    pub(crate) fn element_mut(&mut self, pos: Position<T, N>) -> Option<&mut T> {
        pos.node
            .and_then(|node| unsafe { Node::as_mut_slice(node) }.get_mut(pos.index))
    }

    /// Moves a position that points one past its block onto the next block.
    fn normalize(&self, pos: Position<T, N>) -> Position<T, N> {
        match pos.node {
            Some(node) if unsafe { node.as_ref().len } <= pos.index => {
                Position::new(unsafe { node.as_ref().next }, 0)
            }
            _ => pos,
        }
    }

    /// Gets a reference to the element at `index`.
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    /// let list: UnrolledList<usize> = (0..30).collect();
    /// assert_eq!(list.get(25), Some(&25));
    /// assert_eq!(list.get(30), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        self.locate(index)
            .and_then(|(node, i)| unsafe { Node::as_slice(node) }.get(i))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.locate(index)
            .and_then(|(node, i)| unsafe { Node::as_mut_slice(node) }.get_mut(i))
    }

    pub fn front(&self) -> Result<&T> {
        self.head
            .and_then(|node| unsafe { Node::as_slice(node) }.first())
            .ok_or(Error::Empty)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.head
            .and_then(|node| unsafe { Node::as_mut_slice(node) }.first_mut())
            .ok_or(Error::Empty)
    }

    pub fn back(&self) -> Result<&T> {
        self.tail
            .and_then(|node| unsafe { Node::as_slice(node) }.last())
            .ok_or(Error::Empty)
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.tail
            .and_then(|node| unsafe { Node::as_mut_slice(node) }.last_mut())
            .ok_or(Error::Empty)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.blocks().any(|block| block.contains(value))
    }

    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(self.head, self.tail, self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T, N> {
        IterMut::new(self.head, self.tail, self.len)
    }

    /// Iterates over the blocks of the chain as slices, front to back.
    ///
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    /// let list: UnrolledList<u32, 4> = (1..=5).collect();
    /// let blocks: Vec<&[u32]> = list.blocks().collect();
    /// assert_eq!(blocks, [&[1, 2][..], &[3, 4, 5][..]]);
    /// ```
    pub fn blocks(&self) -> Blocks<'_, T, N> {
        Blocks::new(self.head)
    }

    /// Removes every element, yielding them front to back. Whatever is not
    /// consumed is dropped along with the iterator.
    pub fn drain(&mut self) -> Drain<'_, T, N, A> {
        Drain::new(self)
    }

    pub fn cursor_front(&self) -> Cursor<'_, T, N, A> {
        Cursor::new(self, Position::new(self.head, 0), 0)
    }

    pub fn cursor_back(&self) -> Cursor<'_, T, N, A> {
        let pos = self.prev_position(Position::end());
        Cursor::new(self, pos, self.len.saturating_sub(1))
    }

    /// A cursor on the end position, one past the last element.
    pub fn cursor_end(&self) -> Cursor<'_, T, N, A> {
        Cursor::new(self, Position::end(), self.len)
    }

    /// A cursor on `index`, or on the end position when `index == len`.
    pub fn cursor_at(&self, index: usize) -> Option<Cursor<'_, T, N, A>> {
        let pos = self.position(index)?;
        Some(Cursor::new(self, pos, index))
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, N, A> {
        let pos = Position::new(self.head, 0);
        CursorMut::new(self, pos, 0)
    }

    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, N, A> {
        let pos = self.prev_position(Position::end());
        let index = self.len.saturating_sub(1);
        CursorMut::new(self, pos, index)
    }

    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, N, A> {
        let index = self.len;
        CursorMut::new(self, Position::end(), index)
    }

    pub fn cursor_at_mut(&mut self, index: usize) -> Option<CursorMut<'_, T, N, A>> {
        let pos = self.position(index)?;
        Some(CursorMut::new(self, pos, index))
    }

    /// Allocates an empty node and links it behind the tail.
    fn append_node(&mut self) -> Result<NodePtr<T, N>, AllocError> {
        let node = Node::allocate(&self.alloc)?;
        match self.tail {
            Some(tail) => self.link_after(tail, node),
            None => {
                self.head = Some(node);
                self.tail = Some(node);
            }
        }
        Ok(node)
    }

    fn link_after(&mut self, mut node: NodePtr<T, N>, mut new: NodePtr<T, N>) {
        unsafe {
            let next = node.as_ref().next;
            new.as_mut().prev = Some(node);
            new.as_mut().next = next;
            match next {
                Some(mut n) => n.as_mut().prev = Some(new),
                None => self.tail = Some(new),
            }
            node.as_mut().next = Some(new);
        }
    }

    fn link_before(&mut self, mut node: NodePtr<T, N>, mut new: NodePtr<T, N>) {
        unsafe {
            let prev = node.as_ref().prev;
            new.as_mut().next = Some(node);
            new.as_mut().prev = prev;
            match prev {
                Some(mut p) => p.as_mut().next = Some(new),
                None => self.head = Some(new),
            }
            node.as_mut().prev = Some(new);
        }
    }

    /// Unlinks `node`, drops whatever it still holds and frees it. Returns the
    /// node that followed it.
    fn remove_node(&mut self, node: NodePtr<T, N>) -> Option<NodePtr<T, N>> {
        let (prev, next) = unsafe { (node.as_ref().prev, node.as_ref().next) };
        match prev {
            Some(mut p) => unsafe { p.as_mut().next = next },
            None => self.head = next,
        }
        match next {
            Some(mut n) => unsafe { n.as_mut().prev = prev },
            None => self.tail = prev,
        }
        unsafe { Node::destroy(node, &self.alloc) };
        next
    }

    /// Splits the full `node` in two and returns the block and offset that
    /// an insertion at `index` now goes to.
    fn split(
        &mut self,
        node: NodePtr<T, N>,
        index: usize,
    ) -> Result<(NodePtr<T, N>, usize), AllocError> {
        let fresh = Node::allocate(&self.alloc)?;
        if N == 1 {
            // a single slot cannot be halved, the new element gets a block of its own
            if index == 0 {
                self.link_before(node, fresh);
            } else {
                self.link_after(node, fresh);
            }
            return Ok((fresh, 0));
        }
        let keep = N - N / 2;
        unsafe { (*node.as_ptr()).split_off(keep, &mut *fresh.as_ptr()) };
        self.link_after(node, fresh);
        Ok(if index > keep {
            (fresh, index - keep)
        } else {
            (node, index)
        })
    }

    /// Inserts `value` in front of `pos` and returns where it ended up.
    ///
    /// Memory is only requested before anything is touched, so on error the
    /// list is unchanged.
    pub(crate) fn insert_at(
        &mut self,
        pos: Position<T, N>,
        value: T,
    ) -> Result<Position<T, N>, AllocError> {
        let (mut node, mut index) = match (pos.node, self.tail) {
            (Some(node), _) => (node, pos.index),
            (None, Some(tail)) => (tail, unsafe { tail.as_ref().len }),
            (None, None) => (self.append_node()?, 0),
        };
        if unsafe { node.as_ref().is_full() } {
            (node, index) = self.split(node, index)?;
        }
        unsafe { (*node.as_ptr()).insert(index, value) };
        self.len += 1;
        Ok(Position::new(Some(node), index))
    }

    /// Takes the element at `pos` out. Returns it with the position of the
    /// element that followed it.
    pub(crate) fn remove_at(&mut self, pos: Position<T, N>) -> Option<(T, Position<T, N>)> {
        let node = pos.node?;
        if pos.index >= unsafe { node.as_ref().len } {
            return None;
        }
        let value = unsafe { (*node.as_ptr()).remove(pos.index) };
        self.len -= 1;
        let next = if unsafe { node.as_ref().len } == 0 {
            Position::new(self.remove_node(node), 0)
        } else {
            self.normalize(pos)
        };
        Some((value, next))
    }

    /// Drops the elements of `node` from `from` on, freeing the node if nothing is left.
    fn truncate_node(&mut self, node: NodePtr<T, N>, from: usize) {
        let len = unsafe { node.as_ref().len };
        self.len -= len - from;
        unsafe { (*node.as_ptr()).remove_range(from, len) };
        if unsafe { node.as_ref().len } == 0 {
            self.remove_node(node);
        }
    }

    /// Drops every element in `[first, last)` and returns the position of the
    /// first element after the range.
    ///
    /// `first` must not come after `last`.
    pub(crate) fn erase_between(
        &mut self,
        first: Position<T, N>,
        last: Position<T, N>,
    ) -> Position<T, N> {
        let (Some(start), Some(tail)) = (first.node, self.tail) else {
            return first;
        };
        if first == last {
            return first;
        }
        let (end, end_index) = match last.node {
            Some(node) => (node, last.index),
            None => (tail, unsafe { tail.as_ref().len }),
        };

        if start == end {
            let len = unsafe { start.as_ref().len };
            // the part past `end_index` is added back once it has been shifted down
            self.len -= len - first.index;
            unsafe { (*start.as_ptr()).remove_range(first.index, end_index) };
            self.len += unsafe { start.as_ref().len } - first.index;
            if unsafe { start.as_ref().len } == 0 {
                return Position::new(self.remove_node(start), 0);
            }
            return self.normalize(first);
        }

        let mut cur = unsafe { start.as_ref().next };
        self.truncate_node(start, first.index);
        while let Some(node) = cur {
            if node == end {
                break;
            }
            cur = unsafe { node.as_ref().next };
            self.len -= unsafe { node.as_ref().len };
            self.remove_node(node);
        }

        self.len -= end_index;
        unsafe { (*end.as_ptr()).remove_range(0, end_index) };
        if unsafe { end.as_ref().len } == 0 {
            Position::new(self.remove_node(end), 0)
        } else {
            Position::new(Some(end), 0)
        }
    }

    pub fn push_back(&mut self, item: T) {
        if let Err(e) = self.try_push_back(item) {
            Self::alloc_failed(e)
        }
    }

    pub fn push_front(&mut self, item: T) {
        if let Err(e) = self.try_push_front(item) {
            Self::alloc_failed(e)
        }
    }

    /// Add to the back of the list.
    pub fn try_push_back(&mut self, item: T) -> Result<()> {
        self.insert_at(Position::end(), item)?;
        Ok(())
    }

    /// Add to the front of the list.
    pub fn try_push_front(&mut self, item: T) -> Result<()> {
        self.insert_at(Position::new(self.head, 0), item)?;
        Ok(())
    }

    /// Removes the element at the back of the list.
    /// # Examples
    /// ```
    /// use unrolled_list::{Error, UnrolledList};
    /// let mut list: UnrolledList<usize> = (0..30).collect();
    /// for i in (0..30).rev() {
    ///     assert_eq!(list.pop_back(), Ok(i));
    /// }
    /// assert_eq!(list.pop_back(), Err(Error::Empty));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        let pos = self.prev_position(Position::end());
        self.remove_at(pos).map(|(value, _)| value).ok_or(Error::Empty)
    }

    /// Removes the element at the front of the list.
    pub fn pop_front(&mut self) -> Result<T> {
        self.remove_at(Position::new(self.head, 0))
            .map(|(value, _)| value)
            .ok_or(Error::Empty)
    }

    /// Inserts `value` at `index`, shifting everything after it back by one.
    /// Returns a cursor on the new element.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> CursorMut<'_, T, N, A> {
        let len = self.len;
        match self.try_insert(index, value) {
            Ok(cursor) => cursor,
            Err(Error::Alloc(e)) => Self::alloc_failed(e),
            Err(_) => panic!("insertion index (is {index}) should be <= len (is {len})"),
        }
    }

    pub fn try_insert(&mut self, index: usize, value: T) -> Result<CursorMut<'_, T, N, A>> {
        let pos = self.position(index).ok_or(Error::OutOfBounds {
            index,
            len: self.len,
        })?;
        let pos = self.insert_at(pos, value)?;
        Ok(CursorMut::new(self, pos, index))
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let (node, i) = self.locate(index)?;
        self.remove_at(Position::new(Some(node), i))
            .map(|(value, _)| value)
    }

    /// Drops the elements in `range` and returns a cursor on the first element
    /// after it.
    ///
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    /// let mut list: UnrolledList<u32> = (1..=14).collect();
    /// let cursor = list.erase(..5).unwrap();
    /// assert_eq!(cursor.current(), Some(&6));
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), (6..=14).collect::<Vec<_>>());
    /// ```
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) -> Result<CursorMut<'_, T, N, A>> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        };
        if end > self.len {
            return Err(Error::OutOfBounds {
                index: end,
                len: self.len,
            });
        }
        if start > end {
            return Err(Error::OutOfBounds {
                index: start,
                len: self.len,
            });
        }
        let first = self.position(start).ok_or(Error::OutOfBounds {
            index: start,
            len: self.len,
        })?;
        let last = self.advance(first, end - start);
        let pos = self.erase_between(first, last);
        Ok(CursorMut::new(self, pos, start))
    }

    /// Drops all elements and frees every block.
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    /// let mut list: UnrolledList<usize> = (0..100).collect();
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.node_count(), 0);
    /// ```
    pub fn clear(&mut self) {
        let mut cur = self.head.take();
        self.tail = None;
        self.len = 0;
        while let Some(node) = cur {
            cur = unsafe { node.as_ref().next };
            unsafe { Node::destroy(node, &self.alloc) };
        }
    }

    /// Replaces the contents with the items of `iter`.
    pub fn assign_range<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.clear();
        self.extend(iter);
    }

    /// Inserts the items of `iter` at the front, keeping their order.
    ///
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    /// let mut list: UnrolledList<u32> = (4..8).collect();
    /// list.prepend_range(0..4);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), (0..8).collect::<Vec<_>>());
    /// ```
    pub fn prepend_range<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut cursor = self.cursor_front_mut();
        for item in iter {
            cursor.insert(item);
            cursor.move_next();
        }
    }

    /// Folds every block into its predecessor when both fit in one block,
    /// freeing the emptied blocks. Element order is unchanged.
    ///
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    /// let mut list: UnrolledList<u32, 4> = (0..16).collect();
    /// list.erase(1..3).unwrap();
    /// list.erase(3..5).unwrap();
    /// let before = list.node_count();
    /// list.compact();
    /// assert!(list.node_count() < before);
    /// assert_eq!(list.len(), 12);
    /// ```
    pub fn compact(&mut self) {
        let mut cur = self.head;
        while let Some(node) = cur {
            let next = unsafe { node.as_ref().next };
            match next {
                Some(next) if unsafe { node.as_ref().len + next.as_ref().len } <= N => {
                    unsafe { (*node.as_ptr()).append(&mut *next.as_ptr()) };
                    self.remove_node(next);
                }
                _ => cur = next,
            }
        }
    }

    fn alloc_failed(_: impl Into<Error>) -> ! {
        handle_alloc_error(Node::<T, N>::LAYOUT)
    }
}

unsafe impl<T: Send, const N: usize, A: Allocator + Send> Send for UnrolledList<T, N, A> {}

unsafe impl<T: Sync, const N: usize, A: Allocator + Sync> Sync for UnrolledList<T, N, A> {}

impl<T, const N: usize, A: Allocator> Drop for UnrolledList<T, N, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone, const N: usize, A: Allocator + Clone> Clone for UnrolledList<T, N, A> {
    fn clone(&self) -> Self {
        let mut copy = Self::new_in(self.alloc.clone());
        for block in self.blocks() {
            let mut node = copy
                .append_node()
                .unwrap_or_else(|e| Self::alloc_failed(e));
            for value in block {
                // the copy owns the node already, a panicking clone drops what was built
                unsafe { node.as_mut().push(value.clone()) };
                copy.len += 1;
            }
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        mem::swap(self, &mut copy);
    }
}

impl<T: PartialEq, const N: usize, A: Allocator> PartialEq for UnrolledList<T, N, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || (self.len == other.len && self.iter().eq(other.iter()))
    }
}

impl<T: Eq, const N: usize, A: Allocator> Eq for UnrolledList<T, N, A> {}

impl<T: PartialOrd, const N: usize, A: Allocator> PartialOrd for UnrolledList<T, N, A> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, const N: usize, A: Allocator> Ord for UnrolledList<T, N, A> {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, const N: usize, A: Allocator> Hash for UnrolledList<T, N, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|elem| elem.hash(state));
    }
}

impl<T: Debug, const N: usize, A: Allocator> Debug for UnrolledList<T, N, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnrolledList")
            .field("len", &self.len)
            .field("block_capacity", &N)
            .field("blocks", &self.blocks().collect::<alloc::vec::Vec<_>>())
            .finish()
    }
}

impl<T, const N: usize> Default for UnrolledList<T, N, Global> {
    fn default() -> Self {
        Self::new_in(Global)
    }
}

impl<T, const N: usize, A: Allocator> Index<usize> for UnrolledList<T, N, A> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(elem) => elem,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len, index
            ),
        }
    }
}

impl<T, const N: usize, A: Allocator> IndexMut<usize> for UnrolledList<T, N, A> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len;
        match self.get_mut(index) {
            Some(elem) => elem,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T, const N: usize, A: Allocator> Extend<T> for UnrolledList<T, N, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter.into_iter() {
            self.push_back(elem);
        }
    }
}

impl<'a, T: Copy + 'a, const N: usize, A: Allocator> Extend<&'a T> for UnrolledList<T, N, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> FromIterator<T> for UnrolledList<T, N, Global> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_iter_in(iter, Global)
    }
}

impl<T, const N: usize, const M: usize> From<[T; M]> for UnrolledList<T, N, Global> {
    fn from(items: [T; M]) -> Self {
        Self::from_iter(items)
    }
}

impl<T, const N: usize, A: Allocator> IntoIterator for UnrolledList<T, N, A> {
    type IntoIter = IntoIter<T, N, A>;
    type Item = T;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, const N: usize, A: Allocator> IntoIterator for &'a UnrolledList<T, N, A> {
    type IntoIter = Iter<'a, T, N>;
    type Item = &'a T;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize, A: Allocator> IntoIterator for &'a mut UnrolledList<T, N, A> {
    type IntoIter = IterMut<'a, T, N>;
    type Item = &'a mut T;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, const N: usize, A: Allocator> Iterable for UnrolledList<T, N, A> {
    type Iter<'a> = Iter<'a, T, N> where Self: 'a;
    type Item = T;

    fn iter(&self) -> Self::Iter<'_> {
        UnrolledList::iter(self)
    }
}

impl<T, const N: usize, A: Allocator> IterableMut for UnrolledList<T, N, A> {
    type IterMut<'a> = IterMut<'a, T, N> where Self: 'a;
    type Item = T;

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        UnrolledList::iter_mut(self)
    }
}

impl<T, const N: usize, A: Allocator> Drainable for UnrolledList<T, N, A> {
    type Drain<'a> = Drain<'a, T, N, A> where Self: 'a;
    type Item = T;

    fn drain(&mut self) -> Self::Drain<'_> {
        UnrolledList::drain(self)
    }
}

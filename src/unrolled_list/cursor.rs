use super::{Position, UnrolledList};
use crate::error::Result;
use allocator_api2::alloc::{Allocator, Global};
use core::fmt::{self, Debug, Formatter};

/// A read-only cursor over an [`UnrolledList`].
///
/// A cursor sits either on an element or on the end position, one past the
/// last element. Moving forward from the end position stays there, moving
/// backward from it lands on the last element, and moving backward from the
/// first element wraps around to the end position.
pub struct Cursor<'a, T, const N: usize = 10, A: Allocator = Global> {
    list: &'a UnrolledList<T, N, A>,
    pos: Position<T, N>,
    index: usize,
}

impl<'a, T, const N: usize, A: Allocator> Cursor<'a, T, N, A> {
    pub(crate) fn new(list: &'a UnrolledList<T, N, A>, pos: Position<T, N>, index: usize) -> Self {
        Self { list, pos, index }
    }

    /// Logical index of the current element, `None` on the end position.
    pub fn index(&self) -> Option<usize> {
        (!self.pos.is_end()).then_some(self.index)
    }

    pub fn current(&self) -> Option<&'a T> {
        self.list.element(self.pos)
    }

    pub fn move_next(&mut self) {
        if !self.pos.is_end() {
            self.pos = self.list.next_position(self.pos);
            self.index += 1;
        }
    }

    pub fn move_prev(&mut self) {
        self.pos = self.list.prev_position(self.pos);
        self.index = match self.pos.is_end() {
            true => self.list.len(),
            false => self.index.wrapping_sub(1).min(self.list.len() - 1),
        };
    }

    /// The element after the current one, without moving.
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut next = *self;
        next.move_next();
        next.current()
    }

    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut prev = *self;
        prev.move_prev();
        prev.current()
    }

    pub fn as_list(&self) -> &'a UnrolledList<T, N, A> {
        self.list
    }
}

impl<T, const N: usize, A: Allocator> Clone for Cursor<'_, T, N, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize, A: Allocator> Copy for Cursor<'_, T, N, A> {}

// equal when both sit on the same position of the same chain
impl<T, const N: usize, A: Allocator> PartialEq for Cursor<'_, T, N, A> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<T, const N: usize, A: Allocator> Eq for Cursor<'_, T, N, A> {}

impl<T: Debug, const N: usize, A: Allocator> Debug for Cursor<'_, T, N, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor")
            .field(&self.index())
            .field(&self.current())
            .finish()
    }
}

/// A cursor that can edit the list in place.
///
/// Moves the same way as [`Cursor`]. Inserting puts the new element in front
/// of the current one and leaves the cursor on it, removing leaves the cursor
/// on the element that followed the removed one.
pub struct CursorMut<'a, T, const N: usize = 10, A: Allocator = Global> {
    list: &'a mut UnrolledList<T, N, A>,
    pos: Position<T, N>,
    index: usize,
}

impl<'a, T, const N: usize, A: Allocator> CursorMut<'a, T, N, A> {
    pub(crate) fn new(
        list: &'a mut UnrolledList<T, N, A>,
        pos: Position<T, N>,
        index: usize,
    ) -> Self {
        Self { list, pos, index }
    }

    pub fn index(&self) -> Option<usize> {
        (!self.pos.is_end()).then_some(self.index)
    }

    pub fn current(&self) -> Option<&T> {
        self.list.element(self.pos)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.element_mut(self.pos)
    }

    pub fn move_next(&mut self) {
        if !self.pos.is_end() {
            self.pos = self.list.next_position(self.pos);
            self.index += 1;
        }
    }

    pub fn move_prev(&mut self) {
        self.pos = self.list.prev_position(self.pos);
        self.index = match self.pos.is_end() {
            true => self.list.len(),
            false => self.index.wrapping_sub(1).min(self.list.len() - 1),
        };
    }

    /// A read-only view of the cursor, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T, N, A> {
        Cursor::new(self.list, self.pos, self.index)
    }

    pub fn as_list(&self) -> &UnrolledList<T, N, A> {
        self.list
    }

    /// Inserts `value` in front of the current position and moves onto it.
    ///
    /// # Panics
    /// Panics if a new block is needed and cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    /// let mut list: UnrolledList<char> = "ac".chars().collect();
    /// let mut cursor = list.cursor_at_mut(1).unwrap();
    /// cursor.insert('b');
    /// assert_eq!(cursor.current(), Some(&'b'));
    /// cursor.move_next();
    /// assert_eq!(cursor.current(), Some(&'c'));
    /// assert_eq!(list.iter().collect::<String>(), "abc");
    /// ```
    pub fn insert(&mut self, value: T) {
        if let Err(e) = self.try_insert(value) {
            UnrolledList::<T, N, A>::alloc_failed(e)
        }
    }

    pub fn try_insert(&mut self, value: T) -> Result<()> {
        self.pos = self.list.insert_at(self.pos, value)?;
        Ok(())
    }

    /// Inserts `count` clones of `value` in front of the current position.
    /// The cursor ends up on the first of them, or stays put when `count` is 0.
    pub fn insert_n(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        if count == 0 {
            return;
        }
        for _ in 1..count {
            self.insert(value.clone());
        }
        self.insert(value);
    }

    /// Removes the current element and moves onto the one that followed it.
    /// Returns `None` on the end position.
    pub fn remove_current(&mut self) -> Option<T> {
        let (value, next) = self.list.remove_at(self.pos)?;
        self.pos = next;
        Some(value)
    }

    /// Removes up to `count` elements starting at the current one and returns
    /// how many were removed.
    ///
    /// # Examples
    /// ```
    /// use unrolled_list::UnrolledList;
    /// let mut list: UnrolledList<u32, 4> = (0..10).collect();
    /// let mut cursor = list.cursor_at_mut(7).unwrap();
    /// assert_eq!(cursor.remove_n(5), 3);
    /// assert!(cursor.current().is_none());
    /// assert_eq!(list.len(), 7);
    /// ```
    pub fn remove_n(&mut self, count: usize) -> usize {
        let before = self.list.len();
        let last = self.list.advance(self.pos, count);
        self.pos = self.list.erase_between(self.pos, last);
        before - self.list.len()
    }
}

impl<T: Debug, const N: usize, A: Allocator> Debug for CursorMut<'_, T, N, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut")
            .field(&self.index())
            .field(&self.current())
            .finish()
    }
}

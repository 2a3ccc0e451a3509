//! An unrolled linked list: a doubly linked chain of fixed-capacity blocks.
//!
//! [`UnrolledList`] keeps up to `N` elements in each block, which makes walks
//! and pushes cache friendly while insertion and removal in the middle stay
//! cheap. Blocks come from an [`Allocator`](allocator_api2::alloc::Allocator),
//! [`Global`](allocator_api2::alloc::Global) unless one is given.
//!
//! ```
//! use unrolled_list::prelude::*;
//!
//! let mut list: UnrolledList<u32, 4> = (0..8).collect();
//! list.insert(3, 30);
//! list.erase(..2)?;
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2, 30, 3, 4, 5, 6, 7]);
//! assert_eq!(list.front(), Ok(&2));
//! # Ok::<(), unrolled_list::Error>(())
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod prelude;
pub mod traits;
pub mod unrolled_list;

pub use error::{Error, Result};
pub use unrolled_list::{Blocks, Cursor, CursorMut, Drain, IntoIter, Iter, IterMut, UnrolledList};

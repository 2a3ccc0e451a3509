pub use crate::{
    error::{Error, Result},
    traits::{Drainable, Iterable, IterableMut},
    unrolled_list::{Cursor, CursorMut, UnrolledList},
};

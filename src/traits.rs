pub mod iter;

pub use iter::{Drainable, Iterable, IterableMut};

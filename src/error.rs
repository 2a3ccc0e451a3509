use allocator_api2::alloc::AllocError;
use thiserror::Error;

/// The error type for fallible [`UnrolledList`](crate::UnrolledList) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// `front`, `back` or a pop was called on a list with no elements.
    #[error("the list is empty")]
    Empty,
    /// An index or range bound was past the end of the list.
    #[error("index {index} is out of bounds for a list of length {len}")]
    OutOfBounds { index: usize, len: usize },
    /// The allocator could not provide memory for a new block.
    #[error("failed to allocate a block")]
    Alloc(AllocError),
}

impl From<AllocError> for Error {
    fn from(e: AllocError) -> Self {
        Error::Alloc(e)
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::Empty.to_string(), "the list is empty");
        assert_eq!(
            Error::OutOfBounds { index: 7, len: 3 }.to_string(),
            "index 7 is out of bounds for a list of length 3"
        );
        assert_eq!(Error::from(AllocError).to_string(), "failed to allocate a block");
    }
}

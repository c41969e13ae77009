//! Error type for queue and cursor operations.

use core::fmt;

/// Failure of a queue or cursor operation.
///
/// Nothing is retried internally: every failure is returned at the call
/// that caused it, and the queue is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// `front` or `pop` on an empty queue.
    EmptyCollection,
    /// Cursor `next` past the end, or cursor `remove` with no element
    /// produced since the last removal.
    ElementNotExist,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyCollection => write!(f, "collection is empty"),
            Error::ElementNotExist => write!(f, "element does not exist"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::EmptyCollection.to_string(), "collection is empty");
        assert_eq!(Error::ElementNotExist.to_string(), "element does not exist");
    }

    #[test]
    fn is_std_error() {
        fn boxed(err: Error) -> Box<dyn std::error::Error> {
            Box::new(err)
        }
        assert_eq!(boxed(Error::ElementNotExist).to_string(), "element does not exist");
    }
}

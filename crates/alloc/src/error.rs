use core::{alloc::Layout, fmt};
use std::error::Error;

use bytesize::ByteSize;

/// An error with allocating memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested element count does not fit in `isize::MAX` bytes.
    CapacityOverflow,
    /// The allocator could not satisfy a valid request.
    OutOfMemory {
        /// The layout that was requested.
        layout: Layout,
    },
}

impl AllocError {
    /// Diverges on behalf of the infallible API.
    ///
    /// Capacity overflow panics, an exhausted allocator goes through
    /// [`std::alloc::handle_alloc_error`].
    #[cold]
    pub fn handle(self) -> ! {
        match self {
            Self::CapacityOverflow => panic!("capacity overflow"),
            Self::OutOfMemory { layout } => std::alloc::handle_alloc_error(layout),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::OutOfMemory { layout } => write!(
                f,
                "out of memory: requested {} (align {})",
                ByteSize::b(layout.size() as u64).to_string_as(true),
                layout.align()
            ),
        }
    }
}

impl Error for AllocError {}

/// A checked access landed outside the live elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    /// The requested position.
    pub index: usize,
    /// The number of live elements at the time of the access.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range for length {}", self.index, self.len)
    }
}

impl Error for OutOfRange {}

/// A fallible element producer failed.
///
/// Every element built before `index` has already been destroyed when this is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementError<E> {
    /// Position (relative to the start of the range being built) of the failed element.
    pub index: usize,
    /// The producer's error.
    pub error: E,
}

impl<E: fmt::Display> fmt::Display for ElementError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constructing element {} failed: {}", self.index, self.error)
    }
}

impl<E: Error + 'static> Error for ElementError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Failure of an operation that both allocates and builds elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructError<E> {
    /// Storage for the new elements could not be obtained.
    Alloc(AllocError),
    /// An element could not be built.
    Element(ElementError<E>),
}

impl<E> From<AllocError> for ConstructError<E> {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

impl<E> From<ElementError<E>> for ConstructError<E> {
    fn from(err: ElementError<E>) -> Self {
        Self::Element(err)
    }
}

impl<E: fmt::Display> fmt::Display for ConstructError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(err) => err.fmt(f),
            Self::Element(err) => err.fmt(f),
        }
    }
}

impl<E: Error + 'static> Error for ConstructError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(err) => Some(err),
            Self::Element(err) => Some(err),
        }
    }
}

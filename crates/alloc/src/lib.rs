//! Raw-memory layer and a growable array built on it.
//!
//! The crate is layered leaf-first:
//!
//! - [`traits::Allocator`] hands out raw storage for `n` values of a type, selected at the type
//!   level; [`global::Global`] is the heap-backed default.
//! - [`construct`] moves single slots or runs of slots between the raw and live states.
//! - [`uninit`] populates raw storage from slices, repeated values and producers, destroying
//!   partial work when a step fails.
//! - [`containers::raw::RawBuf`] owns one allocation; [`containers::vec::Vec`] keeps a live
//!   prefix inside it and implements every mutation in terms of the layers above.
pub mod construct;
pub mod constants;
pub mod containers;
pub mod error;
pub mod global;
pub mod traits;
pub mod uninit;

pub use containers::{raw::RawBuf, vec::IntoIter, vec::Vec};
pub use error::{AllocError, ConstructError, ElementError, OutOfRange};
pub use global::Global;
pub use traits::Allocator;

//! Generic containers on top of an explicit raw-memory layer.
//!
//! Everything lives in [`tinystl_alloc`]; this crate is the entry point.
//!
//! ```
//! use tinystl::{tvec, Vec};
//!
//! let mut v: Vec<&str> = tvec!["b", "c"];
//! v.insert(0, "a");
//! assert_eq!(v, ["a", "b", "c"]);
//! ```
pub use tinystl_alloc::{
    construct, containers, error, tvec, uninit, AllocError, Allocator, ConstructError,
    ElementError, Global, IntoIter, OutOfRange, RawBuf, Vec,
};

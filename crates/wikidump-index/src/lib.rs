//! wikidump-index
//!
//! Byte-offset hash index over a dump, plus the random-access record reader
//! and point lookup built on it.

pub mod index;
pub mod reader;
pub mod search;

pub use index::HashIndex;
pub use reader::RecordReader;
pub use search::HashLookup;

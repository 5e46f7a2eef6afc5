//! File System Abstraction
//!
//! Canonical POSIX paths plus the read-only file access needed to load
//! tsconfig files. `testing` holds an in-memory implementation.

pub mod src;
pub mod testing;


pub use src::*;

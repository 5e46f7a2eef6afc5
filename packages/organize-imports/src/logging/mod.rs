//! Logging
//!
//! Leveled logger trait with console, buffered and null sinks.

pub mod src;


pub use src::*;

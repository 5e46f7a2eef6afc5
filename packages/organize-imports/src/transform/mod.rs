//! Relative import rewriting.

pub mod framework;
pub mod module_specifiers;
pub mod relative_imports;


pub use framework::*;
pub use module_specifiers::*;
pub use relative_imports::*;

//! tsconfig path aliases.

pub mod alias_table;
pub mod cache;
pub mod jsonc;

#[cfg(test)]
mod test;

pub use alias_table::*;
pub use cache::*;

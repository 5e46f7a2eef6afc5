#![deny(clippy::all)]

/**
 * Organize Imports - Rust Implementation
 *
 * Sorts, merges and prunes import declarations, and optionally rewrites
 * deep relative imports as aliased or absolute ones.
 */
pub mod error;
pub mod file_system;
pub mod language_service;
pub mod logging;
pub mod options;
pub mod organize;
pub mod text_changes;
pub mod transform;
pub mod tsconfig;

pub use error::OrganizeError;
pub use options::{FrameworkResolutionMode, OrganizeOptions, RewriteOptions};
pub use organize::{organize, Organizer};

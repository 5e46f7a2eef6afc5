pub mod apply_text_changes;


pub use apply_text_changes::*;

pub mod buffered_logger;
pub mod console_logger;
pub mod logger;

pub use buffered_logger::*;
pub use console_logger::*;
pub use logger::*;

//! Storage layer for task persistence.

mod file;
mod memory;
mod traits;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use traits::Storage;

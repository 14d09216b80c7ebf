// Public modules
pub mod archive;
pub mod build;
pub mod config;
pub mod deploy;
pub mod error;
pub mod ssh;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};

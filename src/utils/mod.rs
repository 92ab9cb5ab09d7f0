//! Utility modules for the engine
//!
//! ## Module Organization
//!
//! - **error**: Error handling and the crate-wide result alias
//! - **logging**: Structured logging setup

pub mod error; // Error handling
pub mod logging; // Logging & monitoring

// Re-export commonly used types for convenience
pub use error::{EngineError, Result};
pub use logging::init_tracing;

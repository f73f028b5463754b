//! Utility modules
//!
//! - **error**: error types shared across the crate
//! - **logging**: `tracing` subscriber setup

pub mod error;
pub mod logging;

pub use error::{MapperError, Result, SourceError};
pub use logging::init_logging;

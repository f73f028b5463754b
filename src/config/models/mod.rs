//! Configuration data models
//!
//! This module defines all configuration structures used by the mapper.

#![allow(missing_docs)]

pub mod analysis;
pub mod mapper;
pub mod output;
pub mod source;

// Re-export all configuration types
pub use analysis::*;
pub use mapper::*;
pub use output::*;
pub use source::*;

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default number of items requested per list page
pub fn default_page_size() -> u32 {
    crate::source::kube::DEFAULT_PAGE_SIZE
}

/// Default log filter
pub fn default_log_level() -> String {
    "warn".to_string()
}

/// Colour is on unless disabled
pub fn default_color() -> bool {
    true
}

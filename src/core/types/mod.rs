//! Core type definition module
//!
//! Normalized RBAC entities produced by the converter and the raw records
//! a data source hands to it.

pub mod binding;
pub mod grant;
pub mod raw;
pub mod scope;

// Re-export all public types
pub use binding::*;
pub use grant::*;
pub use raw::*;
pub use scope::*;

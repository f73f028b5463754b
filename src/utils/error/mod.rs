//! Error handling for rbac-mapper
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

mod helpers;
mod types;

pub use types::{MapperError, Result, SourceError};

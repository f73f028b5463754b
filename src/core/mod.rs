//! Core RBAC model and aggregation logic
//!
//! Data sources hand over raw objects; [`convert`] turns them into the
//! canonical [`types`], [`filter`] narrows them and [`analyzer`] folds
//! every scope into a single result.

pub mod analyzer;
pub mod cancel;
pub mod convert;
pub mod filter;
pub mod traits;
pub mod types;

//! Core traits module
//!
//! Contains the abstract interfaces the analyzer depends on

pub mod source;

pub use source::*;

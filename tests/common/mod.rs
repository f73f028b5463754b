//! Common test utilities for rbac-mapper
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{fixtures, source::FakeSource};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let source = FakeSource::new(fixtures::small_cluster());
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod source;

pub use fixtures::{small_cluster, write_snapshot};
pub use source::FakeSource;

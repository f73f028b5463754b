//! RBAC aggregation engine
//!
//! Collects grants and bindings from every scope of an [`RbacSource`],
//! narrows them with an optional [`FilterSpec`], bounds them with a shared
//! result ceiling, and folds everything into an [`AnalysisResult`].
//!
//! [`RbacSource`]: crate::core::traits::RbacSource
//! [`FilterSpec`]: crate::core::filter::FilterSpec

mod budget;
mod builder;
mod engine;
mod result;

pub use budget::{Budget, DEFAULT_RESULT_LIMIT, ResultLimit, UNLIMITED_RESULTS};
pub use builder::AnalyzerBuilder;
pub use engine::{Analyzer, CLUSTER_SCOPE};
pub use result::{AnalysisResult, Stats};

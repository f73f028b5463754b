//! Kubernetes API data source
//!
//! Reads connection settings from a kubeconfig and lists RBAC objects through
//! the `rbac.authorization.k8s.io/v1` REST endpoints.

mod client;
mod kubeconfig;
mod wire;

pub use client::{DEFAULT_PAGE_SIZE, KubeSource};
pub use kubeconfig::{ConnectionSettings, Kubeconfig, default_kubeconfig_path};

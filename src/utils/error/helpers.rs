//! Helper functions for creating specific error types

use super::types::{MapperError, SourceError};

impl MapperError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn construction<S: Into<String>>(message: S) -> Self {
        Self::Construction(message.into())
    }

    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export(message.into())
    }

    pub fn fetch<S: Into<String>>(scope: S, operation: &'static str, source: SourceError) -> Self {
        Self::Fetch {
            scope: scope.into(),
            operation,
            source,
        }
    }

    /// Whether the run was stopped on request rather than by a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Scope of a failed listing call, if this is a fetch error
    pub fn fetch_scope(&self) -> Option<&str> {
        match self {
            Self::Fetch { scope, .. } => Some(scope),
            _ => None,
        }
    }
}

impl SourceError {
    pub fn network<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn api<U: Into<String>, M: Into<String>>(url: U, status: u16, message: M) -> Self {
        Self::Api {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    pub fn decode<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn kubeconfig<S: Into<String>>(message: S) -> Self {
        Self::Kubeconfig(message.into())
    }

    pub fn snapshot<S: Into<String>>(message: S) -> Self {
        Self::Snapshot(message.into())
    }

    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other(message.into())
    }
}

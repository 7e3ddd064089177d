//! Core request and verdict types

use crate::error::GateError;
use crate::input::Headers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One request to be authorized: the raw path (query string allowed) and
/// the headers that feed declared policy inputs.
///
/// Request-scoped; the gate holds no state across requests, so concurrent
/// checks never interfere.
#[derive(Debug, Clone, Default)]
pub struct AccessRequest {
    /// Raw request path, e.g. `/perf-server/api/v1/bus/latestData?limit=5`
    pub path: String,

    /// Request headers, consulted only for declared policy inputs
    pub headers: Headers,
}

impl AccessRequest {
    /// Create a request for a path with no headers
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: Headers::new(),
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// What granted access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Grant {
    /// Path matched the bypass allow-list; no policy was consulted
    Bypass,

    /// A wildcard policy at an ancestor prefix granted access
    Wildcard { policy_path: String },

    /// The exact-path policy granted access
    Exact { policy_path: String },
}

/// Why access was rejected. Rejections are legitimate outcomes, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rejection {
    /// No policy exists for the resource at any cascade level
    NoPolicy { path: String },

    /// A policy was found and evaluated to deny
    Forbidden,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoPolicy { path } => write!(f, "no rules specified for [{path}]"),
            Rejection::Forbidden => write!(f, "access forbidden"),
        }
    }
}

/// Terminal outcome of one authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The caller may proceed
    Allowed(Grant),

    /// The caller may not proceed; a policy (or the lack of one) said so
    Rejected(Rejection),

    /// No verdict could be derived: a collaborator failed mid-cascade
    ResolutionFailed(GateError),
}

impl Verdict {
    /// Whether the request may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed(_))
    }

    /// Diagnostic message for the transport layer
    pub fn message(&self) -> String {
        match self {
            Verdict::Allowed(Grant::Wildcard { .. }) => "general match".to_string(),
            Verdict::Allowed(_) => "allowed".to_string(),
            Verdict::Rejected(rejection) => rejection.to_string(),
            Verdict::ResolutionFailed(error) => error.to_string(),
        }
    }
}

//! The per-request authorization entry point

use crate::cascade::CascadeResolver;
use crate::engine::DecisionEngine;
use crate::error::GateError;
use crate::policy::PolicyStore;
use crate::types::{AccessRequest, Grant, Verdict};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Gate configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Substring patterns that bypass authorization entirely. Defaults to
    /// the documentation endpoints.
    pub bypass_patterns: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            bypass_patterns: vec!["swagger".to_string()],
        }
    }
}

/// Per-request authorization gate: bypass check, then the cascade.
///
/// Holds no per-request state; every check is independent, so the gate can
/// be shared across concurrent requests behind an `Arc`.
pub struct AuthorizationGate {
    resolver: CascadeResolver,
    config: GateConfig,
}

impl AuthorizationGate {
    /// Create a gate with the default configuration
    pub fn new(store: Arc<dyn PolicyStore>, engine: Arc<dyn DecisionEngine>) -> Self {
        Self::with_config(GateConfig::default(), store, engine)
    }

    /// Create a gate with an explicit configuration
    pub fn with_config(
        config: GateConfig,
        store: Arc<dyn PolicyStore>,
        engine: Arc<dyn DecisionEngine>,
    ) -> Self {
        Self {
            resolver: CascadeResolver::new(store, engine),
            config,
        }
    }

    /// Authorize one request.
    ///
    /// Bypassed paths are allowed without a single store or engine call.
    /// Everything else goes through the cascade, and the outcome maps
    /// directly onto [`Verdict`].
    pub async fn authorize(&self, request: &AccessRequest) -> Verdict {
        let decision_id = Uuid::new_v4();
        let start = Instant::now();

        if request.path.is_empty() {
            return Verdict::ResolutionFailed(GateError::InvalidRequest(
                "empty request path".to_string(),
            ));
        }

        // A trailing slash addresses the same resource.
        let path = request.path.strip_suffix('/').unwrap_or(&request.path);

        let verdict = if self.is_bypassed(path) {
            debug!(%decision_id, path, "bypass allow-list matched");
            Verdict::Allowed(Grant::Bypass)
        } else {
            self.resolver.resolve(path, &request.headers).await
        };

        info!(
            %decision_id,
            path,
            allowed = verdict.is_allowed(),
            latency_ms = start.elapsed().as_millis() as u64,
            "authorization decision: {}",
            verdict.message()
        );
        verdict
    }

    fn is_bypassed(&self, path: &str) -> bool {
        self.config
            .bypass_patterns
            .iter()
            .any(|pattern| path.contains(pattern.as_str()))
    }
}

//! The cascading resolver: ancestor wildcard scan, then exact-path fallback

use crate::engine::DecisionEngine;
use crate::error::GateError;
use crate::input::{self, Headers};
use crate::path::{self, WILDCARD_POLICY_FILE};
use crate::policy::PolicyStore;
use crate::types::{Grant, Rejection, Verdict};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a single cascade step
#[derive(Debug)]
pub enum Step {
    /// No decision at this level; scan deeper
    Continue,
    /// A policy granted access; the cascade stops
    Allow(Grant),
    /// A policy was found and rejected the request
    Reject(Rejection),
    /// A collaborator failed; the cascade aborts
    Fail(GateError),
}

impl Step {
    /// Terminal verdict for a cascade ending on this step. A cascade that
    /// runs out of steps without a decision has no applicable policy.
    fn into_verdict(self, lookup_key: &str) -> Verdict {
        match self {
            Step::Continue => Verdict::Rejected(Rejection::NoPolicy {
                path: lookup_key.to_string(),
            }),
            Step::Allow(grant) => Verdict::Allowed(grant),
            Step::Reject(rejection) => Verdict::Rejected(rejection),
            Step::Fail(error) => Verdict::ResolutionFailed(error),
        }
    }
}

/// Resolves a request path to a policy decision.
///
/// Ancestor wildcard policies are scanned shallow-to-deep and the first
/// grant wins, so a wildcard installed at an application root authorizes
/// everything beneath it with a single lookup. A wildcard that evaluates to
/// deny is skipped, not terminal. Only when no ancestor grants does the
/// exact-path policy get consulted. Any store or evaluation failure aborts
/// the whole cascade; a verdict is never derived from an incomplete scan.
///
/// Both collaborators are injected and only ever read; the resolver keeps
/// no state between requests.
pub struct CascadeResolver {
    store: Arc<dyn PolicyStore>,
    engine: Arc<dyn DecisionEngine>,
}

impl CascadeResolver {
    /// Create a resolver over a policy store and a decision engine
    pub fn new(store: Arc<dyn PolicyStore>, engine: Arc<dyn DecisionEngine>) -> Self {
        Self { store, engine }
    }

    /// Resolve one request path to a verdict.
    ///
    /// The scan is sequential by design: whether a level must be consulted
    /// depends on the outcome of the previous one.
    pub async fn resolve(&self, raw_path: &str, headers: &Headers) -> Verdict {
        let lookup_key = path::lookup_key(raw_path);

        for prefix in path::ancestor_prefixes(&lookup_key) {
            match self.wildcard_step(&prefix, headers).await {
                Step::Continue => continue,
                step => return step.into_verdict(&lookup_key),
            }
        }

        debug!(%lookup_key, "no wildcard grant; falling back to exact policy");
        self.exact_step(&lookup_key, raw_path, headers)
            .await
            .into_verdict(&lookup_key)
    }

    /// One level of the ancestor scan: fetch `prefix + "any.rego"` and, if
    /// present, evaluate it under the wildcard rule namespace.
    async fn wildcard_step(&self, prefix: &str, headers: &Headers) -> Step {
        let policy_path = format!("{prefix}{WILDCARD_POLICY_FILE}");
        let document = match self.store.fetch(&policy_path).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!(%policy_path, "no wildcard policy at this level");
                return Step::Continue;
            }
            Err(error) => {
                warn!(%policy_path, %error, "policy store failed during wildcard scan");
                return Step::Fail(error);
            }
        };

        // Wildcard modules register under their `/`-terminated prefix; the
        // `any.rego` key is only the storage location.
        let query = path::query_identifier(prefix, true);
        let input = input::build_input(headers, &document.declared_inputs);
        match self.engine.evaluate(prefix, &document.source, &query, &input).await {
            Ok(true) => {
                debug!(%policy_path, "wildcard grant");
                Step::Allow(Grant::Wildcard { policy_path })
            }
            // An explicit wildcard deny is not terminal; deeper levels and
            // the exact policy still get their turn.
            Ok(false) => Step::Continue,
            Err(error) => {
                warn!(%policy_path, %error, "wildcard evaluation failed; aborting cascade");
                Step::Fail(error)
            }
        }
    }

    /// Exact-path fallback, reached only when no ancestor wildcard granted.
    /// An absent document leaves the step undecided; the cascade is out of
    /// steps at that point and terminates as "no applicable policy".
    async fn exact_step(&self, lookup_key: &str, raw_path: &str, headers: &Headers) -> Step {
        let document = match self.store.fetch(lookup_key).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!(%lookup_key, "no exact policy for this resource");
                return Step::Continue;
            }
            Err(error) => {
                warn!(%lookup_key, %error, "policy store failed fetching exact policy");
                return Step::Fail(error);
            }
        };

        let query = path::query_identifier(raw_path, false);
        let input = input::build_input(headers, &document.declared_inputs);
        match self.engine.evaluate(lookup_key, &document.source, &query, &input).await {
            Ok(true) => Step::Allow(Grant::Exact {
                policy_path: lookup_key.to_string(),
            }),
            Ok(false) => Step::Reject(Rejection::Forbidden),
            Err(error) => {
                warn!(%lookup_key, %error, "exact policy evaluation failed");
                Step::Fail(error)
            }
        }
    }
}

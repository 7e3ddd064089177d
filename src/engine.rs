//! Decision engine contract and a scripted engine for deterministic tests

use crate::error::{GateError, Result};
use crate::input::EvaluationInput;
use async_trait::async_trait;
use std::collections::HashMap;

/// External policy evaluator.
///
/// Always injected; the resolver never constructs one. The gate does not
/// implement a policy language, it only interprets the boolean verdict.
#[async_trait]
pub trait DecisionEngine: Send + Sync {
    /// Evaluate `query` against the policy module `module_source`,
    /// registered under `module_key`, with the given input.
    ///
    /// `Ok(false)` is a legitimate rejection. `Err` means the module could
    /// not be evaluated at all (malformed source, unknown query rule) and
    /// aborts the cascade.
    async fn evaluate(
        &self,
        module_key: &str,
        module_source: &str,
        query: &str,
        input: &EvaluationInput,
    ) -> Result<bool>;
}

/// Scripted verdict for one query identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedVerdict {
    /// Evaluate to `allowed = true`
    Allow,
    /// Evaluate to `allowed = false`
    Deny,
    /// Fail evaluation with the given message
    Error(String),
}

/// Deterministic engine returning scripted verdicts per query identifier.
///
/// Queries without a script fall back to the configured fallback verdict
/// (deny unless set otherwise).
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    verdicts: HashMap<String, ScriptedVerdict>,
    fallback: Option<ScriptedVerdict>,
}

impl ScriptedEngine {
    /// Create an engine that denies every query
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a verdict for one query identifier
    pub fn with_verdict(mut self, query: impl Into<String>, verdict: ScriptedVerdict) -> Self {
        self.verdicts.insert(query.into(), verdict);
        self
    }

    /// Set the verdict for unscripted queries
    pub fn with_fallback(mut self, verdict: ScriptedVerdict) -> Self {
        self.fallback = Some(verdict);
        self
    }
}

#[async_trait]
impl DecisionEngine for ScriptedEngine {
    async fn evaluate(
        &self,
        _module_key: &str,
        _module_source: &str,
        query: &str,
        _input: &EvaluationInput,
    ) -> Result<bool> {
        let verdict = self
            .verdicts
            .get(query)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or(ScriptedVerdict::Deny);
        match verdict {
            ScriptedVerdict::Allow => Ok(true),
            ScriptedVerdict::Deny => Ok(false),
            ScriptedVerdict::Error(message) => Err(GateError::Evaluation {
                query: query.to_string(),
                message,
            }),
        }
    }
}

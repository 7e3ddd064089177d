//! # rego-gate
//!
//! Cascading path-based authorization, decisions delegated to an external
//! policy engine.
//!
//! For every request the gate derives a policy lookup key from the request
//! path, scans ancestor wildcard policies shallow-to-deep (first grant
//! wins), falls back to the exact-path policy, assembles each candidate
//! policy's declared inputs from the request headers, and hands the boolean
//! decision to an injected [`DecisionEngine`].
//!
//! ## Example
//!
//! ```rust
//! use rego_gate::{
//!     AccessRequest, AuthorizationGate, InMemoryPolicyStore, PolicyDocument, PolicyStore,
//!     ScriptedEngine, ScriptedVerdict,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryPolicyStore::new());
//!     store
//!         .put(PolicyDocument::new(
//!             "/svc/do.rego",
//!             "input.role\nallow { input.role == \"admin\" }",
//!         ))
//!         .await?;
//!
//!     let engine =
//!         Arc::new(ScriptedEngine::new().with_verdict("data.svc.do.allow", ScriptedVerdict::Allow));
//!
//!     let gate = AuthorizationGate::new(store, engine);
//!     let request = AccessRequest::new("/svc/do").with_header("role", "admin");
//!
//!     assert!(gate.authorize(&request).await.is_allowed());
//!     Ok(())
//! }
//! ```

pub mod cascade;
pub mod engine;
pub mod error;
pub mod gate;
pub mod input;
pub mod path;
pub mod policy;
pub mod scan;
pub mod types;

// Re-export commonly used types
pub use cascade::{CascadeResolver, Step};
pub use engine::{DecisionEngine, ScriptedEngine, ScriptedVerdict};
pub use error::{GateError, Result};
pub use gate::{AuthorizationGate, GateConfig};
pub use input::{EvaluationInput, Headers};
pub use policy::{InMemoryPolicyStore, PolicyDocument, PolicyStore};
pub use types::{AccessRequest, Grant, Rejection, Verdict};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

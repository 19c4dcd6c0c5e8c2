//! `togglekit` is a feature-toggle evaluation engine: it decides whether a
//! named, optionally product-scoped feature is active for the current
//! evaluation, using pluggable activation strategies (toggles).
//!
//! # Overview
//!
//! A [`Feature`] is the unit of configuration: a name, an optional product
//! scope, and an ordered list of [`ToggleConfiguration`]s, one per strategy
//! the feature opts into, each carrying the strategy's typed parameters.
//! Features are served by a [`FeatureStore`](store::FeatureStore), the
//! crate's only persistence seam: production stores (database, remote
//! configuration service) implement the trait elsewhere, while
//! [`InMemoryFeatureStore`](store::InMemoryFeatureStore) covers wiring and
//! tests.
//!
//! [`toggles`] contains the strategy contract
//! ([`Toggle`](toggles::Toggle)) and the built-in strategies, from a plain
//! kill switch to percentage rollouts. Rollout strategies bucket an identity
//! key (user name, session id, a request header) into a fixed partition
//! space with the deterministic [`partitioner`], so a given identity keeps
//! the same outcome for a given feature+percentage across calls and process
//! restarts; there is no per-request randomness.
//!
//! Contextual signals reach the strategies through the [`context`] provider
//! traits; anonymous evaluations fall back to fixed sentinel identities and
//! stay deterministic.
//!
//! [`FeatureService`] is the orchestrator and sole evaluation entrypoint:
//! [`is_enabled`](FeatureService::is_enabled) resolves the feature, looks up
//! each configured strategy in the [`ToggleRegistry`], and ANDs the results,
//! short-circuiting on the first inactive toggle.
//!
//! Evaluation is stateless and side-effect free apart from store and
//! provider calls, so concurrent evaluations need no locking, and dropping
//! an evaluation future abandons it cleanly at any suspension point.
//!
//! # Error Handling
//!
//! Errors are represented by the [`enum@Error`] enum. A feature missing from
//! the store, a feature lacking a strategy's configuration, and an invalid
//! parameter are all distinguishable failures that propagate to the caller;
//! the core never downgrades them to "disabled". Whether to fail open or
//! fail closed is the integration layer's decision.
//!
//! # Logging
//!
//! The crate uses the [`log`](https://docs.rs/log/latest/log/) crate with
//! structured key-values under the `togglekit` target. Consider integrating
//! a `log`-compatible logger implementation for better visibility into
//! evaluation decisions.

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(missing_docs)]

pub mod context;
pub mod partitioner;
pub mod store;
pub mod toggles;

mod error;
mod feature;
mod registry;
mod service;

pub use error::{Error, Result};
pub use feature::{Feature, ParameterValue, ToggleConfiguration};
pub use registry::ToggleRegistry;
pub use service::FeatureService;

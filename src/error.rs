use std::sync::Arc;

use thiserror::Error;

/// Result type used throughout the crate, with [`enum@Error`] as the error variant.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing possible errors that can occur during feature evaluation.
///
/// None of these are downgraded to a boolean inside the evaluation core: a
/// missing feature is a distinguishable outcome from a feature that is found
/// but inactive, and it is up to the caller to decide between fail-open and
/// fail-closed.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The requested feature/product pair is absent from the store.
    #[error("feature {feature_name:?} not found (product: {product_name:?})")]
    FeatureNotFound {
        /// Name of the requested feature.
        feature_name: String,
        /// Product scope of the request, if any.
        product_name: Option<String>,
    },

    /// The feature exists but does not declare a configuration for the
    /// requested toggle kind. Indicates a misconfiguration, not a runtime
    /// "inactive".
    #[error("feature {feature_name:?} has no configuration for toggle kind {toggle_kind:?}")]
    ToggleConfigurationNotFound {
        /// Name of the feature that was inspected.
        feature_name: String,
        /// Kind key the strategy expected to find.
        toggle_kind: String,
    },

    /// A feature declares a toggle kind that no strategy is registered for.
    #[error("no toggle registered for kind {toggle_kind:?}")]
    UnknownToggleKind {
        /// The unmatched kind key.
        toggle_kind: String,
    },

    /// A toggle configuration parameter is missing, mistyped, or outside its
    /// domain (e.g. a rollout percentage outside `[0, 100]`).
    #[error("invalid toggle parameter {parameter:?}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: String,
        /// Why the parameter was rejected.
        reason: &'static str,
    },

    /// A non-positive partition count was passed to the partitioner. This is
    /// a programming error, not a recoverable condition.
    #[error("partition count must be positive, got {partition_count}")]
    InvalidPartitionCount {
        /// The rejected partition count.
        partition_count: u64,
    },

    /// A store implementation failed (I/O, network, decoding).
    // Store errors are not clonable in general, so we're wrapping them in an Arc.
    #[error(transparent)]
    Store(Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a store-implementation failure.
    pub fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Store(Arc::new(err))
    }
}

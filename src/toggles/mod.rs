//! Toggle strategies.
//!
//! A toggle is a pluggable activation strategy: given a feature's
//! configuration and contextual signals, it reports whether the feature is
//! active for this evaluation. Strategies are stateless: they hold only
//! `Arc` references to their collaborators (store, context providers) and
//! never carry per-request state, so a single instance can serve concurrent
//! evaluations.
//!
//! Each strategy declares a `KIND` key; a feature opts into a strategy by
//! carrying a [`ToggleConfiguration`](crate::ToggleConfiguration) with that
//! kind. Rollout-style strategies share the same deterministic bucketing:
//! an identity key is partitioned with [`Md5Partitioner`] into
//! [`PARTITIONS`] fixed buckets, and the configured percentage decides how
//! many buckets are active.
use async_trait::async_trait;

use crate::feature::ToggleConfiguration;
use crate::partitioner::{Md5Partitioner, Partitioner};
use crate::Result;

mod from_to;
mod on_off;
mod role_name;
mod rollout_header_value;
mod rollout_session_id;
mod rollout_user_name;
mod user_name;

pub use from_to::FromToToggle;
pub use on_off::OnOffToggle;
pub use role_name::RoleNameToggle;
pub use rollout_header_value::RolloutHeaderValueToggle;
pub use rollout_session_id::RolloutSessionIdToggle;
pub use rollout_user_name::RolloutUserNameToggle;
pub use user_name::UserNameToggle;

/// A pluggable activation strategy.
#[async_trait]
pub trait Toggle: Send + Sync {
    /// Kind key matching this strategy to a feature's toggle configurations.
    fn kind(&self) -> &'static str;

    /// Decide whether the feature is active for the current evaluation.
    ///
    /// Errors (missing feature, missing configuration, invalid parameters)
    /// propagate to the caller; they are never reported as "inactive".
    async fn is_active(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool>;
}

/// Number of logical partitions used by rollout strategies.
pub const PARTITIONS: u64 = 10;

/// Name of the rollout percentage parameter.
pub const PERCENTAGE: &str = "Percentage";

/// Shared rollout decision: bucket `partition_key` and compare against the
/// configured percentage.
///
/// The comparison is `<=` over floor division, so partition 0 is active even
/// at percentage 0.
pub(crate) fn is_in_rollout(
    configuration: &ToggleConfiguration,
    partition_key: &str,
) -> Result<bool> {
    let percentage = configuration.percentage(PERCENTAGE)?;
    let assigned_partition = Md5Partitioner.resolve_to_logical_partition(partition_key, PARTITIONS)?;

    log::trace!(target: "togglekit",
                partition_key,
                assigned_partition,
                percentage;
                "assigned rollout partition");

    Ok(assigned_partition <= PARTITIONS * percentage / 100)
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::UserNameProvider;
use crate::store::FeatureStore;
use crate::toggles::{is_in_rollout, Toggle};
use crate::Result;

/// Identity used for bucketing when no user name can be resolved. Keeps
/// anonymous evaluations deterministic instead of failing.
const ANONYMOUS_USER: &str = "AnonymousUser";

/// Toggle that is active depending on the partition assigned to the current
/// user name and the configured rollout percentage (`Percentage`, 0 to 100).
///
/// Bucketing by the stable user name rather than a per-request random draw
/// guarantees the same user keeps the same outcome for a given
/// feature+percentage, across calls and process restarts.
pub struct RolloutUserNameToggle {
    user_names: Arc<dyn UserNameProvider>,
    store: Arc<dyn FeatureStore>,
}

impl RolloutUserNameToggle {
    /// Kind key for this strategy.
    pub const KIND: &'static str = "RolloutUserName";

    /// Create the strategy from its collaborators.
    pub fn new(user_names: Arc<dyn UserNameProvider>, store: Arc<dyn FeatureStore>) -> Self {
        RolloutUserNameToggle { user_names, store }
    }
}

#[async_trait]
impl Toggle for RolloutUserNameToggle {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn is_active(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool> {
        let feature = self.store.find_feature(feature_name, product_name).await?;
        let configuration = feature.toggle(Self::KIND)?;

        let user_name = self
            .user_names
            .current_user_name()
            .await?
            .unwrap_or_else(|| ANONYMOUS_USER.to_owned());

        is_in_rollout(configuration, &user_name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::RolloutUserNameToggle;
    use crate::context::StaticUserNameProvider;
    use crate::store::{FeatureStore, InMemoryFeatureStore};
    use crate::toggles::{Toggle, PERCENTAGE};
    use crate::{Error, Feature, ToggleConfiguration};

    fn store_with_percentage(percentage: i64) -> Arc<InMemoryFeatureStore> {
        let store = InMemoryFeatureStore::new();
        store.set_feature(
            Feature::new("match-score", None).with_toggle(
                ToggleConfiguration::new(RolloutUserNameToggle::KIND)
                    .with_parameter(PERCENTAGE, percentage),
            ),
        );
        Arc::new(store)
    }

    fn toggle_for(user_name: Option<&str>, store: Arc<InMemoryFeatureStore>) -> RolloutUserNameToggle {
        let provider = match user_name {
            Some(name) => StaticUserNameProvider::new(name),
            None => StaticUserNameProvider::anonymous(),
        };
        RolloutUserNameToggle::new(Arc::new(provider), store as Arc<dyn FeatureStore>)
    }

    // "alice" hashes to partition 0, "dave" to partition 9.

    #[tokio::test]
    async fn user_in_low_partition_is_active_at_fifty_percent() {
        let toggle = toggle_for(Some("alice"), store_with_percentage(50));
        assert!(toggle.is_active("match-score", None).await.unwrap());
    }

    #[tokio::test]
    async fn user_in_high_partition_is_inactive_at_fifty_percent() {
        let toggle = toggle_for(Some("dave"), store_with_percentage(50));
        assert!(!toggle.is_active("match-score", None).await.unwrap());
    }

    #[tokio::test]
    async fn last_partition_activates_exactly_at_ninety_percent() {
        let toggle = toggle_for(Some("dave"), store_with_percentage(89));
        assert!(!toggle.is_active("match-score", None).await.unwrap());

        let toggle = toggle_for(Some("dave"), store_with_percentage(90));
        assert!(toggle.is_active("match-score", None).await.unwrap());
    }

    // Pins the `<=` threshold comparison: partition 0 stays active even with
    // the rollout at 0%.
    #[tokio::test]
    async fn partition_zero_is_active_at_zero_percent() {
        let toggle = toggle_for(Some("alice"), store_with_percentage(0));
        assert!(toggle.is_active("match-score", None).await.unwrap());

        // "carol" (partition 2) is out, as expected at 0%.
        let toggle = toggle_for(Some("carol"), store_with_percentage(0));
        assert!(!toggle.is_active("match-score", None).await.unwrap());
    }

    #[tokio::test]
    async fn everyone_is_active_at_one_hundred_percent() {
        for user in ["alice", "bob", "carol", "dave", "erin"] {
            let toggle = toggle_for(Some(user), store_with_percentage(100));
            assert!(toggle.is_active("match-score", None).await.unwrap());
        }
    }

    #[tokio::test]
    async fn outcome_is_stable_across_repeated_evaluations() {
        let toggle = toggle_for(Some("alice"), store_with_percentage(50));
        for _ in 0..1000 {
            assert!(toggle.is_active("match-score", None).await.unwrap());
        }
    }

    #[tokio::test]
    async fn activation_is_monotonic_in_percentage() {
        let mut seen_active = false;
        for percentage in 0..=100 {
            let toggle = toggle_for(Some("dave"), store_with_percentage(percentage));
            let active = toggle.is_active("match-score", None).await.unwrap();
            if seen_active {
                assert!(active, "active user flipped back to inactive at {percentage}%");
            }
            seen_active |= active;
        }
        assert!(seen_active);
    }

    // "AnonymousUser" hashes to partition 3, so anonymous evaluations flip at
    // exactly 30%.
    #[tokio::test]
    async fn anonymous_evaluation_is_deterministic() {
        let toggle = toggle_for(None, store_with_percentage(29));
        for _ in 0..100 {
            assert!(!toggle.is_active("match-score", None).await.unwrap());
        }

        let toggle = toggle_for(None, store_with_percentage(30));
        for _ in 0..100 {
            assert!(toggle.is_active("match-score", None).await.unwrap());
        }
    }

    #[tokio::test]
    async fn missing_feature_propagates() {
        let toggle = toggle_for(Some("alice"), store_with_percentage(50));
        let result = toggle.is_active("missing-feature", None).await;
        assert!(matches!(result, Err(Error::FeatureNotFound { .. })));
    }

    #[tokio::test]
    async fn feature_without_this_toggle_is_a_configuration_error() {
        let store = InMemoryFeatureStore::new();
        store.set_feature(Feature::new("match-score", None));
        let toggle = toggle_for(Some("alice"), Arc::new(store));

        let result = toggle.is_active("match-score", None).await;
        assert!(matches!(
            result,
            Err(Error::ToggleConfigurationNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn out_of_range_percentage_is_rejected() {
        let toggle = toggle_for(Some("alice"), store_with_percentage(101));
        let result = toggle.is_active("match-score", None).await;
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::HeaderProvider;
use crate::store::FeatureStore;
use crate::toggles::{is_in_rollout, Toggle};
use crate::Result;

/// Identity used for bucketing when the configured header is absent.
const NO_VALUE: &str = "NoValue";

/// Name of the parameter selecting which request header to bucket by.
const HEADER_NAME: &str = "HeaderName";

/// Toggle that is active depending on the partition assigned to the value of
/// a configured request header and the rollout percentage (`Percentage`,
/// 0 to 100).
///
/// Useful for rollouts keyed by tenant, device class, or any other signal a
/// gateway already stamps on the request.
pub struct RolloutHeaderValueToggle {
    headers: Arc<dyn HeaderProvider>,
    store: Arc<dyn FeatureStore>,
}

impl RolloutHeaderValueToggle {
    /// Kind key for this strategy.
    pub const KIND: &'static str = "RolloutHeaderValue";

    /// Create the strategy from its collaborators.
    pub fn new(headers: Arc<dyn HeaderProvider>, store: Arc<dyn FeatureStore>) -> Self {
        RolloutHeaderValueToggle { headers, store }
    }
}

#[async_trait]
impl Toggle for RolloutHeaderValueToggle {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn is_active(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool> {
        let feature = self.store.find_feature(feature_name, product_name).await?;
        let configuration = feature.toggle(Self::KIND)?;

        let header_name = configuration.string(HEADER_NAME)?;
        let header_value = self
            .headers
            .header_value(header_name)
            .await?
            .unwrap_or_else(|| NO_VALUE.to_owned());

        is_in_rollout(configuration, &header_value)
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::store::FeatureStore;
use crate::toggles::Toggle;
use crate::Result;

const ON: &str = "On";

/// Plain kill switch: active iff the `On` parameter is `true`.
pub struct OnOffToggle {
    store: Arc<dyn FeatureStore>,
}

impl OnOffToggle {
    /// Kind key for this strategy.
    pub const KIND: &'static str = "OnOff";

    /// Create the strategy from its collaborators.
    pub fn new(store: Arc<dyn FeatureStore>) -> Self {
        OnOffToggle { store }
    }
}

#[async_trait]
impl Toggle for OnOffToggle {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn is_active(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool> {
        let feature = self.store.find_feature(feature_name, product_name).await?;
        let configuration = feature.toggle(Self::KIND)?;
        configuration.boolean(ON)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::OnOffToggle;
    use crate::store::{FeatureStore, InMemoryFeatureStore};
    use crate::toggles::Toggle;
    use crate::{Feature, ToggleConfiguration};

    #[tokio::test]
    async fn follows_the_on_parameter() {
        let store = InMemoryFeatureStore::new();
        store.set_feature(
            Feature::new("maintenance-banner", None)
                .with_toggle(ToggleConfiguration::new(OnOffToggle::KIND).with_parameter("On", true)),
        );
        store.set_feature(
            Feature::new("legacy-export", None)
                .with_toggle(ToggleConfiguration::new(OnOffToggle::KIND).with_parameter("On", false)),
        );

        let toggle = OnOffToggle::new(Arc::new(store) as Arc<dyn FeatureStore>);
        assert!(toggle.is_active("maintenance-banner", None).await.unwrap());
        assert!(!toggle.is_active("legacy-export", None).await.unwrap());
    }
}

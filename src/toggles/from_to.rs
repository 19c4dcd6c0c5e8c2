use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::feature::ToggleConfiguration;
use crate::store::FeatureStore;
use crate::toggles::Toggle;
use crate::{Error, Result};

const FROM: &str = "From";
const TO: &str = "To";

/// Window bounds are interpreted as UTC.
const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Activation window: active iff the current UTC time is within the
/// `[From, To]` interval, both given as `"%Y-%m-%d %H:%M:%S"` strings.
pub struct FromToToggle {
    store: Arc<dyn FeatureStore>,
}

impl FromToToggle {
    /// Kind key for this strategy.
    pub const KIND: &'static str = "FromTo";

    /// Create the strategy from its collaborators.
    pub fn new(store: Arc<dyn FeatureStore>) -> Self {
        FromToToggle { store }
    }
}

#[async_trait]
impl Toggle for FromToToggle {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn is_active(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool> {
        let feature = self.store.find_feature(feature_name, product_name).await?;
        let configuration = feature.toggle(Self::KIND)?;

        let from = window_bound(configuration, FROM)?;
        let to = window_bound(configuration, TO)?;
        let now = Utc::now().naive_utc();

        Ok(from <= now && now <= to)
    }
}

fn window_bound(configuration: &ToggleConfiguration, parameter: &str) -> Result<NaiveDateTime> {
    let value = configuration.string(parameter)?;
    NaiveDateTime::parse_from_str(value, FORMAT).map_err(|_| Error::InvalidParameter {
        parameter: parameter.to_owned(),
        reason: "expected a `%Y-%m-%d %H:%M:%S` timestamp",
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::FromToToggle;
    use crate::store::{FeatureStore, InMemoryFeatureStore};
    use crate::toggles::Toggle;
    use crate::{Error, Feature, ToggleConfiguration};

    fn toggle_with_window(from: &str, to: &str) -> FromToToggle {
        let store = InMemoryFeatureStore::new();
        store.set_feature(
            Feature::new("spring-sale", None).with_toggle(
                ToggleConfiguration::new(FromToToggle::KIND)
                    .with_parameter("From", from)
                    .with_parameter("To", to),
            ),
        );
        FromToToggle::new(Arc::new(store) as Arc<dyn FeatureStore>)
    }

    #[tokio::test]
    async fn active_inside_the_window() {
        let toggle = toggle_with_window("2000-01-01 00:00:00", "2999-12-31 23:59:59");
        assert!(toggle.is_active("spring-sale", None).await.unwrap());
    }

    #[tokio::test]
    async fn inactive_outside_the_window() {
        let toggle = toggle_with_window("2000-01-01 00:00:00", "2000-12-31 23:59:59");
        assert!(!toggle.is_active("spring-sale", None).await.unwrap());

        let toggle = toggle_with_window("2999-01-01 00:00:00", "2999-12-31 23:59:59");
        assert!(!toggle.is_active("spring-sale", None).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_bound_is_invalid() {
        let toggle = toggle_with_window("01/01/2000", "2999-12-31 23:59:59");
        let result = toggle.is_active("spring-sale", None).await;
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }
}

use std::sync::Arc;

use crate::registry::ToggleRegistry;
use crate::store::FeatureStore;
use crate::{Error, Result};

/// The evaluation entrypoint: resolves a feature from the store and combines
/// the activation results of its configured toggles.
///
/// # Examples
/// ```
/// # use std::sync::Arc;
/// # use togglekit::store::{FeatureStore, InMemoryFeatureStore};
/// # use togglekit::toggles::OnOffToggle;
/// # use togglekit::{Feature, FeatureService, ToggleConfiguration, ToggleRegistry};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> togglekit::Result<()> {
/// let store = Arc::new(InMemoryFeatureStore::new());
/// store.set_feature(
///     Feature::new("dark-mode", None)
///         .with_toggle(ToggleConfiguration::new(OnOffToggle::KIND).with_parameter("On", true)),
/// );
///
/// let store = store as Arc<dyn FeatureStore>;
/// let toggles = ToggleRegistry::new().register(Arc::new(OnOffToggle::new(store.clone())));
/// let features = FeatureService::new(store, toggles);
///
/// assert!(features.is_enabled("dark-mode", None).await?);
/// # Ok(())
/// # }
/// ```
pub struct FeatureService {
    store: Arc<dyn FeatureStore>,
    toggles: ToggleRegistry,
}

impl FeatureService {
    /// Create a service from its collaborators.
    pub fn new(store: Arc<dyn FeatureStore>, toggles: ToggleRegistry) -> Self {
        FeatureService { store, toggles }
    }

    /// Decide whether a feature is enabled for the current evaluation.
    ///
    /// ALL configured toggles must report active (logical AND); evaluation
    /// short-circuits on the first inactive toggle. A feature with no
    /// toggles configured is enabled; the AND over an empty set is
    /// vacuously true.
    ///
    /// A feature missing from the store is an [`Error::FeatureNotFound`],
    /// never a silent `false`: callers choose their own fallback policy.
    pub async fn is_enabled(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool> {
        let feature = self
            .store
            .find_feature(feature_name, product_name)
            .await
            .inspect_err(|err| {
                log::warn!(target: "togglekit",
                           feature_name,
                           product_name:? = product_name;
                           "error resolving feature: {err}");
            })?;

        for configuration in feature.toggles() {
            let toggle = self.toggles.get(configuration.kind()).ok_or_else(|| {
                log::warn!(target: "togglekit",
                           feature_name,
                           toggle_kind:display = configuration.kind();
                           "feature references an unregistered toggle kind");
                Error::UnknownToggleKind {
                    toggle_kind: configuration.kind().to_owned(),
                }
            })?;

            let active = toggle.is_active(feature_name, product_name).await?;

            log::trace!(target: "togglekit",
                        feature_name,
                        toggle_kind:display = configuration.kind(),
                        active;
                        "evaluated toggle");

            if !active {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Run one of two branches depending on the feature's state and return
    /// the branch's result.
    pub async fn choose<T>(
        &self,
        feature_name: &str,
        product_name: Option<&str>,
        enabled: impl FnOnce() -> T + Send,
        disabled: impl FnOnce() -> T + Send,
    ) -> Result<T> {
        if self.is_enabled(feature_name, product_name).await? {
            Ok(enabled())
        } else {
            Ok(disabled())
        }
    }
}

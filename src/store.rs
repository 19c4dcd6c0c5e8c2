//! Feature store abstraction and a thread-safe in-memory implementation.
//! Production stores (database, remote configuration service) live outside
//! this crate and only need to implement [`FeatureStore`].
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::{Error, Feature, Result};

/// Read-only lookup of feature definitions by name and optional product scope.
///
/// Implementations may suspend on I/O; the evaluation path calls
/// [`find_feature`](FeatureStore::find_feature) per evaluation and treats the
/// returned [`Feature`] as an immutable snapshot. A missing feature is a
/// distinct failure ([`Error::FeatureNotFound`]), never an implicit
/// "inactive".
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Find a feature by `(feature_name, product_name)`.
    async fn find_feature(
        &self,
        feature_name: &str,
        product_name: Option<&str>,
    ) -> Result<Arc<Feature>>;
}

/// `InMemoryFeatureStore` provides a thread-safe (`Sync`) storage for feature
/// definitions that allows concurrent access for readers and writers.
///
/// Stored features are immutable and can only be replaced completely; readers
/// get an `Arc` snapshot that is not affected by later writes.
#[derive(Default)]
pub struct InMemoryFeatureStore {
    features: RwLock<HashMap<FeatureKey, Arc<Feature>>>,
}

type FeatureKey = (String, Option<String>);

impl InMemoryFeatureStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        InMemoryFeatureStore::default()
    }

    /// Materialize a store from a JSON array of feature definitions.
    ///
    /// ```
    /// # use togglekit::store::InMemoryFeatureStore;
    /// let store = InMemoryFeatureStore::from_json(
    ///     r#"[{"name": "dark-mode", "toggles": [{"kind": "OnOff", "data": {"On": true}}]}]"#,
    /// ).unwrap();
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let features: Vec<Feature> = serde_json::from_str(json).map_err(Error::store)?;
        let store = InMemoryFeatureStore::new();
        for feature in features {
            store.set_feature(feature);
        }
        Ok(store)
    }

    /// Insert or replace a feature, keyed by its name and product scope.
    pub fn set_feature(&self, feature: Feature) {
        log::trace!(target: "togglekit",
                    feature:serde = feature;
                    "storing feature");

        let key = (feature.name().to_owned(), feature.product().map(str::to_owned));

        // self.features.write() should always return Ok(). Err() is possible
        // only if the lock is poisoned (writer panicked while holding the
        // lock), which should never happen.
        let mut features = self
            .features
            .write()
            .expect("thread holding feature lock should not panic");

        features.insert(key, Arc::new(feature));
    }
}

#[async_trait]
impl FeatureStore for InMemoryFeatureStore {
    async fn find_feature(
        &self,
        feature_name: &str,
        product_name: Option<&str>,
    ) -> Result<Arc<Feature>> {
        let features = self
            .features
            .read()
            .expect("thread holding feature lock should not panic");

        features
            .get(&(feature_name.to_owned(), product_name.map(str::to_owned)))
            .cloned()
            .ok_or_else(|| Error::FeatureNotFound {
                feature_name: feature_name.to_owned(),
                product_name: product_name.map(str::to_owned),
            })
    }
}

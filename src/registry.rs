use std::collections::HashMap;
use std::sync::Arc;

use crate::toggles::Toggle;

/// Registry mapping toggle kind keys to strategy instances.
///
/// Strategies are stateless, so a single shared instance per kind serves all
/// evaluations. Registration is explicit: the orchestrator receives every
/// strategy it may need at construction, there is no runtime discovery.
#[derive(Default)]
pub struct ToggleRegistry {
    toggles: HashMap<&'static str, Arc<dyn Toggle>>,
}

impl ToggleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ToggleRegistry::default()
    }

    /// Register a strategy under its kind key. A later registration for the
    /// same kind replaces the earlier one.
    pub fn register(mut self, toggle: Arc<dyn Toggle>) -> Self {
        self.toggles.insert(toggle.kind(), toggle);
        self
    }

    /// Look up the strategy for a kind key.
    pub fn get(&self, kind: &str) -> Option<Arc<dyn Toggle>> {
        self.toggles.get(kind).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::ToggleRegistry;
    use crate::store::{FeatureStore, InMemoryFeatureStore};
    use crate::toggles::OnOffToggle;

    #[test]
    fn resolves_registered_kinds() {
        let store = Arc::new(InMemoryFeatureStore::new()) as Arc<dyn FeatureStore>;
        let registry = ToggleRegistry::new().register(Arc::new(OnOffToggle::new(store)));

        assert!(registry.get(OnOffToggle::KIND).is_some());
        assert!(registry.get("RolloutUserName").is_none());
    }
}

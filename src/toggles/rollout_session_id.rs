use std::sync::Arc;

use async_trait::async_trait;

use crate::context::SessionIdProvider;
use crate::store::FeatureStore;
use crate::toggles::{is_in_rollout, Toggle};
use crate::Result;

/// Identity used for bucketing when no session can be resolved.
const ANONYMOUS_SESSION: &str = "AnonymousSession";

/// Toggle that is active depending on the partition assigned to the current
/// session id and the configured rollout percentage (`Percentage`, 0 to 100).
///
/// Same algorithm as [`RolloutUserNameToggle`](super::RolloutUserNameToggle),
/// keyed by session: the outcome stays stable for the lifetime of a session
/// rather than a user account, which suits rollouts of anonymous-facing
/// functionality.
pub struct RolloutSessionIdToggle {
    sessions: Arc<dyn SessionIdProvider>,
    store: Arc<dyn FeatureStore>,
}

impl RolloutSessionIdToggle {
    /// Kind key for this strategy.
    pub const KIND: &'static str = "RolloutSessionId";

    /// Create the strategy from its collaborators.
    pub fn new(sessions: Arc<dyn SessionIdProvider>, store: Arc<dyn FeatureStore>) -> Self {
        RolloutSessionIdToggle { sessions, store }
    }
}

#[async_trait]
impl Toggle for RolloutSessionIdToggle {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn is_active(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool> {
        let feature = self.store.find_feature(feature_name, product_name).await?;
        let configuration = feature.toggle(Self::KIND)?;

        let session_id = self
            .sessions
            .current_session_id()
            .await?
            .unwrap_or_else(|| ANONYMOUS_SESSION.to_owned());

        is_in_rollout(configuration, &session_id)
    }
}

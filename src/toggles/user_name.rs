use std::sync::Arc;

use async_trait::async_trait;

use crate::context::UserNameProvider;
use crate::store::FeatureStore;
use crate::toggles::Toggle;
use crate::Result;

const USERS: &str = "Users";

/// Allowlist toggle: active iff the current user name appears in the
/// semicolon-separated `Users` parameter.
///
/// Comparison is ASCII case-insensitive on raw bytes, never locale-aware.
/// Anonymous evaluations are inactive.
pub struct UserNameToggle {
    user_names: Arc<dyn UserNameProvider>,
    store: Arc<dyn FeatureStore>,
}

impl UserNameToggle {
    /// Kind key for this strategy.
    pub const KIND: &'static str = "UserName";

    /// Create the strategy from its collaborators.
    pub fn new(user_names: Arc<dyn UserNameProvider>, store: Arc<dyn FeatureStore>) -> Self {
        UserNameToggle { user_names, store }
    }
}

#[async_trait]
impl Toggle for UserNameToggle {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn is_active(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool> {
        let feature = self.store.find_feature(feature_name, product_name).await?;
        let configuration = feature.toggle(Self::KIND)?;
        let users = configuration.string(USERS)?;

        let Some(user_name) = self.user_names.current_user_name().await? else {
            return Ok(false);
        };

        Ok(users
            .split(';')
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(&user_name)))
    }
}

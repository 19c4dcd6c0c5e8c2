use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RoleNameProvider;
use crate::store::FeatureStore;
use crate::toggles::Toggle;
use crate::Result;

const ROLES: &str = "Roles";

/// Role allowlist: active iff the current role appears in the
/// semicolon-separated `Roles` parameter. Same matching rules as
/// [`UserNameToggle`](super::UserNameToggle).
pub struct RoleNameToggle {
    role_names: Arc<dyn RoleNameProvider>,
    store: Arc<dyn FeatureStore>,
}

impl RoleNameToggle {
    /// Kind key for this strategy.
    pub const KIND: &'static str = "RoleName";

    /// Create the strategy from its collaborators.
    pub fn new(role_names: Arc<dyn RoleNameProvider>, store: Arc<dyn FeatureStore>) -> Self {
        RoleNameToggle { role_names, store }
    }
}

#[async_trait]
impl Toggle for RoleNameToggle {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    async fn is_active(&self, feature_name: &str, product_name: Option<&str>) -> Result<bool> {
        let feature = self.store.find_feature(feature_name, product_name).await?;
        let configuration = feature.toggle(Self::KIND)?;
        let roles = configuration.string(ROLES)?;

        let Some(role_name) = self.role_names.current_role_name().await? else {
            return Ok(false);
        };

        Ok(roles
            .split(';')
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(&role_name)))
    }
}

//! Context-provider abstractions.
//!
//! Toggles never inspect the transport directly; they receive contextual
//! signals (current user, session, request headers) through one provider
//! trait per signal. Integration layers implement these against their own
//! request pipeline; the `Static*` implementations cover wiring and tests.
//! All providers may suspend and must be side-effect free: the value they
//! resolve feeds deterministic bucketing, nothing else.
use async_trait::async_trait;

use crate::Result;

/// Supplies the current user name, or `None` when the evaluation is
/// anonymous.
#[async_trait]
pub trait UserNameProvider: Send + Sync {
    /// Resolve the current user name.
    async fn current_user_name(&self) -> Result<Option<String>>;
}

/// Supplies the current user's role name, or `None` when unresolved.
#[async_trait]
pub trait RoleNameProvider: Send + Sync {
    /// Resolve the current role name.
    async fn current_role_name(&self) -> Result<Option<String>>;
}

/// Supplies the current session id, or `None` outside a session.
#[async_trait]
pub trait SessionIdProvider: Send + Sync {
    /// Resolve the current session id.
    async fn current_session_id(&self) -> Result<Option<String>>;
}

/// Supplies request header values by name.
#[async_trait]
pub trait HeaderProvider: Send + Sync {
    /// Resolve the value of the named header, or `None` when absent.
    async fn header_value(&self, name: &str) -> Result<Option<String>>;
}

/// A [`UserNameProvider`] with a fixed answer. `None` models an anonymous
/// evaluation.
#[derive(Debug, Default)]
pub struct StaticUserNameProvider {
    user_name: Option<String>,
}

impl StaticUserNameProvider {
    /// Always resolve to `user_name`.
    pub fn new(user_name: impl Into<String>) -> Self {
        StaticUserNameProvider {
            user_name: Some(user_name.into()),
        }
    }

    /// Always resolve to `None`.
    pub fn anonymous() -> Self {
        StaticUserNameProvider::default()
    }
}

#[async_trait]
impl UserNameProvider for StaticUserNameProvider {
    async fn current_user_name(&self) -> Result<Option<String>> {
        Ok(self.user_name.clone())
    }
}

/// A [`RoleNameProvider`] with a fixed answer.
#[derive(Debug, Default)]
pub struct StaticRoleNameProvider {
    role_name: Option<String>,
}

impl StaticRoleNameProvider {
    /// Always resolve to `role_name`.
    pub fn new(role_name: impl Into<String>) -> Self {
        StaticRoleNameProvider {
            role_name: Some(role_name.into()),
        }
    }

    /// Always resolve to `None`.
    pub fn anonymous() -> Self {
        StaticRoleNameProvider::default()
    }
}

#[async_trait]
impl RoleNameProvider for StaticRoleNameProvider {
    async fn current_role_name(&self) -> Result<Option<String>> {
        Ok(self.role_name.clone())
    }
}

/// A [`SessionIdProvider`] with a fixed answer.
#[derive(Debug, Default)]
pub struct StaticSessionIdProvider {
    session_id: Option<String>,
}

impl StaticSessionIdProvider {
    /// Always resolve to `session_id`.
    pub fn new(session_id: impl Into<String>) -> Self {
        StaticSessionIdProvider {
            session_id: Some(session_id.into()),
        }
    }

    /// Always resolve to `None`.
    pub fn anonymous() -> Self {
        StaticSessionIdProvider::default()
    }
}

#[async_trait]
impl SessionIdProvider for StaticSessionIdProvider {
    async fn current_session_id(&self) -> Result<Option<String>> {
        Ok(self.session_id.clone())
    }
}

/// A [`HeaderProvider`] over a fixed set of headers.
#[derive(Debug, Default)]
pub struct StaticHeaderProvider {
    headers: Vec<(String, String)>,
}

impl StaticHeaderProvider {
    /// Create a provider with no headers.
    pub fn new() -> Self {
        StaticHeaderProvider::default()
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[async_trait]
impl HeaderProvider for StaticHeaderProvider {
    async fn header_value(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone()))
    }
}

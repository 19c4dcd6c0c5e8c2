use std::collections::HashMap;

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A named, optionally product-scoped unit of functionality gated by one or
/// more toggles.
///
/// Features are read-only views materialized per evaluation from the store;
/// the evaluation path never mutates them.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    name: String,
    #[serde(default)]
    product: Option<String>,
    #[serde(default)]
    toggles: Vec<ToggleConfiguration>,
}

impl Feature {
    /// Create a feature with no toggles configured.
    pub fn new(name: impl Into<String>, product: Option<&str>) -> Self {
        Feature {
            name: name.into(),
            product: product.map(str::to_owned),
            toggles: Vec::new(),
        }
    }

    /// Append a toggle configuration. Toggles are evaluated in insertion order.
    pub fn with_toggle(mut self, toggle: ToggleConfiguration) -> Self {
        self.toggles.push(toggle);
        self
    }

    /// Feature name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product scope, if any.
    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    /// Configured toggles, in evaluation order.
    pub fn toggles(&self) -> &[ToggleConfiguration] {
        &self.toggles
    }

    /// Find the configuration for the given toggle kind.
    ///
    /// Fails with [`Error::ToggleConfigurationNotFound`] if the feature does
    /// not declare this toggle.
    pub fn toggle(&self, kind: &str) -> Result<&ToggleConfiguration> {
        self.toggles
            .iter()
            .find(|toggle| toggle.kind == kind)
            .ok_or_else(|| Error::ToggleConfigurationNotFound {
                feature_name: self.name.clone(),
                toggle_kind: kind.to_owned(),
            })
    }
}

/// Configuration attached to one toggle strategy on a feature: the strategy's
/// kind key plus a mapping from parameter name to typed value.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ToggleConfiguration {
    kind: String,
    #[serde(default)]
    data: HashMap<String, ParameterValue>,
}

impl ToggleConfiguration {
    /// Create an empty configuration for the given toggle kind.
    pub fn new(kind: impl Into<String>) -> Self {
        ToggleConfiguration {
            kind: kind.into(),
            data: HashMap::new(),
        }
    }

    /// Set a parameter value.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    /// The strategy kind key this configuration belongs to.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Raw parameter lookup.
    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.data.get(name)
    }

    /// Read a string parameter.
    pub fn string(&self, name: &str) -> Result<&str> {
        self.required(name)?
            .as_str()
            .ok_or_else(|| invalid(name, "expected a string"))
    }

    /// Read an integer parameter.
    pub fn integer(&self, name: &str) -> Result<i64> {
        self.required(name)?
            .as_integer()
            .ok_or_else(|| invalid(name, "expected an integer"))
    }

    /// Read a boolean parameter.
    pub fn boolean(&self, name: &str) -> Result<bool> {
        self.required(name)?
            .as_boolean()
            .ok_or_else(|| invalid(name, "expected a boolean"))
    }

    /// Read a rollout percentage parameter, constrained to `[0, 100]`.
    ///
    /// Values outside the domain are a configuration error and fail with
    /// [`Error::InvalidParameter`]; they are never clamped.
    pub fn percentage(&self, name: &str) -> Result<u64> {
        let value = self.integer(name)?;
        if !(0..=100).contains(&value) {
            return Err(invalid(name, "percentage must be between 0 and 100"));
        }
        Ok(value as u64)
    }

    fn required(&self, name: &str) -> Result<&ParameterValue> {
        self.data
            .get(name)
            .ok_or_else(|| invalid(name, "parameter is missing"))
    }
}

fn invalid(parameter: &str, reason: &'static str) -> Error {
    Error::InvalidParameter {
        parameter: parameter.to_owned(),
        reason,
    }
}

/// A typed toggle parameter value.
///
/// Untagged, so configuration data reads naturally from JSON
/// (`{"Percentage": 50}`). Numbers are stored as `f64`; integer access
/// checks that the value round-trips exactly.
#[derive(Debug, Serialize, Deserialize, PartialEq, From, Clone)]
#[serde(untagged)]
pub enum ParameterValue {
    /// A string parameter.
    String(String),
    /// A numeric parameter.
    Number(f64),
    /// A boolean parameter.
    Boolean(bool),
}

impl ParameterValue {
    /// Value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Value as an exact integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        let f = self.as_number()?;
        let i = f as i64;
        if i as f64 == f {
            Some(i)
        } else {
            None
        }
    }

    /// Value as a number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Value as a boolean, if it is one.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

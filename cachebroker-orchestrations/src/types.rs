//! User-supplied parameters accepted by provision and update

use cachebroker_models::{ClusterSpec, Parameters};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Cluster overrides
// ============================================================================

/// Settings a user may layer on top of the plan.
///
/// Only the fields that are present are applied; the plan decides the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterOverrides {
    /// Weekly maintenance window, e.g. "sun:05:00-sun:06:00"
    #[serde(default)]
    pub preferred_maintenance_window: Option<String>,
    /// Daily snapshot window, e.g. "03:00-04:00"
    #[serde(default)]
    pub snapshot_window: Option<String>,
    /// Days to keep automatic snapshots
    #[serde(default)]
    pub snapshot_retention_limit: Option<i64>,
    #[serde(default)]
    pub auto_minor_version_upgrade: Option<bool>,
}

impl ClusterOverrides {
    pub fn apply_to(&self, spec: &mut ClusterSpec) {
        if let Some(window) = &self.preferred_maintenance_window {
            spec.preferred_maintenance_window = Some(window.clone());
        }
        if let Some(window) = &self.snapshot_window {
            spec.snapshot_window = Some(window.clone());
        }
        if let Some(limit) = self.snapshot_retention_limit {
            spec.snapshot_retention_limit = Some(limit);
        }
        if let Some(upgrade) = self.auto_minor_version_upgrade {
            spec.auto_minor_version_upgrade = Some(upgrade);
        }
    }
}

// ============================================================================
// Provision
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvisionParameters {
    #[serde(flatten)]
    pub overrides: ClusterOverrides,
}

// ============================================================================
// Update
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateParameters {
    /// Apply the change now instead of in the next maintenance window
    #[serde(default)]
    pub apply_immediately: bool,
    #[serde(flatten)]
    pub overrides: ClusterOverrides,
}

/// Decode a free-form parameter map; keys the type does not know are ignored
pub(crate) fn decode_parameters<T>(parameters: Option<&Parameters>) -> Result<T, serde_json::Error>
where
    T: for<'de> Deserialize<'de> + Default,
{
    match parameters {
        Some(map) => serde_json::from_value(Value::Object(map.clone())),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_missing_parameters_decode_to_defaults() {
        let decoded: UpdateParameters = decode_parameters(None).unwrap();
        assert!(!decoded.apply_immediately);
        assert_eq!(decoded.overrides, ClusterOverrides::default());
    }

    #[test]
    fn test_update_parameters_decode_flattened_overrides() {
        let map = params(json!({
            "apply_immediately": true,
            "snapshot_retention_limit": 7,
            "unrelated": "ignored"
        }));

        let decoded: UpdateParameters = decode_parameters(Some(&map)).unwrap();
        assert!(decoded.apply_immediately);
        assert_eq!(decoded.overrides.snapshot_retention_limit, Some(7));
    }

    #[test]
    fn test_wrong_type_is_a_decode_error() {
        let map = params(json!({ "snapshot_retention_limit": "a week" }));
        let decoded: Result<ProvisionParameters, _> = decode_parameters(Some(&map));
        assert!(decoded.is_err());
    }

    #[test]
    fn test_overrides_only_touch_present_fields() {
        let mut spec = ClusterSpec {
            engine: "redis".to_string(),
            snapshot_window: Some("01:00-02:00".to_string()),
            ..Default::default()
        };
        let overrides = ClusterOverrides {
            auto_minor_version_upgrade: Some(false),
            ..Default::default()
        };

        overrides.apply_to(&mut spec);

        assert_eq!(spec.auto_minor_version_upgrade, Some(false));
        assert_eq!(spec.snapshot_window.as_deref(), Some("01:00-02:00"));
        assert!(spec.preferred_maintenance_window.is_none());
    }
}

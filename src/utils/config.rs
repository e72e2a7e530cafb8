//! Host plugin settings
//!
//! The note-taking host persists a plain JSON record for the plugin. This
//! module gives that record a typed shape, fills gaps with defaults, and
//! migrates records written by other plugin versions. Reading and writing
//! the record is left to the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error::{ConfigError, ConfigResult};

/// Where rendered graphs are cached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CacheLocation {
    #[default]
    Memory,
    Filesystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub location: CacheLocation,
    /// Vault directory for filesystem caching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            enabled: true,
            location: CacheLocation::Memory,
            directory: None,
        }
    }
}

/// Persisted plugin settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Plugin version that wrote the record
    pub version: String,
    /// Render graphs through the static image renderer
    pub renderer: bool,
    pub cache: CacheSettings,
}

impl PluginSettings {
    /// Defaults stamped with `version`
    pub fn with_version(version: impl Into<String>) -> Self {
        PluginSettings {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Decode a stored record, filling missing fields with defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Bring a stored record up to `current_version`
    ///
    /// A record written by the current version is decoded as-is. Anything
    /// else keeps the fields that still decode and takes defaults for the
    /// rest; records that are not objects are replaced by defaults.
    pub fn migrate(raw: &Value, current_version: &str) -> PluginSettings {
        let Some(record) = raw.as_object() else {
            tracing::info!("no usable stored settings, using defaults");
            return PluginSettings::with_version(current_version);
        };

        let stored_version = record.get("version").and_then(Value::as_str);
        if stored_version == Some(current_version) {
            if let Ok(settings) = serde_json::from_value::<PluginSettings>(raw.clone()) {
                return settings;
            }
        }

        tracing::info!(
            from = stored_version.unwrap_or("unknown"),
            to = current_version,
            "migrating plugin settings"
        );

        let mut settings = PluginSettings::with_version(current_version);
        if let Some(renderer) = record.get("renderer").and_then(Value::as_bool) {
            settings.renderer = renderer;
        }
        if let Some(cache) = record
            .get("cache")
            .and_then(|c| serde_json::from_value::<CacheSettings>(c.clone()).ok())
        {
            settings.cache = cache;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = PluginSettings::with_version("1.0.0");
        assert!(!settings.renderer);
        assert!(settings.cache.enabled);
        assert_eq!(settings.cache.location, CacheLocation::Memory);
    }

    #[test]
    fn test_from_json_fills_gaps() {
        let settings = PluginSettings::from_json(r#"{"version":"1.0.0","renderer":true}"#).unwrap();
        assert!(settings.renderer);
        assert_eq!(settings.cache, CacheSettings::default());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(matches!(
            PluginSettings::from_json("[1, 2]"),
            Err(ConfigError::NotAnObject)
        ));
        assert!(matches!(
            PluginSettings::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = PluginSettings::with_version("2.0.0");
        settings.cache.location = CacheLocation::Filesystem;
        settings.cache.directory = Some("graphs".to_string());
        let json = settings.to_json().unwrap();
        assert_eq!(PluginSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_migrate_same_version() {
        let raw = json!({
            "version": "1.0.0",
            "renderer": true,
            "cache": { "enabled": false, "location": "Filesystem", "directory": "cache" }
        });
        let settings = PluginSettings::migrate(&raw, "1.0.0");
        assert!(settings.renderer);
        assert!(!settings.cache.enabled);
        assert_eq!(settings.cache.directory.as_deref(), Some("cache"));
    }

    #[test]
    fn test_migrate_old_version_keeps_known_fields() {
        let raw = json!({ "version": "0.5.0", "renderer": true, "legacy": 3 });
        let settings = PluginSettings::migrate(&raw, "1.0.0");
        assert_eq!(settings.version, "1.0.0");
        assert!(settings.renderer);
        assert_eq!(settings.cache, CacheSettings::default());
    }

    #[test]
    fn test_migrate_garbage() {
        assert_eq!(
            PluginSettings::migrate(&json!(null), "1.0.0"),
            PluginSettings::with_version("1.0.0")
        );
        let settings = PluginSettings::migrate(&json!({ "cache": "yes" }), "1.0.0");
        assert_eq!(settings.cache, CacheSettings::default());
    }
}

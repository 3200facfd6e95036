//! Registry metadata for one package, as served by npm
//!
//! Only the parts the publisher looks at are kept: dist-tags, the `time`
//! history and per-version deprecation state.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Keys in `time` that are not versions
pub const TIME_SENTINEL_KEYS: [&str; 2] = ["modified", "created"];

/// Returns true if a `time` key is metadata rather than a version
pub fn is_time_sentinel(key: &str) -> bool {
    TIME_SENTINEL_KEYS.contains(&key)
}

/// Registry info for a single package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpmInfo {
    /// Tag name to version, e.g. `latest`
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: IndexMap<String, String>,
    /// Version (or sentinel key) to ISO timestamp, in registry order
    #[serde(default, deserialize_with = "deserialize_time")]
    pub time: IndexMap<String, String>,
    /// Published versions
    #[serde(default)]
    pub versions: IndexMap<String, NpmVersionInfo>,
}

/// Per-version registry metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpmVersionInfo {
    #[serde(default, deserialize_with = "deserialize_deprecated")]
    pub deprecated: bool,
}

impl NpmInfo {
    /// Version the given dist-tag points at
    pub fn dist_tag(&self, tag: &str) -> Option<&str> {
        self.dist_tags.get(tag).map(String::as_str)
    }

    pub fn version(&self, version: &str) -> Option<&NpmVersionInfo> {
        self.versions.get(version)
    }
}

// npm reports deprecation as a message string; an empty message means none.
fn deserialize_deprecated<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(message) => !message.is_empty(),
        serde_json::Value::Bool(flag) => flag,
        _ => false,
    })
}

// Unpublished packages carry an object under `time.unpublished`; only string
// timestamps are kept.
fn deserialize_time<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(timestamp) => Some((key, timestamp)),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY_JSON: &str = r#"{
        "name": "@types/angular",
        "dist-tags": {"latest": "1.8.1", "ts4.0": "1.8.0"},
        "time": {
            "modified": "2023-03-01T00:00:00.000Z",
            "created": "2016-01-01T00:00:00.000Z",
            "1.8.0": "2022-01-01T00:00:00.000Z",
            "1.8.1": "2023-03-01T00:00:00.000Z"
        },
        "versions": {
            "1.8.0": {"name": "@types/angular", "version": "1.8.0"},
            "1.8.1": {"name": "@types/angular", "version": "1.8.1", "deprecated": "angular provides its own types"}
        }
    }"#;

    #[test]
    fn test_parse_registry_response() {
        let info: NpmInfo = serde_json::from_str(REGISTRY_JSON).unwrap();

        assert_eq!(info.dist_tag("latest"), Some("1.8.1"));
        assert_eq!(info.dist_tag("next"), None);
        assert!(!info.version("1.8.0").unwrap().deprecated);
        assert!(info.version("1.8.1").unwrap().deprecated);
    }

    #[test]
    fn test_time_preserves_registry_order() {
        let info: NpmInfo = serde_json::from_str(REGISTRY_JSON).unwrap();
        let keys: Vec<&str> = info.time.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["modified", "created", "1.8.0", "1.8.1"]);
    }

    #[test]
    fn test_empty_deprecation_message_is_not_deprecated() {
        let info: NpmInfo =
            serde_json::from_str(r#"{"versions": {"1.0.0": {"deprecated": ""}}}"#).unwrap();
        assert!(!info.version("1.0.0").unwrap().deprecated);
    }

    #[test]
    fn test_unpublished_time_entry_is_dropped() {
        let info: NpmInfo = serde_json::from_str(
            r#"{"time": {"created": "2020-01-01T00:00:00Z", "unpublished": {"time": "2021-01-01T00:00:00Z", "versions": ["1.0.0"]}}}"#,
        )
        .unwrap();
        assert_eq!(info.time.len(), 1);
        assert!(info.time.contains_key("created"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let info: NpmInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info, NpmInfo::default());
    }

    #[test]
    fn test_cache_round_trip_keeps_deprecated_flag() {
        let info: NpmInfo = serde_json::from_str(REGISTRY_JSON).unwrap();
        let json = serde_json::to_string(&info).unwrap();
        let restored: NpmInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, info);
    }

    #[test]
    fn test_is_time_sentinel() {
        assert!(is_time_sentinel("modified"));
        assert!(is_time_sentinel("created"));
        assert!(!is_time_sentinel("1.0.0"));
        assert!(!is_time_sentinel("unpublished"));
    }
}

//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of a publish plan
//! - Summary counts alongside the per-package entries

use crate::domain::{DeprecationDecision, PublishPlan};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbose output includes already-deprecated packages
    verbosity: Verbosity,
}

impl JsonFormatter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput {
    summary: JsonSummary,
    typings: Vec<JsonTyping>,
    not_needed: Vec<JsonDeprecation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    publishes: usize,
    typings: usize,
    deprecations: usize,
    retries: usize,
    already_deprecated: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonTyping {
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_version: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDeprecation {
    name: String,
    /// `deprecate`, `retry` or `already_deprecated`
    action: &'static str,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_version: Option<String>,
}

impl JsonFormatter {
    fn deprecation_to_json(decision: &DeprecationDecision) -> JsonDeprecation {
        let package = decision.package();
        let (action, failed_version) = match decision {
            DeprecationDecision::AlreadyDeprecated { .. } => ("already_deprecated", None),
            DeprecationDecision::Deprecate { .. } => ("deprecate", None),
            DeprecationDecision::Retry { failed_version, .. } => {
                ("retry", Some(failed_version.to_string()))
            }
        };

        JsonDeprecation {
            name: package.full_npm_name(),
            action,
            version: package.version.to_string(),
            failed_version,
        }
    }

    fn to_output(&self, plan: &PublishPlan) -> JsonOutput {
        JsonOutput {
            summary: JsonSummary {
                publishes: plan.publish_count(),
                typings: plan.typings.len(),
                deprecations: plan.deprecation_count(),
                retries: plan.retry_count(),
                already_deprecated: plan.already_deprecated_count(),
            },
            typings: plan
                .typings
                .iter()
                .map(|t| JsonTyping {
                    name: t.data.full_npm_name(),
                    version: t.version.to_string(),
                    latest_version: t.latest_version.map(|v| v.to_string()),
                })
                .collect(),
            not_needed: plan
                .not_needed
                .iter()
                .filter(|d| self.verbosity == Verbosity::Verbose || d.needs_publish())
                .map(Self::deprecation_to_json)
                .collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, plan: &PublishPlan, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.to_output(plan))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NotNeededPackage, Semver};
    use serde_json::Value;

    fn sample_plan() -> PublishPlan {
        let pkg = |name: &str, v: Semver| NotNeededPackage::new(name, v, name, "");
        let mut plan = PublishPlan::new();
        plan.add_decision(DeprecationDecision::Retry {
            package: pkg("left-pad", Semver::new(1, 3, 1)),
            failed_version: Semver::new(1, 3, 0),
        });
        plan.add_decision(DeprecationDecision::AlreadyDeprecated {
            package: pkg("angular", Semver::new(1, 8, 0)),
        });
        plan
    }

    fn render(verbosity: Verbosity) -> Value {
        let mut out = Vec::new();
        JsonFormatter::new(verbosity)
            .format(&sample_plan(), &mut out)
            .unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_json_summary() {
        let json = render(Verbosity::Normal);
        assert_eq!(json["summary"]["publishes"], 1);
        assert_eq!(json["summary"]["retries"], 1);
        assert_eq!(json["summary"]["alreadyDeprecated"], 1);
    }

    #[test]
    fn test_json_retry_entry() {
        let json = render(Verbosity::Normal);
        let entries = json["notNeeded"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["name"], "@types/left-pad");
        assert_eq!(entries[0]["action"], "retry");
        assert_eq!(entries[0]["version"], "1.3.1");
        assert_eq!(entries[0]["failedVersion"], "1.3.0");
    }

    #[test]
    fn test_json_verbose_includes_already_deprecated() {
        let json = render(Verbosity::Verbose);
        let entries = json["notNeeded"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["action"], "already_deprecated");
        assert!(entries[1].get("failedVersion").is_none());
    }
}

//! Publish plan produced for one versions diff

use super::{ChangedTyping, NotNeededPackage, Semver};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do with one not-needed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeprecationDecision {
    /// The registry already marks the latest version deprecated
    AlreadyDeprecated {
        /// The package as listed in the diff
        package: NotNeededPackage,
    },
    /// Publish the deprecation at the requested version
    Deprecate {
        /// The package to publish
        package: NotNeededPackage,
    },
    /// An earlier attempt failed, publish at a bumped version instead
    Retry {
        /// The replacement package carrying the bumped version
        package: NotNeededPackage,
        /// Version that failed to deprecate
        failed_version: Semver,
    },
}

impl DeprecationDecision {
    pub fn package(&self) -> &NotNeededPackage {
        match self {
            DeprecationDecision::AlreadyDeprecated { package }
            | DeprecationDecision::Deprecate { package }
            | DeprecationDecision::Retry { package, .. } => package,
        }
    }

    /// Returns true if something still has to be published
    pub fn needs_publish(&self) -> bool {
        !matches!(self, DeprecationDecision::AlreadyDeprecated { .. })
    }

    pub fn is_retry(&self) -> bool {
        matches!(self, DeprecationDecision::Retry { .. })
    }
}

impl fmt::Display for DeprecationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeprecationDecision::AlreadyDeprecated { package } => {
                write!(f, "{} already deprecated", package.full_npm_name())
            }
            DeprecationDecision::Deprecate { package } => {
                write!(f, "deprecate {}", package.desc())
            }
            DeprecationDecision::Retry {
                package,
                failed_version,
            } => write!(
                f,
                "deprecate {} (retry after {} failed)",
                package.desc(),
                failed_version
            ),
        }
    }
}

/// Full plan for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishPlan {
    /// Typings packages to publish, in diff order
    pub typings: Vec<ChangedTyping>,
    /// One decision per not-needed package, in diff order
    pub not_needed: Vec<DeprecationDecision>,
}

impl PublishPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_decision(&mut self, decision: DeprecationDecision) {
        self.not_needed.push(decision);
    }

    /// Number of deprecations that still need publishing
    pub fn deprecation_count(&self) -> usize {
        self.not_needed.iter().filter(|d| d.needs_publish()).count()
    }

    pub fn retry_count(&self) -> usize {
        self.not_needed.iter().filter(|d| d.is_retry()).count()
    }

    pub fn already_deprecated_count(&self) -> usize {
        self.not_needed.len() - self.deprecation_count()
    }

    /// Total number of publishes the plan calls for
    pub fn publish_count(&self) -> usize {
        self.typings.len() + self.deprecation_count()
    }

    pub fn is_empty(&self) -> bool {
        self.publish_count() == 0
    }
}

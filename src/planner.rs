//! Publish planning for one versions diff
//!
//! This module provides:
//! - Workflow coordination: check deprecation state → resolve conflicts → plan
//! - Fail-fast error handling (any lookup or registry failure aborts the plan)
//! - Access to the registry cache so callers can persist it afterwards

use crate::domain::{ChangedPackages, DeprecationDecision, NotNeededPackage, PublishPlan};
use crate::error::AppError;
use crate::progress::Progress;
use crate::registry::CachedNpmInfoClient;
use crate::resolver::{check_publish_conflict, is_already_deprecated, Logger};
use tracing::info;

/// Builds a [`PublishPlan`] from changed packages and registry state
pub struct Planner {
    client: CachedNpmInfoClient,
    show_progress: bool,
}

impl Planner {
    pub fn new(client: CachedNpmInfoClient) -> Self {
        Self {
            client,
            show_progress: false,
        }
    }

    /// Show a progress bar while packages are checked
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn client(&self) -> &CachedNpmInfoClient {
        &self.client
    }

    pub fn into_client(self) -> CachedNpmInfoClient {
        self.client
    }

    /// Plan every publish listed in `changed`
    pub async fn plan(
        &mut self,
        changed: &ChangedPackages,
        log: &mut dyn Logger,
    ) -> Result<PublishPlan, AppError> {
        let mut plan = PublishPlan::new();
        plan.typings = changed.changed_typings.clone();

        let mut progress = Progress::new(self.show_progress);
        progress.start(
            changed.changed_not_needed_packages.len() as u64,
            "Checking deprecations",
        );

        for pkg in &changed.changed_not_needed_packages {
            progress.set_message(&pkg.full_npm_name());
            let decision = match self.decide(pkg, log).await {
                Ok(decision) => decision,
                Err(e) => {
                    progress.finish_and_clear();
                    return Err(e);
                }
            };
            info!("{}", decision);
            plan.add_decision(decision);
            progress.inc();
        }
        progress.finish_and_clear();

        Ok(plan)
    }

    /// Decide what to publish for a single not-needed package
    pub async fn decide(
        &mut self,
        pkg: &NotNeededPackage,
        log: &mut dyn Logger,
    ) -> Result<DeprecationDecision, AppError> {
        if is_already_deprecated(pkg, &mut self.client, log).await? {
            return Ok(DeprecationDecision::AlreadyDeprecated {
                package: pkg.clone(),
            });
        }

        Ok(match check_publish_conflict(pkg, &self.client, log)? {
            Some(replacement) => DeprecationDecision::Retry {
                package: replacement,
                failed_version: pkg.version,
            },
            None => DeprecationDecision::Deprecate {
                package: pkg.clone(),
            },
        })
    }
}

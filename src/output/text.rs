//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Typings publishes with their target version
//! - Deprecations, marking the ones retried at a bumped version
//! - Already-deprecated packages (verbose only)
//! - A one-line summary

use crate::domain::{ChangedTyping, DeprecationDecision, PublishPlan};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    color: bool,
}

impl TextFormatter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_color(verbosity, true)
    }

    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn heading(&self, title: &str, count: usize, writer: &mut dyn Write) -> std::io::Result<()> {
        let text = format!("{} ({}):", title, count);
        if self.color {
            writeln!(writer, "{}", text.bold())
        } else {
            writeln!(writer, "{}", text)
        }
    }

    fn format_typing(
        &self,
        typing: &ChangedTyping,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = format!("{:width$}", typing.data.full_npm_name(), width = width);
        let latest = typing
            .latest_version
            .map(|v| format!(" [latest: {}]", v))
            .unwrap_or_default();

        if self.color {
            writeln!(
                writer,
                "  {} {}{}",
                name,
                typing.version.to_string().bright_white().bold(),
                latest.dimmed()
            )
        } else {
            writeln!(writer, "  {} {}{}", name, typing.version, latest)
        }
    }

    fn format_deprecation(
        &self,
        decision: &DeprecationDecision,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let package = decision.package();
        let name = format!("{:width$}", package.full_npm_name(), width = width);

        match (decision, self.color) {
            (
                DeprecationDecision::Retry {
                    failed_version, ..
                },
                true,
            ) => writeln!(
                writer,
                "  {} {} {} {} {}",
                name,
                failed_version.to_string().dimmed(),
                "→".dimmed(),
                package.version.to_string().bright_white().bold(),
                "(retry)".yellow()
            ),
            (
                DeprecationDecision::Retry {
                    failed_version, ..
                },
                false,
            ) => writeln!(
                writer,
                "  {} {} -> {} (retry)",
                name, failed_version, package.version
            ),
            (_, true) => writeln!(
                writer,
                "  {} {}",
                name,
                package.version.to_string().bright_white().bold()
            ),
            (_, false) => writeln!(writer, "  {} {}", name, package.version),
        }
    }

    fn format_summary(&self, plan: &PublishPlan, writer: &mut dyn Write) -> std::io::Result<()> {
        if plan.is_empty() {
            let text = "Nothing to publish.";
            return if self.color {
                writeln!(writer, "{}", text.green())
            } else {
                writeln!(writer, "{}", text)
            };
        }

        let mut text = format!(
            "{} {} ({} typings, {} deprecations",
            plan.publish_count(),
            if plan.publish_count() == 1 {
                "publish"
            } else {
                "publishes"
            },
            plan.typings.len(),
            plan.deprecation_count()
        );
        if plan.retry_count() > 0 {
            text.push_str(&format!(", {} retried", plan.retry_count()));
        }
        text.push(')');

        if self.color {
            writeln!(writer, "{} {}", "Summary:".bold(), text)
        } else {
            writeln!(writer, "Summary: {}", text)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, plan: &PublishPlan, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet {
            let to_deprecate: Vec<_> = plan
                .not_needed
                .iter()
                .filter(|d| d.needs_publish())
                .collect();
            let already: Vec<_> = plan
                .not_needed
                .iter()
                .filter(|d| !d.needs_publish())
                .collect();

            let width = plan
                .typings
                .iter()
                .map(|t| t.data.full_npm_name().len())
                .chain(plan.not_needed.iter().map(|d| d.package().full_npm_name().len()))
                .max()
                .unwrap_or(0);

            if !plan.typings.is_empty() {
                self.heading("Typings to publish", plan.typings.len(), writer)?;
                for typing in &plan.typings {
                    self.format_typing(typing, width, writer)?;
                }
            }

            if !to_deprecate.is_empty() {
                self.heading("Deprecations", to_deprecate.len(), writer)?;
                for decision in to_deprecate {
                    self.format_deprecation(decision, width, writer)?;
                }
            }

            if self.verbosity == Verbosity::Verbose && !already.is_empty() {
                self.heading("Already deprecated", already.len(), writer)?;
                for decision in already {
                    let name = decision.package().full_npm_name();
                    if self.color {
                        writeln!(writer, "  {}", name.dimmed())?;
                    } else {
                        writeln!(writer, "  {}", name)?;
                    }
                }
            }
        }

        self.format_summary(plan, writer)
    }
}

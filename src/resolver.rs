//! Deprecation conflict resolution
//!
//! Deprecating a not-needed package means publishing one final version of
//! it and marking that version deprecated. npm can fail half way: the version
//! lands but the deprecation does not, or the `latest` tag ends up somewhere
//! unexpected. Given the registry's observed state, [`resolve_publish_conflict`]
//! decides whether the deprecation must be retried at a higher version.

use crate::domain::{NotNeededPackage, Semver};
use crate::error::{AppError, LookupError, ScanError};
use crate::registry::{
    is_time_sentinel, CachedNpmInfoClient, NpmInfo, NpmVersionInfo, RegistryInfoCache,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Line sink for progress messages meant for the operator
pub trait Logger {
    fn log(&mut self, line: &str);
}

impl<F: FnMut(&str)> Logger for F {
    fn log(&mut self, line: &str) {
        self(line)
    }
}

/// Logger that forwards every line to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&mut self, line: &str) {
        info!("{}", line);
    }
}

/// Pick the most recently published version from a registry `time` map.
///
/// `modified` and `created` are never returned. A sentinel holding the
/// running best is displaced by whatever entry comes next, and a sentinel
/// candidate never displaces a version.
pub fn find_actual_latest<'a>(
    package: &str,
    time: &'a IndexMap<String, String>,
) -> Result<&'a str, ScanError> {
    let no_version = || ScanError::NoEligibleVersion {
        package: package.to_string(),
    };

    let mut entries = time.iter();
    let first = entries.next().ok_or_else(no_version)?;
    let (best, _) = entries.fold(first, |best, candidate| {
        if is_later_entry(candidate, best) {
            candidate
        } else {
            best
        }
    });

    if is_time_sentinel(best) {
        return Err(no_version());
    }
    Ok(best.as_str())
}

fn is_later_entry(
    (key, timestamp): (&String, &String),
    (best_key, best_timestamp): (&String, &String),
) -> bool {
    if is_time_sentinel(best_key) {
        return true;
    }
    if is_time_sentinel(key) {
        return false;
    }
    match (parse_timestamp(timestamp), parse_timestamp(best_timestamp)) {
        (Some(candidate), Some(best)) => candidate > best,
        _ => false,
    }
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    timestamp.parse::<DateTime<Utc>>().ok()
}

/// Decide whether the deprecation of `pkg` has to be retried.
///
/// Returns the replacement package when it does, `None` when `pkg` can be
/// published as is. The cache must already hold fresh info for the package.
pub fn check_publish_conflict(
    pkg: &NotNeededPackage,
    cache: &dyn RegistryInfoCache,
    log: &mut dyn Logger,
) -> Result<Option<NotNeededPackage>, AppError> {
    let escaped_name = pkg.full_escaped_npm_name();
    let info = cache
        .get_info_from_cache(&escaped_name)
        .ok_or_else(|| LookupError::RegistryInfoNotCached {
            escaped_name: escaped_name.clone(),
        })?;

    let not_needed = pkg.version;
    let latest = Semver::parse(find_actual_latest(&pkg.full_npm_name(), &info.time)?, false)?;
    let published_but_not_deprecated = info
        .version(&not_needed.version_string())
        .is_some_and(|version| !version.deprecated);

    debug!(
        "{}: requested {}, actual latest {}, published but not deprecated: {}",
        pkg.full_npm_name(),
        not_needed,
        latest,
        published_but_not_deprecated
    );

    if latest.equals(&not_needed)
        || latest.greater_than(&not_needed)
        || published_but_not_deprecated
    {
        let plus_one = latest
            .next_patch()
            .ok_or_else(|| ScanError::PatchOverflow {
                package: pkg.full_npm_name(),
                version: latest.version_string(),
            })?;
        log.log(&format!(
            "Deprecation of {} failed, instead using {}.",
            not_needed.version_string(),
            plus_one.version_string()
        ));
        return Ok(Some(pkg.with_version(plus_one)));
    }

    Ok(None)
}

/// Version to deprecate `pkg` at: either `pkg` itself or a replacement one
/// patch above the registry's actual latest version.
pub fn resolve_publish_conflict(
    pkg: &NotNeededPackage,
    cache: &dyn RegistryInfoCache,
    log: &mut dyn Logger,
) -> Result<NotNeededPackage, AppError> {
    Ok(check_publish_conflict(pkg, cache, log)?.unwrap_or_else(|| pkg.clone()))
}

/// Whether the registry already marks the `latest` version of `pkg` deprecated.
///
/// Cached info is trusted when it already says "deprecated" or when the
/// client is offline; otherwise the info is fetched again, which also
/// refreshes the cache for [`resolve_publish_conflict`].
pub async fn is_already_deprecated(
    pkg: &NotNeededPackage,
    client: &mut CachedNpmInfoClient,
    log: &mut dyn Logger,
) -> Result<bool, AppError> {
    let escaped_name = pkg.full_escaped_npm_name();

    if let Some(info) = client.get_info_from_cache(&escaped_name) {
        let version_info = latest_version_info(&escaped_name, info)?;
        if version_info.deprecated || client.is_offline() {
            return Ok(version_info.deprecated);
        }
    }

    log.log(&format!(
        "Version info not cached for deprecated package {}",
        pkg.desc()
    ));

    let info = client
        .fetch_and_cache(&escaped_name)
        .await?
        .ok_or_else(|| LookupError::PackageNotInRegistry {
            escaped_name: escaped_name.clone(),
        })?;
    let version_info = latest_version_info(&escaped_name, info)?;
    Ok(version_info.deprecated)
}

fn latest_version_info<'a>(
    escaped_name: &str,
    info: &'a NpmInfo,
) -> Result<&'a NpmVersionInfo, LookupError> {
    let latest = info
        .dist_tag("latest")
        .ok_or_else(|| LookupError::MissingDistTag {
            escaped_name: escaped_name.to_string(),
            tag: "latest".to_string(),
        })?;
    info.version(latest)
        .ok_or_else(|| LookupError::MissingVersionInfo {
            escaped_name: escaped_name.to_string(),
            version: latest.to_string(),
        })
}

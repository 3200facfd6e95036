//! Loading the versions diff (`versions.json`)
//!
//! The diff lists ids only. Every id is resolved through [`AllPackages`]; an
//! id that does not resolve aborts the whole load.

use crate::domain::{ChangedPackages, ChangedTyping, PackageId, Semver};
use crate::error::{AppError, DataError};
use crate::packages::AllPackages;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Default file name of the versions diff
pub const VERSIONS_FILE_NAME: &str = "versions.json";

/// On-disk layout of the versions diff
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedPackagesJson {
    #[serde(default)]
    pub changed_typings: Vec<ChangedTypingJson>,
    #[serde(default)]
    pub changed_not_needed_packages: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedTypingJson {
    pub id: PackageId,
    pub version: Semver,
    #[serde(default)]
    pub latest_version: Option<Semver>,
}

/// Read the diff file at `path` and resolve every id it lists
pub async fn read_changed_packages(
    path: &Path,
    all_packages: &dyn AllPackages,
) -> Result<ChangedPackages, AppError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DataError::read_error(path, e))?;
    let json: ChangedPackagesJson =
        serde_json::from_str(&content).map_err(|e| DataError::json_error(path, e.to_string()))?;

    let changed = resolve_changed_packages(json, all_packages)?;
    debug!(
        "Read {}: {} typings, {} not-needed",
        path.display(),
        changed.changed_typings.len(),
        changed.changed_not_needed_packages.len()
    );
    Ok(changed)
}

/// Resolve the ids of an already-parsed diff
pub fn resolve_changed_packages(
    json: ChangedPackagesJson,
    all_packages: &dyn AllPackages,
) -> Result<ChangedPackages, AppError> {
    let changed_typings = json
        .changed_typings
        .into_iter()
        .map(|entry| -> Result<ChangedTyping, AppError> {
            let data = all_packages.get_typings_data(&entry.id)?;
            Ok(ChangedTyping::new(
                data.clone(),
                entry.version,
                entry.latest_version,
            ))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let changed_not_needed_packages = json
        .changed_not_needed_packages
        .iter()
        .map(|name| -> Result<_, AppError> {
            Ok(all_packages.get_not_needed_package(name)?.clone())
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(ChangedPackages::new(
        changed_typings,
        changed_not_needed_packages,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NotNeededPackage, TypingsData};
    use crate::error::LookupError;
    use crate::packages::PackageIndex;

    fn index() -> PackageIndex {
        PackageIndex::new(
            vec![TypingsData {
                name: "react".to_string(),
                library_name: "React".to_string(),
                major: 18,
                minor: 2,
                project_name: None,
            }],
            vec![NotNeededPackage::new(
                "moment",
                Semver::new(2, 14, 0),
                "moment",
                "https://github.com/moment/moment",
            )],
        )
    }

    fn parse(json: &str) -> ChangedPackagesJson {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_resolve_changed_packages() {
        let json = parse(
            r#"{
                "changedTypings": [
                    {"id": {"name": "react", "version": {"major": 18, "minor": 2}}, "version": "18.2.7", "latestVersion": "19.0.1"}
                ],
                "changedNotNeededPackages": ["moment"]
            }"#,
        );

        let changed = resolve_changed_packages(json, &index()).unwrap();

        assert_eq!(changed.changed_typings.len(), 1);
        let typing = &changed.changed_typings[0];
        assert_eq!(typing.data.library_name, "React");
        assert_eq!(typing.version, Semver::new(18, 2, 7));
        assert_eq!(typing.latest_version, Some(Semver::new(19, 0, 1)));

        assert_eq!(changed.changed_not_needed_packages.len(), 1);
        assert_eq!(changed.changed_not_needed_packages[0].name, "moment");
    }

    #[test]
    fn test_latest_version_is_optional() {
        let json = parse(
            r#"{"changedTypings": [{"id": {"name": "react", "version": {"major": 18, "minor": 2}}, "version": "18.2.7"}], "changedNotNeededPackages": []}"#,
        );
        let changed = resolve_changed_packages(json, &index()).unwrap();
        assert_eq!(changed.changed_typings[0].latest_version, None);
    }

    #[test]
    fn test_unknown_typings_id_fails_fast() {
        let json = parse(
            r#"{"changedTypings": [{"id": {"name": "react", "version": {"major": 17, "minor": 0}}, "version": "17.0.3"}], "changedNotNeededPackages": ["moment"]}"#,
        );
        let err = resolve_changed_packages(json, &index()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Lookup(LookupError::TypingsNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_not_needed_name_fails_fast() {
        let json = parse(
            r#"{"changedTypings": [], "changedNotNeededPackages": ["moment", "left-pad"]}"#,
        );
        let err = resolve_changed_packages(json, &index()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Lookup(LookupError::NotNeededNotFound { ref name }) if name == "left-pad"
        ));
    }

    #[test]
    fn test_rejects_partial_version() {
        let result = serde_json::from_str::<ChangedPackagesJson>(
            r#"{"changedTypings": [{"id": {"name": "react", "version": {"major": 18, "minor": 2}}, "version": "18.2"}]}"#,
        );
        assert!(result.is_err());
    }
}

//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SemverError: Malformed version text
//! - LookupError: An expected package or cache entry is missing
//! - ScanError: Registry history has no usable version
//! - RegistryError: Issues with npm registry communication
//! - DataError: Reading or writing input/cache files

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version parsing errors
    #[error(transparent)]
    Semver(#[from] SemverError),

    /// Missing package or cache entry
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Latest-version scan failures
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// File related errors
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Errors raised while parsing version strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemverError {
    /// Text is not a valid version
    #[error("unexpected semver: '{text}' (coerce: {coerce})")]
    Parse { text: String, coerce: bool },
}

/// A package id or cache entry that must exist does not
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Typings package id not present in the package index
    #[error("no typings package '{name}' at version {major}.{minor}")]
    TypingsNotFound { name: String, major: u64, minor: u64 },

    /// Not-needed package name not present in the package index
    #[error("no not-needed package named '{name}'")]
    NotNeededNotFound { name: String },

    /// Registry info was expected in the cache but is absent
    #[error("registry info for '{escaped_name}' is not cached")]
    RegistryInfoNotCached { escaped_name: String },

    /// Registry has never seen the package
    #[error("package '{escaped_name}' does not exist in the registry")]
    PackageNotInRegistry { escaped_name: String },

    /// Registry info carries no dist-tag of this name
    #[error("package '{escaped_name}' has no '{tag}' dist-tag")]
    MissingDistTag { escaped_name: String, tag: String },

    /// A version listed by a dist-tag has no version entry
    #[error("package '{escaped_name}' has no version entry for {version}")]
    MissingVersionInfo {
        escaped_name: String,
        version: String,
    },
}

/// Errors raised while scanning registry timing data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Only sentinel keys (or nothing at all) in the time map
    #[error("failed to find actual latest version of '{package}'")]
    NoEligibleVersion { package: String },

    /// The actual latest version has no patch release above it
    #[error("no patch version above {version} of '{package}'")]
    PatchOverflow { package: String, version: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// Client was built without a registry source
    #[error("cannot fetch '{package}': registry client is offline")]
    Offline { package: String },
}

/// Errors related to input and cache files
#[derive(Error, Debug)]
pub enum DataError {
    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not the expected JSON
    #[error("failed to parse JSON in {path}: {message}")]
    JsonError { path: PathBuf, message: String },
}

impl SemverError {
    /// Creates a new Parse error
    pub fn parse(text: impl Into<String>, coerce: bool) -> Self {
        SemverError::Parse {
            text: text.into(),
            coerce,
        }
    }
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl DataError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonError
    pub fn json_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DataError::JsonError {
            path: path.into(),
            message: message.into(),
        }
    }
}

//! Core domain models for types-publisher
//!
//! This module contains the fundamental types used throughout the application:
//! - Three-component versions and their ordering
//! - Typings and not-needed package records
//! - The set of packages changed by a versions diff
//! - The publish plan built from that set

mod changed;
mod package;
mod plan;
mod semver;

pub use changed::{ChangedPackages, ChangedTyping};
pub use package::{
    full_escaped_npm_name, full_npm_name, mangle_scoped_name, MajorMinor, NotNeededPackage,
    PackageId, TypingsData, TYPES_SCOPE,
};
pub use plan::{DeprecationDecision, PublishPlan};
pub use semver::{compare, Semver};

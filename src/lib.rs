//! types-publisher - publish planning for DefinitelyTyped packages
//!
//! This library provides:
//! - Strict three-part semver handling
//! - The package index and versions-diff loading
//! - npm registry access with an info cache
//! - Deprecation conflict resolution and publish planning

pub mod changed;
pub mod cli;
pub mod domain;
pub mod error;
pub mod output;
pub mod packages;
pub mod planner;
pub mod progress;
pub mod registry;
pub mod resolver;

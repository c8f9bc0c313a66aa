#![deny(missing_docs)]

//! # Klaviyo Prebuild
//!
//! Idempotent patch engine for native mobile-project artifacts. Gives an
//! application the Klaviyo messaging SDK's required Android manifest entries,
//! resources and activity hook, plus the iOS app-group, badge, version and
//! project-index wiring, without hand-editing native files.
//!
//! The host prebuild orchestrator supplies the in-memory project snapshot and
//! the merged configuration; every patcher here converges under repeated
//! application with equal input.

/// Shared error types.
pub mod error;

/// Fixed metadata, resource and plist names.
pub mod constants;

/// Merged plugin configuration records.
pub mod config;

/// Identity-keyed tree patch primitives.
pub mod tree;

/// Android manifest, resource and source patchers.
pub mod android;

/// iOS property-list, entitlements and project-index patchers.
pub mod ios;

pub use android::main_activity::{Dialect, MainActivity};
pub use android::AndroidProject;
pub use config::{AndroidConfig, CodeSignStyle, IosConfig, PluginConfig};
pub use constants::shared_app_group;
pub use error::{PatchError, PatchResult};
pub use ios::xcodeproj::XcodeProject;
pub use ios::IosProject;
pub use tree::Element;

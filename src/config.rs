//! # Plugin Configuration
//!
//! The merged, defaulted configuration record the engine consumes. Validation
//! of user-supplied values (hex color shape, version formats, log-level
//! range) happens upstream, before the engine runs; these types document
//! shape and defaults and carry values the validator already accepted.

use crate::constants::{DEFAULT_MARKETING_VERSION, DEFAULT_PROJECT_VERSION};
use crate::error::{PatchError, PatchResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Per-platform configuration, as merged by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    /// Android options.
    pub android: AndroidConfig,
    /// iOS options.
    pub ios: IosConfig,
}

impl PluginConfig {
    /// Deserializes the host's merged plugin props.
    pub fn from_props(props: serde_json::Value) -> PatchResult<Self> {
        serde_json::from_value(props)
            .map_err(|e| PatchError::Config(format!("invalid plugin props: {}", e)))
    }
}

/// Android-side options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AndroidConfig {
    /// SDK log level, 0 (off) through 7 (verbose).
    pub log_level: u8,
    /// Whether the main activity is patched to register open tracking.
    pub open_tracking: bool,
    /// Project-relative path of a notification icon to install. `None`
    /// removes the icon metadata previously set.
    pub notification_icon_file_path: Option<String>,
    /// Notification accent color as `#RRGGBB`. `None` removes the color
    /// metadata and resource previously set.
    pub notification_color: Option<String>,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        AndroidConfig {
            log_level: 1,
            open_tracking: true,
            notification_icon_file_path: None,
            notification_color: None,
        }
    }
}

/// iOS-side options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IosConfig {
    /// Whether the SDK clears the app badge on open.
    pub badge_autoclearing: bool,
    /// Code-signing style applied to the extension target.
    pub code_sign_style: CodeSignStyle,
    /// Numeric project version (`CFBundleVersion`), e.g. "42".
    pub project_version: Option<String>,
    /// Dotted marketing version (`CFBundleShortVersionString`), e.g. "2.5.3".
    pub marketing_version: Option<String>,
    /// Signing team identifier for the extension target.
    pub dev_team: Option<String>,
    /// Swift version for the extension target, e.g. "5.0".
    pub swift_version: Option<String>,
}

impl Default for IosConfig {
    fn default() -> Self {
        IosConfig {
            badge_autoclearing: true,
            code_sign_style: CodeSignStyle::Automatic,
            project_version: None,
            marketing_version: None,
            dev_team: None,
            swift_version: None,
        }
    }
}

impl IosConfig {
    /// The marketing version to write, falling back to the default.
    pub fn marketing_version_or_default(&self) -> &str {
        self.marketing_version
            .as_deref()
            .unwrap_or(DEFAULT_MARKETING_VERSION)
    }

    /// The project version to write, falling back to the default.
    pub fn project_version_or_default(&self) -> &str {
        self.project_version
            .as_deref()
            .unwrap_or(DEFAULT_PROJECT_VERSION)
    }
}

/// Code-signing style of an Xcode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeSignStyle {
    /// Xcode manages signing.
    Automatic,
    /// Profiles are assigned by hand.
    Manual,
}

impl Display for CodeSignStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeSignStyle::Automatic => write!(f, "Automatic"),
            CodeSignStyle::Manual => write!(f, "Manual"),
        }
    }
}

//! # Android Pass
//!
//! Sequences the Android patchers: manifest, then resources, then the main
//! activity. The tree patchers are total and independently idempotent, so a
//! fatal error in the later file-touching steps leaves a safe, convergent
//! state behind; those steps validate before they write.

/// Main-activity location and source splicing.
pub mod main_activity;

/// Manifest tree patching.
pub mod manifest;

/// String/color resource patching and icon install.
pub mod resources;

use crate::config::AndroidConfig;
use crate::error::PatchResult;
use crate::tree::Element;
use main_activity::ActivityLocator;
use std::path::Path;

/// The Android artifacts of one prebuild pass, as handed in by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AndroidProject {
    /// Parsed `AndroidManifest.xml` tree (the `<manifest>` root).
    pub manifest: Element,
    /// Parsed `strings.xml` tree (the `<resources>` root).
    pub strings: Element,
    /// Parsed `colors.xml` tree (the `<resources>` root).
    pub colors: Element,
}

/// Runs the Android pass over `project`.
///
/// `project_root` is the native Android project directory; `locator` is the
/// host's main-activity locator, when it provides one. The activity splice
/// only runs when open tracking is enabled.
pub fn apply(
    project: &mut AndroidProject,
    project_root: &Path,
    config: &AndroidConfig,
    locator: Option<&ActivityLocator>,
) -> PatchResult<()> {
    manifest::patch_manifest(&mut project.manifest, config);
    resources::patch_strings(&mut project.strings);
    resources::patch_colors(&mut project.colors, config);
    resources::install_notification_icon(project_root, config)?;

    if config.open_tracking {
        let activity = main_activity::locate_main_activity(project_root, locator)?;
        main_activity::patch_main_activity(&activity)?;
    }

    Ok(())
}

//! # iOS Pass
//!
//! Sequences the iOS patchers: Info.plist, extension Info.plist,
//! entitlements, project index. The bundle identifier is validated up
//! front, before anything is mutated, so a fatal configuration error leaves
//! every artifact untouched.

/// Application-groups entitlement patching.
pub mod entitlements;

/// Main and extension Info.plist patching.
pub mod info_plist;

/// Project-index and extension-target patching.
pub mod xcodeproj;

use crate::config::IosConfig;
use crate::error::PatchResult;
use plist::Dictionary;
use std::path::Path;
use xcodeproj::XcodeProject;

/// The iOS artifacts of one prebuild pass, as handed in by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IosProject {
    /// Parsed main-app Info.plist dictionary.
    pub info_plist: Dictionary,
    /// Parsed entitlements dictionary.
    pub entitlements: Dictionary,
    /// Project object tables.
    pub xcode: XcodeProject,
}

/// Runs the iOS pass over `project`.
///
/// `ios_root` is the native iOS project directory (the extension's
/// Info.plist lives under it); `asset_source` is the plugin's bundled
/// configuration plist, located by the host.
pub fn apply(
    project: &mut IosProject,
    ios_root: &Path,
    asset_source: &Path,
    config: &IosConfig,
) -> PatchResult<()> {
    let bundle_id = info_plist::bundle_identifier(&project.info_plist)?;

    info_plist::patch_info_plist(&mut project.info_plist, config)?;
    info_plist::patch_extension_plist(&info_plist::extension_plist_path(ios_root), config)?;
    entitlements::patch_entitlements(&mut project.entitlements, &bundle_id);
    xcodeproj::register_config_asset(&mut project.xcode, asset_source, ios_root)?;
    xcodeproj::patch_extension_target(&mut project.xcode, config);

    Ok(())
}

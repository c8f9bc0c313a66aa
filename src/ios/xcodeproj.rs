//! # Xcode Project Index Patcher
//!
//! Registers the bundled configuration resource into the project's group,
//! file-reference and "copy resources" build-phase tables, and keeps the
//! notification extension target's build settings in line with the
//! configuration. Object identifiers are deterministic, so re-registration
//! finds the same objects instead of growing the tables.

use crate::config::IosConfig;
use crate::constants::{CONFIG_ASSET_NAME, EXTENSION_TARGET_NAME};
use crate::error::PatchResult;
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Identifier of an object in the project tables (24 hex digits, the
/// project format's shape).
pub type ObjectId = String;

/// Derives the stable identifier for a seed string.
pub fn object_id(seed: &str) -> ObjectId {
    let digest = Sha256::digest(seed.as_bytes());
    digest[..12].iter().map(|b| format!("{:02X}", b)).collect()
}

/// A group (folder) in the project navigator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PbxGroup {
    /// Display name.
    pub name: String,
    /// Child object identifiers (groups or file references), in order.
    pub children: Vec<ObjectId>,
}

/// A reference to a file on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PbxFileReference {
    /// Path relative to the group.
    pub path: String,
}

/// Membership of one file reference in one build phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PbxBuildFile {
    /// The referenced file.
    pub file_ref: ObjectId,
}

/// A "copy resources" build phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PbxResourcesBuildPhase {
    /// Build-file identifiers, in order.
    pub files: Vec<ObjectId>,
}

/// A build target and its settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PbxTarget {
    /// Target name.
    pub name: String,
    /// Build settings, key order preserved.
    pub build_settings: IndexMap<String, String>,
}

/// The project's object tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XcodeProject {
    /// Identifier of the main group, when the project has one.
    pub main_group: Option<ObjectId>,
    /// Group table.
    pub groups: IndexMap<ObjectId, PbxGroup>,
    /// File-reference table.
    pub file_references: IndexMap<ObjectId, PbxFileReference>,
    /// Build-file table.
    pub build_files: IndexMap<ObjectId, PbxBuildFile>,
    /// "Copy resources" build phases.
    pub resources_phases: IndexMap<ObjectId, PbxResourcesBuildPhase>,
    /// Target table.
    pub targets: IndexMap<ObjectId, PbxTarget>,
}

/// Copies the bundled configuration asset into the project source directory
/// and registers it: file reference under the main group, membership in the
/// (found or created) resources build phase, keyed by file-reference
/// identity. A project without a main group is outside the supported shape;
/// that case is logged and skipped, not raised.
pub fn register_config_asset(
    project: &mut XcodeProject,
    asset_source: &Path,
    ios_root: &Path,
) -> PatchResult<()> {
    fs::copy(asset_source, ios_root.join(CONFIG_ASSET_NAME))?;

    let main_group_id = match project.main_group.clone() {
        Some(id) => id,
        None => {
            log::warn!(
                "project has no main group; skipping registration of {}",
                CONFIG_ASSET_NAME
            );
            return Ok(());
        }
    };
    let main_group = match project.groups.get_mut(&main_group_id) {
        Some(group) => group,
        None => {
            log::warn!(
                "main group {} is not in the group table; skipping registration of {}",
                main_group_id,
                CONFIG_ASSET_NAME
            );
            return Ok(());
        }
    };

    let file_ref_id = object_id(&format!("fileref:{}", CONFIG_ASSET_NAME));
    if !main_group.children.contains(&file_ref_id) {
        main_group.children.push(file_ref_id.clone());
    }
    project
        .file_references
        .entry(file_ref_id.clone())
        .or_insert_with(|| PbxFileReference {
            path: CONFIG_ASSET_NAME.to_string(),
        });

    let phase_id = match project.resources_phases.keys().next().cloned() {
        Some(id) => id,
        None => {
            let id = object_id("resources-phase");
            project
                .resources_phases
                .insert(id.clone(), PbxResourcesBuildPhase::default());
            id
        }
    };

    // Membership is keyed by file-reference identity, not path.
    let member = project.resources_phases[&phase_id].files.iter().any(|id| {
        project.build_files.get(id).map(|bf| bf.file_ref.as_str()) == Some(file_ref_id.as_str())
    });
    if !member {
        let build_file_id = object_id(&format!("buildfile:{}", CONFIG_ASSET_NAME));
        project.build_files.insert(
            build_file_id.clone(),
            PbxBuildFile {
                file_ref: file_ref_id,
            },
        );
        if let Some(phase) = project.resources_phases.get_mut(&phase_id) {
            phase.files.push(build_file_id);
        }
    }

    Ok(())
}

/// Upserts the configured signing and version settings into the extension
/// target. A missing extension target is logged and skipped, like the
/// missing main group.
pub fn patch_extension_target(project: &mut XcodeProject, config: &IosConfig) {
    let target = project
        .targets
        .values_mut()
        .find(|t| t.name == EXTENSION_TARGET_NAME);
    let target = match target {
        Some(target) => target,
        None => {
            log::warn!(
                "no {} target; skipping build-settings update",
                EXTENSION_TARGET_NAME
            );
            return;
        }
    };

    let settings = &mut target.build_settings;
    settings.insert(
        "CODE_SIGN_STYLE".to_string(),
        config.code_sign_style.to_string(),
    );
    if let Some(team) = &config.dev_team {
        settings.insert("DEVELOPMENT_TEAM".to_string(), team.clone());
    }
    if let Some(swift_version) = &config.swift_version {
        settings.insert("SWIFT_VERSION".to_string(), swift_version.clone());
    }
    settings.insert(
        "MARKETING_VERSION".to_string(),
        config.marketing_version_or_default().to_string(),
    );
    settings.insert(
        "CURRENT_PROJECT_VERSION".to_string(),
        config.project_version_or_default().to_string(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project_with_main_group() -> XcodeProject {
        let mut project = XcodeProject::default();
        let group_id = object_id("main-group");
        project.groups.insert(
            group_id.clone(),
            PbxGroup {
                name: "MyApp".to_string(),
                children: Vec::new(),
            },
        );
        project.main_group = Some(group_id);
        project
    }

    fn asset_fixture(dir: &Path) -> std::path::PathBuf {
        let source = dir.join("bundled.plist");
        fs::write(&source, "<plist/>").unwrap();
        source
    }

    #[test]
    fn test_object_id_is_stable_24_hex() {
        let id = object_id("fileref:x");
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, object_id("fileref:x"));
        assert_ne!(id, object_id("fileref:y"));
    }

    #[test]
    fn test_registration_creates_phase_and_membership() {
        let dir = tempfile::tempdir().unwrap();
        let source = asset_fixture(dir.path());
        let mut project = project_with_main_group();

        register_config_asset(&mut project, &source, dir.path()).unwrap();

        assert!(dir.path().join(CONFIG_ASSET_NAME).is_file());
        assert_eq!(project.file_references.len(), 1);
        assert_eq!(project.resources_phases.len(), 1);
        assert_eq!(project.build_files.len(), 1);
        let group_id = project.main_group.clone().unwrap();
        assert_eq!(project.groups[&group_id].children.len(), 1);
        let phase = project.resources_phases.values().next().unwrap();
        assert_eq!(phase.files.len(), 1);
    }

    #[test]
    fn test_registration_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let source = asset_fixture(dir.path());
        let mut project = project_with_main_group();

        register_config_asset(&mut project, &source, dir.path()).unwrap();
        let once = project.clone();
        register_config_asset(&mut project, &source, dir.path()).unwrap();

        assert_eq!(project, once);
    }

    #[test]
    fn test_existing_phase_reused() {
        let dir = tempfile::tempdir().unwrap();
        let source = asset_fixture(dir.path());
        let mut project = project_with_main_group();
        let phase_id = object_id("app-resources");
        let foreign_build_file = object_id("buildfile:Other.storyboard");
        project.build_files.insert(
            foreign_build_file.clone(),
            PbxBuildFile {
                file_ref: object_id("fileref:Other.storyboard"),
            },
        );
        project.resources_phases.insert(
            phase_id.clone(),
            PbxResourcesBuildPhase {
                files: vec![foreign_build_file.clone()],
            },
        );

        register_config_asset(&mut project, &source, dir.path()).unwrap();

        assert_eq!(project.resources_phases.len(), 1);
        let phase = &project.resources_phases[&phase_id];
        assert_eq!(phase.files.len(), 2);
        assert_eq!(phase.files[0], foreign_build_file);
    }

    #[test]
    fn test_missing_main_group_soft_skips() {
        let dir = tempfile::tempdir().unwrap();
        let source = asset_fixture(dir.path());
        let mut project = XcodeProject::default();

        register_config_asset(&mut project, &source, dir.path()).unwrap();

        // The copy still happens; the index is left alone.
        assert!(dir.path().join(CONFIG_ASSET_NAME).is_file());
        assert!(project.file_references.is_empty());
        assert!(project.build_files.is_empty());
    }

    #[test]
    fn test_extension_target_settings() {
        let mut project = XcodeProject::default();
        let target_id = object_id("target:extension");
        let mut build_settings = IndexMap::new();
        build_settings.insert("PRODUCT_NAME".to_string(), "$(TARGET_NAME)".to_string());
        project.targets.insert(
            target_id.clone(),
            PbxTarget {
                name: EXTENSION_TARGET_NAME.to_string(),
                build_settings,
            },
        );

        let config = IosConfig {
            dev_team: Some("ABCDE12345".to_string()),
            swift_version: Some("5.0".to_string()),
            marketing_version: Some("2.5.3".to_string()),
            project_version: Some("42".to_string()),
            ..IosConfig::default()
        };
        patch_extension_target(&mut project, &config);

        let settings = &project.targets[&target_id].build_settings;
        assert_eq!(settings["PRODUCT_NAME"], "$(TARGET_NAME)");
        assert_eq!(settings["CODE_SIGN_STYLE"], "Automatic");
        assert_eq!(settings["DEVELOPMENT_TEAM"], "ABCDE12345");
        assert_eq!(settings["SWIFT_VERSION"], "5.0");
        assert_eq!(settings["MARKETING_VERSION"], "2.5.3");
        assert_eq!(settings["CURRENT_PROJECT_VERSION"], "42");
    }

    #[test]
    fn test_missing_extension_target_soft_skips() {
        let mut project = XcodeProject::default();
        patch_extension_target(&mut project, &IosConfig::default());

        assert!(project.targets.is_empty());
    }
}

//! # Android Resource Patcher
//!
//! Applies the plugin identity strings and the optional notification color
//! to the `<resources>` trees, and installs the configured notification icon
//! drawable.

use crate::config::AndroidConfig;
use crate::constants::{
    NOTIFICATION_COLOR_RESOURCE, NOTIFICATION_ICON_RESOURCE, PLUGIN_NAME, PLUGIN_NAME_RESOURCE,
    PLUGIN_VERSION, PLUGIN_VERSION_RESOURCE,
};
use crate::error::{PatchError, PatchResult};
use crate::tree::{self, Element};
use std::fs;
use std::path::Path;

/// Directory the notification icon is installed into, relative to the
/// native project root.
const DRAWABLE_DIR: &str = "app/src/main/res/drawable";

/// Upserts the plugin name/version strings into the string-resource tree
/// (the `<resources>` root, possibly empty).
pub fn patch_strings(resources: &mut Element) {
    tree::upsert_child(
        resources,
        "string",
        "name",
        PLUGIN_NAME_RESOURCE,
        Element::new().attr("name", PLUGIN_NAME_RESOURCE).text(PLUGIN_NAME),
    );
    tree::upsert_child(
        resources,
        "string",
        "name",
        PLUGIN_VERSION_RESOURCE,
        Element::new().attr("name", PLUGIN_VERSION_RESOURCE).text(PLUGIN_VERSION),
    );
}

/// Upserts or removes the notification color resource in the color-resource
/// tree, tracking the configuration toggle.
pub fn patch_colors(resources: &mut Element, config: &AndroidConfig) {
    match &config.notification_color {
        Some(color) => tree::upsert_child(
            resources,
            "color",
            "name",
            NOTIFICATION_COLOR_RESOURCE,
            Element::new().attr("name", NOTIFICATION_COLOR_RESOURCE).text(color),
        ),
        None => tree::remove_child(resources, "color", "name", NOTIFICATION_COLOR_RESOURCE),
    }
}

/// Copies the configured notification icon into the project's drawable
/// directory under the fixed resource name. No-op when no icon is
/// configured; a configured but missing source file is a structural error,
/// raised before anything is written.
pub fn install_notification_icon(project_root: &Path, config: &AndroidConfig) -> PatchResult<()> {
    let relative = match &config.notification_icon_file_path {
        Some(path) => path,
        None => return Ok(()),
    };

    let source = project_root.join(relative);
    if !source.is_file() {
        return Err(PatchError::Structure(format!(
            "notification icon not found at '{}'",
            source.display()
        )));
    }

    let drawable_dir = project_root.join(DRAWABLE_DIR);
    fs::create_dir_all(&drawable_dir)?;
    fs::copy(
        &source,
        drawable_dir.join(format!("{}.png", NOTIFICATION_ICON_RESOURCE)),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strings_applied_to_empty_tree() {
        let mut resources = Element::new();
        patch_strings(&mut resources);

        let strings = resources.children_of("string");
        assert_eq!(strings.len(), 2);
        assert_eq!(strings[0].text.as_deref(), Some(PLUGIN_NAME));
        assert_eq!(strings[1].text.as_deref(), Some(PLUGIN_VERSION));
    }

    #[test]
    fn test_strings_idempotent_and_nondestructive() {
        let mut resources = Element::new().child(
            "string",
            Element::new().attr("name", "app_name").text("My App"),
        );
        patch_strings(&mut resources);
        let once = resources.clone();
        patch_strings(&mut resources);

        assert_eq!(resources, once);
        assert_eq!(
            resources.children_of("string")[0].text.as_deref(),
            Some("My App")
        );
    }

    #[test]
    fn test_color_toggle_restores_baseline() {
        let baseline = Element::new();
        let mut resources = baseline.clone();

        let mut config = AndroidConfig::default();
        config.notification_color = Some("#ABCDEF".into());
        patch_colors(&mut resources, &config);
        assert_eq!(
            resources.children_of("color")[0].text.as_deref(),
            Some("#ABCDEF")
        );

        patch_colors(&mut resources, &AndroidConfig::default());
        assert_eq!(resources, baseline);
    }

    #[test]
    fn test_icon_install_copies_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("icon.png"), b"png-bytes").unwrap();

        let mut config = AndroidConfig::default();
        config.notification_icon_file_path = Some("icon.png".into());

        install_notification_icon(dir.path(), &config).unwrap();
        let installed = dir
            .path()
            .join(DRAWABLE_DIR)
            .join(format!("{}.png", NOTIFICATION_ICON_RESOURCE));
        assert_eq!(fs::read(&installed).unwrap(), b"png-bytes");

        fs::write(dir.path().join("icon.png"), b"new-bytes").unwrap();
        install_notification_icon(dir.path(), &config).unwrap();
        assert_eq!(fs::read(&installed).unwrap(), b"new-bytes");
    }

    #[test]
    fn test_icon_install_missing_source_is_structural() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AndroidConfig::default();
        config.notification_icon_file_path = Some("missing.png".into());

        let result = install_notification_icon(dir.path(), &config);
        assert!(matches!(result, Err(PatchError::Structure(_))));
    }
}

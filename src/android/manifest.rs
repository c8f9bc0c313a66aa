//! # Android Manifest Patcher
//!
//! Applies the SDK's log-level metadata, push-service declaration and
//! notification icon/color metadata to the manifest tree. Every branch has a
//! defined default, so this component never raises; re-running with equal
//! configuration is byte-equivalent.

use crate::config::AndroidConfig;
use crate::constants::{
    LOG_LEVEL_METADATA, MESSAGING_EVENT_ACTION, NOTIFICATION_COLOR_METADATA,
    NOTIFICATION_COLOR_RESOURCE, NOTIFICATION_ICON_METADATA, NOTIFICATION_ICON_RESOURCE,
    PUSH_SERVICE_CLASS,
};
use crate::tree::{self, Element};

const ANDROID_NAME: &str = "android:name";
const ANDROID_VALUE: &str = "android:value";
const ANDROID_RESOURCE: &str = "android:resource";
const ANDROID_EXPORTED: &str = "android:exported";

/// Application class synthesized when the manifest has no `<application>`.
const DEFAULT_APPLICATION_NAME: &str = ".MainApplication";

/// Applies the SDK's manifest entries to `manifest` (the `<manifest>` root).
pub fn patch_manifest(manifest: &mut Element, config: &AndroidConfig) {
    let application = application_mut(manifest);

    tree::upsert_child(
        application,
        "meta-data",
        ANDROID_NAME,
        LOG_LEVEL_METADATA,
        Element::new()
            .attr(ANDROID_NAME, LOG_LEVEL_METADATA)
            .attr(ANDROID_VALUE, &config.log_level.to_string()),
    );

    // The push service is required regardless of configuration.
    tree::upsert_child(
        application,
        "service",
        ANDROID_NAME,
        PUSH_SERVICE_CLASS,
        push_service(),
    );

    match config.notification_icon_file_path {
        Some(_) => tree::upsert_child(
            application,
            "meta-data",
            ANDROID_NAME,
            NOTIFICATION_ICON_METADATA,
            Element::new()
                .attr(ANDROID_NAME, NOTIFICATION_ICON_METADATA)
                .attr(
                    ANDROID_RESOURCE,
                    &format!("@drawable/{}", NOTIFICATION_ICON_RESOURCE),
                ),
        ),
        None => tree::remove_child(
            application,
            "meta-data",
            ANDROID_NAME,
            NOTIFICATION_ICON_METADATA,
        ),
    }

    match config.notification_color {
        Some(_) => tree::upsert_child(
            application,
            "meta-data",
            ANDROID_NAME,
            NOTIFICATION_COLOR_METADATA,
            Element::new()
                .attr(ANDROID_NAME, NOTIFICATION_COLOR_METADATA)
                .attr(
                    ANDROID_RESOURCE,
                    &format!("@color/{}", NOTIFICATION_COLOR_RESOURCE),
                ),
        ),
        None => tree::remove_child(
            application,
            "meta-data",
            ANDROID_NAME,
            NOTIFICATION_COLOR_METADATA,
        ),
    }
}

/// The manifest's `<application>` node, synthesized when absent.
fn application_mut(manifest: &mut Element) -> &mut Element {
    let applications = manifest.children.entry("application".to_string()).or_default();
    if applications.is_empty() {
        applications.push(Element::new().attr(ANDROID_NAME, DEFAULT_APPLICATION_NAME));
    }
    &mut applications[0]
}

fn push_service() -> Element {
    Element::new()
        .attr(ANDROID_NAME, PUSH_SERVICE_CLASS)
        .attr(ANDROID_EXPORTED, "false")
        .child(
            "intent-filter",
            Element::new().child(
                "action",
                Element::new().attr(ANDROID_NAME, MESSAGING_EVENT_ACTION),
            ),
        )
}

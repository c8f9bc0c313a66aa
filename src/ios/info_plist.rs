//! # Info.plist Patcher
//!
//! Writes the shared app-group, badge-autoclear and version keys into the
//! main app's Info.plist dictionary, and keeps the notification service
//! extension's Info.plist on the same version pair via text substitution.
//! A missing or unreadable extension plist is surfaced, never skipped:
//! the two targets must leave this pass with matching version pairs.

use crate::config::IosConfig;
use crate::constants::{
    shared_app_group, APP_GROUP_KEY, BADGE_AUTOCLEAR_KEY, EXTENSION_TARGET_NAME,
};
use crate::error::{PatchError, PatchResult};
use plist::{Dictionary, Value};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const BUNDLE_IDENTIFIER_KEY: &str = "CFBundleIdentifier";
const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
const VERSION_KEY: &str = "CFBundleVersion";

/// Reads the bundle identifier out of the Info.plist dictionary. Absent or
/// empty is a fatal configuration error, raised before any mutation.
pub fn bundle_identifier(info: &Dictionary) -> PatchResult<String> {
    match info.get(BUNDLE_IDENTIFIER_KEY).and_then(Value::as_string) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(PatchError::Config(format!(
            "bundle identifier is required and missing ({})",
            BUNDLE_IDENTIFIER_KEY
        ))),
    }
}

/// Applies the SDK keys and the version pair to the main Info.plist.
/// Unknown keys are preserved unmodified.
pub fn patch_info_plist(info: &mut Dictionary, config: &IosConfig) -> PatchResult<()> {
    let bundle_id = bundle_identifier(info)?;

    info.insert(
        APP_GROUP_KEY.to_string(),
        Value::String(shared_app_group(&bundle_id)),
    );
    info.insert(
        BADGE_AUTOCLEAR_KEY.to_string(),
        Value::Boolean(config.badge_autoclearing),
    );
    info.insert(
        SHORT_VERSION_KEY.to_string(),
        Value::String(config.marketing_version_or_default().to_string()),
    );
    info.insert(
        VERSION_KEY.to_string(),
        Value::String(config.project_version_or_default().to_string()),
    );
    Ok(())
}

/// Path of the notification extension's Info.plist, derived from the fixed
/// extension target name.
pub fn extension_plist_path(ios_root: &Path) -> PathBuf {
    ios_root.join(EXTENSION_TARGET_NAME).join("Info.plist")
}

/// Patches the extension Info.plist as a text file: the `<string>` values of
/// the two version keys are substituted, every other byte left untouched.
/// All validation happens before the write.
pub fn patch_extension_plist(path: &Path, config: &IosConfig) -> PatchResult<()> {
    let content = fs::read_to_string(path).map_err(|e| {
        PatchError::Structure(format!(
            "extension Info.plist unreadable at '{}': {}",
            path.display(),
            e
        ))
    })?;

    let patched = substitute_versions(&content, config)?;
    if patched != content {
        fs::write(path, patched)?;
    }
    Ok(())
}

/// Pure text substitution of the two version values.
pub fn substitute_versions(content: &str, config: &IosConfig) -> PatchResult<String> {
    let content = substitute(
        content,
        short_version_regex(),
        SHORT_VERSION_KEY,
        config.marketing_version_or_default(),
    )?;
    substitute(
        &content,
        version_regex(),
        VERSION_KEY,
        config.project_version_or_default(),
    )
}

fn substitute(content: &str, re: &Regex, key: &str, value: &str) -> PatchResult<String> {
    if !re.is_match(content) {
        return Err(PatchError::Structure(format!(
            "extension Info.plist missing {}",
            key
        )));
    }
    Ok(re
        .replace(content, |caps: &regex::Captures| {
            format!("{}{}{}", &caps[1], value, &caps[2])
        })
        .into_owned())
}

fn short_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(<key>CFBundleShortVersionString</key>\s*<string>)[^<]*(</string>)")
            .expect("Invalid regex")
    })
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(<key>CFBundleVersion</key>\s*<string>)[^<]*(</string>)")
            .expect("Invalid regex")
    })
}

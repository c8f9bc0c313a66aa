//! # Main Activity Patcher
//!
//! Locates the application's main activity source file and splices in the
//! SDK import plus the open-tracking registration call. Recognition is
//! deliberately narrow: a package declaration, a `MainActivity` class
//! declaration, and the class-body brace are the only syntax this module
//! understands, in two dialects (Kotlin and Java).

use crate::constants::{MAIN_ACTIVITY_CLASS, SDK_IMPORT};
use crate::error::{PatchError, PatchResult};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Source roots scanned when the host locator yields nothing.
const SOURCE_ROOTS: [&str; 2] = ["app/src/main/java", "app/src/main/kotlin"];

/// Substring marking a previously inserted registration call.
const REGISTRATION_MARKER: &str = "Klaviyo.registerForLifecycleCallbacks";

/// Source dialect of an activity file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Kotlin (`.kt`).
    Kotlin,
    /// Java (`.java`).
    Java,
}

impl Dialect {
    fn import_line(self) -> String {
        match self {
            Dialect::Kotlin => format!("import {}", SDK_IMPORT),
            Dialect::Java => format!("import {};", SDK_IMPORT),
        }
    }

    fn registration_line(self) -> &'static str {
        match self {
            Dialect::Kotlin => "private val klaviyo = Klaviyo.registerForLifecycleCallbacks(this)",
            Dialect::Java => {
                "private final Klaviyo klaviyo = Klaviyo.registerForLifecycleCallbacks(this);"
            }
        }
    }
}

/// A located main-activity source file. Produced by the locator or the
/// fallback scan; consumed by [`patch_main_activity`], never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainActivity {
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// Source dialect.
    pub dialect: Dialect,
}

/// Host-provided locator for the main activity.
pub type ActivityLocator = dyn Fn(&Path) -> Option<MainActivity>;

/// Locates the main activity: host locator first, conventional source-tree
/// scan as fallback. Failing both is the one hard stop of the Android pass.
pub fn locate_main_activity(
    project_root: &Path,
    locator: Option<&ActivityLocator>,
) -> PatchResult<MainActivity> {
    if let Some(locator) = locator {
        if let Some(found) = locator(project_root) {
            return Ok(found);
        }
        log::debug!("host locator found no main activity; scanning source tree");
    }

    scan_source_tree(project_root)
        .ok_or_else(|| PatchError::Structure("main activity not found".to_string()))
}

/// Reads, patches and writes back the activity source. The write only
/// happens once both insertion points have been resolved; a structural
/// failure leaves the file untouched.
pub fn patch_main_activity(activity: &MainActivity) -> PatchResult<()> {
    let source = fs::read_to_string(&activity.path)?;
    let patched = insert_registration(&source, activity.dialect)?;
    if patched == source {
        log::debug!("main activity already patched: {}", activity.path.display());
        return Ok(());
    }
    fs::write(&activity.path, patched)?;
    Ok(())
}

/// Pure splice: inserts the import line immediately after the package line
/// and the registration call as the first statement of the class body,
/// preserving the file's line endings and body indentation. Returns the
/// input unchanged when both are already present.
pub fn insert_registration(source: &str, dialect: Dialect) -> PatchResult<String> {
    let has_import = source.contains(&format!("import {}", SDK_IMPORT));
    let has_call = source.contains(REGISTRATION_MARKER);
    if has_import && has_call {
        return Ok(source.to_string());
    }

    let package = package_regex(dialect)
        .find(source)
        .ok_or_else(|| PatchError::Structure("package declaration not found".to_string()))?;
    let class = class_regex(dialect)
        .find(source)
        .ok_or_else(|| PatchError::Structure("class declaration not found".to_string()))?;
    let brace = source[class.end()..]
        .find('{')
        .map(|offset| class.end() + offset)
        .ok_or_else(|| PatchError::Structure("class declaration not found".to_string()))?;

    let eol = if source.contains("\r\n") { "\r\n" } else { "\n" };
    let mut patched = source.to_string();

    // Splice back to front so the earlier offset stays valid.
    if !has_call {
        let indent = body_indent(source, brace);
        patched.insert_str(
            brace + 1,
            &format!("{}{}{}", eol, indent, dialect.registration_line()),
        );
    }
    if !has_import {
        let insert_at = match source[package.end()..].find('\n') {
            Some(offset) => package.end() + offset + 1,
            None => patched.len(),
        };
        patched.insert_str(insert_at, &format!("{}{}", dialect.import_line(), eol));
    }

    Ok(patched)
}

fn scan_source_tree(project_root: &Path) -> Option<MainActivity> {
    for source_root in SOURCE_ROOTS {
        let root = project_root.join(source_root);
        if !root.is_dir() {
            continue;
        }
        let entries = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok);
        for entry in entries {
            if !entry.file_type().is_file() {
                continue;
            }
            let dialect = match dialect_of(entry.path()) {
                Some(dialect) => dialect,
                None => continue,
            };
            let content = match fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(_) => continue,
            };
            if class_regex(dialect).is_match(&content) {
                return Some(MainActivity {
                    path: entry.path().to_path_buf(),
                    dialect,
                });
            }
        }
    }
    None
}

fn dialect_of(path: &Path) -> Option<Dialect> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("kt") => Some(Dialect::Kotlin),
        Some("java") => Some(Dialect::Java),
        _ => None,
    }
}

fn package_regex(dialect: Dialect) -> &'static Regex {
    static KOTLIN: OnceLock<Regex> = OnceLock::new();
    static JAVA: OnceLock<Regex> = OnceLock::new();
    match dialect {
        Dialect::Kotlin => KOTLIN.get_or_init(|| {
            Regex::new(r"(?m)^[ \t]*package[ \t]+[A-Za-z_][A-Za-z0-9_.]*").expect("Invalid regex")
        }),
        Dialect::Java => JAVA.get_or_init(|| {
            Regex::new(r"(?m)^[ \t]*package[ \t]+[A-Za-z_][A-Za-z0-9_.]*[ \t]*;")
                .expect("Invalid regex")
        }),
    }
}

fn class_regex(dialect: Dialect) -> &'static Regex {
    static KOTLIN: OnceLock<Regex> = OnceLock::new();
    static JAVA: OnceLock<Regex> = OnceLock::new();
    match dialect {
        Dialect::Kotlin => KOTLIN.get_or_init(|| {
            Regex::new(&format!(
                r"(?m)^[ \t]*(?:open[ \t]+|public[ \t]+)?class[ \t]+{}\b",
                MAIN_ACTIVITY_CLASS
            ))
            .expect("Invalid regex")
        }),
        Dialect::Java => JAVA.get_or_init(|| {
            Regex::new(&format!(
                r"(?m)^[ \t]*(?:public[ \t]+)?(?:final[ \t]+)?class[ \t]+{}\b",
                MAIN_ACTIVITY_CLASS
            ))
            .expect("Invalid regex")
        }),
    }
}

/// Indentation of the first non-blank body line, `"    "` when the body is
/// empty or flush-left.
fn body_indent(source: &str, brace: usize) -> String {
    for line in source[brace + 1..].lines().skip(1) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('}') {
            break;
        }
        let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        if !indent.is_empty() {
            return indent;
        }
        break;
    }
    "    ".to_string()
}

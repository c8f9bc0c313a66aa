//! # Entitlements Patcher
//!
//! Upserts the shared app-group identifier into the application-groups
//! entitlement array. Entries added by other tooling are never removed or
//! reordered. Total: no failure conditions.

use crate::constants::shared_app_group;
use plist::{Dictionary, Value};

/// The application-groups entitlement key.
pub const APPLICATION_GROUPS_KEY: &str = "com.apple.security.application-groups";

/// Ensures the shared app group for `bundle_id` appears exactly once in the
/// entitlements dictionary. The array is created when absent; an existing
/// entry keeps its position.
pub fn patch_entitlements(entitlements: &mut Dictionary, bundle_id: &str) {
    let group = shared_app_group(bundle_id);

    if !matches!(entitlements.get(APPLICATION_GROUPS_KEY), Some(Value::Array(_))) {
        entitlements.insert(APPLICATION_GROUPS_KEY.to_string(), Value::Array(Vec::new()));
    }
    if let Some(Value::Array(groups)) = entitlements.get_mut(APPLICATION_GROUPS_KEY) {
        let present = groups.iter().any(|v| v.as_string() == Some(group.as_str()));
        if !present {
            groups.push(Value::String(group));
        }
    }
}

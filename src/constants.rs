//! # Fixed Names
//!
//! Every metadata key, resource name, plist key and target name the engine
//! writes, in one place. The native SDKs read these by exact name, so they
//! must never drift between patchers.

/// Manifest metadata key carrying the SDK log level (decimal string "0".."7").
pub const LOG_LEVEL_METADATA: &str = "com.klaviyo.core.log_level";

/// Fully qualified class name of the push receive service.
pub const PUSH_SERVICE_CLASS: &str = "com.klaviyo.pushFcm.KlaviyoPushService";

/// Intent action the push service filters on.
pub const MESSAGING_EVENT_ACTION: &str = "com.google.firebase.MESSAGING_EVENT";

/// Manifest metadata key naming the default notification icon drawable.
pub const NOTIFICATION_ICON_METADATA: &str = "com.klaviyo.push.default_notification_icon";

/// Manifest metadata key naming the default notification color resource.
pub const NOTIFICATION_COLOR_METADATA: &str = "com.klaviyo.push.default_notification_color";

/// Drawable resource name the configured notification icon is installed under.
pub const NOTIFICATION_ICON_RESOURCE: &str = "klaviyo_notification_icon";

/// Color resource name carrying the configured notification color.
pub const NOTIFICATION_COLOR_RESOURCE: &str = "klaviyo_notification_color";

/// String resource overriding the SDK-reported plugin name.
pub const PLUGIN_NAME_RESOURCE: &str = "klaviyo_sdk_plugin_name_override";

/// String resource overriding the SDK-reported plugin version.
pub const PLUGIN_VERSION_RESOURCE: &str = "klaviyo_sdk_plugin_version_override";

/// Value written into [`PLUGIN_NAME_RESOURCE`].
pub const PLUGIN_NAME: &str = env!("CARGO_PKG_NAME");

/// Value written into [`PLUGIN_VERSION_RESOURCE`].
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Info.plist key carrying the shared app-group identifier.
pub const APP_GROUP_KEY: &str = "klaviyo_app_group";

/// Info.plist key toggling badge autoclearing.
pub const BADGE_AUTOCLEAR_KEY: &str = "klaviyo_badge_autoclearing";

/// Name of the notification service extension target.
pub const EXTENSION_TARGET_NAME: &str = "KlaviyoNotificationServiceExtension";

/// File name of the bundled configuration resource registered into the
/// Xcode project.
pub const CONFIG_ASSET_NAME: &str = "KlaviyoPluginConfiguration.plist";

/// Fully qualified name of the SDK facade imported into the main activity.
pub const SDK_IMPORT: &str = "com.klaviyo.analytics.Klaviyo";

/// Conventional main-activity class name.
pub const MAIN_ACTIVITY_CLASS: &str = "MainActivity";

/// Marketing version written when the configuration leaves it unset.
pub const DEFAULT_MARKETING_VERSION: &str = "1.0";

/// Project version written when the configuration leaves it unset.
pub const DEFAULT_PROJECT_VERSION: &str = "1";

/// Computes the shared app-group identifier for a bundle identifier.
///
/// This is the single definition; Info.plist, entitlements and the extension
/// target all emit exactly this value.
pub fn shared_app_group(bundle_id: &str) -> String {
    format!("group.{}.{}.shared", bundle_id, EXTENSION_TARGET_NAME)
}

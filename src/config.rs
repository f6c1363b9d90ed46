//! Runtime configuration.
//!
//! There are no config files; defaults can be adjusted through the
//! environment for headless use.

use std::time::Duration;

pub const DEFAULT_APP_LABEL: &str = "File Type Detector";
pub const DEFAULT_NOTIFICATION_TITLE: &str = "File Type Detected";
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Set to a non-empty value other than `0` to skip desktop notifications.
pub const NO_DESKTOP_ENV: &str = "MAGICGUARD_NO_DESKTOP";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Application label attached to desktop notifications
    pub app_label: String,
    pub notification_title: String,
    /// Auto-dismiss timeout for desktop notifications
    pub notification_timeout: Duration,
    /// How often the watch loop checks the stop flag while idle
    pub poll_interval: Duration,
    pub desktop_notifications: bool,
}

impl AppConfig {
    /// Defaults with overrides read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(NO_DESKTOP_ENV) {
            let value = value.trim();
            if !value.is_empty() && value != "0" {
                config.desktop_notifications = false;
            }
        }
        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_label: DEFAULT_APP_LABEL.to_string(),
            notification_title: DEFAULT_NOTIFICATION_TITLE.to_string(),
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            desktop_notifications: true,
        }
    }
}

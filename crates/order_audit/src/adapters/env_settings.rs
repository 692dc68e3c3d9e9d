// Rust guideline compliant 2026-10-16

//! Process-environment adapter for the `SettingsSource` port.
//!
//! Re-reads the environment on every `load`, so toggling a variable takes
//! effect on the next classification without restarting.

use domain::{SettingsSource, ValidationConfig};

/// Global kill-switch. Unset or any non-falsy value keeps validation on.
pub const ENABLED_VAR: &str = "ORDER_VALIDATION_ENABLED";
/// Build mode; `development` (or `dev`) marks a non-production build.
pub const APP_ENV_VAR: &str = "APP_ENV";
/// Development bypass; only an explicit truthy value turns it on.
pub const DEV_BYPASS_VAR: &str = "ORDER_VALIDATION_DEV_BYPASS";

/// `SettingsSource` adapter backed by environment variables.
#[derive(Debug, Clone, Copy)]
pub struct EnvSettings {
    lookup: fn(&str) -> Option<String>,
}

impl EnvSettings {
    /// Read from the real process environment.
    #[must_use]
    pub fn new() -> Self {
        Self { lookup: |key| std::env::var(key).ok() }
    }

    /// Read through `lookup` instead of the process environment.
    #[cfg(test)]
    #[must_use]
    pub fn with_lookup(lookup: fn(&str) -> Option<String>) -> Self {
        Self { lookup }
    }
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsSource for EnvSettings {
    fn load(&self) -> ValidationConfig {
        let enabled = (self.lookup)(ENABLED_VAR).is_none_or(|v| !is_falsy(&v));
        let development_build = (self.lookup)(APP_ENV_VAR).is_some_and(|v| {
            matches!(v.trim().to_ascii_lowercase().as_str(), "development" | "dev")
        });
        let development_bypass = (self.lookup)(DEV_BYPASS_VAR).is_some_and(|v| is_truthy(&v));
        ValidationConfig { enabled, development_build, development_bypass }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn is_falsy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}

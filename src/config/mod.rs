use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::workbench::DEFAULT_MODULES_PER_PAGE;

const CONFIG_FILE_NAME: &str = "workbench.json";

/// User settings for the workbench application
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tiles shown per home-screen page
    pub modules_per_page: usize,

    /// Tiles per row on the home screen
    pub columns_per_row: usize,

    /// Width of the navigation drawer in percent of the screen
    pub drawer_width_percentage: u16,

    /// Render dialog button labels in upper case
    pub button_text_uppercase: bool,

    /// Redraw interval of the terminal UI
    pub tick_rate_ms: u64,

    pub mouse_enabled: bool,

    /// Directory for log files. Defaults to the platform data directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            modules_per_page: DEFAULT_MODULES_PER_PAGE,
            columns_per_row: 3,
            drawer_width_percentage: 33,
            button_text_uppercase: false,
            tick_rate_ms: 100,
            mouse_enabled: true,
            log_dir: None,
        }
    }
}

impl Settings {
    /// Resolve settings: defaults, then the first settings file found, then
    /// environment variables. The result is not validated yet, callers apply
    /// their own overrides first and then call `validate`.
    pub async fn init(explicit: Option<&Path>) -> Result<Self> {
        debug!("Initializing settings");

        let mut settings = match Self::find_file(explicit) {
            Some(path) => Self::load_from_file(&path).await?,
            None => Self::default(),
        };

        settings.load_from_env();

        Ok(settings)
    }

    /// Settings file to read, in priority order:
    /// 1. the path given on the command line
    /// 2. `$WORKBENCH_CONFIG`
    /// 3. `<config dir>/workbench/workbench.json`
    /// 4. `./workbench.json`
    pub fn find_file(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var("WORKBENCH_CONFIG") {
            return Some(PathBuf::from(path));
        }

        let mut candidates = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("workbench").join(CONFIG_FILE_NAME));
        }
        candidates.push(PathBuf::from(".").join(CONFIG_FILE_NAME));

        candidates.into_iter().find(|path| path.exists())
    }

    pub async fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading settings from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        Ok(settings)
    }

    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply `WORKBENCH_*` overrides found through `lookup`. Values that do
    /// not parse are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("WORKBENCH_MODULES_PER_PAGE").and_then(|v| v.parse().ok()) {
            self.modules_per_page = value;
        }

        if let Some(value) = lookup("WORKBENCH_COLUMNS").and_then(|v| v.parse().ok()) {
            self.columns_per_row = value;
        }

        if let Some(value) = lookup("WORKBENCH_DRAWER_WIDTH").and_then(|v| v.parse().ok()) {
            self.drawer_width_percentage = value;
        }

        if let Some(value) = lookup("WORKBENCH_UPPERCASE_BUTTONS") {
            self.button_text_uppercase = parse_flag(&value);
        }

        if let Some(value) = lookup("WORKBENCH_TICK_RATE_MS").and_then(|v| v.parse().ok()) {
            self.tick_rate_ms = value;
        }

        if let Some(value) = lookup("WORKBENCH_MOUSE") {
            self.mouse_enabled = parse_flag(&value);
        }

        if let Some(value) = lookup("WORKBENCH_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(value));
        }
    }

    /// Directory log files are written to
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join("workbench").join("logs"))
                .unwrap_or_else(|| PathBuf::from("./logs"))
        })
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.modules_per_page == 0 {
            return Err(anyhow::anyhow!("modules_per_page must be greater than 0"));
        }

        if self.columns_per_row == 0 {
            return Err(anyhow::anyhow!("columns_per_row must be greater than 0"));
        }

        if !(10..=90).contains(&self.drawer_width_percentage) {
            return Err(anyhow::anyhow!(
                "drawer_width_percentage must be between 10 and 90"
            ));
        }

        if self.tick_rate_ms == 0 {
            return Err(anyhow::anyhow!("tick_rate_ms must be greater than 0"));
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.modules_per_page, 9);
        assert!(settings.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "modules_per_page": 4, "button_text_uppercase": true }}"#).unwrap();

        let settings = Settings::load_from_file(file.path()).await.unwrap();
        assert_eq!(settings.modules_per_page, 4);
        assert!(settings.button_text_uppercase);
        assert_eq!(settings.columns_per_row, 3);
    }

    #[tokio::test]
    async fn test_init_leaves_validation_to_caller() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "modules_per_page": 0 }}"#).unwrap();

        let settings = Settings::init(Some(file.path())).await.unwrap();
        assert_eq!(settings.modules_per_page, 0);
        assert!(settings.validate().is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load_from_file(&dir.path().join("absent.json")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("WORKBENCH_MODULES_PER_PAGE", "12"),
            ("WORKBENCH_COLUMNS", "not a number"),
            ("WORKBENCH_UPPERCASE_BUTTONS", "yes"),
            ("WORKBENCH_MOUSE", "off"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.modules_per_page, 12);
        assert_eq!(settings.columns_per_row, 3);
        assert!(settings.button_text_uppercase);
        assert!(!settings.mouse_enabled);
    }

    #[test]
    fn test_validation_bounds() {
        let settings = Settings {
            drawer_width_percentage: 95,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            columns_per_row: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_explicit_file_wins() {
        let path = PathBuf::from("/tmp/custom.json");
        assert_eq!(Settings::find_file(Some(path.as_path())), Some(path));
    }
}

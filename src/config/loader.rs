use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "studyplan";
const LOG_FILE_NAME: &str = "study_log.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    pub message: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 1800,
            message: "Time to study!".to_string(),
        }
    }
}

impl ReminderConfig {
    /// Interval between reminders. Zero is bumped to one second.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub urgent_within_days: i64,
    pub recent_logs: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            urgent_within_days: 7,
            recent_logs: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    pub reminder: ReminderConfig,
    pub display: DisplayConfig,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = config_path.unwrap_or_else(Self::default_config_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn default_config_path() -> PathBuf {
        if let Some(config_path) = std::env::var_os("STUDYPLAN_CONFIG") {
            PathBuf::from(config_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("config.yaml")
        }
    }

    pub fn default_log_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(LOG_FILE_NAME)
    }

    pub fn with_log_path(mut self, log_path: PathBuf) -> Self {
        self.log_path = Some(log_path);
        self
    }

    /// Study log location: the configured path, or the platform data dir.
    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert!(config.log_path.is_none());
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder.interval_secs, 1800);
        assert_eq!(config.reminder.message, "Time to study!");
        assert_eq!(config.display.urgent_within_days, 7);
        assert_eq!(config.display.recent_logs, 5);
    }

    #[test]
    fn config_loads_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let yaml = r#"
log_path: "/tmp/studyplan/log.json"
reminder:
  enabled: false
  interval_secs: 600
  message: "Back to the books"
display:
  urgent_within_days: 3
  recent_logs: 10
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.log_path(), PathBuf::from("/tmp/studyplan/log.json"));
        assert!(!config.reminder.enabled);
        assert_eq!(config.reminder.interval(), Duration::from_secs(600));
        assert_eq!(config.reminder.message, "Back to the books");
        assert_eq!(config.display.urgent_within_days, 3);
        assert_eq!(config.display.recent_logs, 10);
    }

    #[test]
    fn config_partial_yaml_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "reminder:\n  interval_secs: 60\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.reminder.interval_secs, 60);
        assert!(config.reminder.enabled);
        assert_eq!(config.reminder.message, "Time to study!");
        assert_eq!(config.display.recent_logs, 5);
    }

    #[test]
    fn config_load_returns_default_when_file_missing() {
        let config = Config::load(Some(PathBuf::from("/nonexistent/config.yaml"))).unwrap();
        assert!(config.log_path.is_none());
        assert_eq!(config.reminder.interval_secs, 1800);
    }

    #[test]
    fn config_load_fails_on_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "reminder: [1, 2").unwrap();

        assert!(Config::load(Some(config_path)).is_err());
    }

    #[test]
    fn config_with_log_path_overrides_default() {
        let config = Config::default().with_log_path(PathBuf::from("/tmp/custom.json"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn config_default_log_path_ends_with_app_file() {
        let path = Config::default().log_path();
        assert!(path.ends_with("studyplan/study_log.json"));
    }

    #[test]
    fn reminder_zero_interval_is_clamped() {
        let reminder = ReminderConfig {
            interval_secs: 0,
            ..ReminderConfig::default()
        };
        assert_eq!(reminder.interval(), Duration::from_secs(1));
    }

    #[test]
    fn config_serializes_to_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();

        assert!(yaml.contains("interval_secs: 1800"));
        assert!(yaml.contains("urgent_within_days: 7"));
        assert!(!yaml.contains("log_path"));
    }
}

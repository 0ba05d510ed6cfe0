use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_entries: usize,
    pub history_file: Option<PathBuf>,
    pub keys: KeyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 100,
            history_file: None,
            keys: KeyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct KeyConfig {
    pub older: Vec<String>,
    pub newer: Vec<String>,
    pub cancel: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.apply_defaults();
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recall")
            .join("config.toml")
    }

    /// Where the history file lives: the configured override, or
    /// `<data_dir>/recall/command_history.txt`.
    pub fn history_path(&self) -> PathBuf {
        if let Some(path) = &self.history_file {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recall")
            .join("command_history.txt")
    }

    fn default_config() -> Self {
        let mut config = Config::default();
        config.apply_defaults();
        config
    }

    fn apply_defaults(&mut self) {
        if self.max_entries == 0 {
            self.max_entries = 1;
        }
        self.keys.apply_defaults();
    }
}

impl KeyConfig {
    pub(crate) fn apply_defaults(&mut self) {
        if self.older.is_empty() {
            self.older = vec!["Up".to_string(), "Ctrl-p".to_string()];
        }
        if self.newer.is_empty() {
            self.newer = vec!["Down".to_string(), "Ctrl-n".to_string()];
        }
        if self.cancel.is_empty() {
            self.cancel = vec!["Escape".to_string()];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fills_in_key_bindings() {
        let config = Config::default_config();

        assert_eq!(config.max_entries, 100);
        assert!(config.history_file.is_none());
        assert_eq!(config.keys.older, vec!["Up", "Ctrl-p"]);
        assert_eq!(config.keys.newer, vec!["Down", "Ctrl-n"]);
        assert_eq!(config.keys.cancel, vec!["Escape"]);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let mut config: Config = toml::from_str(
            r#"
max_entries = 25

[keys]
older = ["Ctrl-k"]
"#,
        )
        .unwrap();
        config.apply_defaults();

        assert_eq!(config.max_entries, 25);
        assert_eq!(config.keys.older, vec!["Ctrl-k"]);
        assert_eq!(config.keys.newer, vec!["Down", "Ctrl-n"]);
    }

    #[test]
    fn zero_max_entries_is_clamped() {
        let mut config: Config = toml::from_str("max_entries = 0").unwrap();
        config.apply_defaults();
        assert_eq!(config.max_entries, 1);
    }

    #[test]
    fn history_file_override_wins() {
        let mut config = Config::default_config();
        config.history_file = Some(PathBuf::from("/tmp/hist.txt"));
        assert_eq!(config.history_path(), PathBuf::from("/tmp/hist.txt"));
    }

    #[test]
    fn default_history_path_ends_with_crate_dir() {
        let config = Config::default_config();
        let path = config.history_path();
        assert!(path.ends_with("recall/command_history.txt"));
    }
}

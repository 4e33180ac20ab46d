use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = ".sbomscope.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub serve: ServeConfig,
    pub ui: UiPreferences,
}

/// Where the analysis artifacts live: a local results directory or an HTTP
/// endpoint serving the same layout. A root given on the command line wins
/// over both.
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    pub root: Option<PathBuf>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub port: u16,
    pub open_browser: bool,
}

/// Dashboard preferences persisted across sessions via `/api/prefs`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UiPreferences {
    pub font_size: u32,
    pub node_spacing: u32,
    pub vulnerable_only: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawConfig {
    source: Option<RawSource>,
    serve: Option<RawServe>,
    ui: Option<RawUi>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawSource {
    root: Option<PathBuf>,
    base_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawServe {
    port: Option<u16>,
    open: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawUi {
    font_size: Option<u32>,
    node_spacing: Option<u32>,
    vulnerable_only: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            serve: ServeConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 8675,
            open_browser: true,
        }
    }
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            font_size: 14,
            node_spacing: 100,
            vulnerable_only: false,
        }
    }
}

impl Config {
    /// Load `.sbomscope.toml` from the given directory, falling back to
    /// defaults when the file does not exist.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let raw: RawConfig = toml::from_str(&content)?;

        let source = match raw.source {
            Some(s) => SourceConfig {
                root: s.root,
                base_url: s.base_url,
            },
            None => SourceConfig::default(),
        };

        let serve = match raw.serve {
            Some(s) => ServeConfig {
                port: s.port.unwrap_or(8675),
                open_browser: s.open.unwrap_or(true),
            },
            None => ServeConfig::default(),
        };

        let ui = match raw.ui {
            Some(u) => UiPreferences {
                font_size: u.font_size.unwrap_or(14),
                node_spacing: u.node_spacing.unwrap_or(100),
                vulnerable_only: u.vulnerable_only.unwrap_or(false),
            },
            None => UiPreferences::default(),
        };

        Ok(Self { source, serve, ui })
    }

    /// Write the full config back, preserving every section. This is the
    /// single save path; `/api/prefs` funnels through it.
    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let raw = RawConfig {
            source: Some(RawSource {
                root: self.source.root.clone(),
                base_url: self.source.base_url.clone(),
            }),
            serve: Some(RawServe {
                port: Some(self.serve.port),
                open: Some(self.serve.open_browser),
            }),
            ui: Some(RawUi {
                font_size: Some(self.ui.font_size),
                node_spacing: Some(self.ui.node_spacing),
                vulnerable_only: Some(self.ui.vulnerable_only),
            }),
        };
        let content = toml::to_string_pretty(&raw)?;
        std::fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }
}

/// Starter config written by `sbomscope init`.
pub fn generate_config_template() -> String {
    r#"# sbomscope configuration

[source]
# Local results directory holding directory.json and per-project folders.
# root = "/data/sbom-results"
# Or an HTTP endpoint serving the same layout.
# base_url = "https://sbom.example.com/results"

[serve]
port = 8675
open = true

[ui]
font_size = 14
node_spacing = 100
vulnerable_only = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), generate_config_template()).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.serve.port, 8675);
        assert!(config.source.root.is_none());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.serve.port, 8675);
        assert_eq!(config.ui.node_spacing, 100);
        assert!(config.source.root.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[source]\nroot = \"/data/results\"\n\n[serve]\nport = 9000\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(
            config.source.root.as_deref(),
            Some(Path::new("/data/results"))
        );
        assert_eq!(config.serve.port, 9000);
        assert!(config.serve.open_browser);
        assert_eq!(config.ui.font_size, 14);
    }

    #[test]
    fn save_round_trips_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.ui.node_spacing = 250;
        config.ui.vulnerable_only = true;
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.ui.node_spacing, 250);
        assert!(loaded.ui.vulnerable_only);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not [ toml").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}

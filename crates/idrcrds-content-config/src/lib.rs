use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the content document lives inside a site checkout.
pub const DEFAULT_CONTENT_FILE: &str = "data/site-content.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config file at {config_path}: {source}")]
    Write {
        config_path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the site checkout. `~` and `$VARS` are expanded on load.
    pub site_root: PathBuf,
    /// Content document relative to `site_root`, [`DEFAULT_CONTENT_FILE`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_file: Option<RelativePathBuf>,
}

impl Config {
    pub fn new(site_root: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
            content_file: None,
        }
    }

    /// Returns `Ok(None)` when no config file exists.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        config.site_root = Self::expand_path(&config.site_root).unwrap_or(config.site_root);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), ConfigError> {
        let config_path = config_path.as_ref();
        let write_error = |source| ConfigError::Write {
            config_path: config_path.to_path_buf(),
            source,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content).map_err(write_error)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/idrcrds-content");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn content_file(&self) -> &RelativePath {
        self.content_file
            .as_deref()
            .unwrap_or_else(|| RelativePath::new(DEFAULT_CONTENT_FILE))
    }

    /// Absolute (or root-relative) path of the content document.
    pub fn content_path(&self) -> PathBuf {
        self.content_file().to_path(&self.site_root)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/idrcrds-content/config.toml"));
    }

    #[test]
    fn test_content_path_defaults_to_data_dir() {
        let config = Config::new("/srv/site");
        assert_eq!(
            config.content_path(),
            PathBuf::from("/srv/site/data/site-content.txt")
        );
    }

    #[test]
    fn test_content_path_uses_configured_file() {
        let config = Config {
            site_root: PathBuf::from("/srv/site"),
            content_file: Some(RelativePathBuf::from("copy/content.txt")),
        };
        assert_eq!(
            config.content_path(),
            PathBuf::from("/srv/site/copy/content.txt")
        );
    }

    #[test]
    fn test_content_file_is_optional_in_toml() {
        let config: Config = toml::from_str(r#"site_root = "/srv/site""#).unwrap();
        assert_eq!(config.content_file, None);
        assert_eq!(config.content_file(), RelativePath::new(DEFAULT_CONTENT_FILE));

        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("content_file"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/sites/idrcrds")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("sites/idrcrds"));
    }

    #[test]
    fn test_expand_path_leaves_plain_paths_alone() {
        for path in ["/absolute/site", "relative/site"] {
            assert_eq!(Config::expand_path(Path::new(path)), Some(PathBuf::from(path)));
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from_path(temp_dir.path().join("nonexistent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "site_root = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let config = Config {
            site_root: PathBuf::from("/tmp/idrcrds-site"),
            content_file: Some(RelativePathBuf::from("content/site.txt")),
        };

        config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_site_root_env_var_expanded_on_load() {
        unsafe {
            env::set_var("IDRCRDS_TEST_SITE", "/custom/site");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "site_root = \"$IDRCRDS_TEST_SITE/www\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.site_root, PathBuf::from("/custom/site/www"));
        assert_eq!(
            config.content_path(),
            PathBuf::from("/custom/site/www/data/site-content.txt")
        );

        unsafe {
            env::remove_var("IDRCRDS_TEST_SITE");
        }
    }
}

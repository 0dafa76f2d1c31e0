use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::ui::OutputFormat;

/// Overrides the config file location
pub const CONFIG_ENV: &str = "GETTING_STARTED_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSetting {
    #[default]
    Text,
    Json,
}

impl From<OutputSetting> for OutputFormat {
    fn from(setting: OutputSetting) -> Self {
        match setting {
            OutputSetting::Text => OutputFormat::Text,
            OutputSetting::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSetting,
    pub color: bool,
    /// Treat content warnings (placeholder media, unused buttons) as failures
    pub strict: bool,
    /// Content files checked by `validate` when none are given on the command line
    pub content_files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputSetting::Text,
            color: true,
            strict: false,
            content_files: Vec::new(),
        }
    }
}

impl Config {
    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        let path = config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file from {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing config file at {}", path.display()))?;

        // Relative content paths are relative to the config file.
        if let Some(base) = path.parent() {
            for file in &mut config.content_files {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }

        Ok(config)
    }
}

pub fn config_file_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir()
        .context("unable to determine user config directory")?
        .join("getting-started");

    Ok(config_dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.color);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "output = \"json\"\nstrict = true\ncontent_files = [\"welcome.toml\", \"/abs/extra.json\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output, OutputSetting::Json);
        assert!(config.strict);
        assert!(config.color);
        assert_eq!(
            config.content_files,
            vec![dir.path().join("welcome.toml"), PathBuf::from("/abs/extra.json")]
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output = 42\n").unwrap();
        let error = Config::load_from(&path).unwrap_err();
        assert!(format!("{error:#}").contains("parsing config file"));
    }

    #[test]
    #[serial]
    fn env_var_overrides_location() {
        let previous = env::var_os(CONFIG_ENV);
        // SAFETY: serialized with the other tests touching the environment.
        unsafe { env::set_var(CONFIG_ENV, "/tmp/custom-getting-started.toml") };
        let path = config_file_path().unwrap();
        match previous {
            Some(value) => unsafe { env::set_var(CONFIG_ENV, value) },
            None => unsafe { env::remove_var(CONFIG_ENV) },
        }
        assert_eq!(path, PathBuf::from("/tmp/custom-getting-started.toml"));
    }
}

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const DEFAULT_TEXT: &str = "Hello world!";
const DEFAULT_LINE_HEIGHT: i32 = 8;
const MAX_LINE_HEIGHT: i32 = 10_000;

/// Runtime configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The text to display.
    #[serde(default = "default_text")]
    pub text: String,

    /// Whether the animation starts running.
    #[serde(default = "default_running")]
    pub running: bool,

    /// The font height, in rows, the wave amplitude is scaled against.
    #[serde(default = "default_line_height")]
    pub line_height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self { text: default_text(), running: default_running(), line_height: default_line_height() }
    }
}

fn default_text() -> String {
    DEFAULT_TEXT.into()
}

fn default_running() -> bool {
    true
}

fn default_line_height() -> i32 {
    DEFAULT_LINE_HEIGHT
}

impl Config {
    /// Load the config from the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Reading(path.into(), e))?;
        Self::from_yaml(&contents)
    }

    /// Load the config from the default location, falling back to defaults if there's no file.
    pub fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            log::debug!("no config directory available, using defaults");
            return Ok(Self::default());
        };
        match Self::load(&path) {
            Err(ConfigError::Reading(_, e)) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// The default config file path.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wiggly").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty document is a valid, default config.
        let config: Self =
            if contents.trim().is_empty() { Self::default() } else { serde_yaml::from_str(contents)? };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_height <= 0 {
            return Err(ConfigError::InvalidLineHeight(self.line_height));
        }
        if self.line_height > MAX_LINE_HEIGHT {
            return Err(ConfigError::LineHeightTooLarge(self.line_height, MAX_LINE_HEIGHT));
        }
        Ok(())
    }
}

/// An error when loading the config.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading config file {0:?}: {1}")]
    Reading(PathBuf, std::io::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] serde_yaml::Error),

    #[error("line height must be positive, got {0}")]
    InvalidLineHeight(i32),

    #[error("line height {0} is larger than the maximum of {1}")]
    LineHeightTooLarge(i32, i32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn full_config() {
        let config = Config::from_yaml("text: hi there\nrunning: false\nline_height: 20\n").expect("invalid config");
        assert_eq!(config, Config { text: "hi there".into(), running: false, line_height: 20 });
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("  \n")]
    #[case::empty_map("{}")]
    fn defaults(#[case] input: &str) {
        let config = Config::from_yaml(input).expect("invalid config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_config() {
        let config = Config::from_yaml("running: false").expect("invalid config");
        assert_eq!(config.text, DEFAULT_TEXT);
        assert!(!config.running);
        assert_eq!(config.line_height, DEFAULT_LINE_HEIGHT);
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn bad_line_height(#[case] line_height: i32) {
        let result = Config::from_yaml(&format!("line_height: {line_height}"));
        assert!(matches!(result, Err(ConfigError::InvalidLineHeight(h)) if h == line_height));
    }

    #[rstest]
    #[case(10_001)]
    #[case(30_000_000)]
    fn line_height_too_large(#[case] line_height: i32) {
        let result = Config::from_yaml(&format!("line_height: {line_height}"));
        assert!(matches!(result, Err(ConfigError::LineHeightTooLarge(h, MAX_LINE_HEIGHT)) if h == line_height));
    }

    #[test]
    fn largest_line_height() {
        let config = Config::from_yaml("line_height: 10000").expect("invalid config");
        assert_eq!(config.line_height, MAX_LINE_HEIGHT);
    }

    #[test]
    fn unknown_keys() {
        let result = Config::from_yaml("speed: 3");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_explicit_file() {
        let result = Config::load(Path::new("/definitely/not/here/config.yaml"));
        assert!(matches!(result, Err(ConfigError::Reading(..))));
    }
}

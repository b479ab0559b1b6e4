//! INI-style configuration: `[Section]` headers, `key = value` lines, `#`
//! comments. Keys before the first header are globals.

use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error reading file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid value '{value}' for key '{key}'")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, value: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// Loads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Parses configuration text. Lines that are neither headers nor
    /// `key = value` pairs are ignored.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key)
            .or_else(|| self.get_global(key))
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    const SAMPLE: &str = r#"
# global defaults
min_level = warn

[Timber]
max_log_length = "120"
infer_tags =
"#;

    #[test]
    fn parses_sections_globals_and_quotes() {
        let config = Config::parse(SAMPLE);
        assert_eq!(config.get_global("min_level"), Some("warn"));
        assert_eq!(config.get("Timber", "max_log_length"), Some("120"));
        assert_eq!(config.get("Timber", "infer_tags"), Some(""));
        assert_eq!(config.get("Other", "max_log_length"), None);
    }

    #[test]
    fn non_empty_lookup_falls_back_to_globals() {
        let config = Config::parse(SAMPLE);
        assert_eq!(config.get_non_empty("Timber", "min_level"), Some("warn"));
        assert_eq!(config.get_non_empty("Timber", "infer_tags"), None);
    }

    #[test]
    fn unrecognized_lines_are_skipped() {
        let config = Config::parse("just text\n[Timber]\nnot a pair\nmin_level = info\n");
        assert!(config.globals.is_empty());
        assert_eq!(config.sections["Timber"].len(), 1);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/definitely/not/here.ini").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.ini"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("timber-config-{}.ini", std::process::id()));
        fs::write(&path, "[Timber]\nmin_level = error\n").unwrap();
        let config = Config::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(config.get("Timber", "min_level"), Some("error"));
    }
}

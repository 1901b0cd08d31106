//! Named grammar presets.
//!
//! A preset is a [`GrammarConfig`] under a short name, so `--preset ssh` can
//! stand in for four separate grammar flags.  Five presets are built in; more
//! can be defined in a TOML file:
//!
//! - Windows:  `%APPDATA%\confed\presets.toml`
//! - Linux:    `~/.config/confed/presets.toml` (or `$XDG_CONFIG_HOME`)
//! - macOS:    `~/Library/Application Support/confed/presets.toml`
//!
//! ```toml
//! [presets.ini]
//! assign = "="
//! comment = ";"
//! name_chars = "abcdefghijklmnopqrstuvwxyz_"
//!
//! [presets.hosts]
//! assign = ""        # whitespace separated
//! ```
//!
//! Missing fields fall back to the default grammar.  An empty string for
//! `assign` or `comment` means the dialect has none.  A user preset with the
//! same name as a built-in replaces it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use confed_core::grammar::config::ALPHANUMERICS;
use confed_core::GrammarConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for preset lookup and loading.
#[derive(Debug, Error)]
pub enum PresetError {
    /// No preset has this name.
    #[error("unknown preset {name:?} (available: {available})")]
    UnknownPreset { name: String, available: String },

    /// A file system I/O error occurred.
    #[error("I/O error reading presets at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse presets TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds more than one character where one is expected.
    #[error("preset {preset:?}: {field} must be empty or a single character, got {value:?}")]
    InvalidField {
        preset: String,
        field: &'static str,
        value: String,
    },
}

// ── File schema ───────────────────────────────────────────────────────────────

/// One `[presets.<name>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetEntry {
    #[serde(default = "default_assign")]
    pub assign: String,
    #[serde(default = "default_comment")]
    pub comment: String,
    #[serde(default = "default_name_chars")]
    pub name_chars: String,
    #[serde(default = "default_value_chars")]
    pub value_chars: String,
}

/// Top-level layout of the presets file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetsFile {
    #[serde(default)]
    pub presets: BTreeMap<String, PresetEntry>,
}

fn default_assign() -> String {
    optional_char_field(GrammarConfig::default().assign)
}

fn default_comment() -> String {
    optional_char_field(GrammarConfig::default().comment)
}

fn default_name_chars() -> String {
    GrammarConfig::default().name_chars
}

fn default_value_chars() -> String {
    GrammarConfig::default().value_chars
}

fn optional_char_field(ch: Option<char>) -> String {
    ch.map(String::from).unwrap_or_default()
}

impl Default for PresetEntry {
    fn default() -> Self {
        Self {
            assign: default_assign(),
            comment: default_comment(),
            name_chars: default_name_chars(),
            value_chars: default_value_chars(),
        }
    }
}

impl PresetEntry {
    /// Converts the file entry into a grammar.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::InvalidField`] if `assign` or `comment` is
    /// longer than one character.
    pub fn to_grammar(&self, preset: &str) -> Result<GrammarConfig, PresetError> {
        Ok(GrammarConfig::new(
            parse_char_field(preset, "assign", &self.assign)?,
            parse_char_field(preset, "comment", &self.comment)?,
            self.name_chars.clone(),
            self.value_chars.clone(),
        ))
    }
}

fn parse_char_field(
    preset: &str,
    field: &'static str,
    value: &str,
) -> Result<Option<char>, PresetError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(ch), None) => Ok(Some(ch)),
        _ => Err(PresetError::InvalidField {
            preset: preset.to_string(),
            field,
            value: value.to_string(),
        }),
    }
}

// ── Preset table ──────────────────────────────────────────────────────────────

/// All presets available to the CLI, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetTable {
    presets: BTreeMap<String, GrammarConfig>,
}

impl PresetTable {
    /// The built-in presets only.
    pub fn builtin() -> Self {
        let alnum = |extra: &str| format!("{ALPHANUMERICS}{extra}");
        let presets = [
            ("postgres", Some('='), Some('#'), alnum("_"), alnum("-.")),
            ("ssh", None, Some('#'), alnum(""), alnum("-_./,:@*")),
            ("sudo", Some('='), Some('#'), alnum("_"), alnum("-_./:,@ \t")),
            ("php", Some('='), Some(';'), alnum("_."), alnum("-_./:~|&\"'")),
            ("uwsgi", Some('='), Some('#'), alnum("-_"), alnum("-_./:%")),
        ]
        .into_iter()
        .map(|(name, assign, comment, names, values)| {
            (name.to_string(), GrammarConfig::new(assign, comment, names, values))
        })
        .collect();
        Self { presets }
    }

    /// The built-in presets overlaid with those defined in TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Parse`] for malformed TOML and
    /// [`PresetError::InvalidField`] for bad single-character fields.
    pub fn from_toml(text: &str) -> Result<Self, PresetError> {
        let file: PresetsFile = toml::from_str(text)?;
        let mut table = Self::builtin();
        for (name, entry) in file.presets {
            let grammar = entry.to_grammar(&name)?;
            if table.presets.insert(name.clone(), grammar).is_some() {
                warn!(preset = %name, "user preset replaces built-in preset");
            }
        }
        Ok(table)
    }

    /// Loads the built-ins plus the presets file at `path`.
    ///
    /// A missing file is not an error and yields the built-ins alone.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Io`] for file-system errors other than
    /// "not found", and the errors of [`PresetTable::from_toml`].
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loading user presets");
                Self::from_toml(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no user presets file");
                Ok(Self::builtin())
            }
            Err(source) => Err(PresetError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Looks up a preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::UnknownPreset`] listing the known names.
    pub fn get(&self, name: &str) -> Result<&GrammarConfig, PresetError> {
        self.presets
            .get(name)
            .ok_or_else(|| PresetError::UnknownPreset {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Presets in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GrammarConfig)> {
        self.presets.iter().map(|(name, g)| (name.as_str(), g))
    }
}

/// Resolves the default presets file path, if the platform has a config dir.
pub fn presets_file_path() -> Option<PathBuf> {
    platform_config_dir().map(|dir| dir.join("presets.toml"))
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("confed"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("confed")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("confed"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_five_presets() {
        let table = PresetTable::builtin();
        let names: Vec<_> = table.names().collect();
        assert_eq!(names, vec!["php", "postgres", "ssh", "sudo", "uwsgi"]);
    }

    #[test]
    fn test_ssh_preset_has_no_assign_char() {
        let table = PresetTable::builtin();
        let ssh = table.get("ssh").unwrap();
        assert_eq!(ssh.assign, None);
        assert_eq!(ssh.comment, Some('#'));
    }

    #[test]
    fn test_sudo_preset_allows_whitespace_values() {
        let table = PresetTable::builtin();
        assert!(table.get("sudo").unwrap().value_allows_whitespace());
    }

    #[test]
    fn test_builtin_presets_are_valid_grammars() {
        for (name, grammar) in PresetTable::builtin().iter() {
            assert!(grammar.validate().is_ok(), "preset {name} is invalid");
        }
    }

    #[test]
    fn test_unknown_preset_lists_available_names() {
        let err = PresetTable::builtin().get("nginx").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nginx"));
        assert!(msg.contains("postgres"));
    }

    #[test]
    fn test_toml_preset_fills_missing_fields_from_default() {
        // Arrange
        let text = r#"
            [presets.ini]
            comment = ";"
        "#;

        // Act
        let table = PresetTable::from_toml(text).unwrap();

        // Assert
        let ini = table.get("ini").unwrap();
        let default = GrammarConfig::default();
        assert_eq!(ini.assign, Some('='));
        assert_eq!(ini.comment, Some(';'));
        assert_eq!(ini.name_chars, default.name_chars);
        assert_eq!(ini.value_chars, default.value_chars);
    }

    #[test]
    fn test_toml_empty_assign_means_none() {
        let table = PresetTable::from_toml("[presets.hosts]\nassign = \"\"\n").unwrap();
        assert_eq!(table.get("hosts").unwrap().assign, None);
    }

    #[test]
    fn test_toml_preset_overrides_builtin() {
        let table = PresetTable::from_toml("[presets.ssh]\nassign = \"=\"\n").unwrap();
        assert_eq!(table.get("ssh").unwrap().assign, Some('='));
    }

    #[test]
    fn test_toml_multi_char_comment_is_rejected() {
        let result = PresetTable::from_toml("[presets.bad]\ncomment = \"//\"\n");
        assert!(matches!(
            result,
            Err(PresetError::InvalidField { field: "comment", .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = PresetTable::from_toml("[presets.bad\n");
        assert!(matches!(result, Err(PresetError::Parse(_))));
    }

    #[test]
    fn test_empty_toml_yields_builtins() {
        assert_eq!(PresetTable::from_toml("").unwrap(), PresetTable::builtin());
    }

    #[test]
    fn test_load_missing_file_yields_builtins() {
        let path = std::env::temp_dir().join("confed-no-such-dir").join("presets.toml");
        assert_eq!(PresetTable::load(&path).unwrap(), PresetTable::builtin());
    }

    #[test]
    fn test_presets_file_path_ends_with_presets_toml() {
        if let Some(path) = presets_file_path() {
            assert!(path.ends_with("confed/presets.toml") || path.ends_with("confed\\presets.toml"));
        }
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/xmlcfg/xmlcfg.toml`
//! 3. Local config: `<dir>/.xmlcfg.toml`
//! 4. Environment variables: `XMLCFG_*` prefix (`__` separates nested keys)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, IoResultExt, WriterOptions};
use crate::domain::{
    expand_env_vars, is_element_name, FormatOptions, NewlineHandling, DEFAULT_ROOT_NAME,
};

/// Raw format settings for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawFormatSettings {
    pub indent: Option<bool>,
    pub indent_char: Option<char>,
    pub indent_size: Option<usize>,
    pub newline_handling: Option<NewlineHandling>,
    pub newline: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_name: Option<String>,
    pub write_comment: Option<bool>,
    pub default_file: Option<PathBuf>,
    #[serde(default)]
    pub format: RawFormatSettings,
}

/// Unified configuration for xmlcfg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Name of the document's root element (default: "configuration")
    pub root_name: String,
    /// Emit the provenance comment (default: true)
    pub write_comment: bool,
    /// Target file used when `write` gets no explicit path
    pub default_file: Option<PathBuf>,
    /// Indentation and newline settings
    pub format: FormatOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            write_comment: true,
            default_file: None,
            format: FormatOptions::default(),
        }
    }
}

/// Get the XDG config directory for xmlcfg.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "xmlcfg").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("xmlcfg.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".xmlcfg.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Options for the configuration writer.
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            write_comment: self.write_comment,
            root_name: self.root_name.clone(),
            format: self.format.clone(),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(file) = &self.default_file {
            let expanded = expand_env_vars(file.to_string_lossy().as_ref());
            self.default_file = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base): specified values win.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let format = &overlay.format;
        Self {
            root_name: overlay
                .root_name
                .clone()
                .unwrap_or_else(|| self.root_name.clone()),
            write_comment: overlay.write_comment.unwrap_or(self.write_comment),
            default_file: overlay
                .default_file
                .clone()
                .or_else(|| self.default_file.clone()),
            format: FormatOptions {
                indent: format.indent.unwrap_or(self.format.indent),
                indent_char: format.indent_char.unwrap_or(self.format.indent_char),
                indent_size: format.indent_size.unwrap_or(self.format.indent_size),
                newline_handling: format
                    .newline_handling
                    .unwrap_or(self.format.newline_handling),
                newline: format
                    .newline
                    .clone()
                    .unwrap_or_else(|| self.format.newline.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.xmlcfg.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply XMLCFG_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        Self::apply_env_source(settings, None)
    }

    /// Apply overrides from `vars`, or from the process environment if `None`.
    fn apply_env_source(
        mut settings: Self,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("XMLCFG")
                .prefix_separator("_")
                .separator("__")
                .source(vars),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("root_name") {
            settings.root_name = val;
        }
        if let Ok(val) = config.get_bool("write_comment") {
            settings.write_comment = val;
        }
        if let Ok(val) = config.get_string("default_file") {
            settings.default_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("format.indent") {
            settings.format.indent = val;
        }
        if let Ok(val) = config.get_string("format.indent_char") {
            if let Some(c) = val.chars().next() {
                settings.format.indent_char = c;
            }
        }
        if let Ok(val) = config.get::<usize>("format.indent_size") {
            settings.format.indent_size = val;
        }
        if let Ok(val) = config.get_string("format.newline_handling") {
            settings.format.newline_handling = parse_newline_handling(&val)?;
        }
        if let Ok(val) = config.get_string("format.newline") {
            settings.format.newline = val;
        }

        Ok(settings)
    }

    /// Reject settings that cannot produce a well-formed document.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.root_name.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "root_name must not be empty".into(),
            });
        }
        if !is_element_name(&self.root_name) {
            return Err(ApplicationError::Config {
                message: format!("root_name '{}' is not a valid XML element name", self.root_name),
            });
        }
        if self.format.indent && !self.format.indent_char.is_ascii_whitespace() {
            return Err(ApplicationError::Config {
                message: format!(
                    "format.indent_char must be ASCII whitespace, got {:?}",
                    self.format.indent_char
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# xmlcfg configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/xmlcfg/xmlcfg.toml
#   Local:  <dir>/.xmlcfg.toml
#   Env:    XMLCFG_* environment variables, e.g. XMLCFG_FORMAT__INDENT_SIZE=4

# Root element of written documents
# root_name = "configuration"

# Write an "Auto generated ..." comment with timestamp
# write_comment = true

# Target file for `xmlcfg write` when no --file is given
# default_file = "~/app/appsettings.xml"

[format]
# indent = true
# indent_char = " "
# indent_size = 2

# "replace" normalizes line breaks in values to `newline`, "none" keeps them
# newline_handling = "replace"
# newline = "\n"
"#
        .to_string()
    }
}

fn parse_newline_handling(val: &str) -> Result<NewlineHandling, ApplicationError> {
    match val.to_ascii_lowercase().as_str() {
        "replace" => Ok(NewlineHandling::Replace),
        "none" => Ok(NewlineHandling::None),
        other => Err(ApplicationError::Config {
            message: format!("unknown newline_handling: {other}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

//! YAML configuration parsing for hotkey bindings
//!
//! Parses bindings.yaml files into `(keys, HotkeyOptions)` pairs ready for
//! registration. Entries can be restricted to one platform; mismatched
//! entries are dropped at parse time.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::options::{FormTagPolicy, HotkeyOptions, Trigger};
use crate::parse::{DEFAULT_DELIMITER, DEFAULT_SEQUENCE_SPLIT_KEY, DEFAULT_SPLIT_KEY};

/// Root structure of a bindings YAML file
#[derive(Debug, Deserialize)]
pub struct BindingsConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub keys: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub use_key: bool,
    #[serde(default)]
    pub keydown: Option<bool>,
    #[serde(default)]
    pub keyup: bool,
    #[serde(default)]
    pub prevent_default: bool,
    #[serde(default)]
    pub ignore_modifiers: bool,
    #[serde(default)]
    pub enable_on_form_tags: Option<FormTagsConfig>,
    #[serde(default)]
    pub enable_on_content_editable: bool,
    #[serde(default)]
    pub split_key: Option<char>,
    #[serde(default)]
    pub delimiter: Option<char>,
    #[serde(default)]
    pub sequence_split_key: Option<char>,
    #[serde(default)]
    pub sequence_timeout_ms: Option<u64>,
}

/// `enable_on_form_tags` accepts a bool or a tag list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FormTagsConfig {
    All(bool),
    Tags(Vec<String>),
}

impl BindingConfig {
    /// Resolve this entry into registration options
    pub fn options(&self) -> HotkeyOptions {
        let form_tags = match &self.enable_on_form_tags {
            None | Some(FormTagsConfig::All(false)) => FormTagPolicy::Disabled,
            Some(FormTagsConfig::All(true)) => FormTagPolicy::All,
            Some(FormTagsConfig::Tags(tags)) => FormTagPolicy::only(tags.clone()),
        };

        HotkeyOptions {
            enabled: Trigger::Bool(true),
            enable_on_form_tags: form_tags,
            enable_on_content_editable: self.enable_on_content_editable,
            scopes: self.scopes.clone(),
            keydown: self.keydown,
            keyup: self.keyup,
            prevent_default: Trigger::Bool(self.prevent_default),
            description: self.description.clone(),
            ignore_modifiers: self.ignore_modifiers,
            use_key: self.use_key,
            split_key: self.split_key.unwrap_or(DEFAULT_SPLIT_KEY),
            delimiter: self.delimiter.unwrap_or(DEFAULT_DELIMITER),
            sequence_split_key: self.sequence_split_key.unwrap_or(DEFAULT_SEQUENCE_SPLIT_KEY),
            sequence_timeout: self
                .sequence_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| HotkeyOptions::default().sequence_timeout),
            ..Default::default()
        }
    }
}

/// Load binding entries from a YAML file
pub fn load_bindings_file(path: &Path) -> Result<Vec<BindingConfig>, HotkeyError> {
    let content = std::fs::read_to_string(path).map_err(|e| HotkeyError::IoError(e.to_string()))?;

    parse_bindings_yaml(&content)
}

/// Parse binding entries from a YAML string
pub fn parse_bindings_yaml(yaml: &str) -> Result<Vec<BindingConfig>, HotkeyError> {
    let config: BindingsConfig =
        serde_yaml::from_str(yaml).map_err(|e| HotkeyError::ParseError(e.to_string()))?;

    let current_platform = get_current_platform();
    let mut bindings = Vec::new();

    for entry in config.bindings {
        // Skip if platform-specific and doesn't match current platform
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        if entry.keys.trim().is_empty() {
            return Err(HotkeyError::InvalidBinding(
                "binding has empty keys".to_string(),
            ));
        }

        bindings.push(entry);
    }

    Ok(bindings)
}

/// Get the current platform identifier
fn get_current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Errors that can occur when loading bindings
#[derive(Debug, Clone)]
pub enum HotkeyError {
    IoError(String),
    ParseError(String),
    InvalidBinding(String),
}

impl std::fmt::Display for HotkeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HotkeyError::IoError(e) => write!(f, "IO error: {}", e),
            HotkeyError::ParseError(e) => write!(f, "Parse error: {}", e),
            HotkeyError::InvalidBinding(b) => write!(f, "Invalid binding: {}", b),
        }
    }
}

impl std::error::Error for HotkeyError {}

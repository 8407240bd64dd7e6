// Declarative menu files
// Loaded from ~/.config/sheetmenu/menu.toml (or any .toml / .json path)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::options::MenuOptions;

/// One setting as declared in a menu file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingDecl {
    Text {
        name: String,
        #[serde(default)]
        default: String,
        #[serde(default)]
        description: String,
    },
    Checkbox {
        name: String,
        #[serde(default)]
        default: bool,
        #[serde(default)]
        description: String,
    },
    Dropdown {
        name: String,
        /// Allowed values. The first one is the default.
        values: Vec<String>,
        #[serde(default)]
        description: String,
    },
}

impl SettingDecl {
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::Checkbox { name, .. } | Self::Dropdown { name, .. } => name,
        }
    }
}

/// A whole menu: layout options plus the ordered settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuFile {
    #[serde(default)]
    pub options: MenuOptions,
    #[serde(default)]
    pub settings: Vec<SettingDecl>,
}

impl MenuFile {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let file: MenuFile = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.options.validate()?;
        Ok(file)
    }

    /// Parse JSON. Lines starting with `//` are treated as comments.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let cleaned: String = input
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        let file: MenuFile = serde_json::from_str(&cleaned).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.options.validate()?;
        Ok(file)
    }

    /// Load a menu file, picking the format from the extension (`.json` or TOML).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_toml(&contents)
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Write as TOML, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        fs::write(path, self.to_toml()?).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Default location of the menu file
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetmenu");
        config_dir.join("menu.toml")
    }
}

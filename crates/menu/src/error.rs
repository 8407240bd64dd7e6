use std::fmt;

use sheetmenu_config::ConfigError;

use crate::grid::GridError;

#[derive(Debug)]
pub enum MenuError {
    /// Two settings in one layout share a name.
    DuplicateSettingName(String),
    /// `get`/`set` named a setting the layout does not have.
    UnknownSettingName(String),
    /// A descriptor or option set that cannot be laid out (empty dropdown, zero header rows, ...).
    InvalidConfiguration(String),
    /// A menu file could not be read or parsed.
    Config(ConfigError),
    /// The grid surface failed. Passed through unchanged.
    Grid(GridError),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSettingName(name) => write!(f, "duplicate setting name: {name}"),
            Self::UnknownSettingName(name) => write!(f, "unknown setting: {name}"),
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for MenuError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ConfigError> for MenuError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Invalid(msg) => Self::InvalidConfiguration(msg),
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_grid_error_passes_through() {
        let err: MenuError = GridError::Protected { row: 2, col: 2 }.into();
        assert!(matches!(err, MenuError::Grid(GridError::Protected { row: 2, col: 2 })));
        assert_eq!(err.to_string(), "cell R2C2 is protected");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_invalid_maps_to_invalid_configuration() {
        let err: MenuError = ConfigError::Invalid("headerRows must be at least 1".into()).into();
        assert!(matches!(err, MenuError::InvalidConfiguration(_)));

        let err: MenuError = ConfigError::Parse("bad".into()).into();
        assert!(matches!(err, MenuError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            MenuError::UnknownSettingName("Z".into()).to_string(),
            "unknown setting: Z"
        );
        assert_eq!(
            MenuError::DuplicateSettingName("A".into()).to_string(),
            "duplicate setting name: A"
        );
    }
}

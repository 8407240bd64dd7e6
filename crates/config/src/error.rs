use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// TOML / JSON parse or deserialization error.
    Parse(String),
    /// A value parsed but is not usable (empty sheet name, zero header rows, ...).
    Invalid(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

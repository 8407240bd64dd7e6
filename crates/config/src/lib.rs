// Configuration loading

pub mod error;
pub mod menu_file;
pub mod options;

pub use error::ConfigError;
pub use menu_file::{MenuFile, SettingDecl};
pub use options::MenuOptions;

pub mod loader;
pub mod schema;

pub use loader::{load_from_path, load_from_str, locate, ConfigError, DEFAULT_CONFIG_FILE};
pub use schema::{Config, FormatterConfig, ValidationError, ValidationIssue};

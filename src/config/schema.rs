use crate::discover::FileFilter;
use crate::format::Formatter;
use crate::marker::MarkerSyntax;
use crate::sync::{SyncOptions, DEFAULT_REFERENCE};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Contents of `snippet-sync.toml`. Every field is optional.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Reference file or directory
    pub reference: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub markers: MarkerSyntax,
    pub formatter: FormatterConfig,
}

impl Default for Config {
    fn default() -> Self {
        let filter = FileFilter::default();
        Self {
            reference: None,
            extensions: filter.extensions,
            skip_dirs: filter.skip_dirs,
            markers: MarkerSyntax::default(),
            formatter: FormatterConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub command: String,
    pub args: Vec<String>,
    pub extensions: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        let rustfmt = Formatter::rustfmt();
        Self {
            enabled: true,
            command: rustfmt.command,
            args: rustfmt.args,
            extensions: rustfmt.extensions,
        }
    }
}

impl FormatterConfig {
    pub fn to_formatter(&self) -> Option<Formatter> {
        self.enabled.then(|| Formatter {
            command: self.command.clone(),
            args: self.args.clone(),
            extensions: self.extensions.clone(),
        })
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("markers.prefix", &self.markers.prefix),
            ("markers.open", &self.markers.open),
            ("markers.close", &self.markers.close),
        ] {
            if value.trim().is_empty() {
                issues.push(ValidationIssue::MissingField { field });
            } else if value.trim() != value || value.split_whitespace().count() != 1 {
                issues.push(ValidationIssue::NotSingleToken {
                    field,
                    value: value.clone(),
                });
            }
        }

        if !self.markers.open.is_empty()
            && self.markers.open.to_lowercase() == self.markers.close.to_lowercase()
        {
            issues.push(ValidationIssue::InvalidCombo {
                message: "markers.open and markers.close must differ".to_string(),
            });
        }

        if self.extensions.is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "extensions",
            });
        }
        for (field, list) in [
            ("extensions", &self.extensions),
            ("formatter.extensions", &self.formatter.extensions),
        ] {
            for ext in list {
                if ext.is_empty() || ext.starts_with('.') || ext.contains(char::is_whitespace) {
                    issues.push(ValidationIssue::InvalidExtension {
                        field,
                        value: ext.clone(),
                    });
                }
            }
        }

        if self.formatter.enabled && self.formatter.command.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "formatter.command",
            });
        }

        if let Some(reference) = &self.reference {
            if reference.as_os_str().is_empty() {
                issues.push(ValidationIssue::MissingField { field: "reference" });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Build run options; the mode is left at its default (check).
    pub fn to_options(&self) -> SyncOptions {
        let reference = self
            .reference
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REFERENCE));
        SyncOptions::new(reference)
            .with_syntax(self.markers.clone())
            .with_filter(FileFilter {
                extensions: self.extensions.clone(),
                skip_dirs: self.skip_dirs.clone(),
            })
            .with_formatter(self.formatter.to_formatter())
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingField { field: &'static str },
    NotSingleToken { field: &'static str, value: String },
    InvalidExtension { field: &'static str, value: String },
    InvalidCombo { message: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => {
                write!(f, "missing or empty field '{field}'")
            }
            ValidationIssue::NotSingleToken { field, value } => {
                write!(f, "field '{field}' must be a single token, got '{value}'")
            }
            ValidationIssue::InvalidExtension { field, value } => write!(
                f,
                "field '{field}' has invalid extension '{value}' (no dot, no whitespace)"
            ),
            ValidationIssue::InvalidCombo { message } => {
                write!(f, "invalid configuration: {message}")
            }
        }
    }
}

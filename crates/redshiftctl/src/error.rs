//! Error types for redshiftctl
//!
//! Core and configuration errors are mapped onto [`RedshiftCtlError`], which
//! knows how to print itself as a cargo-style diagnostic with tips.

use colored::Colorize;
use redshiftctl_core::{ApiError, ConfigError, CoreError};
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: Profile 'prod' not found
///
///   tip: List available profiles: redshiftctl profile list
/// ```
pub struct CliDiagnostic {
    message: String,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    /// Start a new error diagnostic with the given message.
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            tips: Vec::new(),
        }
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Render without color; used by `print` and tests
    pub fn render(&self) -> String {
        let mut out = format!("error: {}\n", self.message);
        for (description, commands) in &self.tips {
            out.push_str(&format!("\n  tip: {}\n", description));
            for cmd in commands {
                out.push_str(&format!("      {}\n", cmd));
            }
        }
        out
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the redshiftctl application
#[derive(Error, Debug)]
pub enum RedshiftCtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    /// Service error, shown exactly as the service reported it
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    #[error("{message}")]
    NameResolution { message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("{message}")]
    Client { message: String },

    #[error("Confirmation required: {message}")]
    Confirmation { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

/// Result type for redshiftctl operations
pub type Result<T> = std::result::Result<T, RedshiftCtlError>;

impl RedshiftCtlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            RedshiftCtlError::ProfileNotFound { name } => vec![
                "List available profiles: redshiftctl profile list".to_string(),
                format!(
                    "Create profile '{}': redshiftctl profile set {} --region <region>",
                    name, name
                ),
            ],
            RedshiftCtlError::Service { code, .. }
                if code.ends_with("NotFound") || code.ends_with("NotFoundFault") =>
            {
                vec![
                    "Verify the resource identifier is correct".to_string(),
                    "Check that you're using the correct profile and region".to_string(),
                ]
            }
            RedshiftCtlError::Service { code, .. }
                if code.starts_with("AccessDenied")
                    || code == "UnauthorizedOperation"
                    || code == "InvalidClientTokenId"
                    || code == "SignatureDoesNotMatch"
                    || code == "ExpiredToken" =>
            {
                vec![
                    "Check which credentials are in use: redshiftctl profile show <profile>"
                        .to_string(),
                    "Verify the IAM policy allows this Redshift action".to_string(),
                ]
            }
            RedshiftCtlError::NameResolution { .. } => vec![
                "Check the region: --region or redshiftctl profile show <profile>".to_string(),
                "Check any endpoint override: --endpoint-url".to_string(),
            ],
            RedshiftCtlError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the endpoint URL: redshiftctl profile show <profile>".to_string(),
            ],
            RedshiftCtlError::Timeout { .. } => vec![
                "Raise the limit with --timeout <seconds>".to_string(),
            ],
            RedshiftCtlError::Client { .. } => vec![
                "Set a region with --region or in a profile".to_string(),
                "Configure a profile: redshiftctl profile set <name> --region <region>"
                    .to_string(),
            ],
            RedshiftCtlError::Confirmation { .. } => vec![
                "Pass --force to run without a prompt".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Build the diagnostic printed for this error
    pub fn diagnostic(&self) -> CliDiagnostic {
        let mut diag = CliDiagnostic::error(&format!("{}", self));

        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion, &[]);
        }

        diag
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        self.diagnostic().print();
    }
}

impl From<CoreError> for RedshiftCtlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(ApiError::Service { code, message }) => {
                RedshiftCtlError::Service { code, message }
            }
            CoreError::Api(ApiError::Timeout { message }) => RedshiftCtlError::Timeout { message },
            CoreError::Api(ApiError::Transport { message }) => {
                RedshiftCtlError::ConnectionError { message }
            }
            CoreError::Api(ApiError::Other { message }) => RedshiftCtlError::Client { message },
            err @ CoreError::NameResolution { .. } => RedshiftCtlError::NameResolution {
                message: err.to_string(),
            },
            CoreError::Client(message) => RedshiftCtlError::Client { message },
            CoreError::Prompt(message) => RedshiftCtlError::Confirmation { message },
            CoreError::Serialization(err) => RedshiftCtlError::from(err),
        }
    }
}

impl From<ConfigError> for RedshiftCtlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => RedshiftCtlError::ProfileNotFound { name },
            other => RedshiftCtlError::Config(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for RedshiftCtlError {
    fn from(err: serde_json::Error) -> Self {
        RedshiftCtlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for RedshiftCtlError {
    fn from(err: std::io::Error) -> Self {
        RedshiftCtlError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for RedshiftCtlError {
    fn from(err: anyhow::Error) -> Self {
        RedshiftCtlError::Config(format!("{:#}", err))
    }
}

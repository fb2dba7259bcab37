//! Per-invocation parameter context
//!
//! A [`ParameterContext`] pairs the typed parameters of one operation with the
//! [`ExecutionSettings`] that decide which client handles the call. It is built
//! fresh for each invocation and is read-only once constructed.

use std::fmt;
use std::time::Duration;

/// Where the client should obtain AWS credentials
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub enum CredentialSource {
    /// The SDK default provider chain (environment, shared config, IMDS, ...)
    #[default]
    Default,
    /// A named profile from the shared AWS config files
    Profile(String),
    /// Explicit access keys
    Static {
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    },
}

impl CredentialSource {
    /// Short description for logs and `profile show`, never includes secrets
    pub fn describe(&self) -> String {
        match self {
            CredentialSource::Default => "default provider chain".to_string(),
            CredentialSource::Profile(name) => format!("shared profile '{}'", name),
            CredentialSource::Static { access_key_id, .. } => format!(
                "static keys ({}...)",
                access_key_id.chars().take(4).collect::<String>()
            ),
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Default => write!(f, "Default"),
            CredentialSource::Profile(name) => f.debug_tuple("Profile").field(name).finish(),
            CredentialSource::Static { session_token, .. } => f
                .debug_struct("Static")
                .field("access_key_id", &"<redacted>")
                .field("secret_access_key", &"<redacted>")
                .field("session_token", &session_token.as_ref().map(|_| "<redacted>"))
                .finish(),
        }
    }
}

/// Cross-cutting settings that select and tune the remote client
///
/// Two invocations with equal settings may share a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExecutionSettings {
    /// Region identifier, e.g. `us-east-1`. `None` lets the SDK resolve it.
    pub region: Option<String>,
    /// Endpoint override, e.g. a VPC endpoint or a local test server
    pub endpoint_url: Option<String>,
    pub credentials: CredentialSource,
    /// SDK attempt budget. `Some(1)` disables SDK retries.
    pub max_attempts: Option<u32>,
    /// Initial SDK retry backoff
    pub initial_backoff: Option<Duration>,
    /// Overall SDK operation timeout
    pub operation_timeout: Option<Duration>,
}

impl ExecutionSettings {
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = credentials;
        self
    }

    /// The endpoint the client will talk to, for diagnostics
    pub fn endpoint_description(&self) -> String {
        match (&self.endpoint_url, &self.region) {
            (Some(url), _) => url.clone(),
            (None, Some(region)) => format!("https://redshift.{}.amazonaws.com", region),
            (None, None) => "the default Redshift endpoint".to_string(),
        }
    }

    /// The region, for diagnostics
    pub fn region_description(&self) -> String {
        self.region
            .clone()
            .unwrap_or_else(|| "resolved from the environment".to_string())
    }
}

/// Typed parameters of one operation plus the settings it runs with
#[derive(Debug, Clone)]
pub struct ParameterContext<P> {
    params: P,
    execution: ExecutionSettings,
    force: bool,
}

impl<P> ParameterContext<P> {
    pub fn new(params: P, execution: ExecutionSettings) -> Self {
        Self {
            params,
            execution,
            force: false,
        }
    }

    /// Skip the confirmation prompt for mutating operations
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn execution(&self) -> &ExecutionSettings {
        &self.execution
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

/// Copy caller-provided list items into a fresh owned vector
pub(crate) fn copy_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

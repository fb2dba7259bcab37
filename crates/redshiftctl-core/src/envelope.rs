//! Uniform result wrapper for one operation invocation
//!
//! Every invocation yields an [`OutputEnvelope`] whose [`Outcome`] is exactly
//! one of success, captured failure, or cancellation. Callers decide what to
//! emit with [`OutputEnvelope::into_emission`].

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::operation::Operation;

/// Note key holding the AWS request id of the call
pub const REQUEST_ID_NOTE: &str = "RequestId";

/// Terminal state of an invocation
pub enum Outcome<O: Operation> {
    Succeeded {
        /// Primary payload; `None` for void operations
        payload: Option<O::Output>,
        /// Raw response, kept for `--full-response`
        response: O::Response,
        /// Identifier to emit instead of the payload, when requested
        pass_thru: Option<String>,
    },
    Failed(CoreError),
    /// The operator declined the confirmation prompt
    Cancelled,
}

impl<O: Operation> fmt::Debug for Outcome<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded {
                payload,
                response,
                pass_thru,
            } => f
                .debug_struct("Succeeded")
                .field("payload", payload)
                .field("response", response)
                .field("pass_thru", pass_thru)
                .finish(),
            Outcome::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
            Outcome::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// What a caller should emit for a finished invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    Value(Value),
    /// Pass-thru identifier
    Identifier(String),
    Nothing,
}

/// Which part of a successful response to emit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Payload,
    Response,
}

pub struct OutputEnvelope<O: Operation> {
    target: String,
    outcome: Outcome<O>,
    notes: BTreeMap<String, String>,
}

impl<O: Operation> OutputEnvelope<O> {
    pub fn new(target: impl Into<String>, outcome: Outcome<O>) -> Self {
        Self {
            target: target.into(),
            outcome,
            notes: BTreeMap::new(),
        }
    }

    pub fn succeeded(
        target: impl Into<String>,
        payload: Option<O::Output>,
        response: O::Response,
        pass_thru: Option<String>,
    ) -> Self {
        Self::new(
            target,
            Outcome::Succeeded {
                payload,
                response,
                pass_thru,
            },
        )
    }

    pub fn failed(target: impl Into<String>, error: CoreError) -> Self {
        Self::new(target, Outcome::Failed(error))
    }

    pub fn cancelled(target: impl Into<String>) -> Self {
        Self::new(target, Outcome::Cancelled)
    }

    #[must_use]
    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }

    pub fn operation(&self) -> &'static str {
        O::NAME
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn outcome(&self) -> &Outcome<O> {
        &self.outcome
    }

    pub fn notes(&self) -> &BTreeMap<String, String> {
        &self.notes
    }

    pub fn request_id(&self) -> Option<&str> {
        self.notes.get(REQUEST_ID_NOTE).map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.outcome, Outcome::Cancelled)
    }

    pub fn payload(&self) -> Option<&O::Output> {
        match &self.outcome {
            Outcome::Succeeded { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<&O::Response> {
        match &self.outcome {
            Outcome::Succeeded { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Resolve the envelope into what should be written to the caller
    ///
    /// A captured failure is returned as `Err` so it can be reported.
    pub fn into_emission(self, selection: Selection) -> Result<Emission> {
        match self.outcome {
            Outcome::Cancelled => Ok(Emission::Nothing),
            Outcome::Failed(err) => Err(err),
            Outcome::Succeeded {
                pass_thru: Some(identifier),
                ..
            } => Ok(Emission::Identifier(identifier)),
            Outcome::Succeeded {
                payload, response, ..
            } => match selection {
                Selection::Response => Ok(Emission::Value(serde_json::to_value(&response)?)),
                Selection::Payload => match payload {
                    Some(payload) => Ok(Emission::Value(serde_json::to_value(&payload)?)),
                    None => Ok(Emission::Nothing),
                },
            },
        }
    }
}

impl<O: Operation> fmt::Debug for OutputEnvelope<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputEnvelope")
            .field("operation", &O::NAME)
            .field("target", &self.target)
            .field("outcome", &self.outcome)
            .field("notes", &self.notes)
            .finish()
    }
}

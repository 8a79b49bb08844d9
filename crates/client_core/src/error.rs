//! Failure taxonomy for one classification attempt.

use thiserror::Error;

pub const FAILURE_PREFIX: &str = "Failed to process email";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// Blank draft at submit time. Never reaches the network.
    #[error("Please enter email content to process")]
    Validation,
    /// The request could not be sent or no response arrived.
    #[error("could not reach the classification service; check your connection and retry")]
    Transport { detail: String },
    #[error("classification service returned HTTP error status {status}{}", detail_suffix(.detail))]
    Service { status: u16, detail: Option<String> },
    #[error("classification service returned a malformed response: {0}")]
    MalformedResponse(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(" ({detail})"),
        None => String::new(),
    }
}

impl ProcessError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport {
            detail: err.to_string(),
        }
    }

    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::MalformedResponse(err.to_string())
    }

    /// Message rendered inline by the view once an attempt has failed.
    pub fn failure_message(&self) -> String {
        format!("{FAILURE_PREFIX}: {self}")
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

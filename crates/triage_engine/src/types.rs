use std::fmt;
use std::path::PathBuf;

pub type SubmissionId = u64;

/// File part of an outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
}

/// One analysis request: `text` is always sent, `file` only when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub text: String,
    pub file: Option<UploadFile>,
}

/// Decoded success body of the analysis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub classification: String,
    pub analysis: String,
    pub reply: String,
    pub confidence: Option<u8>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmissionCompleted {
        submission_id: SubmissionId,
        result: Result<AnalysisResponse, SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True when the service itself reported the failure.
    pub fn is_service_error(&self) -> bool {
        matches!(self.kind, FailureKind::Service { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Network,
    Timeout,
    HttpStatus(u16),
    UploadUnreadable,
    UploadTooLarge { max_bytes: u64, actual: u64 },
    ResponseTooLarge { max_bytes: u64 },
    MalformedResponse,
    /// Body carried an `error` marker. `status` is the HTTP status it came with.
    Service {
        status: u16,
        error: Option<String>,
        details: Option<String>,
    },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::UploadUnreadable => write!(f, "upload unreadable"),
            FailureKind::UploadTooLarge { max_bytes, actual } => {
                write!(f, "upload too large (max {max_bytes}, actual {actual})")
            }
            FailureKind::ResponseTooLarge { max_bytes } => {
                write!(f, "response too large (max {max_bytes})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Service { status, error, .. } => write!(
                f,
                "service error (status {status}): {}",
                error.as_deref().unwrap_or("unspecified")
            ),
        }
    }
}

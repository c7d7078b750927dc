use triage_logging::{triage_debug, triage_info};

use crate::{AnalysisResult, FileHandle, InputChannel};

pub type SubmissionId = u64;

/// Prompt shown when submit is triggered with nothing to analyze.
pub const VALIDATION_MESSAGE: &str =
    "Please provide either email text or an uploaded file to analyze.";
/// Shown for network, status and decoding failures.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Could not connect to the analysis server.";
/// Shown when the service reports an error without any message.
pub const APPLICATION_FAILURE_MESSAGE: &str =
    "The analysis service could not process the request.";

/// Request body captured at submit time. Later edits to the input never reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    /// Empty for a file submission.
    pub text: String,
    pub file: Option<FileHandle>,
}

impl SubmissionPayload {
    pub fn from_channel(channel: &InputChannel) -> Option<Self> {
        match channel {
            InputChannel::Empty => None,
            InputChannel::Text(content) => Some(Self {
                text: content.clone(),
                file: None,
            }),
            InputChannel::File(handle) => Some(Self {
                text: String::new(),
                file: Some(handle.clone()),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight(SubmissionId),
    Succeeded(AnalysisResult),
    Failed(String),
}

/// Why a settled request did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    /// Network, status, upload or decoding failure. `reason` is for logs only.
    Transport { reason: String },
    /// The service answered with an error marker.
    Application {
        error: Option<String>,
        details: Option<String>,
    },
}

impl SubmissionFailure {
    pub fn user_message(&self) -> String {
        match self {
            SubmissionFailure::Transport { .. } => TRANSPORT_FAILURE_MESSAGE.to_string(),
            SubmissionFailure::Application { error, details } => non_blank(details)
                .or_else(|| non_blank(error))
                .unwrap_or(APPLICATION_FAILURE_MESSAGE)
                .to_string(),
        }
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|message| !message.trim().is_empty())
}

/// Why `submit` declined to start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// Nothing to analyze.
    Validation,
    /// A request is already outstanding.
    Busy,
}

/// Single-flight request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionOrchestrator {
    state: SubmissionState,
    last_id: SubmissionId,
}

impl SubmissionOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, SubmissionState::InFlight(_))
    }

    /// Starts a submission for `channel`, returning the id and payload the
    /// transport must send exactly once.
    pub fn submit(
        &mut self,
        channel: &InputChannel,
    ) -> Result<(SubmissionId, SubmissionPayload), SubmitRejection> {
        if let SubmissionState::InFlight(pending) = self.state {
            triage_debug!("Submit ignored: submission {} still in flight", pending);
            return Err(SubmitRejection::Busy);
        }
        let payload = SubmissionPayload::from_channel(channel).ok_or(SubmitRejection::Validation)?;

        self.last_id += 1;
        let submission_id = self.last_id;
        self.state = SubmissionState::InFlight(submission_id);
        triage_info!(
            "Submission {} started (text_len={}, file={:?})",
            submission_id,
            payload.text.len(),
            payload.file.as_ref().map(|file| file.name.as_str())
        );
        Ok((submission_id, payload))
    }

    /// Applies a request outcome. Returns `false` if `submission_id` is not
    /// the outstanding request.
    pub fn settle(
        &mut self,
        submission_id: SubmissionId,
        outcome: Result<AnalysisResult, SubmissionFailure>,
    ) -> bool {
        if self.state != SubmissionState::InFlight(submission_id) {
            triage_debug!("Ignoring settlement for stale submission {}", submission_id);
            return false;
        }
        self.state = match outcome {
            Ok(result) => {
                triage_info!(
                    "Submission {} succeeded: {}",
                    submission_id,
                    result.classification
                );
                SubmissionState::Succeeded(result)
            }
            Err(failure) => {
                triage_info!("Submission {} failed: {:?}", submission_id, failure);
                SubmissionState::Failed(failure.user_message())
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_failure_prefers_details_then_error() {
        let both = SubmissionFailure::Application {
            error: Some("bad_input".into()),
            details: Some("empty file".into()),
        };
        assert_eq!(both.user_message(), "empty file");

        let error_only = SubmissionFailure::Application {
            error: Some("bad_input".into()),
            details: None,
        };
        assert_eq!(error_only.user_message(), "bad_input");

        let blank_details = SubmissionFailure::Application {
            error: Some("bad_input".into()),
            details: Some(" ".into()),
        };
        assert_eq!(blank_details.user_message(), "bad_input");

        let neither = SubmissionFailure::Application {
            error: None,
            details: Some("  ".into()),
        };
        assert_eq!(neither.user_message(), APPLICATION_FAILURE_MESSAGE);
    }

    #[test]
    fn ids_increase_across_submissions() {
        let mut orchestrator = SubmissionOrchestrator::new();
        let channel = InputChannel::Text("hello".into());
        let (first, _) = orchestrator.submit(&channel).unwrap();
        assert!(orchestrator.settle(first, Err(SubmissionFailure::Transport {
            reason: "refused".into()
        })));
        let (second, _) = orchestrator.submit(&channel).unwrap();
        assert!(second > first);
        assert!(!orchestrator.settle(first, Ok(AnalysisResult::default())));
        assert_eq!(orchestrator.state(), &SubmissionState::InFlight(second));
    }
}

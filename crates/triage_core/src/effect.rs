use std::time::Duration;

/// How long the "copied" acknowledgment stays visible.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenFilePicker,
    ShowValidationPrompt {
        message: String,
    },
    SendAnalysis {
        submission_id: crate::SubmissionId,
        payload: crate::SubmissionPayload,
    },
    CopyToClipboard {
        text: String,
    },
    ScheduleCopyAckReset {
        ack_id: u64,
        after: Duration,
    },
}

//! Triage core: pure state machine for the input channel and the submission lifecycle.
mod analysis;
mod channel;
mod effect;
mod msg;
mod state;
mod submission;
mod update;
mod view_model;

pub use analysis::{AnalysisResult, ClassificationTag, ConfidenceLevel};
pub use channel::{FileHandle, InputChannel, InputModeController, NO_FILE_LABEL};
pub use effect::{Effect, COPY_ACK_DURATION};
pub use msg::Msg;
pub use state::AppState;
pub use submission::{
    SubmissionFailure, SubmissionId, SubmissionOrchestrator, SubmissionPayload, SubmissionState,
    SubmitRejection, APPLICATION_FAILURE_MESSAGE, TRANSPORT_FAILURE_MESSAGE, VALIDATION_MESSAGE,
};
pub use update::update;
pub use view_model::{AnalysisView, AppViewModel, SubmissionView};

//! Triage engine: HTTP transport for analysis submissions.
mod decode;
mod engine;
mod submit;
mod types;

pub use decode::decode_response;
pub use engine::EngineHandle;
pub use submit::{
    ChannelEventSink, EventSink, ReqwestSubmitter, SubmitSettings, Submitter, FILE_FIELD,
    TEXT_FIELD,
};
pub use types::{
    AnalysisResponse, EngineEvent, FailureKind, SubmissionId, SubmitError, SubmitRequest,
    UploadFile,
};

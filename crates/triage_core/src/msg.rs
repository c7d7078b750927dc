#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the e-mail text box.
    TextEdited(String),
    /// User clicked the upload box; the platform should open its picker.
    UploadBoxClicked,
    /// Picker closed, with the chosen file or none.
    FilePicked(Option<crate::FileHandle>),
    /// Files are being dragged over the upload box.
    DragOver,
    /// Drag left the upload box without dropping.
    DragLeave,
    /// Files released over the upload box.
    Dropped(Vec<crate::FileHandle>),
    /// User clicked Analyze.
    SubmitClicked,
    /// Engine finished the request for a submission.
    AnalysisSettled {
        submission_id: crate::SubmissionId,
        outcome: Result<crate::AnalysisResult, crate::SubmissionFailure>,
    },
    /// User clicked Copy on the suggested reply.
    CopyReplyClicked,
    /// The "copied" acknowledgment timer elapsed.
    CopyAckExpired { ack_id: u64 },
    /// Periodic tick; the platform renders pending changes on it.
    Tick,
    NoOp,
}

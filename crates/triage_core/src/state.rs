use crate::submission::SubmitRejection;
use crate::view_model::{AnalysisView, AppViewModel, SubmissionView};
use crate::{
    AnalysisResult, InputModeController, SubmissionFailure, SubmissionId,
    SubmissionOrchestrator, SubmissionPayload, SubmissionState,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: InputModeController,
    submission: SubmissionOrchestrator,
    copy_ack: Option<u64>,
    last_ack_id: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &InputModeController {
        &self.input
    }

    pub fn submission(&self) -> &SubmissionState {
        self.submission.state()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            text: self.input.draft().to_string(),
            file_label: self.input.file_label().to_string(),
            drag_active: self.input.is_drag_active(),
            submit_enabled: !self.submission.is_in_flight(),
            submission: submission_view(self.submission.state()),
            copy_acknowledged: self.copy_ack.is_some(),
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn input_mut(&mut self) -> &mut InputModeController {
        &mut self.input
    }

    pub(crate) fn begin_submission(
        &mut self,
    ) -> Result<(SubmissionId, SubmissionPayload), SubmitRejection> {
        let started = self.submission.submit(self.input.channel())?;
        self.copy_ack = None;
        self.mark_dirty();
        Ok(started)
    }

    pub(crate) fn settle_submission(
        &mut self,
        submission_id: SubmissionId,
        outcome: Result<AnalysisResult, SubmissionFailure>,
    ) {
        if self.submission.settle(submission_id, outcome) {
            self.mark_dirty();
        }
    }

    /// Reply text available for copying, if a result is displayed.
    pub(crate) fn copyable_reply(&self) -> Option<String> {
        match self.submission.state() {
            SubmissionState::Succeeded(result) => Some(result.suggested_reply.clone()),
            _ => None,
        }
    }

    pub(crate) fn acknowledge_copy(&mut self) -> u64 {
        self.last_ack_id += 1;
        self.copy_ack = Some(self.last_ack_id);
        self.mark_dirty();
        self.last_ack_id
    }

    pub(crate) fn expire_copy_ack(&mut self, ack_id: u64) {
        if self.copy_ack == Some(ack_id) {
            self.copy_ack = None;
            self.mark_dirty();
        }
    }
}

fn submission_view(state: &SubmissionState) -> SubmissionView {
    match state {
        SubmissionState::Idle => SubmissionView::Idle,
        SubmissionState::InFlight(_) => SubmissionView::Loading,
        SubmissionState::Succeeded(result) => SubmissionView::Result(AnalysisView {
            classification: result.classification.clone(),
            tag: result.tag(),
            analysis: result.analysis.clone(),
            suggested_reply: result.suggested_reply.clone(),
            confidence: result.confidence,
            confidence_level: result.confidence_level(),
            keywords: result.keywords.clone(),
        }),
        SubmissionState::Failed(message) => SubmissionView::Error(message.clone()),
    }
}

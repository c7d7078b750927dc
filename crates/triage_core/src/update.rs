use triage_logging::triage_debug;

use crate::submission::SubmitRejection;
use crate::{AppState, Effect, Msg, COPY_ACK_DURATION, VALIDATION_MESSAGE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextEdited(content) => {
            if state.input_mut().set_text(content) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadBoxClicked => vec![Effect::OpenFilePicker],
        Msg::FilePicked(picked) => {
            let changed = match picked {
                Some(handle) => state.input_mut().set_file(handle),
                None => state.input_mut().clear_file(),
            };
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DragOver => {
            if state.input_mut().drag_over() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DragLeave => {
            if state.input_mut().drag_leave() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Dropped(files) => {
            if files.len() > 1 {
                triage_debug!("Drop carried {} files; keeping the first", files.len());
            }
            if state.input_mut().drop_files(files) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Ok((submission_id, payload)) => vec![Effect::SendAnalysis {
                submission_id,
                payload,
            }],
            Err(SubmitRejection::Validation) => vec![Effect::ShowValidationPrompt {
                message: VALIDATION_MESSAGE.to_string(),
            }],
            Err(SubmitRejection::Busy) => Vec::new(),
        },
        Msg::AnalysisSettled {
            submission_id,
            outcome,
        } => {
            state.settle_submission(submission_id, outcome);
            Vec::new()
        }
        Msg::CopyReplyClicked => match state.copyable_reply() {
            Some(text) => {
                let ack_id = state.acknowledge_copy();
                vec![
                    Effect::CopyToClipboard { text },
                    Effect::ScheduleCopyAckReset {
                        ack_id,
                        after: COPY_ACK_DURATION,
                    },
                ]
            }
            None => Vec::new(),
        },
        Msg::CopyAckExpired { ack_id } => {
            state.expire_copy_ack(ack_id);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

use std::io::{self, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use triage_core::{AnalysisResult, Effect, Msg, SubmissionFailure, SubmissionPayload};
use triage_engine::{
    AnalysisResponse, EngineEvent, EngineHandle, EventSink, FailureKind, SubmitError,
    SubmitRequest, SubmitSettings, UploadFile,
};
use triage_logging::{triage_debug, triage_info};

use super::ui::terminal::Terminal;

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Input(String),
    InputClosed,
    Msg(Msg),
}

/// Feeds engine completions back into the event loop as messages.
struct MsgSink {
    event_tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::SubmissionCompleted {
                submission_id,
                result,
            } => {
                let _ = self.event_tx.send(AppEvent::Msg(Msg::AnalysisSettled {
                    submission_id,
                    outcome: to_outcome(result),
                }));
            }
        }
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(settings: SubmitSettings, event_tx: mpsc::Sender<AppEvent>) -> io::Result<Self> {
        triage_info!("Analysis endpoint: {}", settings.endpoint);
        let sink = Arc::new(MsgSink {
            event_tx: event_tx.clone(),
        });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine, event_tx })
    }

    #[cfg(test)]
    pub fn with_submitter(
        submitter: Arc<dyn triage_engine::Submitter>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let sink = Arc::new(MsgSink {
            event_tx: event_tx.clone(),
        });
        let engine = EngineHandle::with_submitter(submitter, sink)?;
        Ok(Self { engine, event_tx })
    }

    pub fn run<W: Write>(&self, effects: Vec<Effect>, terminal: &mut Terminal<W>) {
        for effect in effects {
            match effect {
                Effect::OpenFilePicker => terminal.open_picker(),
                Effect::ShowValidationPrompt { message } => terminal.alert(&message),
                Effect::SendAnalysis {
                    submission_id,
                    payload,
                } => {
                    self.engine.submit(submission_id, to_request(payload));
                }
                Effect::CopyToClipboard { text } => {
                    triage_debug!("Copying reply ({} chars)", text.chars().count());
                    terminal.copy_to_clipboard(&text);
                }
                Effect::ScheduleCopyAckReset { ack_id, after } => {
                    let event_tx = self.event_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = event_tx.send(AppEvent::Msg(Msg::CopyAckExpired { ack_id }));
                    });
                }
            }
        }
    }
}

fn to_request(payload: SubmissionPayload) -> SubmitRequest {
    SubmitRequest {
        text: payload.text,
        file: payload.file.map(|handle| UploadFile {
            path: handle.path,
            name: handle.name,
        }),
    }
}

fn to_outcome(
    result: Result<AnalysisResponse, SubmitError>,
) -> Result<AnalysisResult, SubmissionFailure> {
    match result {
        Ok(response) => Ok(AnalysisResult {
            classification: response.classification,
            analysis: response.analysis,
            suggested_reply: response.reply,
            confidence: response.confidence,
            keywords: response.keywords,
        }),
        Err(SubmitError {
            kind: FailureKind::Service { error, details, .. },
            ..
        }) => Err(SubmissionFailure::Application { error, details }),
        Err(err) => Err(SubmissionFailure::Transport {
            reason: err.to_string(),
        }),
    }
}

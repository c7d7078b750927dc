use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use triage_logging::{triage_error, triage_info, triage_warn};

use crate::submit::{EventSink, ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{EngineEvent, FailureKind, SubmissionId, SubmitError, SubmitRequest};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        request: SubmitRequest,
    },
}

/// Runs submissions on a background tokio runtime and reports each outcome
/// to the sink exactly once.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_submitter(Arc::new(ReqwestSubmitter::new(settings)), sink)
    }

    pub fn with_submitter(
        submitter: Arc<dyn Submitter>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        let engine_sink = sink.clone();
        thread::Builder::new()
            .name("triage-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    runtime.spawn(supervise(submitter.clone(), command, engine_sink.clone()));
                }
            })?;

        Ok(Self { cmd_tx, sink })
    }

    pub fn submit(&self, submission_id: SubmissionId, request: SubmitRequest) {
        if self
            .cmd_tx
            .send(EngineCommand::Submit {
                submission_id,
                request,
            })
            .is_err()
        {
            triage_warn!("Engine stopped; submission {} dropped", submission_id);
            report_lost(self.sink.as_ref(), submission_id, "engine stopped");
        }
    }
}

/// Runs one command as its own task so a panicking submitter still settles.
async fn supervise(
    submitter: Arc<dyn Submitter>,
    command: EngineCommand,
    sink: Arc<dyn EventSink>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            request,
        } => {
            let task_sink = sink.clone();
            let task = tokio::spawn(async move {
                run_submission(submitter.as_ref(), submission_id, request, task_sink.as_ref())
                    .await;
            });
            if let Err(err) = task.await {
                triage_error!("Submission {} aborted: {}", submission_id, err);
                report_lost(sink.as_ref(), submission_id, "submission task aborted");
            }
        }
    }
}

async fn run_submission(
    submitter: &dyn Submitter,
    submission_id: SubmissionId,
    request: SubmitRequest,
    sink: &dyn EventSink,
) {
    triage_info!(
        "Submitting {} (text_len={}, file={:?})",
        submission_id,
        request.text.len(),
        request.file.as_ref().map(|file| file.name.as_str())
    );
    let result = submitter.submit(&request).await;
    if let Err(err) = &result {
        triage_warn!("Submission {} failed: {}", submission_id, err);
    }
    sink.emit(EngineEvent::SubmissionCompleted {
        submission_id,
        result,
    });
}

fn report_lost(sink: &dyn EventSink, submission_id: SubmissionId, reason: &str) {
    sink.emit(EngineEvent::SubmissionCompleted {
        submission_id,
        result: Err(SubmitError::new(FailureKind::Network, reason)),
    });
}

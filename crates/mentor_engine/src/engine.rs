use std::sync::{mpsc, Arc};
use std::thread;

use mentor_core::{AttachedFile, RequestId};
use mentor_logging::{mentor_debug, mentor_info};

use crate::{BackendClient, BackendSettings, EngineError, EngineEvent, EventSink, ReqwestBackend};

enum EngineCommand {
    Probe {
        request_id: RequestId,
    },
    Submit {
        request_id: RequestId,
        query: String,
        file: AttachedFile,
    },
}

/// Runs backend calls on a background runtime and reports through an [`EventSink`].
///
/// Every command becomes its own task, so a probe and a submission can be in
/// flight together. Dropping the handle stops the runtime; results that were
/// still pending are never emitted.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: &BackendSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let backend = ReqwestBackend::new(settings)?;
        Self::with_backend(Arc::new(backend), sink)
    }

    pub fn with_backend(
        backend: Arc<dyn BackendClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("mentor-engine")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, sink.as_ref()).await;
                });
            }
            mentor_debug!("Engine command channel closed; shutting down runtime");
            runtime.shutdown_background();
        });

        Ok(Self { cmd_tx })
    }

    pub fn probe(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Probe { request_id });
    }

    pub fn submit(&self, request_id: RequestId, query: impl Into<String>, file: AttachedFile) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            query: query.into(),
            file,
        });
    }
}

async fn handle_command(backend: &dyn BackendClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Probe { request_id } => {
            let outcome = backend.probe().await;
            mentor_info!("Probe request_id={} outcome={:?}", request_id, outcome);
            sink.emit(EngineEvent::ProbeCompleted {
                request_id,
                outcome,
            });
        }
        EngineCommand::Submit {
            request_id,
            query,
            file,
        } => {
            let outcome = backend.submit(&query, &file).await;
            mentor_info!(
                "Submission request_id={} settled as {}",
                request_id,
                outcome_label(&outcome)
            );
            sink.emit(EngineEvent::SubmissionCompleted {
                request_id,
                outcome,
            });
        }
    }
}

fn outcome_label(outcome: &mentor_core::SubmissionOutcome) -> &'static str {
    use mentor_core::SubmissionOutcome;
    match outcome {
        SubmissionOutcome::Answered { .. } => "answered",
        SubmissionOutcome::Rejected { .. } => "rejected",
        SubmissionOutcome::Offline => "offline",
        SubmissionOutcome::BackendUnreachable { .. } => "unreachable",
        SubmissionOutcome::Failed { .. } => "failed",
    }
}

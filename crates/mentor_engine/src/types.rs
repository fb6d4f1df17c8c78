use std::path::PathBuf;
use std::sync::mpsc;

use mentor_core::{ProbeOutcome, RequestId, SubmissionOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProbeCompleted {
        request_id: RequestId,
        outcome: ProbeOutcome,
    },
    SubmissionCompleted {
        request_id: RequestId,
        outcome: SubmissionOutcome,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid backend url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("could not read {}: {source}", .path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid reply from backend: {0}")]
    Reply(#[source] serde_json::Error),
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        // Receiver gone means the view was torn down; drop the result.
        let _ = self.tx.send(event);
    }
}

use std::sync::Arc;

use mentor_core::{AttachedFile, ProbeOutcome, SubmissionOutcome};
use mentor_logging::{mentor_debug, mentor_info};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::Deserialize;

use crate::{BackendSettings, EngineError, OfflineDetector, RouteOfflineDetector};

const PROCESS_PATH: &str = "process";

#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    /// Reachability check against the backend root.
    async fn probe(&self) -> ProbeOutcome;

    /// Uploads `file` with `query` and classifies the reply.
    async fn submit(&self, query: &str, file: &AttachedFile) -> SubmissionOutcome;
}

/// Body of `/process`; success carries `response`, failure carries `error`.
#[derive(Debug, Deserialize)]
struct ProcessReply {
    response: Option<String>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    root: Url,
    process: Url,
    offline: Arc<dyn OfflineDetector>,
}

impl std::fmt::Debug for ReqwestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestBackend")
            .field("root", &self.root.as_str())
            .finish_non_exhaustive()
    }
}

impl ReqwestBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, EngineError> {
        Self::with_offline_detector(settings, Arc::new(RouteOfflineDetector))
    }

    pub fn with_offline_detector(
        settings: &BackendSettings,
        offline: Arc<dyn OfflineDetector>,
    ) -> Result<Self, EngineError> {
        let root = parse_root(&settings.base_url)?;
        let process = root
            .join(PROCESS_PATH)
            .map_err(|source| EngineError::InvalidBaseUrl {
                url: settings.base_url.clone(),
                source,
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(EngineError::Client)?;

        Ok(Self {
            client,
            root,
            process,
            offline,
        })
    }

    async fn try_submit(
        &self,
        query: &str,
        file: &AttachedFile,
    ) -> Result<SubmissionOutcome, EngineError> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|source| EngineError::Attachment {
                path: file.path.clone(),
                source,
            })?;
        mentor_debug!("Read attachment {} ({} bytes)", file.name, bytes.len());

        let form = Form::new()
            .part("zip", Part::bytes(bytes).file_name(file.name.clone()))
            .text("query", query.to_string());

        let response = match self
            .client
            .post(self.process.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return Ok(self.classify_transport_error(err)),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return Ok(self.classify_transport_error(err)),
        };
        mentor_info!("POST {} -> {} ({} bytes)", self.process, status, body.len());

        let reply = match serde_json::from_slice::<ProcessReply>(&body) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Ok(SubmissionOutcome::Rejected {
                    status: status.as_u16(),
                    message: None,
                });
            }
            Err(err) => return Err(EngineError::Reply(err)),
        };

        Ok(match reply {
            ProcessReply {
                response: Some(response),
                ..
            } if status.is_success() => SubmissionOutcome::Answered { response },
            ProcessReply { error, .. } => SubmissionOutcome::Rejected {
                status: status.as_u16(),
                message: error,
            },
        })
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> SubmissionOutcome {
        if self.offline.is_offline() {
            return SubmissionOutcome::Offline;
        }
        if err.is_connect() {
            return SubmissionOutcome::BackendUnreachable {
                detail: error_chain(&err),
            };
        }
        if err.is_timeout() {
            return SubmissionOutcome::Failed {
                message: "The request to the server timed out. Please try again.".to_string(),
            };
        }
        SubmissionOutcome::Failed {
            message: error_chain(&err),
        }
    }
}

#[async_trait::async_trait]
impl BackendClient for ReqwestBackend {
    async fn probe(&self) -> ProbeOutcome {
        let result = self
            .client
            .get(self.root.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => ProbeOutcome::Reachable,
            Ok(response) => ProbeOutcome::Unreachable {
                reason: format!("Backend returned status {}", response.status()),
            },
            Err(err) => ProbeOutcome::Unreachable {
                reason: error_chain(&err),
            },
        }
    }

    async fn submit(&self, query: &str, file: &AttachedFile) -> SubmissionOutcome {
        match self.try_submit(query, file).await {
            Ok(outcome) => outcome,
            Err(err) => SubmissionOutcome::Failed {
                message: err.to_string(),
            },
        }
    }
}

fn parse_root(base_url: &str) -> Result<Url, EngineError> {
    let mut root = Url::parse(base_url).map_err(|source| EngineError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;
    // Joining `process` must append to the path, not replace its last segment.
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    Ok(root)
}

/// reqwest's top-level message hides the cause; include the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

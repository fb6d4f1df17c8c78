use url::Url;

pub const MISSING_FILE: &str = "Please select a zip file";
pub const OFFLINE: &str =
    "Your internet connection appears to be offline. Please check your connection and try again.";
pub const GENERIC_BACKEND_ERROR: &str = "Something went wrong";
pub const GENERIC_FAILURE: &str = "Failed to process the request. Please try again.";
pub const COPY_CONFIRMATION: &str = "Response copied to clipboard!";

/// Result of a reachability probe against the backend root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable { reason: String },
}

/// Classified result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Backend answered with a `response` string.
    Answered { response: String },
    /// Backend was reached but refused or failed the request.
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// The client has no network route at all.
    Offline,
    /// The connection to the backend itself failed.
    BackendUnreachable { detail: String },
    /// Anything else.
    Failed { message: String },
}

impl SubmissionOutcome {
    /// User-facing error text, or `None` for a successful answer.
    pub fn error_message(&self, backend_url: &str) -> Option<String> {
        match self {
            SubmissionOutcome::Answered { .. } => None,
            SubmissionOutcome::Rejected { message, .. } => Some(
                message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or(GENERIC_BACKEND_ERROR)
                    .to_string(),
            ),
            SubmissionOutcome::Offline => Some(OFFLINE.to_string()),
            SubmissionOutcome::BackendUnreachable { .. } => {
                Some(unreachable_message(backend_url))
            }
            SubmissionOutcome::Failed { message } => Some(if message.is_empty() {
                GENERIC_FAILURE.to_string()
            } else {
                message.clone()
            }),
        }
    }
}

pub(crate) fn unreachable_message(backend_url: &str) -> String {
    match Url::parse(backend_url)
        .ok()
        .and_then(|url| url.port_or_known_default())
    {
        Some(port) => format!(
            "Cannot connect to the server. Please make sure the backend is running on port {port} and try again."
        ),
        None => format!(
            "Cannot connect to the server. Please make sure the backend is running at {backend_url} and try again."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_message_names_the_port() {
        assert_eq!(
            unreachable_message("http://127.0.0.1:5000"),
            "Cannot connect to the server. Please make sure the backend is running on port 5000 and try again."
        );
        assert!(unreachable_message("https://mentor.example.com").contains("port 443"));
        assert!(unreachable_message("not a url").contains("running at not a url"));
    }

    #[test]
    fn rejected_without_message_falls_back() {
        let outcome = SubmissionOutcome::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(
            outcome.error_message("http://127.0.0.1:5000").as_deref(),
            Some(GENERIC_BACKEND_ERROR)
        );
    }

    #[test]
    fn empty_failure_uses_generic_text() {
        let outcome = SubmissionOutcome::Failed {
            message: String::new(),
        };
        assert_eq!(outcome.error_message("").as_deref(), Some(GENERIC_FAILURE));
    }
}

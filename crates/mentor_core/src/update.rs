use mentor_logging::{mentor_debug, mentor_info, mentor_warn};

use crate::outcome::MISSING_FILE;
use crate::{AppState, Effect, Msg, ProbeOutcome, SubmissionOutcome, COPY_CONFIRMATION};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.mount() {
                let request_id = state.begin_probe();
                vec![Effect::Probe { request_id }]
            } else {
                Vec::new()
            }
        }
        Msg::Unmounted => {
            if state.is_mounted() {
                state.unmount();
            }
            Vec::new()
        }
        Msg::QueryChanged(query) => {
            state.clear_notice();
            state.set_query(query);
            Vec::new()
        }
        Msg::FileSelected(file) => {
            state.clear_notice();
            state.set_file(file);
            Vec::new()
        }
        Msg::RetryClicked => {
            if state.connectivity().is_checking() {
                return (state, Vec::new());
            }
            state.clear_notice();
            state.connectivity_mut().mark_checking();
            let request_id = state.begin_probe();
            vec![Effect::Probe { request_id }]
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::CopyClicked => {
            if state.response().is_empty() {
                Vec::new()
            } else {
                vec![Effect::CopyToClipboard {
                    text: state.response().to_string(),
                }]
            }
        }
        Msg::ProbeCompleted {
            request_id,
            outcome,
        } => {
            if !state.settle_probe(request_id) {
                mentor_debug!("Ignoring stale probe result request_id={}", request_id);
                return (state, Vec::new());
            }
            match outcome {
                ProbeOutcome::Reachable => {
                    state.connectivity_mut().mark_connected();
                    state.clear_error();
                }
                ProbeOutcome::Unreachable { reason } => {
                    mentor_warn!("Backend connection error: {}", reason);
                    state.connectivity_mut().mark_error();
                }
            }
            Vec::new()
        }
        Msg::SubmissionCompleted {
            request_id,
            outcome,
        } => {
            if !state.settle_submission(request_id) {
                mentor_debug!(
                    "Ignoring stale submission result request_id={}",
                    request_id
                );
                return (state, Vec::new());
            }
            apply_submission_outcome(&mut state, outcome);
            Vec::new()
        }
        Msg::ClipboardWritten(result) => {
            match result {
                Ok(()) => state.set_notice(COPY_CONFIRMATION.to_string()),
                Err(err) => state.set_notice(format!("Could not copy the response: {err}")),
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.is_loading() {
        return Vec::new();
    }
    state.clear_notice();

    let Some(file) = state.file().cloned() else {
        state.set_error(MISSING_FILE.to_string());
        return Vec::new();
    };

    state.reset_result();
    let request_id = state.begin_submission();
    mentor_info!(
        "Submitting request_id={} file={} query_len={}",
        request_id,
        file.name,
        state.query().len()
    );
    vec![Effect::Submit {
        request_id,
        query: state.query().to_string(),
        file,
    }]
}

fn apply_submission_outcome(state: &mut AppState, outcome: SubmissionOutcome) {
    let message = outcome.error_message(state.backend_url());
    match outcome {
        SubmissionOutcome::Answered { response } => {
            state.set_response(response);
            state.connectivity_mut().mark_connected();
            return;
        }
        SubmissionOutcome::BackendUnreachable { ref detail } => {
            mentor_warn!("Submission could not reach the backend: {}", detail);
            state.connectivity_mut().mark_error();
        }
        SubmissionOutcome::Rejected { status, .. } => {
            mentor_warn!("Backend rejected submission with status {}", status);
        }
        SubmissionOutcome::Offline => {
            mentor_warn!("Submission failed while offline");
        }
        SubmissionOutcome::Failed { ref message } => {
            mentor_warn!("Submission failed: {}", message);
        }
    }
    if let Some(message) = message {
        state.set_error(message);
    }
}

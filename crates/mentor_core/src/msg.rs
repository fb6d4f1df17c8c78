use crate::{AttachedFile, ProbeOutcome, RequestId, SubmissionOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// View became visible; runs the initial probe once.
    Mounted,
    /// View is being torn down; late results are dropped.
    Unmounted,
    /// User edited the query text.
    QueryChanged(String),
    /// User picked (or cleared) the attachment.
    FileSelected(Option<AttachedFile>),
    /// User pressed Run.
    SubmitClicked,
    /// User pressed Retry Connection.
    RetryClicked,
    /// User pressed Copy on the response.
    CopyClicked,
    /// Engine finished a probe.
    ProbeCompleted {
        request_id: RequestId,
        outcome: ProbeOutcome,
    },
    /// Engine finished a submission.
    SubmissionCompleted {
        request_id: RequestId,
        outcome: SubmissionOutcome,
    },
    /// Shell finished writing to the clipboard.
    ClipboardWritten(Result<(), String>),
}

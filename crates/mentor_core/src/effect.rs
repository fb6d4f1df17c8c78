use crate::{AttachedFile, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Check that the backend root answers.
    Probe { request_id: RequestId },
    /// Upload the attachment and query to `/process`.
    Submit {
        request_id: RequestId,
        query: String,
        file: AttachedFile,
    },
    CopyToClipboard { text: String },
}

use std::path::PathBuf;

use crate::view_model::AppViewModel;
use crate::{ConnectivityState, ConnectivityStore};

pub type RequestId = u64;

/// A single user-selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub name: String,
    pub path: PathBuf,
}

impl AttachedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    backend_url: String,
    mounted: bool,
    connectivity: ConnectivityStore,
    query: String,
    file: Option<AttachedFile>,
    response: String,
    error_message: String,
    notice: Option<String>,
    loading: bool,
    next_request_id: RequestId,
    pending_probe: Option<RequestId>,
    pending_submission: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        let connectivity = self.connectivity.state();
        let connected = connectivity == ConnectivityState::Connected;
        let checking = connectivity == ConnectivityState::Checking;
        AppViewModel {
            connectivity,
            backend_url: self.backend_url.clone(),
            status_line: if connected {
                format!("Connected to {}", self.backend_url)
            } else {
                format!("Disconnected from {}", self.backend_url)
            },
            retry_visible: !connected,
            retry_enabled: !checking,
            retry_label: if checking {
                "Checking...".to_string()
            } else {
                "Retry Connection".to_string()
            },
            submit_enabled: !self.loading && connected,
            submit_label: if self.loading {
                "Processing...".to_string()
            } else {
                "Run".to_string()
            },
            query: self.query.clone(),
            file_name: self.file.as_ref().map(|file| file.name.clone()),
            response: self.response.clone(),
            error_message: self.error_message.clone(),
            notice: self.notice.clone(),
            copy_visible: !self.response.is_empty(),
            loading: self.loading,
            dirty: self.dirty,
        }
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn connectivity(&self) -> &ConnectivityStore {
        &self.connectivity
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn file(&self) -> Option<&AttachedFile> {
        self.file.as_ref()
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn connectivity_mut(&mut self) -> &mut ConnectivityStore {
        self.dirty = true;
        &mut self.connectivity
    }

    pub(crate) fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        // A remounted view starts over from `checking`, like a fresh one.
        if !self.connectivity.is_checking() {
            self.connectivity.mark_checking();
        }
        self.dirty = true;
        true
    }

    /// Nothing is drawn after teardown, so this leaves `dirty` alone.
    pub(crate) fn unmount(&mut self) {
        self.mounted = false;
        self.pending_probe = None;
        self.pending_submission = None;
        self.loading = false;
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.dirty = true;
        }
    }

    pub(crate) fn set_file(&mut self, file: Option<AttachedFile>) {
        if self.file != file {
            self.file = file;
            self.dirty = true;
        }
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.dirty = true;
        }
    }

    pub(crate) fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
        self.dirty = true;
    }

    /// Clears both result fields; they are never set together.
    pub(crate) fn reset_result(&mut self) {
        self.response.clear();
        self.error_message.clear();
        self.dirty = true;
    }

    pub(crate) fn set_response(&mut self, response: String) {
        self.error_message.clear();
        self.response = response;
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.response.clear();
        self.error_message = message;
        self.dirty = true;
    }

    pub(crate) fn clear_error(&mut self) {
        if !self.error_message.is_empty() {
            self.error_message.clear();
            self.dirty = true;
        }
    }

    pub(crate) fn begin_probe(&mut self) -> RequestId {
        let request_id = self.allocate_request_id();
        self.pending_probe = Some(request_id);
        request_id
    }

    /// Consumes the pending probe if `request_id` matches it.
    pub(crate) fn settle_probe(&mut self, request_id: RequestId) -> bool {
        if self.mounted && self.pending_probe == Some(request_id) {
            self.pending_probe = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn begin_submission(&mut self) -> RequestId {
        let request_id = self.allocate_request_id();
        self.pending_submission = Some(request_id);
        self.loading = true;
        self.dirty = true;
        request_id
    }

    /// Consumes the pending submission and drops the loading flag if
    /// `request_id` matches it.
    pub(crate) fn settle_submission(&mut self, request_id: RequestId) -> bool {
        if self.mounted && self.pending_submission == Some(request_id) {
            self.pending_submission = None;
            self.loading = false;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }
}

use crate::ConnectivityState;

/// Everything the shell needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub connectivity: ConnectivityState,
    pub backend_url: String,
    pub status_line: String,
    pub retry_visible: bool,
    pub retry_enabled: bool,
    pub retry_label: String,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub query: String,
    pub file_name: Option<String>,
    pub response: String,
    pub error_message: String,
    pub notice: Option<String>,
    pub copy_visible: bool,
    pub loading: bool,
    pub dirty: bool,
}

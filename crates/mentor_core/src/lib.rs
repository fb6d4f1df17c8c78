//! Mentor core: pure state machine and view-model helpers.
mod connectivity;
mod effect;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use connectivity::{ConnectivityState, ConnectivityStore};
pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{
    ProbeOutcome, SubmissionOutcome, COPY_CONFIRMATION, GENERIC_BACKEND_ERROR,
    GENERIC_FAILURE, MISSING_FILE, OFFLINE,
};
pub use state::{AppState, AttachedFile, RequestId};
pub use update::update;
pub use view_model::AppViewModel;

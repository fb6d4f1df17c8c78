//! Mentor engine: backend IO and effect execution.
mod backend;
mod engine;
mod offline;
mod settings;
mod types;

pub use backend::{BackendClient, ReqwestBackend};
pub use engine::EngineHandle;
pub use offline::{OfflineDetector, RouteOfflineDetector};
pub use settings::{BackendSettings, DEFAULT_BASE_URL};
pub use types::{ChannelEventSink, EngineError, EngineEvent, EventSink};

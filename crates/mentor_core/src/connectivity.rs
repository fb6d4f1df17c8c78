/// Reachability of the backend as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityState {
    #[default]
    Checking,
    Connected,
    Error,
}

/// Single owner of [`ConnectivityState`].
///
/// Probes and submissions both write through this API. Writes are applied in
/// the order their results arrive, so the last write wins; `revision` counts
/// them so that ordering is observable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectivityStore {
    state: ConnectivityState,
    revision: u64,
}

impl ConnectivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectivityState::Connected
    }

    pub fn is_checking(&self) -> bool {
        self.state == ConnectivityState::Checking
    }

    pub fn mark_checking(&mut self) {
        self.set(ConnectivityState::Checking);
    }

    pub fn mark_connected(&mut self) {
        self.set(ConnectivityState::Connected);
    }

    pub fn mark_error(&mut self) {
        self.set(ConnectivityState::Error);
    }

    fn set(&mut self, next: ConnectivityState) {
        self.state = next;
        self.revision += 1;
    }
}

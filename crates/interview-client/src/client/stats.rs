#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Stats {
    requests_sent: u64,
    requests_failed: u64,
    last_status: Option<u16>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, status: Option<u16>, failed: bool) {
        self.requests_sent += 1;
        if failed {
            self.requests_failed += 1;
        }
        self.last_status = status;
    }

    pub fn requests_sent(&self) -> u64 {
        self.requests_sent
    }

    pub fn requests_failed(&self) -> u64 {
        self.requests_failed
    }

    /// `None` when the last request never got a response.
    pub fn last_status(&self) -> Option<u16> {
        self.last_status
    }
}

//! Turn parameters: use case runtime control.

use std::time::Duration;

/// Runtime behavior for classification and generation.
#[derive(Debug, Clone)]
pub struct TurnParams {
    /// Deadline applied to each completion call.
    pub timeout: Option<Duration>,
    /// Maximum number of most recent turns rendered into prompts.
    pub history_window: Option<usize>,
    /// Memo entry lifetime. `None` disables memoization.
    pub memo_ttl: Option<Duration>,
    /// Maximum memo entries per memo.
    pub memo_capacity: usize,
}

impl Default for TurnParams {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            history_window: None,
            memo_ttl: None,
            memo_capacity: 128,
        }
    }
}

impl TurnParams {
    // ==================== Builder Methods ====================

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_timeout(Some(Duration::from_secs(seconds)))
    }

    pub fn with_history_window(mut self, window: Option<usize>) -> Self {
        self.history_window = window;
        self
    }

    /// Enable memoization. A zero TTL disables it.
    pub fn with_memo(mut self, ttl: Duration, capacity: usize) -> Self {
        self.memo_ttl = (!ttl.is_zero()).then_some(ttl);
        self.memo_capacity = capacity;
        self
    }

    pub fn memo_enabled(&self) -> bool {
        self.memo_ttl.is_some() && self.memo_capacity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disables_memo() {
        let params = TurnParams::default();
        assert!(!params.memo_enabled());
        assert_eq!(params.timeout, Some(Duration::from_secs(60)));
        assert!(params.history_window.is_none());
    }

    #[test]
    fn test_zero_ttl_disables_memo() {
        let params = TurnParams::default().with_memo(Duration::ZERO, 10);
        assert!(!params.memo_enabled());

        let params = TurnParams::default().with_memo(Duration::from_secs(30), 10);
        assert!(params.memo_enabled());
    }
}

//! Reusable queue policy overrides.

/// Queue handoff overrides a notification type can embed.
///
/// Each field is optional; unset fields fall back to the configured
/// defaults when the dispatch engine resolves the handoff parameters.
/// Built fluently, like the message builders:
///
/// ```
/// use herald_core::QueuePolicy;
///
/// let policy = QueuePolicy::new().on_queue("urgent").delay(30).tries(5);
/// assert_eq!(policy.queue_name().as_deref(), Some("urgent"));
/// ```
///
/// Implementors forward the `Notification` queue getters to it:
/// `queue_name`, `delay_seconds`, and `max_tries`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueuePolicy {
    queue: Option<String>,
    delay: Option<u64>,
    tries: Option<u32>,
}

impl QueuePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route the notification onto a named queue.
    pub fn on_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = Some(queue.into());
        self
    }

    /// Defer delivery by the given number of seconds.
    pub fn delay(mut self, seconds: u64) -> Self {
        self.delay = Some(seconds);
        self
    }

    /// Cap the queue runner's attempt count.
    pub fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    pub fn queue_name(&self) -> Option<String> {
        self.queue.clone()
    }

    pub fn delay_seconds(&self) -> Option<u64> {
        self.delay
    }

    pub fn max_tries(&self) -> Option<u32> {
        self.tries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_has_no_overrides() {
        let policy = QueuePolicy::new();
        assert!(policy.queue_name().is_none());
        assert!(policy.delay_seconds().is_none());
        assert!(policy.max_tries().is_none());
    }

    #[test]
    fn test_fluent_builders_set_each_field() {
        let policy = QueuePolicy::new().on_queue("urgent").delay(30).tries(5);
        assert_eq!(policy.queue_name().as_deref(), Some("urgent"));
        assert_eq!(policy.delay_seconds(), Some(30));
        assert_eq!(policy.max_tries(), Some(5));
    }

    #[test]
    fn test_later_builder_calls_override() {
        let policy = QueuePolicy::new().delay(10).delay(20);
        assert_eq!(policy.delay_seconds(), Some(20));
    }
}

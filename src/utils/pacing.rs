use std::thread;
use std::time::Duration;

/// Fixed delays that keep request volume under the provider's rate limit
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    request_delay: Duration,
    batch_delay: Duration,
}

impl Pacer {
    pub fn new(request_delay: Duration, batch_delay: Duration) -> Self {
        Self {
            request_delay,
            batch_delay,
        }
    }

    pub fn from_millis(request_delay_ms: u64, batch_delay_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(request_delay_ms),
            Duration::from_millis(batch_delay_ms),
        )
    }

    /// No waiting at all
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn before_request(&self) {
        pause(self.request_delay);
    }

    pub fn before_batch(&self) {
        pause(self.batch_delay);
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

use std::fmt::{Display, Formatter};
use std::time::Duration;

use tokio::time::{Instant, error::Elapsed};

/// The bounded operation window of a single store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Drives `future` until the deadline. The future is dropped on expiry, so whatever it
    /// holds (cursors, connections checked out of the pool) is released with it.
    pub async fn run<F: IntoFuture>(&self, future: F) -> Result<F::Output, Elapsed> {
        tokio::time::timeout_at(self.at, future).await
    }
}

impl Display for Deadline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s operation window", self.budget.as_secs_f64())
    }
}

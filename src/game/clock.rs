//! Wall-clock budget for a whole session

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    pub started_at: DateTime<Utc>,
    pub length: Duration,
}

impl SessionClock {
    pub fn new(started_at: DateTime<Utc>, secs: u32) -> Self {
        Self {
            started_at,
            length: Duration::seconds(i64::from(secs)),
        }
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.length - (now - self.started_at)
    }

    pub fn is_over(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now) <= Duration::zero()
    }

    /// Time left as `m:ss`, floored at zero
    pub fn display(&self, now: DateTime<Utc>) -> String {
        let secs = self.remaining(now).num_seconds().max(0);
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    /// Share of the session still left, in `0.0..=1.0`
    pub fn fraction_left(&self, now: DateTime<Utc>) -> f64 {
        let total = self.length.num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        (self.remaining(now).num_milliseconds() as f64 / total as f64).clamp(0.0, 1.0)
    }
}

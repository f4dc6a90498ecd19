//! Fal endpoint constants.

use std::time::Duration;

pub const QUEUE_BASE_URL: &str = "https://queue.fal.run";

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const MAX_POLL_ATTEMPTS: u32 = 120;

//! PPIO endpoint constants.

use std::time::Duration;

pub const BASE_URL: &str = "https://api.ppinfra.com/v3";
pub const STATUS_ENDPOINT: &str = "/async/task-result";

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const MAX_POLL_ATTEMPTS: u32 = 120;

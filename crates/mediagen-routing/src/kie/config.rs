//! KIE endpoint constants.

use std::time::Duration;

pub const BASE_URL: &str = "https://api.kie.ai";
pub const CREATE_TASK_ENDPOINT: &str = "/api/v1/jobs/createTask";
pub const STATUS_ENDPOINT: &str = "/api/v1/jobs/recordInfo";

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);
/// About ten minutes at the poll interval.
pub const MAX_POLL_ATTEMPTS: u32 = 200;

//! Record timestamps
//!
//! Records store `createdAt`/`updatedAt` as epoch milliseconds, so the clock
//! is truncated to millisecond precision when read. A value stamped in memory
//! then compares equal to the same value re-read from the store.

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to milliseconds
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

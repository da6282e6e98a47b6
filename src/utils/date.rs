//! Day buckets: a task belongs to the calendar date of UTC minus a fixed
//! offset, so a day "ends" at `offset` o'clock UTC instead of midnight.

use crate::errors::{AppError, AppResult};
use crate::utils::time::MS_PER_HOUR;
use chrono::{DateTime, Duration, NaiveDate, Utc};

fn shifted(now_ms: i64, offset_hours: i64) -> AppResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(now_ms - offset_hours * MS_PER_HOUR)
        .ok_or_else(|| AppError::InvalidDate(format!("timestamp out of range: {now_ms}")))
}

/// Day bucket containing `now_ms`.
pub fn bucket_date(now_ms: i64, offset_hours: i64) -> AppResult<NaiveDate> {
    Ok(shifted(now_ms, offset_hours)?.date_naive())
}

/// Day bucket containing `now_ms`, formatted `YYYY-MM-DD`.
pub fn day_bucket(now_ms: i64, offset_hours: i64) -> AppResult<String> {
    Ok(bucket_date(now_ms, offset_hours)?
        .format("%Y-%m-%d")
        .to_string())
}

/// First millisecond of the bucket following the one containing `now_ms`.
pub fn end_of_day(now_ms: i64, offset_hours: i64) -> AppResult<i64> {
    let next = bucket_date(now_ms, offset_hours)? + Duration::days(1);
    let midnight = next
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::InvalidDate(next.to_string()))?
        .and_utc();
    Ok(midnight.timestamp_millis() + offset_hours * MS_PER_HOUR)
}

/// Current wall clock in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

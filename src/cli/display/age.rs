//! Human readable resource ages

use chrono::{DateTime, Utc};

/// Formats the time elapsed since `created` as `Nd`, `Nh`, `Nm` or `Ns`,
/// keeping only the largest unit.
pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(created);
    if age.num_days() > 0 {
        format!("{}d", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m", age.num_minutes())
    } else {
        format!("{}s", age.num_seconds().max(0))
    }
}

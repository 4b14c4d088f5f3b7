use chrono::{TimeZone, Utc};

// The old API was serializing Postgres timestamps, which
// came out as RFC 3339 strings. We store plain UNIX epochs
// and only format them on the way out.
// chrono formatting reference:
// https://docs.rs/chrono/0.4.19/chrono/format/strftime/index.html

pub fn timestamp_to_date_string(timestamp: i64) -> String {
  Utc.timestamp(timestamp, 0).to_rfc3339()
}

pub fn current_timestamp() -> i64 {
  Utc::now().timestamp()
}

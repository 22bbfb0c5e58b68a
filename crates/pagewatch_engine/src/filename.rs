use chrono::NaiveDateTime;

pub const SNAPSHOT_EXT: &str = "dat";
pub const DIFF_EXT: &str = "diff";

/// `YYYYMMDD_HHmmss`, so that lexicographic order is chronological order.
pub fn timestamp_stem(captured_at: NaiveDateTime) -> String {
    captured_at.format("%Y%m%d_%H%M%S").to_string()
}

pub fn snapshot_filename(captured_at: NaiveDateTime) -> String {
    format!("{}.{SNAPSHOT_EXT}", timestamp_stem(captured_at))
}

pub fn diff_filename(captured_at: NaiveDateTime) -> String {
    format!("{}.{DIFF_EXT}", timestamp_stem(captured_at))
}

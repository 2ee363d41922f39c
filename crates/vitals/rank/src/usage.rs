/// Shown for usage that is non-zero but rounds away at two decimals.
pub const TINY_USAGE: &str = "< 0.01%";

/// Shown when nothing is used or nothing is committed.
pub const NO_USAGE: &str = "0%";

/// Used capacity as a percentage of committed capacity, two decimals.
pub fn storage_usage_percent(committed_bytes: u64, used_bytes: u64) -> String {
    if committed_bytes == 0 || used_bytes == 0 {
        return NO_USAGE.to_owned();
    }

    let raw = used_bytes as f64 / committed_bytes as f64 * 100.0;
    if raw < 0.01 {
        TINY_USAGE.to_owned()
    } else {
        format!("{raw:.2}%")
    }
}

//! Snapshot day naming
//!
//! The archive publishes one gzipped JSON snapshot every 5 seconds. Files are
//! named `HHMMSSZ.json.gz` after the time of day they cover. Everything in this
//! service works on a single fixed day, so the remote path, the storage prefix,
//! and the local directory are all derived from the constants below.

/// Day being relayed, as it appears in storage keys and local directories.
pub const DAY: &str = "20231101";

/// Date path segment used by the remote archive.
pub const REMOTE_DATE_PATH: &str = "2023/11/01";

/// Key prefix for every stored snapshot of [`DAY`].
pub const STORAGE_PREFIX: &str = "raw/day=20231101/";

/// Per-day directory name under the local raw and prepared directories.
pub const LOCAL_DAY_DIR: &str = "day=20231101";

/// Seconds between two consecutive snapshots.
pub const SNAPSHOT_INTERVAL_SECS: u32 = 5;

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Number of snapshot slots in a day (17,280).
pub const TOKENS_PER_DAY: usize = (SECONDS_PER_DAY / SNAPSHOT_INTERVAL_SECS) as usize;

/// Filename for the snapshot starting `second_of_day` seconds after midnight.
pub fn token_for_second(second_of_day: u32) -> String {
    let hh = second_of_day / 3600;
    let mm = (second_of_day % 3600) / 60;
    let ss = second_of_day % 60;
    format!("{:02}{:02}{:02}Z.json.gz", hh, mm, ss)
}

/// Every snapshot filename of the day in ascending order.
///
/// The sequence is lazy: a caller that stops early never pays for the rest.
pub fn filename_tokens() -> impl Iterator<Item = String> {
    (0..SECONDS_PER_DAY)
        .step_by(SNAPSHOT_INTERVAL_SECS as usize)
        .map(token_for_second)
}

/// Remote archive URL for a token. A trailing slash on `base_url` is tolerated.
pub fn remote_url(base_url: &str, token: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        REMOTE_DATE_PATH,
        token
    )
}

/// Storage key for a token.
pub fn storage_key(token: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, token)
}

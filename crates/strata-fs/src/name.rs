use chrono::NaiveDateTime;

/// Second-resolution timestamp used in file names. Sorts lexically.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const TIMESTAMP_LEN: usize = "YYYYMMDD_HHMMSS".len();
const EXTENSION: &str = ".json";

/// `<name>_<timestamp>.json`, or `<name>_<timestamp>_<seq>.json` when `seq > 0`.
///
/// ```
/// use chrono::NaiveDate;
/// use strata_fs::snapshot_file_name;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(7, 5, 1).unwrap();
/// assert_eq!(snapshot_file_name("tracks", at, 0), "tracks_20240309_070501.json");
/// assert_eq!(snapshot_file_name("tracks", at, 2), "tracks_20240309_070501_2.json");
/// ```
pub fn snapshot_file_name(name: &str, at: NaiveDateTime, seq: u32) -> String {
    let stamp = at.format(TIMESTAMP_FORMAT);
    if seq == 0 {
        format!("{name}_{stamp}{EXTENSION}")
    } else {
        format!("{name}_{stamp}_{seq}{EXTENSION}")
    }
}

/// Inverse of [`snapshot_file_name`] for a known `name`.
///
/// Returns `None` for files that belong to another name or do not follow the
/// pattern, so `users` never claims `users_archive_<ts>.json`.
pub fn parse_snapshot_file_name(name: &str, file_name: &str) -> Option<(NaiveDateTime, u32)> {
    let rest = file_name
        .strip_prefix(name)?
        .strip_prefix('_')?
        .strip_suffix(EXTENSION)?;

    let stamp = rest.get(..TIMESTAMP_LEN)?;
    let at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;

    let seq = match &rest[TIMESTAMP_LEN..] {
        "" => 0,
        tail => {
            let digits = tail.strip_prefix('_')?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()?
        }
    };

    Some((at, seq))
}

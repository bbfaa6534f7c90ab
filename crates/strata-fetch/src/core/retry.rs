use std::time::Duration;

/// Delay to wait before retry number `retry_count` (0 = first retry).
///
/// Doubles from `base`: `base * 2^retry_count`, saturating instead of
/// overflowing.
///
/// ```
/// use std::time::Duration;
/// use strata_fetch::retry_delay;
///
/// let base = Duration::from_secs(1);
/// assert_eq!(retry_delay(0, base), Duration::from_secs(1));
/// assert_eq!(retry_delay(1, base), Duration::from_secs(2));
/// assert_eq!(retry_delay(2, base), Duration::from_secs(4));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry_count);
    base.saturating_mul(multiplier)
}

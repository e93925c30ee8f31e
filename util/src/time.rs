//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if the number of
/// nanoseconds in the duration overflows.
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Convert a std duration into seconds.
pub fn std_duration_to_seconds(duration: std::time::Duration) -> f64 {
    duration.as_secs() as f64
        + duration.subsec_nanos() as f64 / NANOS_PER_SECOND as f64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_duration_to_seconds() {
        assert_eq!(
            duration_to_seconds(chrono::Duration::milliseconds(1500)),
            Some(1.5)
        );
        assert_eq!(
            std_duration_to_seconds(std::time::Duration::from_millis(50)),
            0.05
        );
    }
}

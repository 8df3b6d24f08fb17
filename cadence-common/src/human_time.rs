//! Human-readable clock labels for progress displays
//!
//! Progress and duration labels are shown as `M:SS`: whole minutes, then
//! seconds zero-padded to two digits. Both parts use floor semantics, so a
//! position of 59.9s still reads `0:59`. Minutes are not folded into hours.

/// Format seconds as a `M:SS` clock label.
///
/// Non-finite or negative input (an unknown duration reported by a media
/// surface, for instance) renders as `0:00`.
///
/// # Examples
///
/// ```
/// use cadence_common::human_time::format_clock;
///
/// assert_eq!(format_clock(0.0), "0:00");
/// assert_eq!(format_clock(65.0), "1:05");
/// assert_eq!(format_clock(f64::NAN), "0:00");
/// ```
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    let minutes = whole / 60;
    let secs = whole % 60;
    format!("{}:{:02}", minutes, secs)
}

/// Format an optional duration, falling back to `0:00` when unknown.
pub fn format_clock_opt(seconds: Option<f64>) -> String {
    seconds.map(format_clock).unwrap_or_else(|| format_clock(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_simple_values() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(5.0), "0:05");
        assert_eq!(format_clock(65.0), "1:05");
        assert_eq!(format_clock(600.0), "10:00");
    }

    #[test]
    fn test_floor_semantics() {
        assert_eq!(format_clock(59.999), "0:59");
        assert_eq!(format_clock(119.5), "1:59");
        assert_eq!(format_clock(0.4), "0:00");
    }

    #[test]
    fn test_minutes_not_folded_into_hours() {
        assert_eq!(format_clock(3661.0), "61:01");
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
        assert_eq!(format_clock(f64::NEG_INFINITY), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn test_option_handling() {
        assert_eq!(format_clock_opt(Some(184.2)), "3:04");
        assert_eq!(format_clock_opt(None), "0:00");
    }
}

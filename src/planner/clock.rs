//! Clock-text arithmetic.
//!
//! Timetable entries carry their times as text. Everything here normalizes
//! that text to "HH:MM" and compares on minutes since midnight. Text that
//! cannot be parsed passes through unchanged; callers are expected to feed
//! well-formed values, and comparisons on unparsed text are best-effort.

/// Unit markers that uploaded timetables sometimes attach to clock values
/// (e.g. "9시", "09시 00분").
const UNIT_MARKERS: [char; 2] = ['시', '분'];

/// Normalize "9:00", "09:00", "9", "930", "0900" and friends to "HH:MM".
/// Returns the input unchanged when it does not look like a clock value.
pub fn normalize_time(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !UNIT_MARKERS.contains(c))
        .collect();

    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return raw.to_string();
    }

    let parsed = match cleaned.split_once(':') {
        Some((hour, minute)) => parse_parts(hour, Some(minute)),
        // No separator: 1-2 digits are a bare hour, 3-4 digits carry a
        // trailing two-digit minute.
        None => match cleaned.len() {
            1 | 2 => parse_parts(&cleaned, None),
            3 => parse_parts(&cleaned[..1], Some(&cleaned[1..])),
            4 => parse_parts(&cleaned[..2], Some(&cleaned[2..])),
            _ => None,
        },
    };

    match parsed {
        Some((hour, minute)) => format!("{hour:0>2}:{minute}"),
        None => raw.to_string(),
    }
}

fn parse_parts<'a>(hour: &'a str, minute: Option<&'a str>) -> Option<(&'a str, &'a str)> {
    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match minute {
        Some(m) if m.len() == 2 && m.bytes().all(|b| b.is_ascii_digit()) => Some((hour, m)),
        Some(_) => None,
        None => Some((hour, "00")),
    }
}

/// "HH:MM" to minutes since midnight. Malformed pieces count as zero.
pub fn time_to_minutes(time: &str) -> i64 {
    let (hour, minute) = time.split_once(':').unwrap_or((time, "0"));
    let hour: i64 = hour.parse().unwrap_or(0);
    let minute: i64 = minute.parse().unwrap_or(0);
    hour * 60 + minute
}

/// Half-open interval overlap: touching endpoints do not overlap.
pub fn overlaps(start1: &str, end1: &str, start2: &str, end2: &str) -> bool {
    let s1 = time_to_minutes(&normalize_time(start1));
    let e1 = time_to_minutes(&normalize_time(end1));
    let s2 = time_to_minutes(&normalize_time(start2));
    let e2 = time_to_minutes(&normalize_time(end2));

    s1 < e2 && e1 > s2
}

/// Interval length in hours. Unguarded: reversed inputs yield a negative
/// duration.
pub fn duration_hours(start: &str, end: &str) -> f64 {
    let s = time_to_minutes(&normalize_time(start));
    let e = time_to_minutes(&normalize_time(end));
    (e - s) as f64 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_common_forms() {
        assert_eq!(normalize_time("9:00"), "09:00");
        assert_eq!(normalize_time("09:00"), "09:00");
        assert_eq!(normalize_time("9"), "09:00");
        assert_eq!(normalize_time("930"), "09:30");
        assert_eq!(normalize_time("0930"), "09:30");
        assert_eq!(normalize_time(" 9 : 30 "), "09:30");
        assert_eq!(normalize_time("9시"), "09:00");
        assert_eq!(normalize_time("09시 30분"), "09:30");
    }

    #[test]
    fn unparsable_text_passes_through() {
        assert_eq!(normalize_time("abc"), "abc");
        assert_eq!(normalize_time("9:5"), "9:5");
        assert_eq!(normalize_time("123:45"), "123:45");
        assert_eq!(normalize_time(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in ["9:00", "09:30", "16", "1430", "garbage"] {
            let once = normalize_time(input);
            assert_eq!(normalize_time(&once), once);
        }
    }

    #[test]
    fn minutes_conversion() {
        assert_eq!(time_to_minutes("09:00"), 540);
        assert_eq!(time_to_minutes("00:00"), 0);
        assert_eq!(time_to_minutes("16:45"), 1005);
    }

    #[test]
    fn overlap_is_half_open() {
        // Touching endpoints are not an overlap.
        assert!(!overlaps("09:00", "10:00", "10:00", "11:00"));
        assert!(overlaps("09:00", "10:30", "10:00", "11:00"));
        assert!(overlaps("09:00", "17:00", "12:00", "13:00"));
        assert!(!overlaps("09:00", "10:00", "11:00", "12:00"));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            ("09:00", "10:00", "09:30", "10:30"),
            ("09:00", "10:00", "10:00", "11:00"),
            ("13:00", "15:00", "14:00", "14:30"),
        ];
        for (a, b, c, d) in cases {
            assert_eq!(overlaps(a, b, c, d), overlaps(c, d, a, b));
        }
    }

    #[test]
    fn overlap_accepts_unnormalized_input() {
        assert!(overlaps("9:00", "10:00", "930", "1030"));
    }

    #[test]
    fn duration_in_hours() {
        assert_eq!(duration_hours("09:00", "10:00"), 1.0);
        assert_eq!(duration_hours("09:00", "10:30"), 1.5);
        assert_eq!(duration_hours("10:00", "09:00"), -1.0);
    }
}

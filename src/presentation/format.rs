//! Display helpers for sizes and dates.

use chrono::{DateTime, Datelike, Utc};

const BYTE_UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

const ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Human-readable byte count in SI units with three significant digits,
/// e.g. `1536` → `"1.54 kB"`, `10485760` → `"10.5 MB"`
pub fn format_bytes(bytes: i64) -> String {
    let sign = if bytes < 0 { "-" } else { "" };
    let magnitude = bytes.unsigned_abs();

    if magnitude < 1000 {
        return format!("{}{} B", sign, magnitude);
    }

    let mut exponent = 0;
    let mut scale = 1u64;
    while exponent + 1 < BYTE_UNITS.len() && magnitude / scale >= 1000 {
        scale = scale.saturating_mul(1000);
        exponent += 1;
    }

    let value = magnitude as f64 / scale as f64;
    let integer_digits = (value.log10().floor() as i32 + 1).max(1);
    let decimals = (3 - integer_digits).max(0) as usize;

    format!(
        "{}{} {}",
        sign,
        trim_fraction(format!("{:.*}", decimals, value)),
        BYTE_UNITS[exponent]
    )
}

fn trim_fraction(number: String) -> String {
    if number.contains('.') {
        number
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        number
    }
}

/// Western digits rewritten as Arabic-Indic digits
pub fn arabic_digits(value: impl ToString) -> String {
    value
        .to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Long-form Arabic date, e.g. `"١٥ مارس ٢٠٢٥"`
pub fn arabic_date(date: DateTime<Utc>) -> String {
    format!(
        "{} {} {}",
        arabic_digits(date.day()),
        ARABIC_MONTHS[date.month0() as usize],
        arabic_digits(date.year())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_bytes_matches_si_style() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1), "1 B");
        assert_eq!(format_bytes(999), "999 B");
        assert_eq!(format_bytes(1000), "1 kB");
        assert_eq!(format_bytes(1536), "1.54 kB");
        assert_eq!(format_bytes(123_456), "123 kB");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10.5 MB");
        assert_eq!(format_bytes(2_500_000_000), "2.5 GB");
        assert_eq!(format_bytes(-1500), "-1.5 kB");
    }

    #[test]
    fn test_arabic_date_label() {
        let date = Utc.with_ymd_and_hms(2025, 3, 15, 22, 10, 0).unwrap();
        assert_eq!(arabic_date(date), "١٥ مارس ٢٠٢٥");

        let date = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(arabic_date(date), "١ ديسمبر ٢٠٢٤");
    }
}

/// Remove everything that is not an ASCII digit.
pub fn strip_non_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format an identity number with `.` as thousands separator.
///
/// - "12345678" -> "12.345.678"
/// - "12.345.678" -> "12.345.678"
/// - "1,234,567" -> "1.234.567"
/// - "00123456" -> "123.456" (numeric value, leading zeros dropped)
/// - "" or no digits -> ""
pub fn format_identity(raw: &str) -> String {
    let digits = strip_non_digits(raw);
    if digits.is_empty() {
        return String::new();
    }

    let significant = digits.trim_start_matches('0');
    let significant = if significant.is_empty() { "0" } else { significant };

    let len = significant.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in significant.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Format day, month and two-digit year fragments as `d/m/20yy`.
///
/// Day and month lose any zero padding; the year keeps its two digits.
/// Returns None when a fragment is not a number.
pub fn format_date(day: &str, month: &str, year: &str) -> Option<String> {
    let day: u32 = day.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let year: u32 = year.trim().parse().ok()?;
    Some(format!("{day}/{month}/20{year:02}"))
}

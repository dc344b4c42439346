/// Turn one raw data-block field into a count.
///
/// `None` input means the line had no segment for this field and stays unknown.
/// An empty segment counts as zero. Anything else is read as a leading integer
/// (optional sign, then digits) and trailing text is ignored, so `"12*"` is 12.
/// A segment with no leading digits, or one that overflows, is unknown.
pub fn normalize(raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    if raw.is_empty() {
        return Some(0);
    }
    leading_integer(raw)
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Parse with the sign attached so i64::MIN still fits.
    let digits = &rest[..digits_end];
    if negative {
        format!("-{}", digits).parse().ok()
    } else {
        digits.parse().ok()
    }
}

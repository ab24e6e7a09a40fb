//! Display helpers shared by the pages.

/// `"-"` for absent values, like the backend's nullable columns.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".into(),
    }
}

/// Shortens an ISO timestamp (`2024-05-01T09:30:12.123+00:00`) to
/// `2024-05-01 09:30`. Other strings pass through.
pub fn format_timestamp(value: Option<&str>) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return "-".into();
    };
    match raw.split_once('T') {
        Some((date, time)) => match time.get(..5) {
            Some(minutes) => format!("{date} {minutes}"),
            None => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

/// Parses an optional numeric form field. Blank means "not measured".
pub fn parse_optional_number(label: &str, raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| format!("{label} must be a number"))
}

pub fn number_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Status label from a wire name like `ON_REVIEW`.
pub fn humanize_status(status: &str) -> String {
    let lower = status.replace('_', " ").to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_trimmed_to_minutes() {
        assert_eq!(
            format_timestamp(Some("2024-05-01T09:30:12.123+00:00")),
            "2024-05-01 09:30"
        );
        assert_eq!(format_timestamp(Some("2024-05-01")), "2024-05-01");
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some("2024-05-01T9")), "2024-05-01T9");
        // a multi-byte char straddling the cut must not panic
        assert_eq!(format_timestamp(Some("2024-05-01T09:3\u{e9}")), "2024-05-01T09:3\u{e9}");
    }

    #[test]
    fn numbers_accept_decimal_comma() {
        assert_eq!(parse_optional_number("K1", " 43,25 "), Ok(Some(43.25)));
        assert_eq!(parse_optional_number("K1", ""), Ok(None));
        assert_eq!(
            parse_optional_number("Axial length", "abc"),
            Err("Axial length must be a number".to_string())
        );
        assert!(parse_optional_number("K2", "NaN").is_err());
    }

    #[test]
    fn statuses_read_as_sentences() {
        assert_eq!(humanize_status("IN_CALC_QUEUE"), "In calc queue");
        assert_eq!(humanize_status(""), "");
    }

    #[test]
    fn dash_for_blank() {
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(Some("F")), "F");
        assert_eq!(or_dash(None), "-");
    }
}

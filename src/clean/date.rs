use chrono::NaiveDate;

/// Strict parse of a `"DD/MM/YYYY"` sighting date.
/// Returns `None` for anything else; the caller treats that as fatal.
pub fn parse_sighting_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_month_year() {
        assert_eq!(
            parse_sighting_date("05/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_sighting_date(" 5/1/2024 "),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(parse_sighting_date("2024-01-05"), None);
        assert_eq!(parse_sighting_date("05/01/2024 10:30"), None);
        assert_eq!(parse_sighting_date("31/02/2024"), None);
        assert_eq!(parse_sighting_date(""), None);
        assert_eq!(parse_sighting_date("soon"), None);
    }
}

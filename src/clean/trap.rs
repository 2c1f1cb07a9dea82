use once_cell::sync::Lazy;
use regex::Regex;

/// Code used whenever an entry names the Lone Pine landmark instead of a
/// trap number.
const LONE_PINE_CODE: &str = "62";

/// Extraction rules in priority order. The trap code is capture group 1 if
/// the pattern has one, otherwise the whole match. 3-digit groups outrank
/// 2-digit ones because trap numbering is 3-digit on most tracks.
static TRAP_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^([0-9]{3})[-/][0-9]{1,3}",
        r"[0-9]{3}",
        r"^([0-9]{2})[-/][0-9]{1,2}",
        r"[0-9]{2}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("trap rule pattern"))
    .collect()
});

/// Extracts a canonical trap code from a free-text field entry.
///
/// Total: anything without a recognizable number comes back as the
/// zero-stripped, trimmed input, and territory naming treats it as a
/// literal name rather than a trap id.
pub fn normalize(raw: &str) -> String {
    if raw.to_lowercase().contains("lone pine") {
        return LONE_PINE_CODE.to_string();
    }
    let s = raw.trim_start_matches('0').trim();
    for rule in TRAP_RULES.iter() {
        if let Some(caps) = rule.captures(s) {
            let code = caps.get(1).or_else(|| caps.get(0)).expect("match group");
            return code.as_str().to_string();
        }
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_pine_wins_over_any_digits() {
        assert_eq!(normalize("Lone Pine"), "62");
        assert_eq!(normalize("lone pine 3"), "62");
        assert_eq!(normalize("near LONE PINE 120"), "62");
    }

    #[test]
    fn three_digit_with_separator_keeps_leading_group() {
        assert_eq!(normalize("0620-1"), "620");
        assert_eq!(normalize("123/45"), "123");
    }

    #[test]
    fn bare_three_digit_run_is_found_anywhere() {
        assert_eq!(normalize("trap 104 by the stream"), "104");
        assert_eq!(normalize("1234"), "123");
    }

    #[test]
    fn two_digit_with_separator_keeps_leading_group() {
        assert_eq!(normalize("62/3"), "62");
        assert_eq!(normalize("62-1"), "62");
    }

    #[test]
    fn bare_two_digit_run_is_found_anywhere() {
        assert_eq!(normalize("no. 47"), "47");
    }

    #[test]
    fn unmatched_input_comes_back_stripped() {
        assert_eq!(normalize("07/2"), "7/2");
        assert_eq!(normalize("7"), "7");
        assert_eq!(normalize("ridge line"), "ridge line");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn leading_zeros_are_stripped_before_matching() {
        assert_eq!(normalize("062"), "62");
        assert_eq!(normalize("00104"), "104");
    }
}

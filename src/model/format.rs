//! Numeric display formatting for catalog values
//!
//! Optional values follow a "truthy" convention: absent, zero and NaN are
//! all treated as "no data" and render as an empty string.

/// Whether a value counts as present for display purposes
pub fn is_truthy(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0 && !v.is_nan())
}

/// Fractional digits needed to print any f64 exactly
const EXACT_DIGITS: usize = 1074;

/// Format with a fixed number of decimal places
///
/// Values lying exactly halfway between two candidates round away from zero
/// (`42.125` → `"42.13"`), where `{:.N}` alone would round to even.
pub fn fixed(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        if let Some(rounded) = round_half_away(value, decimals) {
            return rounded;
        }
    }
    format!("{:.*}", decimals, value)
}

/// `Some` only when `value` is an exact tie at `decimals` places
fn round_half_away(value: f64, decimals: usize) -> Option<String> {
    // Cheap check first: an exact tie prints as 5 then zeros at any precision
    let near = format!("{:.*}", decimals + 20, value);
    if !is_half(&near, decimals)? {
        return None;
    }

    let exact = format!("{:.*}", EXACT_DIGITS.max(decimals + 1), value);
    if !is_half(&exact, decimals)? {
        return None;
    }
    let point = exact.find('.')?;
    let kept_len = if decimals == 0 { point } else { point + 1 + decimals };
    Some(bump_last_digit(&exact[..kept_len]))
}

/// Whether the digits after `decimals` places are exactly `5` followed by zeros
fn is_half(text: &str, decimals: usize) -> Option<bool> {
    let point = text.find('.')?;
    let tail = text.get(point + 1 + decimals..)?;
    Some(tail.starts_with('5') && tail.bytes().skip(1).all(|b| b == b'0'))
}

/// Add one unit in the last place to a decimal string, away from zero
fn bump_last_digit(kept: &str) -> String {
    let mut digits: Vec<u8> = kept.bytes().collect();
    for i in (0..digits.len()).rev() {
        match digits[i] {
            b'9' => digits[i] = b'0',
            b'0'..=b'8' => {
                digits[i] += 1;
                return digits.into_iter().map(char::from).collect();
            }
            _ => {}
        }
    }
    // Carried past the leading digit: 9.99 -> 10.00
    let sign = usize::from(digits.first() == Some(&b'-'));
    digits.insert(sign, b'1');
    digits.into_iter().map(char::from).collect()
}

/// Format a value with fixed decimals, or "" when it is not truthy
pub fn fixed_if_present(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if is_truthy(value) => fixed(v, decimals),
        _ => String::new(),
    }
}

/// Format log10 of a value with fixed decimals, or "" when it is not truthy
///
/// Negative inputs are not guarded and produce `NaN`.
pub fn log10_if_present(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if is_truthy(value) => fixed(v.log10(), decimals),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(Some(1.5)));
        assert!(is_truthy(Some(-3.0)));
        assert!(!is_truthy(Some(0.0)));
        assert!(!is_truthy(Some(-0.0)));
        assert!(!is_truthy(Some(f64::NAN)));
        assert!(!is_truthy(None));
    }

    #[test]
    fn test_fixed_rounds_to_requested_places() {
        assert_eq!(fixed(10.123456789, 6), "10.123457");
        assert_eq!(fixed(-5.5, 2), "-5.50");
        assert_eq!(fixed(3.0, 0), "3");
    }

    #[test]
    fn test_fixed_rounds_exact_ties_away_from_zero() {
        assert_eq!(fixed(42.125, 2), "42.13");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(0.5, 0), "1");
        assert_eq!(fixed(18.875, 2), "18.88");
        assert_eq!(fixed(-42.125, 2), "-42.13");
        assert_eq!(fixed(99.5, 0), "100");
        assert_eq!(fixed(-10.5, 0), "-11");
    }

    #[test]
    fn test_fixed_leaves_near_ties_alone() {
        // 2.675 is stored just below the tie
        assert_eq!(fixed(2.675, 2), "2.67");
        assert_eq!(fixed(1.005, 2), "1.00");
        assert_eq!(fixed(42.126, 2), "42.13");
        assert_eq!(fixed(42.124, 2), "42.12");
    }

    #[test]
    fn test_fixed_if_present() {
        assert_eq!(fixed_if_present(Some(42.5), 2), "42.50");
        assert_eq!(fixed_if_present(Some(0.0), 2), "");
        assert_eq!(fixed_if_present(None, 6), "");
        assert_eq!(fixed_if_present(Some(0.0012346), 6), "0.001235");
    }

    #[test]
    fn test_log10_if_present() {
        assert_eq!(log10_if_present(Some(1000.0), 2), "3.00");
        assert_eq!(log10_if_present(Some(1.0e10), 2), "10.00");
        assert_eq!(log10_if_present(Some(0.0), 2), "");
        assert_eq!(log10_if_present(None, 2), "");
    }

    #[test]
    fn test_log10_of_negative_is_not_finite() {
        assert_eq!(log10_if_present(Some(-10.0), 2), "NaN");
    }
}

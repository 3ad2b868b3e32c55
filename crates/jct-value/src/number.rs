/// Lower bound of the i64-representable double range, chosen exactly so the
/// cast to `i64` below never truncates.
const I64_MIN_F: f64 = i64::MIN as f64;
/// `2^63`, the first double that no longer fits in an `i64`.
const I64_MAX_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// The canonical textual form of a number: integer form when the value
/// round-trips through a 64-bit signed integer, a short general-format
/// representation otherwise.
///
/// Rust's `Display` for `f64` already produces the shortest decimal string
/// that reads back to the same bit pattern, so no hand-rolled dtoa is
/// needed here.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n == 0.0 && n.is_sign_negative() {
        return "-0".to_string();
    }
    if n.is_finite() && n.fract() == 0.0 && n >= I64_MIN_F && n < I64_MAX_BOUND {
        return (n as i64).to_string();
    }
    format!("{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_print_without_decimal_point() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn fractions_print_general_form() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn negative_zero_round_trips() {
        assert_eq!(format_number(-0.0), "-0");
    }

    #[test]
    fn magnitude_beyond_i64_uses_general_form() {
        // 2^63 is an integral double but does not fit in an i64; it still
        // prints without a decimal point because Display's shortest form
        // for an integral f64 has none.
        assert_eq!(
            format_number(9_223_372_036_854_775_808.0),
            "9223372036854775808"
        );
    }
}

//! Lossless decimal numeric type backed by rust_decimal.
//!
//! Provides lenient parsing of form input, overflow-checked arithmetic and
//! the 4-digit rounding used for every value the calculator reports.

use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits kept in every reported value.
pub const DISPLAY_DP: u32 = 4;

/// Integer digits of the largest representable value (~7.9e28).
const MAX_INTEGER_DIGITS: i64 = 29;

/// Fractional digits the decimal type can hold.
const MAX_FRACTION_DIGITS: u32 = 28;

/// Lossless decimal numeric type for price and quantity calculations.
///
/// Backed by rust_decimal to avoid floating-point drift.
/// Serializes to JSON number (not string) by default.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    /// Create a Decimal from a RustDecimal.
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Parse a Decimal from a string strictly.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s).map(Decimal)
    }

    /// Parse user-typed input the way an HTML number field is read.
    ///
    /// Leading whitespace is skipped and the longest numeric prefix
    /// (`[+-]digits[.digits][e[+-]digits]`) is taken, so `"12abc"` reads as 12.
    /// Returns `None` when there is no numeric prefix or the value does not
    /// fit the decimal range.
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let prefix = NumericPrefix::scan(input.trim_start())?;

        let digits = format!("{}{}", prefix.int_digits, prefix.frac_digits);
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Some(Decimal::zero());
        }

        // Position of the decimal point relative to the first significant digit.
        let leading_zeros = (digits.len() - significant.len()) as i64;
        let point =
            (prefix.int_digits.len() as i64 - leading_zeros).saturating_add(prefix.exponent);
        if point > MAX_INTEGER_DIGITS {
            return None;
        }
        if point < -(MAX_FRACTION_DIGITS as i64) {
            return Some(Decimal::zero());
        }

        let mut text = String::with_capacity(significant.len() + MAX_INTEGER_DIGITS as usize + 3);
        if prefix.negative {
            text.push('-');
        }
        if point <= 0 {
            text.push_str("0.");
            text.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
            text.push_str(significant);
        } else {
            let point = point as usize;
            if point >= significant.len() {
                text.push_str(significant);
                text.extend(std::iter::repeat('0').take(point - significant.len()));
            } else {
                text.push_str(&significant[..point]);
                text.push('.');
                text.push_str(&significant[point..]);
            }
        }

        // Excess fractional digits are rounded; an oversized integer part is rejected.
        RustDecimal::from_str(&text).ok().map(Decimal)
    }

    /// Format the Decimal as a canonical string (no exponent notation).
    pub fn to_canonical_string(&self) -> String {
        let normalized = self.0.normalize();
        format!("{}", normalized)
    }

    /// Get the underlying RustDecimal.
    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    /// The additive identity (0).
    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    /// The multiplicative identity (1).
    pub fn one() -> Self {
        Decimal(RustDecimal::ONE)
    }

    /// Returns the value 100.
    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    /// Returns true if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Round to [`DISPLAY_DP`] fractional digits, midpoint away from zero.
    pub fn round_display(&self) -> Self {
        Decimal(
            self.0
                .round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
                .normalize(),
        )
    }

    pub fn checked_add(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_add(rhs.0).map(Decimal)
    }

    pub fn checked_sub(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_sub(rhs.0).map(Decimal)
    }

    pub fn checked_mul(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_mul(rhs.0).map(Decimal)
    }

    /// Division returning `None` on a zero divisor or overflow.
    pub fn checked_div(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_div(rhs.0).map(Decimal)
    }

    /// `self` percent expressed as a fraction (`2` -> `0.02`).
    pub fn percent_fraction(self) -> Option<Decimal> {
        self.checked_div(Decimal::hundred())
    }
}

/// The numeric prefix found at the start of a form value.
struct NumericPrefix<'a> {
    negative: bool,
    int_digits: &'a str,
    frac_digits: &'a str,
    exponent: i64,
}

impl<'a> NumericPrefix<'a> {
    fn scan(s: &'a str) -> Option<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let int_start = pos;
        pos += count_digits(&bytes[pos..]);
        let int_digits = &s[int_start..pos];

        let mut frac_digits = "";
        if bytes.get(pos) == Some(&b'.') {
            let frac_start = pos + 1;
            let frac_len = count_digits(&bytes[frac_start..]);
            frac_digits = &s[frac_start..frac_start + frac_len];
            pos = frac_start + frac_len;
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }

        let mut exponent = 0i64;
        if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
            let mut exp_pos = pos + 1;
            let exp_negative = match bytes.get(exp_pos) {
                Some(b'-') => {
                    exp_pos += 1;
                    true
                }
                Some(b'+') => {
                    exp_pos += 1;
                    false
                }
                _ => false,
            };
            let exp_len = count_digits(&bytes[exp_pos..]);
            // A dangling "e" is not part of the number.
            if exp_len > 0 {
                let magnitude = s[exp_pos..exp_pos + exp_len]
                    .parse::<i64>()
                    .unwrap_or(i64::MAX);
                exponent = if exp_negative { -magnitude } else { magnitude };
            }
        }

        Some(NumericPrefix {
            negative,
            int_digits,
            frac_digits,
            exponent,
        })
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_parse_lenient_plain_numbers() {
        assert_eq!(Decimal::parse_lenient("100"), Some(d("100")));
        assert_eq!(Decimal::parse_lenient("-2.5"), Some(d("-2.5")));
        assert_eq!(Decimal::parse_lenient("+3"), Some(d("3")));
        assert_eq!(Decimal::parse_lenient("0.0001"), Some(d("0.0001")));
    }

    #[test]
    fn test_parse_lenient_partial_forms() {
        assert_eq!(Decimal::parse_lenient(".5"), Some(d("0.5")));
        assert_eq!(Decimal::parse_lenient("5."), Some(d("5")));
        assert_eq!(Decimal::parse_lenient("  7"), Some(d("7")));
        assert_eq!(Decimal::parse_lenient("12abc"), Some(d("12")));
        assert_eq!(Decimal::parse_lenient("1.2.3"), Some(d("1.2")));
        assert_eq!(Decimal::parse_lenient("0x10"), Some(d("0")));
    }

    #[test]
    fn test_parse_lenient_exponent() {
        assert_eq!(Decimal::parse_lenient("1e2"), Some(d("100")));
        assert_eq!(Decimal::parse_lenient("2.5E-2"), Some(d("0.025")));
        assert_eq!(Decimal::parse_lenient("3e+1"), Some(d("30")));
        // Dangling exponent marker is ignored.
        assert_eq!(Decimal::parse_lenient("4e"), Some(d("4")));
        assert_eq!(Decimal::parse_lenient("0e999"), Some(d("0")));
    }

    #[test]
    fn test_parse_lenient_exponent_scales_long_mantissa() {
        // 33 fractional digits shifted back into range.
        assert_eq!(
            Decimal::parse_lenient("0.000000000000000000000000000000123e30"),
            Some(d("0.123"))
        );
        assert_eq!(
            Decimal::parse_lenient("0.000000000000000000000000000000123e33"),
            Some(d("123"))
        );
        // 32 integer digits scaled down below the decimal limit.
        let scaled = Decimal::parse_lenient("12345678901234567890123456789012e-10").unwrap();
        assert_eq!(scaled.inner().trunc(), d("1234567890123456789012").inner());
        assert_eq!(
            Decimal::parse_lenient("1000000000000000000000000000000000e-30"),
            Some(d("1000"))
        );
        assert_eq!(Decimal::parse_lenient("-25e-1"), Some(d("-2.5")));
    }

    #[test]
    fn test_parse_lenient_rejects_non_numbers() {
        for input in ["", "   ", "abc", ".", "-", "+", "e5", "Infinity", "NaN", "-.e1"] {
            assert_eq!(Decimal::parse_lenient(input), None, "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_lenient_out_of_range() {
        assert_eq!(Decimal::parse_lenient("1e40"), None);
        assert_eq!(Decimal::parse_lenient("1e99999999999999999999"), None);
        assert_eq!(Decimal::parse_lenient("1e-99999"), Some(Decimal::zero()));
    }

    #[test]
    fn test_round_display() {
        assert_eq!(d("166.666666").round_display(), d("166.6667"));
        assert_eq!(d("1.00005").round_display(), d("1.0001"));
        assert_eq!(d("-1.00005").round_display(), d("-1.0001"));
        assert_eq!(d("150.0000").round_display().to_canonical_string(), "150");
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(d("10.5").checked_add(d("2.5")), Some(d("13")));
        assert_eq!(d("10.5").checked_sub(d("2.5")), Some(d("8")));
        assert_eq!(d("10.5").checked_mul(d("2.5")), Some(d("26.25")));
        assert_eq!(d("10").checked_div(d("4")), Some(d("2.5")));
        assert_eq!(d("10").checked_div(Decimal::zero()), None);

        let huge = d("79228162514264337593543950335");
        assert_eq!(huge.checked_mul(d("2")), None);
    }

    #[test]
    fn test_percent_fraction() {
        assert_eq!(d("0.02").percent_fraction(), Some(d("0.0002")));
        assert_eq!(d("10").percent_fraction(), Some(d("0.1")));
    }

    #[test]
    fn test_decimal_json_serialization() {
        let decimal = d("123.456");
        let json = serde_json::to_value(decimal).unwrap();
        // Should serialize as a JSON number, not a string
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_decimal_display() {
        assert_eq!(d("99.990").to_string(), "99.99");
    }
}

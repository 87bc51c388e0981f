//! Phone number classification and normalization.
//!
//! Raw form input is classified into one of three statuses. Only the
//! 10-digit subscriber scheme is supported: ten digits as-is, or eleven
//! digits with a leading `7` or `8` country/trunk digit. Valid numbers are
//! rendered in the canonical `8-DDD-DDD-DD-DD` form.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of digits in a subscriber number.
const SUBSCRIBER_LEN: usize = 10;

/// Number of digits in a number carrying a leading country/trunk digit.
const PREFIXED_LEN: usize = 11;

/// Leading digits accepted on an 11-digit number.
const ACCEPTED_PREFIXES: [char; 2] = ['7', '8'];

/// Punctuation allowed in addition to digits and whitespace.
const ALLOWED_PUNCTUATION: [char; 5] = ['(', ')', '+', '.', '-'];

/// Digit group sizes of the canonical format after the leading `8`.
const GROUPS: [usize; 4] = [3, 3, 2, 2];

/// Classification of a raw phone input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneStatus {
    /// The input contains a character outside the allowed set.
    CharacterMismatch,
    /// The input has the wrong number of digits, or an 11-digit number
    /// does not start with `7` or `8`.
    LengthDiscrepancy,
    /// The input is a valid phone number.
    Valid,
}

impl PhoneStatus {
    /// Returns the user-facing error message, or `None` for valid input.
    #[must_use]
    pub const fn error_message(self) -> Option<&'static str> {
        match self {
            Self::CharacterMismatch => Some(
                "Недопустимый ввод. В номере телефона встречаются недопустимые символы.",
            ),
            Self::LengthDiscrepancy => Some("Недопустимый ввод. Неверное количество цифр."),
            Self::Valid => None,
        }
    }
}

impl fmt::Display for PhoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CharacterMismatch => "character mismatch",
            Self::LengthDiscrepancy => "length discrepancy",
            Self::Valid => "good",
        };
        f.write_str(name)
    }
}

/// Result of normalizing a raw phone input.
///
/// `digits` is always `raw` with every non-digit removed, and `formatted` is
/// present exactly when the status is [`PhoneStatus::Valid`].
///
/// ## Examples
///
/// ```
/// use web_labs_core::{PhoneCheck, PhoneStatus};
///
/// let check = PhoneCheck::normalize("+7 (123) 456-75-90");
/// assert_eq!(check.status(), PhoneStatus::Valid);
/// assert_eq!(check.formatted(), Some("8-123-456-75-90"));
///
/// let check = PhoneCheck::normalize("123-abc-4567");
/// assert_eq!(check.status(), PhoneStatus::CharacterMismatch);
/// assert_eq!(check.formatted(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneCheck {
    raw: String,
    digits: String,
    status: PhoneStatus,
    formatted: Option<String>,
}

impl PhoneCheck {
    /// Classify and normalize a raw phone input.
    ///
    /// The character check runs before the length check, so input with both
    /// invalid characters and a wrong digit count is a
    /// [`PhoneStatus::CharacterMismatch`].
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let status = classify(raw, &digits);
        let formatted = match status {
            PhoneStatus::Valid => Some(format_canonical(&digits)),
            PhoneStatus::CharacterMismatch | PhoneStatus::LengthDiscrepancy => None,
        };

        Self {
            raw: raw.to_owned(),
            digits,
            status,
            formatted,
        }
    }

    /// Returns the input exactly as submitted.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the digits extracted from the input, in order.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Returns the classification of the input.
    #[must_use]
    pub const fn status(&self) -> PhoneStatus {
        self.status
    }

    /// Returns the canonical `8-DDD-DDD-DD-DD` form for valid input.
    #[must_use]
    pub fn formatted(&self) -> Option<&str> {
        self.formatted.as_deref()
    }

    /// Returns true if the input is a valid phone number.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status == PhoneStatus::Valid
    }
}

/// Normalize a raw phone input. Shorthand for [`PhoneCheck::normalize`].
#[must_use]
pub fn normalize(raw: &str) -> PhoneCheck {
    PhoneCheck::normalize(raw)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

fn classify(raw: &str, digits: &str) -> PhoneStatus {
    if !raw.chars().all(is_allowed) {
        return PhoneStatus::CharacterMismatch;
    }

    match digits.len() {
        SUBSCRIBER_LEN => PhoneStatus::Valid,
        PREFIXED_LEN if digits.starts_with(ACCEPTED_PREFIXES) => PhoneStatus::Valid,
        _ => PhoneStatus::LengthDiscrepancy,
    }
}

/// Render a valid digit string as `8-DDD-DDD-DD-DD`.
///
/// An 11-digit input loses its first digit whichever it was; the leading
/// `8` of the output is always literal.
fn format_canonical(digits: &str) -> String {
    let subscriber = if digits.len() == PREFIXED_LEN {
        digits.get(1..).unwrap_or_default()
    } else {
        digits
    };

    let mut out = String::with_capacity(SUBSCRIBER_LEN + GROUPS.len() + 1);
    out.push('8');
    let mut chars = subscriber.chars();
    for size in GROUPS {
        out.push('-');
        out.extend(chars.by_ref().take(size));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatted(raw: &str) -> Option<String> {
        PhoneCheck::normalize(raw).formatted().map(String::from)
    }

    #[test]
    fn test_letters_are_character_mismatch() {
        assert_eq!(
            normalize("123-abc-4567").status(),
            PhoneStatus::CharacterMismatch
        );
        assert_eq!(
            normalize("+7(123)4567xyz").status(),
            PhoneStatus::CharacterMismatch
        );
    }

    #[test]
    fn test_character_check_precedes_length_check() {
        // Two digits and a letter: both checks fail, characters win.
        assert_eq!(normalize("12a").status(), PhoneStatus::CharacterMismatch);
        assert_eq!(normalize("8#").status(), PhoneStatus::CharacterMismatch);
    }

    #[test]
    fn test_wrong_digit_counts() {
        for raw in ["1234567", "123456789012", "+9 (123) 456-78-90", "91234567890"] {
            assert_eq!(
                normalize(raw).status(),
                PhoneStatus::LengthDiscrepancy,
                "{raw}"
            );
        }
    }

    #[test]
    fn test_empty_and_blank_input_is_an_error() {
        assert_eq!(normalize("").status(), PhoneStatus::LengthDiscrepancy);
        assert_eq!(normalize("   ").status(), PhoneStatus::LengthDiscrepancy);
        assert_eq!(normalize("()- .+").status(), PhoneStatus::LengthDiscrepancy);
        assert!(normalize("").formatted().is_none());
    }

    #[test]
    fn test_valid_numbers_are_formatted() {
        let cases = [
            ("+7 (123) 456-75-90", "8-123-456-75-90"),
            ("8(123)4567590", "8-123-456-75-90"),
            ("123.456.75.90", "8-123-456-75-90"),
            ("81234567890", "8-123-456-78-90"),
            ("1234567890", "8-123-456-78-90"),
            ("8 (912) 345 67 89", "8-912-345-67-89"),
            ("0987654321", "8-098-765-43-21"),
            ("8 (777) 555 33 22", "8-777-555-33-22"),
        ];
        for (raw, expected) in cases {
            assert_eq!(formatted(raw).as_deref(), Some(expected), "{raw}");
        }
    }

    #[test]
    fn test_country_digit_seven_becomes_eight() {
        assert_eq!(formatted("71234567890").as_deref(), Some("8-123-456-78-90"));
    }

    #[test]
    fn test_digits_preserve_order() {
        let check = normalize("+7 (123) 456-75-90");
        assert_eq!(check.digits(), "71234567590");
        assert_eq!(check.raw(), "+7 (123) 456-75-90");

        let check = normalize("12-ab-3");
        assert_eq!(check.digits(), "123");
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        // Arabic-Indic digits are not in the allowed set.
        assert_eq!(
            normalize("١٢٣٤٥٦٧٨٩٠").status(),
            PhoneStatus::CharacterMismatch
        );
    }

    #[test]
    fn test_tabs_and_newlines_count_as_whitespace() {
        assert_eq!(
            formatted("123\t456\n75 90").as_deref(),
            Some("8-123-456-75-90")
        );
    }

    #[test]
    fn test_error_messages() {
        assert!(
            PhoneStatus::CharacterMismatch
                .error_message()
                .is_some_and(|m| m.contains("недопустимые символы"))
        );
        assert!(
            PhoneStatus::LengthDiscrepancy
                .error_message()
                .is_some_and(|m| m.contains("Неверное количество цифр"))
        );
        assert_eq!(PhoneStatus::Valid.error_message(), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PhoneStatus::Valid.to_string(), "good");
        assert_eq!(
            PhoneStatus::CharacterMismatch.to_string(),
            "character mismatch"
        );
    }
}

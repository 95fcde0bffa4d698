//! Display masking for sensitive user-entered values.
//!
//! These helpers keep just enough of a value for the user to recognize it
//! while hiding the rest, for confirmation screens and verification prompts.

/// Strips every non-digit character, useful for unmasking phone or
/// identification numbers.
pub fn unmask_number(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Masks a phone number, keeping the first 3 and last 2 digits.
///
/// Non-digit characters are stripped first. Numbers of five digits or fewer
/// are returned unmasked.
///
/// `"7861234567"` becomes `"786***4567"`.
pub fn mask_phone_number(phone: &str) -> String {
    let digits = unmask_number(phone);
    if digits.len() <= 5 {
        return digits;
    }

    let first = &digits[..3];
    let last = &digits[digits.len() - 2..];
    let masked = "*".repeat(digits.len() - 5);
    format!("{first}{masked}{last}")
}

/// Masks the local part of an email address, leaving the domain unchanged.
///
/// The first and last characters of the local part are kept; everything
/// in-between becomes asterisks. Inputs without a domain are returned as-is.
///
/// `"alex@email.com"` becomes `"a**x@email.com"`.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return email.to_string();
    };

    let chars: Vec<char> = local.chars().collect();
    if chars.len() <= 2 {
        let first: String = chars.first().map(char::to_string).unwrap_or_default();
        let masked = "*".repeat(chars.len().saturating_sub(1));
        format!("{first}{masked}@{domain}")
    } else {
        let first = chars[0];
        let last = chars[chars.len() - 1];
        let masked = "*".repeat(chars.len() - 2);
        format!("{first}{masked}{last}@{domain}")
    }
}

//! Single-value validators for common input fields.
//!
//! Each function judges one value in isolation; composition into forms is
//! the caller's concern. Patterns are compiled once and reused, following
//! the lazy-regex-table approach used across the workspace.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{is_blank, is_not_blank};

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 20;
const PASSWORD_SPECIAL_CHARACTERS: &str = "!#$%&()*+-./;<>?@[]_{|}~\\";
const OTP_LENGTH: usize = 6;

// Sequenced OTP candidates are matched as substrings of this digit run.
const SEQUENCED_DIGITS: &str = "0123456789012345789";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_.\-])+@(([a-zA-Z0-9\-])+\.)+([a-zA-Z0-9]{2,4})+$").expect("email pattern")
});

static IMAGE_EXTENSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(png|jpg|jpeg|bmp|gif)$").expect("image extension pattern"));

static PERSON_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([a-zà-ƒ]+\s?[a-zà-ƒ]+)+$").expect("person name pattern"));

static ORGANIZATION_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-zà-ƒ]+\s?[a-zà-ƒ]+)+(\s?([a-zA-Z]+(/|\.)?)+)*$").expect("organization name pattern")
});

static OTP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("otp pattern"));

/// Validates an `https` URL with a non-empty remainder.
pub fn validate_url(url: &str) -> bool {
    url.strip_prefix("https://").is_some_and(is_not_blank)
}

/// Validates an `https` URI pointing at a raster image.
pub fn validate_image_uri(uri: &str) -> bool {
    validate_url(uri) && IMAGE_EXTENSION_PATTERN.is_match(uri)
}

/// Validates a person name: letter runs (accents allowed) separated by
/// single spaces.
pub fn validate_person_name(name: &str) -> bool {
    is_not_blank(name) && PERSON_NAME_PATTERN.is_match(name)
}

/// Validates an organization name: like a person name, with trailing ASCII
/// tokens that may carry `/` or `.` separators (`"Acme S.A."`).
pub fn validate_organization_name(organization_name: &str) -> bool {
    is_not_blank(organization_name) && ORGANIZATION_NAME_PATTERN.is_match(organization_name)
}

/// Validates a password: 8-20 characters with at least one digit, one
/// lowercase letter, one uppercase letter, and one special character.
pub fn validate_password(password: &str) -> bool {
    let length = password.chars().count();
    if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
        return false;
    }
    password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c))
}

/// Validates an email address.
pub fn validate_email(email: &str) -> bool {
    is_not_blank(email) && EMAIL_PATTERN.is_match(email)
}

/// Validates a six-digit one-time password, rejecting sequenced runs
/// (`"123456"`) and repeated blocks (`"121212"`, `"777777"`).
pub fn validate_otp(verification_code: &str) -> bool {
    verification_code.chars().count() == OTP_LENGTH
        && OTP_PATTERN.is_match(verification_code)
        && !is_sequenced_or_repeated(verification_code)
}

/// Returns `true` when the value is blank, a substring of the ascending
/// digit run, or made of one repeated block.
pub fn is_sequenced_or_repeated(value: &str) -> bool {
    if is_blank(value) {
        return true;
    }
    SEQUENCED_DIGITS.contains(value) || is_repeated_block(value)
}

// The original used a backreference pattern (`^(.*)\1+$`); the regex crate
// has no backreferences, so repeated blocks are detected structurally.
fn is_repeated_block(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    let length = chars.len();
    (1..=length / 2).any(|size| {
        length % size == 0 && chars.chunks(size).all(|chunk| chunk == &chars[..size])
    })
}

/// Returns `true` when the value parses as a number.
pub fn is_number(value: &str) -> bool {
    is_not_blank(value) && value.trim().parse::<f64>().is_ok()
}

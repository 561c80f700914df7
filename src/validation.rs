use crate::errors::AppError;
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

pub struct ValidationReq;

impl ValidationReq {
    pub fn name_req() -> String {
        "Name cannot be empty!".to_string()
    }

    pub fn phone_req() -> String {
        "Invalid phone number! Number must contain 10 to 15 digits".to_string()
    }

    pub fn email_req() -> String {
        "Invalid email format! Expected something like name@example.com".to_string()
    }
}

pub fn validate_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Returns the digits of `phone` when there are between 10 and 15 of them.
///
/// Every non-digit character is discarded first, so `"(987) 654-3210"` is
/// accepted as `"9876543210"`. Only the digit count is checked.
pub fn validate_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
        Some(digits)
    } else {
        None
    }
}

/// Full-string match against `local@domain.tld`, with a TLD of two or more letters.
///
/// Blank emails mean "no email" and are never passed here.
pub fn validate_email(email: &str) -> Result<bool, AppError> {
    let re = Regex::new(EMAIL_PATTERN)?;
    Ok(re.is_match(email))
}

use regex::Regex;
use tracing::debug;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const MAX_AGE: i32 = 150;

pub fn validate_email(email: &str) -> bool {
    email.len() <= 254
        && Regex::new(EMAIL_PATTERN)
            .map(|re| re.is_match(email))
            .unwrap_or(false)
}

/// Checks the contact fields shared by doctors and patients.
pub fn validate_person(
    first_name: &str,
    last_name: &str,
    age: i32,
    email: &str,
) -> Result<(), String> {
    if first_name.trim().is_empty() {
        return Err("First name must not be blank".to_string());
    }
    if last_name.trim().is_empty() {
        return Err("Last name must not be blank".to_string());
    }
    if !(0..=MAX_AGE).contains(&age) {
        return Err(format!("Age must be between 0 and {}", MAX_AGE));
    }
    if !validate_email(email) {
        debug!("Rejected email address: {}", email);
        return Err(format!("Invalid email address: {}", email));
    }
    Ok(())
}

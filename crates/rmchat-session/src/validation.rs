//! Identity validation.

/// Accepts emails of at least three characters containing `@` and no
/// whitespace. Surrounding whitespace is ignored.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.chars().count() >= 3 && email.contains('@') && !email.chars().any(char::is_whitespace)
}

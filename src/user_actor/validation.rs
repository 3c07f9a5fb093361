use crate::domain::{FieldMessage, UserInsertDTO};

/// Checks a sign-up payload and returns every failed rule.
///
/// `email_taken` is whether another user already owns the e-mail; the caller
/// looks it up before validating.
pub fn validate_insert(dto: &UserInsertDTO, email_taken: bool) -> Vec<FieldMessage> {
    let mut errors = Vec::new();

    if dto.user.first_name.trim().is_empty() {
        errors.push(FieldMessage::new("firstName", "Required field"));
    }

    let email = dto.user.email.trim();
    if !is_email(email) {
        errors.push(FieldMessage::new("email", "Invalid e-mail address"));
    } else if email_taken {
        errors.push(FieldMessage::new("email", "E-mail already registered"));
    }

    if dto.password.is_empty() {
        errors.push(FieldMessage::new("password", "Required field"));
    }

    errors
}

fn is_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

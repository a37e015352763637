use thiserror::Error;

use crate::database::models::AdminInput;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Remove anything that looks like an HTML tag, then trim.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        match rest[start..].find('>') {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + end + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// `local@domain.tld`, lowercase ASCII only, tld of two letters or more.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "._%+-".contains(c));
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || ".-".contains(c));
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_lowercase());

    local_ok && host_ok && tld_ok
}

/// Ten digits, leading zero.
pub fn is_valid_phone(numero: &str) -> bool {
    numero.len() == 10 && numero.starts_with('0') && numero.chars().all(|c| c.is_ascii_digit())
}

pub const MIN_PASSWORD_LEN: usize = 6;

/// Trim and strip tags from every text field. The password is left alone.
pub fn sanitize_admin(input: AdminInput) -> AdminInput {
    AdminInput {
        nom: strip_tags(&input.nom),
        prenom: strip_tags(&input.prenom),
        email: strip_tags(&input.email),
        password: input.password,
        numero: strip_tags(&input.numero),
        code: strip_tags(&input.code),
    }
}

/// Check a sanitized admin body. `require_password` is false on update.
pub fn validate_admin(input: &AdminInput, require_password: bool) -> Result<(), ValidationError> {
    let required = [
        ("nom", &input.nom),
        ("prenom", &input.prenom),
        ("email", &input.email),
        ("numero", &input.numero),
    ];
    for (field, value) in required {
        if value.is_empty() {
            return Err(ValidationError::new(field, "This field is required"));
        }
    }

    if !is_valid_email(&input.email) {
        return Err(ValidationError::new("email", "Invalid email format"));
    }

    if require_password || !input.password.is_empty() {
        if input.password.is_empty() {
            return Err(ValidationError::new("password", "This field is required"));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
    }

    if !is_valid_phone(&input.numero) {
        return Err(ValidationError::new(
            "numero",
            "Phone number must be 10 digits and start with 0",
        ));
    }

    Ok(())
}

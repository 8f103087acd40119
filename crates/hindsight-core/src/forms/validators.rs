//! Field validators mirroring the standard required/email/length rules.

use regex::Regex;
use std::sync::LazyLock;

/// Local part and domain labels as accepted by common browser email inputs.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

/// A single rule attached to a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Value must contain something other than whitespace.
    Required,
    /// Value must look like an email address. Empty values pass.
    Email,
    /// At least this many characters. Empty values pass.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// Integer within the inclusive range. Empty values pass.
    IntRange { min: i64, max: i64 },
}

/// Why a control failed a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    Email,
    MinLength { required: usize, actual: usize },
    MaxLength { allowed: usize, actual: usize },
    NotAnInteger,
    OutOfRange { min: i64, max: i64 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "is required"),
            Self::Email => write!(f, "must be a valid email"),
            Self::MinLength { required, .. } => write!(f, "must be at least {required} characters"),
            Self::MaxLength { allowed, .. } => write!(f, "must be at most {allowed} characters"),
            Self::NotAnInteger => write!(f, "must be a whole number"),
            Self::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
        }
    }
}

impl Validator {
    /// Check a raw value, returning the failure if any.
    pub fn check(&self, value: &str) -> Option<ValidationError> {
        match *self {
            Self::Required => value.trim().is_empty().then_some(ValidationError::Required),
            Self::Email => {
                if value.is_empty() || is_valid_email(value) {
                    None
                } else {
                    Some(ValidationError::Email)
                }
            }
            Self::MinLength(required) => {
                let actual = value.chars().count();
                (actual > 0 && actual < required)
                    .then_some(ValidationError::MinLength { required, actual })
            }
            Self::MaxLength(allowed) => {
                let actual = value.chars().count();
                (actual > allowed).then_some(ValidationError::MaxLength { allowed, actual })
            }
            Self::IntRange { min, max } => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<i64>() {
                    Ok(n) if (min..=max).contains(&n) => None,
                    Ok(_) => Some(ValidationError::OutOfRange { min, max }),
                    Err(_) => Some(ValidationError::NotAnInteger),
                }
            }
        }
    }
}

/// Email format check with the usual overall and local-part length limits.
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > MAX_EMAIL_LEN {
        return false;
    }
    match value.split_once('@') {
        Some((local, _)) if !local.is_empty() && local.len() <= MAX_LOCAL_PART_LEN => {
            EMAIL_RE.is_match(value)
        }
        _ => false,
    }
}

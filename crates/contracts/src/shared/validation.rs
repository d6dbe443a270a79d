//! Client-side validation shared by the entity forms and the auth forms

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email regex is valid")
});

static UPPER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("regex is valid"));
static LOWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("regex is valid"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("regex is valid"));
static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[!@#$%^&*]").expect("regex is valid"));

pub const MIN_PASSWORD_LEN: usize = 8;

/// Ошибка валидации на клиенте: запрос на сервер не отправляется
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("{field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Password must contain {}", join_rules(.0))]
    WeakPassword(Vec<PasswordRule>),

    #[error("Please select at least one role")]
    NoRoleSelected,

    #[error("This form is read-only")]
    ReadOnly,
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// One requirement of the password policy on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 5] = [
        Self::MinLength,
        Self::Uppercase,
        Self::Lowercase,
        Self::Digit,
        Self::Special,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Self::MinLength => "at least 8 characters",
            Self::Uppercase => "an uppercase letter",
            Self::Lowercase => "a lowercase letter",
            Self::Digit => "a number",
            Self::Special => "a special character",
        }
    }

    pub fn is_satisfied_by(&self, password: &str) -> bool {
        match self {
            Self::MinLength => password.chars().count() >= MIN_PASSWORD_LEN,
            Self::Uppercase => UPPER_RE.is_match(password),
            Self::Lowercase => LOWER_RE.is_match(password),
            Self::Digit => DIGIT_RE.is_match(password),
            Self::Special => SPECIAL_RE.is_match(password),
        }
    }
}

impl std::fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

fn join_rules(rules: &[PasswordRule]) -> String {
    rules
        .iter()
        .map(PasswordRule::description)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rules the password does not satisfy yet, in policy order
pub fn unmet_password_rules(password: &str) -> Vec<PasswordRule> {
    PasswordRule::ALL
        .into_iter()
        .filter(|rule| !rule.is_satisfied_by(password))
        .collect()
}

pub fn check_password_strength(password: &str) -> Result<(), ValidationError> {
    let unmet = unmet_password_rules(password);
    if unmet.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword(unmet))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        Err(ValidationError::EmailRequired)
    } else if !is_valid_email(email) {
        Err(ValidationError::InvalidEmail)
    } else {
        Ok(())
    }
}

/// Login form: email shape plus minimal password length
pub fn check_login_form(email: &str, password: &str) -> Result<(), ValidationError> {
    check_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

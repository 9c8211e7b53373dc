// ============================================================================
// VALIDACIÓN DE FORMULARIOS - Funciones puras
// ============================================================================
// Un único validador de registro parametrizado por rol; la primera regla que
// falla gana. Sin efectos secundarios: misma entrada + mismo día = mismo resultado.
// ============================================================================

use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::{fields_of_work, LoginInput, RegistrationInput, ServiceDraft, UserType, SERVICE_FIELDS};

/// Símbolos aceptados por la regla de contraseña
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";
pub const MIN_PASSWORD_LEN: usize = 8;
pub const ADULT_AGE: i32 = 18;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles");
}

/// Motivo de rechazo; `Display` es el texto que se muestra bajo el formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password must be at least 8 characters, include uppercase, lowercase, number, and special character")]
    WeakPassword,

    #[error("Invalid birth date")]
    InvalidBirthDate,

    #[error("You must be at least 18 years old")]
    Underage,

    #[error("Password confirmation doesn't match")]
    PasswordMismatch,

    #[error("All fields are requiered.")]
    MissingCredentials,

    #[error("All input fields are requiered")]
    MissingServiceFields,

    #[error("The price should be a valid number.")]
    InvalidPrice,

    #[error("Unknown field of work")]
    UnknownField,
}

impl ValidationError {
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_blank_opt(value: Option<&str>) -> bool {
    value.map_or(true, is_blank)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Saltos de línea: la contraseña es una sola línea
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

pub fn is_strong_password(password: &str) -> bool {
    !password.contains(&LINE_TERMINATORS[..])
        && password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Acepta `YYYY-MM-DD`, opcionalmente seguido de `T...` (valor ISO del input)
pub fn parse_birth_date(text: &str) -> Option<NaiveDate> {
    let date_part = text.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Fecha de nacimiento en el formato que espera el backend
pub fn normalize_birth_date(text: &str) -> Option<String> {
    parse_birth_date(text).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Edad cumplida en `today`: resta un año si aún no llegó el mes/día de nacimiento
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

fn required_fields_present(input: &RegistrationInput, role: UserType) -> bool {
    let common = !is_blank(&input.email) && !is_blank(&input.username) && !is_blank(&input.password);
    let role_specific = match role {
        UserType::Customer => !is_blank_opt(input.date_of_birth.as_deref()),
        UserType::Company => !is_blank_opt(input.field_of_work.as_deref()),
    };
    common && role_specific
}

/// Valida un registro con la fecha local de hoy
pub fn validate(input: &RegistrationInput, role: UserType) -> Result<(), ValidationError> {
    validate_on(input, role, Local::now().date_naive())
}

/// Núcleo puro de [`validate`]
pub fn validate_on(input: &RegistrationInput, role: UserType, today: NaiveDate) -> Result<(), ValidationError> {
    if !required_fields_present(input, role) {
        return Err(ValidationError::MissingFields);
    }

    if !is_valid_email(input.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }

    if !is_strong_password(&input.password) {
        return Err(ValidationError::WeakPassword);
    }

    if role == UserType::Customer {
        let birth = input
            .date_of_birth
            .as_deref()
            .and_then(parse_birth_date)
            .ok_or(ValidationError::InvalidBirthDate)?;
        if age_on(birth, today) < ADULT_AGE {
            return Err(ValidationError::Underage);
        }
    }

    if role == UserType::Company {
        let field = input.field_of_work.as_deref().unwrap_or_default().trim();
        if !fields_of_work().contains(&field) {
            return Err(ValidationError::UnknownField);
        }
    }

    if !input.password_confirm.is_empty() && input.password_confirm != input.password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

pub fn validate_login(input: &LoginInput) -> Result<(), ValidationError> {
    if is_blank(&input.email) || input.password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Valida el formulario de servicio y devuelve el precio por hora ya parseado
pub fn validate_service(draft: &ServiceDraft) -> Result<f64, ValidationError> {
    if is_blank(&draft.name) || is_blank(&draft.description) || is_blank(&draft.field) || is_blank(&draft.price_per_hour) {
        return Err(ValidationError::MissingServiceFields);
    }

    let price = draft
        .price_per_hour
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or(ValidationError::InvalidPrice)?;

    if !SERVICE_FIELDS.contains(&draft.field.trim()) {
        return Err(ValidationError::UnknownField);
    }

    Ok(price)
}

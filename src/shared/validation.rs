use std::borrow::Cow;
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

/// Localized messages keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

lazy_static! {
    /// Regex for reference vocabulary codes (subject, grade, semester)
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "arabic", "10", "social-studies"
    /// - Invalid: "-math", "math-", "Math", "math_1", "math 1"
    pub static ref CODE_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn char_range(
    value: &str,
    min: usize,
    max: usize,
    too_short: &'static str,
    too_long: &'static str,
) -> Result<(), ValidationError> {
    let count = value.trim().chars().count();
    if count < min {
        Err(error("length", too_short))
    } else if count > max {
        Err(error("length", too_long))
    } else {
        Ok(())
    }
}

fn code(value: &str, required: &'static str, invalid: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("required", required))
    } else if !CODE_REGEX.is_match(value) {
        Err(error("code", invalid))
    } else {
        Ok(())
    }
}

pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    char_range(
        value,
        TITLE_MIN_CHARS,
        TITLE_MAX_CHARS,
        "العنوان يجب أن يحتوي على 3 أحرف على الأقل",
        "العنوان طويل جداً",
    )
}

pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    char_range(
        value,
        DESCRIPTION_MIN_CHARS,
        DESCRIPTION_MAX_CHARS,
        "الوصف يجب أن يحتوي على 10 أحرف على الأقل",
        "الوصف طويل جداً",
    )
}

pub fn validate_subject(value: &str) -> Result<(), ValidationError> {
    code(value, "يجب اختيار المادة", "رمز المادة غير صالح")
}

pub fn validate_grade(value: &str) -> Result<(), ValidationError> {
    code(value, "يجب اختيار الصف الدراسي", "رمز الصف الدراسي غير صالح")
}

pub fn validate_semester(value: &str) -> Result<(), ValidationError> {
    code(value, "يجب اختيار الفصل الدراسي", "رمز الفصل الدراسي غير صالح")
}

/// Flatten validator output into field -> messages
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// First message in field order, used as the headline of a failure
pub fn first_message(fields: &FieldErrors) -> Option<String> {
    fields.values().flatten().next().cloned()
}

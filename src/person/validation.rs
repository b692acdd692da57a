//! Field validation for person records
//!
//! Both create and update run the same per-field rules, so a stored record
//! always satisfies them.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

pub const NAME_MIN_LENGTH: usize = 3;
pub const NUMBER_MIN_LENGTH: usize = 8;

/// Two or three digit area code, a dash, then digits. ASCII digits only:
/// `\d` in `regex` also matches other Unicode decimal digits.
const NUMBER_PATTERN: &str = r"^[0-9]{2,3}-[0-9]+$";

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("phone number pattern compiles"))
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("Path `{}` is required.", field),
        }
    }

    fn too_short(field: &'static str, value: &str, min: usize) -> Self {
        Self {
            field,
            message: format!(
                "Path `{}` (`{}`) is shorter than the minimum allowed length ({}).",
                field, value, min
            ),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors for one write, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person validation failed: ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a name, returning it trimmed.
pub fn validate_name(name: Option<&str>) -> Result<String, FieldError> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let Some(name) = name else {
        return Err(FieldError::required("name"));
    };

    if name.chars().count() < NAME_MIN_LENGTH {
        return Err(FieldError::too_short("name", name, NAME_MIN_LENGTH));
    }

    Ok(name.to_string())
}

/// Validates a phone number, returning it trimmed.
pub fn validate_number(number: Option<&str>) -> Result<String, FieldError> {
    let number = number.map(str::trim).filter(|n| !n.is_empty());
    let Some(number) = number else {
        return Err(FieldError::required("number"));
    };

    if number.chars().count() < NUMBER_MIN_LENGTH {
        return Err(FieldError::too_short("number", number, NUMBER_MIN_LENGTH));
    }

    if !number_pattern().is_match(number) {
        return Err(FieldError {
            field: "number",
            message: format!("`{}` is not a valid phone number", number),
        });
    }

    Ok(number.to_string())
}

/// Validates both fields of a new person, collecting every failure.
pub fn validate_new_person(
    name: Option<&str>,
    number: Option<&str>,
) -> Result<(String, String), ValidationErrors> {
    match (validate_name(name), validate_number(number)) {
        (Ok(name), Ok(number)) => Ok((name, number)),
        (name, number) => Err(ValidationErrors {
            errors: [name.err(), number.err()].into_iter().flatten().collect(),
        }),
    }
}

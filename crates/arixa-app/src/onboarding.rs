//! Onboarding form validation.
//!
//! Each screen's form is validated all-or-nothing: on any violation the
//! caller gets one [`ValidationError`] naming the problem, nothing is
//! written to the profile, and navigation does not advance.

use std::fmt;
use std::ops::RangeInclusive;

use profile_store::FitnessGoal;

/// Accepted age in years.
pub const AGE_RANGE: RangeInclusive<u32> = 1..=120;

/// Accepted height in centimetres.
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 50.0..=300.0;

/// Accepted weight in kilograms.
pub const WEIGHT_RANGE_KG: RangeInclusive<f64> = 20.0..=500.0;

/// Length of the emailed verification code.
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Which personal-info field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Age,
    Height,
    Weight,
}

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was left blank.
    MissingFields,
    /// A personal-info field is not a number or is outside its range.
    InvalidMeasurement(Measurement),
    /// No fitness goal was picked.
    NoGoalSelected,
    /// The verification code is not six characters.
    InvalidVerificationCode,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFields => write!(f, "Please fill in all fields"),
            ValidationError::InvalidMeasurement(Measurement::Age) => write!(
                f,
                "Please enter a valid age ({}-{})",
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ),
            ValidationError::InvalidMeasurement(Measurement::Height) => write!(
                f,
                "Please enter a valid height in cm ({}-{})",
                HEIGHT_RANGE_CM.start(),
                HEIGHT_RANGE_CM.end()
            ),
            ValidationError::InvalidMeasurement(Measurement::Weight) => write!(
                f,
                "Please enter a valid weight in kg ({}-{})",
                WEIGHT_RANGE_KG.start(),
                WEIGHT_RANGE_KG.end()
            ),
            ValidationError::NoGoalSelected => write!(f, "Please select a fitness goal"),
            ValidationError::InvalidVerificationCode => write!(
                f,
                "Please enter the {}-digit verification code",
                VERIFICATION_CODE_LEN
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validated personal-info screen values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalInfo {
    pub age: u8,
    pub height_cm: f64,
    pub weight_kg: f64,
}

/// Validate the raw text of the personal-info form.
///
/// All three fields must be filled. Age must be a whole number: "25.5" is
/// rejected, not truncated to 25 the way a lenient integer parse would read
/// it. Height and weight may be decimal. Fields are checked age, height, weight, and the
/// first failure is reported.
pub fn validate_personal_info(
    age: &str,
    height: &str,
    weight: &str,
) -> Result<PersonalInfo, ValidationError> {
    let (age, height, weight) = (age.trim(), height.trim(), weight.trim());

    if age.is_empty() || height.is_empty() || weight.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    let age = age
        .parse::<u32>()
        .ok()
        .filter(|a| AGE_RANGE.contains(a))
        .and_then(|a| u8::try_from(a).ok())
        .ok_or(ValidationError::InvalidMeasurement(Measurement::Age))?;

    let height_cm = parse_in_range(height, &HEIGHT_RANGE_CM)
        .ok_or(ValidationError::InvalidMeasurement(Measurement::Height))?;

    let weight_kg = parse_in_range(weight, &WEIGHT_RANGE_KG)
        .ok_or(ValidationError::InvalidMeasurement(Measurement::Weight))?;

    Ok(PersonalInfo {
        age,
        height_cm,
        weight_kg,
    })
}

fn parse_in_range(raw: &str, range: &RangeInclusive<f64>) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && range.contains(v))
}

/// Require exactly one goal to be picked.
pub fn validate_goal_selection(
    selection: Option<FitnessGoal>,
) -> Result<FitnessGoal, ValidationError> {
    selection.ok_or(ValidationError::NoGoalSelected)
}

/// Raw sign-up form input.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign-up input after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignUp {
    pub full_name: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<ValidSignUp, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let (first_name, last_name) = split_name(name);

        Ok(ValidSignUp {
            full_name: name.to_string(),
            first_name,
            last_name,
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Split a full name into first name and the (optional) rest.
pub fn split_name(name: &str) -> (String, Option<String>) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    let last = if rest.is_empty() { None } else { Some(rest) };
    (first, last)
}

/// Require both sign-in fields.
pub fn validate_sign_in(identifier: &str, secret: &str) -> Result<(), ValidationError> {
    if identifier.trim().is_empty() || secret.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

/// Require a code of exactly [`VERIFICATION_CODE_LEN`] characters.
pub fn validate_verification_code(code: &str) -> Result<&str, ValidationError> {
    let code = code.trim();
    if code.chars().count() != VERIFICATION_CODE_LEN {
        return Err(ValidationError::InvalidVerificationCode);
    }
    Ok(code)
}

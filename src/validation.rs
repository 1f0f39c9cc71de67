//! National ID (CPF) normalization and display masking.
//!
//! Every place that accepts or shows a CPF goes through this module so the
//! canonical 11-digit form is the only key ever stored.

use std::fmt;

use crate::error::AppError;

/// Number of digits in a normalized CPF.
pub const NATIONAL_ID_LEN: usize = 11;

/// Number of trailing CPF digits that form the employee ID.
pub const EMPLOYEE_ID_LEN: usize = 5;

/// A CPF reduced to exactly 11 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalId(String);

impl NationalId {
    /// Strip every non-digit character and require exactly 11 digits.
    ///
    /// `"123.456.789-01"`, `"123 456 789 01"` and `"12345678901"` all
    /// normalize to the same value.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let digits = only_digits(raw);
        if digits.len() != NATIONAL_ID_LEN {
            return Err(AppError::InvalidInput(
                "CPF must contain 11 digits.".to_string(),
            ));
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The employee ID derived from this CPF (its last 5 digits).
    pub fn employee_id(&self) -> String {
        employee_id_for(&self.0)
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep only ASCII digits.
pub fn only_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Last 5 characters of a stored CPF, or the whole value if shorter.
pub fn employee_id_for(national_id: &str) -> String {
    let start = national_id.len().saturating_sub(EMPLOYEE_ID_LEN);
    national_id.get(start..).unwrap_or(national_id).to_string()
}

/// Mask a CPF as `XXX.XXX.XXX-XX`.
///
/// Non-digits are ignored when counting; anything that does not reduce to
/// 11 digits is returned unchanged.
pub fn mask_national_id(raw: &str) -> String {
    let d = only_digits(raw);
    if d.len() != NATIONAL_ID_LEN {
        return raw.to_string();
    }
    format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
}

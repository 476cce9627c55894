// 🏢 사업자등록번호 - Business Registration Number
//
// Layout: 3 digits tax office + 2 digits type + 4 digits serial + 1 check.
// The type pair classifies the registrant; it is informational and never
// gates validity.

use super::{fixed_digits, IdKind};
use crate::normalize::{digits_to_string, group_digits, mask_digits};
use crate::validation::{ValidationDetails, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const KIND: IdKind = IdKind::Business;
const LEN: usize = 10;

// ============================================================================
// BUSINESS TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    /// 개인사업자 (00-79)
    Individual,

    /// 법인사업자 (81-87)
    Corporate,

    /// 80, 88-99
    Unknown,
}

impl BusinessType {
    /// Classify from the two-digit type code
    pub fn from_code(code: u8) -> Self {
        match code {
            0..=79 => BusinessType::Individual,
            81..=87 => BusinessType::Corporate,
            _ => BusinessType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Individual => "individual",
            BusinessType::Corporate => "corporate",
            BusinessType::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::Individual => "개인사업자",
            BusinessType::Corporate => "법인사업자",
            BusinessType::Unknown => "알 수 없음",
        }
    }
}

fn classify(digits: &[u8; LEN]) -> BusinessType {
    BusinessType::from_code(digits[3] * 10 + digits[4])
}

// ============================================================================
// BUSINESS NUMBER
// ============================================================================

/// A 사업자등록번호 whose check digit has been verified
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BusinessNumber {
    digits: [u8; LEN],
}

impl BusinessNumber {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = fixed_digits::<LEN>(KIND, input)?;

        if !KIND.scheme().verify(&digits) {
            return Err(ValidationError::Checksum { kind: KIND });
        }

        Ok(BusinessNumber { digits })
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn business_type(&self) -> BusinessType {
        classify(&self.digits)
    }

    /// Issuing tax office (first three digits)
    pub fn office_code(&self) -> String {
        digits_to_string(&self.digits[..3])
    }

    pub fn masked(&self) -> String {
        mask_digits(&self.digits, KIND.visible_digits(), KIND.groups())
    }
}

impl fmt::Display for BusinessNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_digits(&self.digits, KIND.groups()))
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

pub fn validate_business(input: &str) -> ValidationResult {
    let digits = match fixed_digits::<LEN>(KIND, input) {
        Ok(digits) => digits,
        Err(err) => return ValidationResult::invalid(&err, None),
    };

    let passed = KIND.scheme().verify(&digits);
    let details = ValidationDetails {
        business_type: Some(classify(&digits)),
        ..ValidationDetails::checksum(passed)
    };

    if passed {
        ValidationResult::valid(KIND, details)
    } else {
        ValidationResult::invalid(&ValidationError::Checksum { kind: KIND }, Some(details))
    }
}

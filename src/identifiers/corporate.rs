// 🏛️ 법인등록번호 - Corporate Registration Number
// Layout: 4 digits registry office + 2 digits corporation kind + 6 digits serial + 1 check

use super::{fixed_digits, IdKind};
use crate::normalize::{digits_to_string, group_digits, mask_digits};
use crate::validation::{ValidationDetails, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const KIND: IdKind = IdKind::Corporate;
const LEN: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateInfo {
    /// 등기관서 code (digits 1-4)
    pub registry_office: String,

    /// 법인종류 code (digits 5-6)
    pub kind_code: String,
}

fn decode(digits: &[u8; LEN]) -> CorporateInfo {
    CorporateInfo {
        registry_office: digits_to_string(&digits[..4]),
        kind_code: digits_to_string(&digits[4..6]),
    }
}

/// A 법인등록번호 whose check digit has been verified
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorporateNumber {
    digits: [u8; LEN],
}

impl CorporateNumber {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = fixed_digits::<LEN>(KIND, input)?;

        if !KIND.scheme().verify(&digits) {
            return Err(ValidationError::Checksum { kind: KIND });
        }

        Ok(CorporateNumber { digits })
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn registry_office(&self) -> String {
        decode(&self.digits).registry_office
    }

    pub fn kind_code(&self) -> String {
        decode(&self.digits).kind_code
    }

    pub fn masked(&self) -> String {
        mask_digits(&self.digits, KIND.visible_digits(), KIND.groups())
    }
}

impl fmt::Display for CorporateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_digits(&self.digits, KIND.groups()))
    }
}

pub fn validate_corporate(input: &str) -> ValidationResult {
    let digits = match fixed_digits::<LEN>(KIND, input) {
        Ok(digits) => digits,
        Err(err) => return ValidationResult::invalid(&err, None),
    };

    let passed = KIND.scheme().verify(&digits);
    let details = ValidationDetails {
        corporate: Some(decode(&digits)),
        ..ValidationDetails::checksum(passed)
    };

    if passed {
        ValidationResult::valid(KIND, details)
    } else {
        ValidationResult::invalid(&ValidationError::Checksum { kind: KIND }, Some(details))
    }
}

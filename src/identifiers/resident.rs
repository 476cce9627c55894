// 🪪 주민등록번호 - Resident Registration Number
//
// Layout: YYMMDD + century/gender digit + 5 digits + 1 check digit.
//
// The seventh digit encodes both century and gender:
//   9, 0       → 1800s (9 male, 0 female)
//   1, 2       → 1900s, citizen
//   3, 4       → 2000s, citizen
//   5, 6       → 1900s, foreign resident
//   7, 8       → 2000s, foreign resident
// Odd digits are male, even digits female.
//
// Decoded fields are informational. Validity is length + check digit only,
// so a number with an impossible birth date can still be reported valid.

use super::{fixed_digits, IdKind};
use crate::normalize::{group_digits, mask_digits};
use crate::validation::{ValidationDetails, ValidationError, ValidationResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const KIND: IdKind = IdKind::Resident;
const LEN: usize = 13;

// ============================================================================
// DECODED INFO
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "남성",
            Gender::Female => "여성",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentInfo {
    /// First year of the birth century (1800, 1900 or 2000)
    pub century: i32,
    pub gender: Gender,
    pub foreigner: bool,

    /// `None` when YYMMDD is not a calendar date
    pub birth_date: Option<NaiveDate>,
}

fn century_of(code: u8) -> i32 {
    match code {
        9 | 0 => 1800,
        1 | 2 | 5 | 6 => 1900,
        _ => 2000,
    }
}

fn decode(digits: &[u8; LEN]) -> ResidentInfo {
    let code = digits[6];
    let century = century_of(code);

    let yy = i32::from(digits[0] * 10 + digits[1]);
    let month = u32::from(digits[2] * 10 + digits[3]);
    let day = u32::from(digits[4] * 10 + digits[5]);

    ResidentInfo {
        century,
        gender: if code % 2 == 1 { Gender::Male } else { Gender::Female },
        foreigner: (5..=8).contains(&code),
        birth_date: NaiveDate::from_ymd_opt(century + yy, month, day),
    }
}

// ============================================================================
// RESIDENT NUMBER
// ============================================================================

/// A 주민등록번호 whose check digit has been verified
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidentNumber {
    digits: [u8; LEN],
}

impl ResidentNumber {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = fixed_digits::<LEN>(KIND, input)?;

        if !KIND.scheme().verify(&digits) {
            return Err(ValidationError::Checksum { kind: KIND });
        }

        Ok(ResidentNumber { digits })
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn info(&self) -> ResidentInfo {
        decode(&self.digits)
    }

    pub fn century(&self) -> i32 {
        century_of(self.digits[6])
    }

    pub fn gender(&self) -> Gender {
        self.info().gender
    }

    pub fn is_foreigner(&self) -> bool {
        self.info().foreigner
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.info().birth_date
    }

    /// Completed years of age on `today`; `None` for an undecodable or
    /// future birth date
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.birth_date()?;
        if born > today {
            return None;
        }

        let mut age = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            age -= 1;
        }

        u32::try_from(age).ok()
    }

    /// First seven digits visible: `900101-1******`
    pub fn masked(&self) -> String {
        mask_digits(&self.digits, KIND.visible_digits(), KIND.groups())
    }
}

impl fmt::Display for ResidentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_digits(&self.digits, KIND.groups()))
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

pub fn validate_resident(input: &str) -> ValidationResult {
    let digits = match fixed_digits::<LEN>(KIND, input) {
        Ok(digits) => digits,
        Err(err) => return ValidationResult::invalid(&err, None),
    };

    let passed = KIND.scheme().verify(&digits);
    let details = ValidationDetails {
        resident: Some(decode(&digits)),
        ..ValidationDetails::checksum(passed)
    };

    if passed {
        ValidationResult::valid(KIND, details)
    } else {
        ValidationResult::invalid(&ValidationError::Checksum { kind: KIND }, Some(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_number() {
        let result = validate_resident("900101-1234568");

        assert!(result.is_valid);
        assert!(result.checksum_passed());

        let info = result.details.unwrap().resident.unwrap();
        assert_eq!(info.century, 1900);
        assert_eq!(info.gender, Gender::Male);
        assert!(!info.foreigner);
        assert_eq!(info.birth_date, Some(date(1990, 1, 1)));
    }

    #[test]
    fn test_checksum_mismatch() {
        let result = validate_resident("900101-1234567");

        assert!(!result.is_valid);
        assert!(result.message.contains("체크섬"));
        assert!(result.is_checksum_failure());
    }

    #[test]
    fn test_single_digit_change_is_caught_at_every_position() {
        // weights 2..=9 are all units mod 11
        let valid = "9001011234568";
        for pos in 0..12 {
            let mut digits: Vec<u8> = valid.bytes().collect();
            digits[pos] = b'0' + (digits[pos] - b'0' + 1) % 10;
            let changed = String::from_utf8(digits).unwrap();

            let result = validate_resident(&changed);
            assert!(!result.is_valid, "{changed}");
            assert!(result.is_checksum_failure(), "{changed}");
        }
    }

    #[test]
    fn test_wrong_length() {
        let result = validate_resident("900101-123456");

        assert!(!result.is_valid);
        assert!(result.message.contains("13"));
        assert!(result.details.is_none());
        assert!(validate_resident("").is_format_failure());
    }

    #[test]
    fn test_all_zero_is_reported_valid() {
        assert!(validate_resident("0000000000000").is_valid);
    }

    #[test]
    fn test_two_thousands_female() {
        let number = ResidentNumber::parse("020304-4123465").unwrap();

        assert_eq!(number.century(), 2000);
        assert_eq!(number.gender(), Gender::Female);
        assert!(!number.is_foreigner());
        assert_eq!(number.birth_date(), Some(date(2002, 3, 4)));
    }

    #[test]
    fn test_foreign_resident() {
        let number = ResidentNumber::parse("850715-5012340").unwrap();

        assert!(number.is_foreigner());
        assert_eq!(number.gender(), Gender::Male);
        assert_eq!(number.birth_date(), Some(date(1985, 7, 15)));
    }

    #[test]
    fn test_check_of_ten_is_always_rejected() {
        // Leading digits of 020304-412345 reduce to a check value of 10
        for last in 0..=9 {
            let input = format!("020304-412345{last}");
            assert!(!validate_resident(&input).is_valid, "{input}");
        }
    }

    #[test]
    fn test_impossible_birth_date_does_not_gate_validity() {
        let result = validate_resident("991301-1000009");

        assert!(result.is_valid);
        let info = result.details.unwrap().resident.unwrap();
        assert_eq!(info.birth_date, None);
    }

    #[test]
    fn test_century_codes() {
        assert_eq!(century_of(9), 1800);
        assert_eq!(century_of(0), 1800);
        for code in [1, 2, 5, 6] {
            assert_eq!(century_of(code), 1900);
        }
        for code in [3, 4, 7, 8] {
            assert_eq!(century_of(code), 2000);
        }
    }

    #[test]
    fn test_age_on() {
        let number = ResidentNumber::parse("900101-1234568").unwrap();

        assert_eq!(number.age_on(date(2020, 1, 1)), Some(30));
        assert_eq!(number.age_on(date(2019, 12, 31)), Some(29));
        assert_eq!(number.age_on(date(1989, 12, 31)), None);
    }

    #[test]
    fn test_display_and_mask() {
        let number = ResidentNumber::parse("9001011234568").unwrap();
        assert_eq!(number.to_string(), "900101-1234568");
        assert_eq!(number.masked(), "900101-1******");
    }
}

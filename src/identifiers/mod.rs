// Identifier kinds - one module per Korean registration-number format

pub mod business;
pub mod corporate;
pub mod resident;

pub use business::{validate_business, BusinessNumber, BusinessType};
pub use corporate::{validate_corporate, CorporateInfo, CorporateNumber};
pub use resident::{validate_resident, Gender, ResidentInfo, ResidentNumber};

use crate::checksum::{self, ChecksumScheme};
use crate::normalize::{extract_digits, group_digits, mask_digits};
use crate::validation::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// ID KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdKind {
    /// 주민등록번호
    #[serde(rename = "rrn")]
    Resident,

    /// 사업자등록번호
    #[serde(rename = "brn")]
    Business,

    /// 법인등록번호
    #[serde(rename = "crn")]
    Corporate,
}

impl IdKind {
    pub const ALL: [IdKind; 3] = [IdKind::Resident, IdKind::Business, IdKind::Corporate];

    pub fn code(&self) -> &'static str {
        match self {
            IdKind::Resident => "rrn",
            IdKind::Business => "brn",
            IdKind::Corporate => "crn",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdKind::Resident => "주민등록번호",
            IdKind::Business => "사업자등록번호",
            IdKind::Corporate => "법인등록번호",
        }
    }

    pub fn scheme(&self) -> ChecksumScheme {
        match self {
            IdKind::Resident => checksum::RESIDENT,
            IdKind::Business => checksum::BUSINESS,
            IdKind::Corporate => checksum::CORPORATE,
        }
    }

    /// Required digit count
    pub fn length(&self) -> usize {
        self.scheme().length()
    }

    /// Hyphenated display groups
    pub fn groups(&self) -> &'static [usize] {
        match self {
            IdKind::Resident | IdKind::Corporate => &[6, 7],
            IdKind::Business => &[3, 2, 5],
        }
    }

    /// Digits left readable when masked
    pub fn visible_digits(&self) -> usize {
        match self {
            IdKind::Resident => 7,
            IdKind::Business => 5,
            IdKind::Corporate => 6,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            IdKind::Resident => IdKind::Business,
            IdKind::Business => IdKind::Corporate,
            IdKind::Corporate => IdKind::Resident,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            IdKind::Resident => IdKind::Corporate,
            IdKind::Business => IdKind::Resident,
            IdKind::Corporate => IdKind::Business,
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("지원하지 않는 번호 종류입니다: {0:?} (rrn, brn, crn 중 하나)")]
pub struct ParseKindError(pub String);

impl FromStr for IdKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rrn" | "resident" => Ok(IdKind::Resident),
            "brn" | "business" => Ok(IdKind::Business),
            "crn" | "corporate" => Ok(IdKind::Corporate),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Validate `input` as the given kind
pub fn validate(kind: IdKind, input: &str) -> ValidationResult {
    match kind {
        IdKind::Resident => validate_resident(input),
        IdKind::Business => validate_business(input),
        IdKind::Corporate => validate_corporate(input),
    }
}

/// Extract digits and require exactly `N` of them
pub(crate) fn fixed_digits<const N: usize>(
    kind: IdKind,
    input: &str,
) -> Result<[u8; N], ValidationError> {
    let digits = extract_digits(input);
    let actual = digits.len();

    digits.try_into().map_err(|_| ValidationError::Format {
        kind,
        expected: N,
        actual,
    })
}

/// Hyphenated form of any input with the right digit count
///
/// The check digit is not verified.
pub fn format_input(kind: IdKind, input: &str) -> Result<String, ValidationError> {
    let digits = length_checked(kind, input)?;
    Ok(group_digits(&digits, kind.groups()))
}

/// Masked form of any input with the right digit count
pub fn mask_input(kind: IdKind, input: &str) -> Result<String, ValidationError> {
    let digits = length_checked(kind, input)?;
    Ok(mask_digits(&digits, kind.visible_digits(), kind.groups()))
}

fn length_checked(kind: IdKind, input: &str) -> Result<Vec<u8>, ValidationError> {
    let digits = extract_digits(input);
    if digits.len() != kind.length() {
        return Err(ValidationError::Format {
            kind,
            expected: kind.length(),
            actual: digits.len(),
        });
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("rrn".parse::<IdKind>().unwrap(), IdKind::Resident);
        assert_eq!(" BRN ".parse::<IdKind>().unwrap(), IdKind::Business);
        assert_eq!("Corporate".parse::<IdKind>().unwrap(), IdKind::Corporate);

        let err = "ssn".parse::<IdKind>().unwrap_err();
        assert!(err.to_string().contains("ssn"));
        assert!(err.to_string().contains("지원하지 않는"));
    }

    #[test]
    fn test_kind_lengths() {
        assert_eq!(IdKind::Resident.length(), 13);
        assert_eq!(IdKind::Business.length(), 10);
        assert_eq!(IdKind::Corporate.length(), 13);
    }

    #[test]
    fn test_kind_cycle() {
        for kind in IdKind::ALL {
            assert_eq!(kind.next().previous(), kind);
        }
        assert_eq!(IdKind::Corporate.next(), IdKind::Resident);
    }

    #[test]
    fn test_dispatch_matches_direct_calls() {
        assert_eq!(
            validate(IdKind::Business, "123-45-67891"),
            validate_business("123-45-67891")
        );
        assert!(validate(IdKind::Resident, "900101-1234568").is_valid);
        assert!(validate(IdKind::Corporate, "110111-1234569").is_valid);
    }

    #[test]
    fn test_validity_is_length_and_checksum() {
        let inputs = [
            "", "0", "abc", "1234567891", "123-45-67891", "1234567890",
            "9001011234568", "900101-1234567", "1101111234569",
            "0000000000", "0000000000000", "12345678901234",
        ];

        for kind in IdKind::ALL {
            for input in inputs {
                let digits = extract_digits(input);
                let expected = digits.len() == kind.length() && kind.scheme().verify(&digits);
                assert_eq!(validate(kind, input).is_valid, expected, "{kind} {input:?}");
            }
        }
    }

    #[test]
    fn test_known_vectors() {
        let cases = [
            (IdKind::Business, "123-45-67891", true),
            (IdKind::Business, "220-81-62948", true),
            (IdKind::Business, "123-80-12344", true),
            (IdKind::Business, "123-45-67890", false),
            (IdKind::Business, "123-45-67892", false),
            (IdKind::Resident, "900101-1234568", true),
            (IdKind::Resident, "020304-4123465", true),
            (IdKind::Resident, "850715-5012340", true),
            (IdKind::Resident, "991301-1000009", true),
            (IdKind::Resident, "900101-1234567", false),
            (IdKind::Corporate, "110111-1234569", true),
            (IdKind::Corporate, "110111-1234560", false),
            (IdKind::Corporate, "110111-1234561", false),
            (IdKind::Business, "900101-1234568", false),
            (IdKind::Resident, "123-45-67891", false),
        ];

        for (kind, input, expected) in cases {
            assert_eq!(validate(kind, input).is_valid, expected, "{kind} {input}");
        }
    }

    #[test]
    fn test_exactly_one_check_digit_for_base_ten() {
        for (kind, prefix) in [(IdKind::Business, "12345"), (IdKind::Corporate, "11011112")] {
            let width = kind.length() - prefix.len() - 1;
            for serial in 0..500u32 {
                let body = format!("{prefix}{serial:0width$}");
                let passing = (0..10)
                    .filter(|d| validate(kind, &format!("{body}{d}")).is_valid)
                    .count();
                assert_eq!(passing, 1, "{kind} {body}");
            }
        }
    }

    #[test]
    fn test_format_input_ignores_checksum() {
        assert_eq!(format_input(IdKind::Business, "1234567890").unwrap(), "123-45-67890");
        assert_eq!(format_input(IdKind::Resident, "9001011234567").unwrap(), "900101-1234567");

        let err = format_input(IdKind::Business, "12345").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_mask_input() {
        assert_eq!(mask_input(IdKind::Resident, "900101-1234568").unwrap(), "900101-1******");
        assert_eq!(mask_input(IdKind::Business, "1234567891").unwrap(), "123-45-*****");
        assert_eq!(mask_input(IdKind::Corporate, "1101111234569").unwrap(), "110111-*******");
    }

    #[test]
    fn test_kind_serializes_as_code() {
        assert_eq!(serde_json::to_string(&IdKind::Business).unwrap(), "\"brn\"");
        let kind: IdKind = serde_json::from_str("\"crn\"").unwrap();
        assert_eq!(kind, IdKind::Corporate);
    }
}

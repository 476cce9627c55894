// 📋 Validation Result - what every validator hands back
//
// Failures are values, not panics: callers always receive a
// ValidationResult, and the ValidationError that produced a failure
// supplies its user-visible message.

use crate::identifiers::business::BusinessType;
use crate::identifiers::corporate::CorporateInfo;
use crate::identifiers::resident::ResidentInfo;
use crate::identifiers::IdKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Normalized digit count differs from the kind's required length
    #[error("{label}는 {expected}자리 숫자여야 합니다 (입력된 숫자: {actual}자리)", label = .kind.label())]
    Format {
        kind: IdKind,
        expected: usize,
        actual: usize,
    },

    /// Length is right but the trailing check digit does not match
    #[error("{label}의 체크섬이 일치하지 않습니다", label = .kind.label())]
    Checksum { kind: IdKind },
}

impl ValidationError {
    pub fn kind(&self) -> IdKind {
        match self {
            ValidationError::Format { kind, .. } | ValidationError::Checksum { kind } => *kind,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, ValidationError::Format { .. })
    }

    pub fn is_checksum(&self) -> bool {
        matches!(self, ValidationError::Checksum { .. })
    }
}

// ============================================================================
// DETAILS
// ============================================================================

/// Present once the input has the right number of digits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetails {
    pub checksum_passed: bool,

    /// Business registration subtype (사업자등록번호 only)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<BusinessType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident: Option<ResidentInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corporate: Option<CorporateInfo>,
}

impl ValidationDetails {
    pub fn checksum(passed: bool) -> Self {
        ValidationDetails {
            checksum_passed: passed,
            ..Default::default()
        }
    }
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ValidationDetails>,
}

impl ValidationResult {
    pub fn valid(kind: IdKind, details: ValidationDetails) -> Self {
        ValidationResult {
            is_valid: true,
            message: format!("유효한 {}입니다", kind.label()),
            details: Some(details),
        }
    }

    pub fn invalid(error: &ValidationError, details: Option<ValidationDetails>) -> Self {
        ValidationResult {
            is_valid: false,
            message: error.to_string(),
            details,
        }
    }

    /// Failure that is not tied to a known identifier kind
    pub fn rejected(message: impl Into<String>) -> Self {
        ValidationResult {
            is_valid: false,
            message: message.into(),
            details: None,
        }
    }

    pub fn checksum_passed(&self) -> bool {
        self.details.as_ref().is_some_and(|d| d.checksum_passed)
    }

    /// Length was right, check digit was not
    pub fn is_checksum_failure(&self) -> bool {
        !self.is_valid && self.details.as_ref().is_some_and(|d| !d.checksum_passed)
    }

    /// Wrong number of digits
    pub fn is_format_failure(&self) -> bool {
        !self.is_valid && self.details.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_names_required_length() {
        let err = ValidationError::Format {
            kind: IdKind::Business,
            expected: 10,
            actual: 9,
        };

        let msg = err.to_string();
        assert!(msg.contains("사업자등록번호"));
        assert!(msg.contains("10자리"));
        assert!(err.is_format());
        assert_eq!(err.kind(), IdKind::Business);
    }

    #[test]
    fn test_checksum_message_mentions_checksum() {
        let err = ValidationError::Checksum {
            kind: IdKind::Resident,
        };

        assert!(err.to_string().contains("체크섬"));
        assert!(err.is_checksum());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let mut details = ValidationDetails::checksum(true);
        details.business_type = Some(BusinessType::Individual);

        let result = ValidationResult::valid(IdKind::Business, details);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["isValid"], true);
        assert_eq!(json["details"]["checksumPassed"], true);
        assert_eq!(json["details"]["type"], "individual");
        assert!(json["details"].get("resident").is_none());
    }

    #[test]
    fn test_format_failure_has_no_details() {
        let err = ValidationError::Format {
            kind: IdKind::Corporate,
            expected: 13,
            actual: 0,
        };
        let result = ValidationResult::invalid(&err, None);

        assert!(result.is_format_failure());
        assert!(!result.is_checksum_failure());
        assert!(!result.checksum_passed());

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("details").is_none());
    }
}

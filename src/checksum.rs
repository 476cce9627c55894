// ✅ Checksum Schemes - weighted check-digit arithmetic
//
// Each identifier kind is a fixed weight vector applied to the leading
// n-1 digits, reduced modulo a base. The check digit is
// (base - sum mod base) mod base.

// ============================================================================
// SCHEME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumScheme {
    /// Weight per leading digit (length = total digits - 1)
    pub weights: &'static [u32],

    /// Modulus (11 for resident numbers, 10 otherwise)
    pub base: u32,

    /// Digit whose weighted product also contributes its tens part
    pub carry_index: Option<usize>,
}

/// 주민등록번호
pub const RESIDENT: ChecksumScheme = ChecksumScheme {
    weights: &[2, 3, 4, 5, 6, 7, 8, 9, 2, 3, 4, 5],
    base: 11,
    carry_index: None,
};

/// 사업자등록번호
pub const BUSINESS: ChecksumScheme = ChecksumScheme {
    weights: &[1, 3, 7, 1, 3, 7, 1, 3, 5],
    base: 10,
    carry_index: Some(8),
};

/// 법인등록번호
pub const CORPORATE: ChecksumScheme = ChecksumScheme {
    weights: &[1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2],
    base: 10,
    carry_index: None,
};

impl ChecksumScheme {
    /// Total digits including the check digit
    pub fn length(&self) -> usize {
        self.weights.len() + 1
    }

    /// Weighted sum of the leading digits
    ///
    /// Digits beyond the weight vector are ignored; missing digits count as 0.
    pub fn weighted_sum(&self, digits: &[u8]) -> u32 {
        let mut sum: u32 = self
            .weights
            .iter()
            .zip(digits)
            .map(|(w, d)| w * u32::from(*d))
            .sum();

        if let Some(idx) = self.carry_index {
            if let Some(d) = digits.get(idx) {
                sum += (u32::from(*d) * self.weights[idx]) / 10;
            }
        }

        sum
    }

    /// Expected check digit for the given leading digits
    ///
    /// May be 10 for base 11, which no single digit can match.
    pub fn compute(&self, digits: &[u8]) -> u32 {
        (self.base - self.weighted_sum(digits) % self.base) % self.base
    }

    /// True when `digits` has the right length and its last digit matches
    pub fn verify(&self, digits: &[u8]) -> bool {
        match digits.split_last() {
            Some((last, _)) if digits.len() == self.length() => {
                self.compute(digits) == u32::from(*last)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::extract_digits;

    #[test]
    fn test_scheme_lengths() {
        assert_eq!(RESIDENT.length(), 13);
        assert_eq!(BUSINESS.length(), 10);
        assert_eq!(CORPORATE.length(), 13);
    }

    #[test]
    fn test_business_weighted_sum_includes_carry() {
        let digits = extract_digits("1234567891");
        // 165 from the products plus floor(9 * 5 / 10) = 4
        assert_eq!(BUSINESS.weighted_sum(&digits), 169);
        assert_eq!(BUSINESS.compute(&digits), 1);
        assert!(BUSINESS.verify(&digits));
    }

    #[test]
    fn test_all_zero_passes_every_scheme() {
        assert!(RESIDENT.verify(&[0; 13]));
        assert!(BUSINESS.verify(&[0; 10]));
        assert!(CORPORATE.verify(&[0; 13]));
    }

    #[test]
    fn test_resident_check_of_ten_never_matches() {
        // Leading digits sum to 23 → 23 % 11 = 1 → check would be 10
        let mut digits = vec![0u8; 13];
        digits[7] = 1; // weight 9
        digits[11] = 1; // weight 5
        digits[10] = 1; // weight 4 → 9 + 5 + 4 = 18
        digits[0] = 1; // weight 2 → 20
        digits[1] = 1; // weight 3 → 23
        assert_eq!(RESIDENT.weighted_sum(&digits), 23);
        assert_eq!(RESIDENT.compute(&digits), 10);

        for last in 0..=9 {
            digits[12] = last;
            assert!(!RESIDENT.verify(&digits));
        }
    }

    #[test]
    fn test_verify_rejects_wrong_length() {
        assert!(!BUSINESS.verify(&[]));
        assert!(!BUSINESS.verify(&[0; 9]));
        assert!(!BUSINESS.verify(&[0; 11]));
    }
}

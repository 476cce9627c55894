// 🔢 Normalization - raw user input → digit vector
// Hyphens, spaces, letters and anything else that is not an ASCII digit
// are dropped. Order of the remaining digits is preserved.

/// Extract ASCII digits from arbitrary input, preserving order
pub fn extract_digits(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// Render digits back to a string
pub fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Join digit groups with hyphens
///
/// `groups` are group lengths and must sum to `digits.len()`; a trailing
/// remainder is appended as its own group.
pub fn group_digits(digits: &[u8], groups: &[usize]) -> String {
    let mut parts = Vec::with_capacity(groups.len() + 1);
    let mut start = 0;

    for &len in groups {
        let end = (start + len).min(digits.len());
        if start >= end {
            break;
        }
        parts.push(digits_to_string(&digits[start..end]));
        start = end;
    }

    if start < digits.len() {
        parts.push(digits_to_string(&digits[start..]));
    }

    parts.join("-")
}

/// Replace every digit from `visible` onwards with `*`, then group
pub fn mask_digits(digits: &[u8], visible: usize, groups: &[usize]) -> String {
    let rendered = group_digits(digits, groups);
    let mut seen = 0;

    rendered
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen > visible {
                    return '*';
                }
            }
            c
        })
        .collect()
}

//! International dial codes offered by the invoice-request form.
//!
//! The payload field `code` carries one of these prefixes.

/// Dial code preselected in a new form (Costa Rica).
pub const DEFAULT_DIAL_CODE: &str = "+506";

/// A country entry in the dial code picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialCode {
    /// Prefix including the leading `+`.
    pub code: &'static str,
    /// English country name.
    pub country: &'static str,
    /// ISO 3166-1 alpha-2 country code.
    pub iso: &'static str,
}

/// Dial codes shown at the top of the picker, Costa Rica first.
pub static DIAL_CODES: &[DialCode] = &[
    DialCode { code: "+506", country: "Costa Rica", iso: "CR" },
    DialCode { code: "+1", country: "United States", iso: "US" },
    DialCode { code: "+1", country: "Canada", iso: "CA" },
    DialCode { code: "+44", country: "United Kingdom", iso: "GB" },
    DialCode { code: "+49", country: "Germany", iso: "DE" },
    DialCode { code: "+33", country: "France", iso: "FR" },
    DialCode { code: "+39", country: "Italy", iso: "IT" },
    DialCode { code: "+34", country: "Spain", iso: "ES" },
    DialCode { code: "+91", country: "India", iso: "IN" },
    DialCode { code: "+86", country: "China", iso: "CN" },
    DialCode { code: "+81", country: "Japan", iso: "JP" },
    DialCode { code: "+82", country: "South Korea", iso: "KR" },
    DialCode { code: "+61", country: "Australia", iso: "AU" },
    DialCode { code: "+55", country: "Brazil", iso: "BR" },
    DialCode { code: "+52", country: "Mexico", iso: "MX" },
    DialCode { code: "+7", country: "Russia", iso: "RU" },
];

/// Check whether `code` is well-formed: `+` followed by 1 to 4 digits.
///
/// Any such prefix is accepted, not only the ones in [`DIAL_CODES`].
pub fn is_valid_dial_code(code: &str) -> bool {
    match code.strip_prefix('+') {
        Some(digits) => {
            (1..=4).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// First listed dial code that a stored customer `code` starts with.
///
/// Stored codes are not always clean (`"+506 "`, `"+50688887777"`), so the
/// match is by prefix and the first entry in picker order wins.
pub fn dial_code_for(stored: &str) -> Option<&'static DialCode> {
    let stored = stored.trim();
    DIAL_CODES.iter().find(|d| stored.starts_with(d.code))
}

/// Countries sharing a dial code, in picker order.
pub fn countries_for_dial_code(code: &str) -> Vec<&'static DialCode> {
    DIAL_CODES.iter().filter(|d| d.code == code).collect()
}

//! IBAN check-digit arithmetic (ISO 13616 mod-97).

/// Computes the two check digits for a country code and BBAN.
///
/// Returns `None` if either part contains characters other than ASCII letters and digits.
pub fn iban_check_digits(country: &str, bban: &str) -> Option<u8> {
    let rearranged = format!("{bban}{country}00");
    let remainder = mod97(&rearranged)?;
    Some((98 - remainder) as u8)
}

/// Validates the structure and checksum of an IBAN.
pub fn is_valid_iban(iban: &str) -> bool {
    if iban.len() < 5 || !iban.is_ascii() {
        return false;
    }
    let (head, bban) = iban.split_at(4);
    let rearranged = format!("{bban}{head}");
    mod97(&rearranged) == Some(1)
}

/// Streams the letter-expanded number through mod 97 without big integers.
fn mod97(s: &str) -> Option<u32> {
    let mut remainder: u32 = 0;
    for c in s.chars() {
        let value = c.to_digit(36)?;
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }
    Some(remainder)
}

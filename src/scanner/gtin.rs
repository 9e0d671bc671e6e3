use thiserror::Error;

/// EAN-8, UPC-A, EAN-13 and GTIN-14.
pub const GTIN_LENGTHS: &[usize] = &[8, 12, 13, 14];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Nothing that looks like a code in this frame yet.
    #[error("No barcode in frame")]
    NoCode,
    #[error("Unsupported barcode length {0}")]
    Format(usize),
    #[error("Check digit mismatch for {0}")]
    Checksum(String),
}

/// Turn one raw frame from a scanner into a validated GTIN.
pub fn decode(frame: &str) -> Result<String, DecodeError> {
    let code = frame.trim();
    if code.is_empty() || !code.chars().any(|c| c.is_ascii_digit()) {
        return Err(DecodeError::NoCode);
    }
    if !code.chars().all(|c| c.is_ascii_digit()) || !GTIN_LENGTHS.contains(&code.len()) {
        return Err(DecodeError::Format(code.len()));
    }
    if !check_digit_ok(code) {
        return Err(DecodeError::Checksum(code.to_string()));
    }
    Ok(code.to_string())
}

/// Mod-10 check: weights 3,1,3,... from the digit left of the check digit.
pub fn check_digit_ok(code: &str) -> bool {
    let digits: Vec<u32> = code.chars().filter_map(|c| c.to_digit(10)).collect();
    let Some((check, body)) = digits.split_last() else {
        return false;
    };

    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * 3 } else { *d })
        .sum();

    (10 - sum % 10) % 10 == *check
}

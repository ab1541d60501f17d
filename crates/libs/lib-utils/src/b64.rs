//! # Base64 Encoding/Decoding
//!
//! Token segments arrive from several issuers, some emitting the URL-safe
//! alphabet without padding and some the standard alphabet with it, so the
//! decoder here accepts both.

use base64::{engine::general_purpose, Engine as _};

/// Encode bytes to base64 URL-safe string (no padding).
pub fn b64u_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(content)
}

/// Decode base64 URL-safe string to bytes.
pub fn b64u_decode(b64u: &str) -> Result<Vec<u8>, Error> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(b64u)
        .map_err(|_| Error::FailToB64uDecode)
}

/// Decode either base64 alphabet, padded or unpadded.
///
/// Standard-alphabet characters are folded onto the URL-safe ones and any
/// trailing `=` is dropped before decoding.
pub fn b64_decode_lenient(input: &str) -> Result<Vec<u8>, Error> {
    let normalized: String = input
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(Error::Empty);
    }

    b64u_decode(&normalized)
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToB64uDecode,
    Empty,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_accepts_both_alphabets() {
        // 0xfb 0xff encodes to "+/8=" standard, "-_8" url-safe
        assert_eq!(b64_decode_lenient("+/8=").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(b64_decode_lenient("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_lenient_rejects_garbage() {
        assert!(b64_decode_lenient("").is_err());
        assert!(b64_decode_lenient("not base64!").is_err());
    }
}

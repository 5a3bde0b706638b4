//! Pure string utilities over `/`-delimited object keys.
//!
//! Extraction helpers split a key around its last delimiter; a key with no
//! delimiter has an empty base name and base path. [`decode`] reverses the
//! percent-encoding applied to keys in storage event payloads, including the
//! `+`-as-space convention.
//!
//! No I/O, fully deterministic.

use crate::error::ClientError;

/// The object key delimiter.
pub const PREFIX_DELIMITER: char = '/';

/// Charset an encoded key is decoded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCharset {
    /// UTF-8.
    Utf8,
    /// US-ASCII.
    Ascii,
}

/// Returns the filename of a key: the segment after the last delimiter, or
/// the whole key when no delimiter is present.
///
/// # Examples
///
/// ```
/// use bucketry_client::key::filename;
///
/// assert_eq!(filename("land/raw/data.txt"), "data.txt");
/// assert_eq!(filename("data.txt"), "data.txt");
/// assert_eq!(filename(""), "");
/// ```
#[must_use]
pub fn filename(key: &str) -> &str {
    key.rfind(PREFIX_DELIMITER)
        .map_or(key, |pos| &key[pos + 1..])
}

/// Returns the base name of a key: everything before the last delimiter,
/// exclusive, or `""` when no delimiter is present.
///
/// # Examples
///
/// ```
/// use bucketry_client::key::base_name;
///
/// assert_eq!(base_name("land/raw/data.txt"), "land/raw");
/// assert_eq!(base_name("data.txt"), "");
/// ```
#[must_use]
pub fn base_name(key: &str) -> &str {
    key.rfind(PREFIX_DELIMITER).map_or("", |pos| &key[..pos])
}

/// Returns the base path of a key: everything up to and including the last
/// delimiter, or `""` when no delimiter is present.
///
/// # Examples
///
/// ```
/// use bucketry_client::key::base_path;
///
/// assert_eq!(base_path("land/raw/data.txt"), "land/raw/");
/// assert_eq!(base_path("data.txt"), "");
/// ```
#[must_use]
pub fn base_path(key: &str) -> &str {
    key.rfind(PREFIX_DELIMITER)
        .map_or("", |pos| &key[..=pos])
}

/// Percent-decode an encoded key under the given charset.
///
/// Decoding is strict: a `%` must be followed by exactly two hex digits, and
/// the decoded bytes must be valid for `charset`. `+` decodes to a space
/// (the form-encoding convention used by storage event payloads).
///
/// # Errors
///
/// Returns [`ClientError::DecodeError`] for truncated or non-hex escape
/// sequences, for non-ASCII bytes under [`KeyCharset::Ascii`], and for
/// invalid UTF-8 under [`KeyCharset::Utf8`].
pub fn decode(key: &str, charset: KeyCharset) -> Result<String, ClientError> {
    let bytes = key.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_value);
                let lo = bytes.get(i + 2).copied().and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi * 16 + lo);
                        i += 3;
                    }
                    _ => {
                        return Err(ClientError::DecodeError {
                            message: format!("malformed escape sequence at byte {i} in {key:?}"),
                        });
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    match charset {
        KeyCharset::Utf8 => String::from_utf8(out).map_err(|_| ClientError::DecodeError {
            message: format!("decoded bytes of {key:?} are not valid UTF-8"),
        }),
        KeyCharset::Ascii => {
            if out.is_ascii() {
                // ASCII is a UTF-8 subset, so this cannot fail.
                Ok(String::from_utf8(out).unwrap_or_default())
            } else {
                Err(ClientError::DecodeError {
                    message: format!("decoded bytes of {key:?} are not US-ASCII"),
                })
            }
        }
    }
}

/// Decode a percent-encoded key as UTF-8.
pub fn decode_utf8(key: &str) -> Result<String, ClientError> {
    decode(key, KeyCharset::Utf8)
}

/// Decode a percent-encoded key as US-ASCII.
pub fn decode_ascii(key: &str) -> Result<String, ClientError> {
    decode(key, KeyCharset::Ascii)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

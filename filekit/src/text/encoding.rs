//! Charset lookup and conversion.
//!
//! Labels follow the WHATWG encoding names understood by `encoding_rs`,
//! plus the Windows code-page spellings that are common in Japanese
//! environments (`SJIS-win`, `cp932`, `eucJP-win`).

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};

/// Source charsets tried, in order, when none are given.
pub const DEFAULT_SOURCE_CHARSETS: &[&str] = &["UTF-8", "Shift_JIS", "EUC-JP"];

/// Look up an encoding by label.
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`] if the label is not recognised.
///
/// # Examples
///
/// ```
/// use filekit::text::encoding::charset;
///
/// assert_eq!(charset("utf-8").unwrap().name(), "UTF-8");
/// assert_eq!(charset("SJIS-win").unwrap().name(), "Shift_JIS");
/// assert_eq!(charset("eucJP-win").unwrap().name(), "EUC-JP");
/// assert!(charset("martian").is_err());
/// ```
pub fn charset(label: &str) -> Result<&'static Encoding> {
    let trimmed = label.trim();
    let lowered = trimmed.to_ascii_lowercase();
    let canonical = match lowered.as_str() {
        "sjis" | "sjis-win" | "cp932" | "windows-31j" => "shift_jis",
        "eucjp" | "eucjp-win" => "euc-jp",
        "utf8" => "utf-8",
        other => other,
    };
    Encoding::for_label(canonical.as_bytes()).ok_or_else(|| Error::UnknownCharset {
        label: trimmed.to_string(),
    })
}

/// Look up a list of encodings by label.
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`] for the first label not recognised.
pub fn charsets<S: AsRef<str>>(labels: &[S]) -> Result<Vec<&'static Encoding>> {
    labels.iter().map(|label| charset(label.as_ref())).collect()
}

/// Decode bytes with the first candidate that decodes them without errors.
///
/// A leading byte order mark is dropped. If no candidate fits, the first
/// one (or UTF-8) decodes with replacement characters.
#[must_use]
pub fn decode_with_candidates<'a>(bytes: &'a [u8], candidates: &[&'static Encoding]) -> Cow<'a, str> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (Some(encoding), &bytes[bom_len..]),
        None => (None, bytes),
    };

    if let Some(encoding) = encoding {
        let (text, _) = encoding.decode_without_bom_handling(body);
        return text;
    }

    for candidate in candidates {
        if let Some(text) = candidate.decode_without_bom_handling_and_without_replacement(body) {
            return text;
        }
    }

    let fallback = candidates.first().copied().unwrap_or(UTF_8);
    let (text, _) = fallback.decode_without_bom_handling(body);
    text
}

/// Encode text into the given charset.
///
/// Characters the charset cannot represent become numeric character
/// references, as `encoding_rs` does for its legacy encoders.
#[must_use]
pub fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}

/// Convert bytes from one of several source charsets into `to`.
///
/// An empty `from` list means [`DEFAULT_SOURCE_CHARSETS`].
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`] if any label is not recognised.
///
/// # Examples
///
/// ```
/// use filekit::text::encoding::convert_encoding;
///
/// let sjis = convert_encoding("日本".as_bytes(), "Shift_JIS", &[]).unwrap();
/// assert_eq!(sjis, [0x93, 0xfa, 0x96, 0x7b]);
///
/// let utf8 = convert_encoding(&sjis, "UTF-8", &["Shift_JIS"]).unwrap();
/// assert_eq!(utf8, "日本".as_bytes());
/// ```
pub fn convert_encoding(bytes: &[u8], to: &str, from: &[&str]) -> Result<Vec<u8>> {
    let target = charset(to)?;
    let sources = if from.is_empty() {
        charsets(DEFAULT_SOURCE_CHARSETS)?
    } else {
        charsets(from)?
    };
    let text = decode_with_candidates(bytes, &sources);
    Ok(encode(&text, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{EUC_JP, SHIFT_JIS};

    #[test]
    fn test_charset_aliases() {
        assert_eq!(charset("SJIS").unwrap(), SHIFT_JIS);
        assert_eq!(charset("cp932").unwrap(), SHIFT_JIS);
        assert_eq!(charset(" EUC-JP ").unwrap(), EUC_JP);
        assert_eq!(charset("UTF8").unwrap(), UTF_8);
    }

    #[test]
    fn test_unknown_charset() {
        let err = charset("nope").unwrap_err();
        assert!(matches!(err, Error::UnknownCharset { label } if label == "nope"));
    }

    #[test]
    fn test_decode_prefers_first_clean_candidate() {
        let sjis = encode("テスト", SHIFT_JIS);
        let text = decode_with_candidates(&sjis, &[UTF_8, SHIFT_JIS]);
        assert_eq!(text, "テスト");

        let utf8 = "テスト".as_bytes();
        let text = decode_with_candidates(utf8, &[UTF_8, SHIFT_JIS]);
        assert_eq!(text, "テスト");
    }

    #[test]
    fn test_decode_strips_bom() {
        let text = decode_with_candidates(b"\xEF\xBB\xBFa,b", &[SHIFT_JIS]);
        assert_eq!(text, "a,b");
    }

    #[test]
    fn test_decode_falls_back_with_replacement() {
        let text = decode_with_candidates(&[0x61, 0xff], &[UTF_8]);
        assert_eq!(text, "a\u{fffd}");
    }

    #[test]
    fn test_convert_encoding_round_trip() {
        let euc = convert_encoding("漢字".as_bytes(), "EUC-JP", &["UTF-8"]).unwrap();
        let back = convert_encoding(&euc, "UTF-8", &["EUC-JP"]).unwrap();
        assert_eq!(back, "漢字".as_bytes());
    }
}

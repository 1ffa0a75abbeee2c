//! Line ending conversion.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A line terminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r`
    Cr,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator's characters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lf => "LF",
            Self::Cr => "CR",
            Self::CrLf => "CRLF",
        };
        f.write_str(name)
    }
}

impl FromStr for LineEnding {
    type Err = Error;

    /// Parse `LF`, `CR` or `CRLF`, ignoring case. An empty string is `LF`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "LF" => Ok(Self::Lf),
            "CR" => Ok(Self::Cr),
            "CRLF" => Ok(Self::CrLf),
            _ => Err(Error::Validation {
                field: "line_ending".to_string(),
                message: format!("unknown line ending '{s}', expected LF, CR or CRLF"),
            }),
        }
    }
}

/// Replace every `\r\n`, `\r` and `\n` in `text` with `ending`.
///
/// # Examples
///
/// ```
/// use filekit::text::{convert_crlf, LineEnding};
///
/// assert_eq!(convert_crlf("a\r\nb\rc\nd", LineEnding::Lf), "a\nb\nc\nd");
/// assert_eq!(convert_crlf("a\nb", LineEnding::CrLf), "a\r\nb");
/// ```
#[must_use]
pub fn convert_crlf(text: &str, ending: LineEnding) -> String {
    let terminator = ending.as_str();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str(terminator);
            }
            '\n' => out.push_str(terminator),
            other => out.push(other),
        }
    }
    out
}

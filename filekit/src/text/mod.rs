//! Text helpers: charsets, CSV tables and line endings.
//!
//! CSV reading lives on [`Filesystem`](crate::Filesystem) because it starts
//! from a path; everything else here is pure data transformation.

pub mod csv;
pub mod encoding;
pub mod newline;

pub use self::csv::{mk_csv, parse_csv, CsvReadOptions, CsvTable, CsvWriteOptions};
pub use encoding::{charset, convert_encoding};
pub use newline::{convert_crlf, LineEnding};

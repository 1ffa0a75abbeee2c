//! Reading and writing CSV tables in a chosen charset.
//!
//! Reading decodes the whole file with the first candidate charset that fits
//! before handing the text to the `csv` parser, so quoted cells may span
//! lines and contain delimiters. Writing quotes every non-empty cell.

use crate::error::{Error, Result};
use crate::fs::Filesystem;
use crate::text::encoding::{charset, charsets, decode_with_candidates, encode, DEFAULT_SOURCE_CHARSETS};

/// A parsed CSV file: rows of cells. Rows may differ in length.
pub type CsvTable = Vec<Vec<String>>;

/// Options for [`Filesystem::read_csv`] and [`parse_csv`].
///
/// # Examples
///
/// ```
/// use filekit::text::CsvReadOptions;
///
/// let options = CsvReadOptions::default()
///     .with_delimiter(b'\t')
///     .with_charsets(["Shift_JIS"]);
/// assert_eq!(options.delimiter, b'\t');
/// assert_eq!(options.enclosure, b'"');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReadOptions {
    /// Field separator.
    pub delimiter: u8,
    /// Quote character around cells.
    pub enclosure: u8,
    /// Escape character inside quoted cells; `None` means quotes are
    /// escaped by doubling only.
    pub escape: Option<u8>,
    /// Parser buffer size in bytes; zero keeps the parser's default.
    pub size: usize,
    /// Charset labels to try, in order, when decoding the file.
    pub charsets: Vec<String>,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            enclosure: b'"',
            escape: None,
            size: 0,
            charsets: DEFAULT_SOURCE_CHARSETS
                .iter()
                .map(|label| (*label).to_string())
                .collect(),
        }
    }
}

impl CsvReadOptions {
    /// Set the field separator.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character.
    #[must_use]
    pub fn with_enclosure(mut self, enclosure: u8) -> Self {
        self.enclosure = enclosure;
        self
    }

    /// Set an escape character for quotes inside quoted cells.
    #[must_use]
    pub fn with_escape(mut self, escape: u8) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Set the parser buffer size.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Replace the candidate charsets.
    #[must_use]
    pub fn with_charsets<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.charsets = labels.into_iter().map(Into::into).collect();
        self
    }
}

/// Options for [`mk_csv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvWriteOptions {
    /// Charset label of the produced bytes.
    pub charset: String,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            charset: "UTF-8".to_string(),
        }
    }
}

impl CsvWriteOptions {
    /// Produce bytes in the given charset.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}

impl Filesystem {
    /// Read a CSV file into a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the file does not exist,
    /// [`Error::UnknownCharset`] for a bad charset label, or a CSV error if
    /// the content cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekit::text::CsvReadOptions;
    /// use filekit::Filesystem;
    ///
    /// let temp = tempfile::tempdir().unwrap();
    /// let path = temp.path().join("data.csv");
    /// std::fs::write(&path, "id,name\n1,\"Smith, J\"\n").unwrap();
    ///
    /// let table = Filesystem::new()
    ///     .read_csv(path.to_str().unwrap(), &CsvReadOptions::default())
    ///     .unwrap();
    /// assert_eq!(table, vec![vec!["id", "name"], vec!["1", "Smith, J"]]);
    /// ```
    pub fn read_csv(&self, path: &str, options: &CsvReadOptions) -> Result<CsvTable> {
        let local = self.localize(path);
        if !self.is_file(&local) {
            return Err(Error::PathNotFound { path: local });
        }
        let bytes = self.read_file(&local)?;
        let table = parse_csv(&bytes, options)?;
        log::debug!("read {} rows from {local}", table.len());
        Ok(table)
    }
}

/// Parse CSV bytes into a table.
///
/// The bytes are decoded with the first of `options.charsets` that decodes
/// them cleanly. Lines with no content at all are skipped.
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`] for a bad charset label, or a CSV
/// error if parsing fails.
pub fn parse_csv(bytes: &[u8], options: &CsvReadOptions) -> Result<CsvTable> {
    let candidates = charsets(&options.charsets)?;
    let text = decode_with_candidates(bytes, &candidates);

    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .quote(options.enclosure)
        .double_quote(true);
    if let Some(escape) = options.escape.filter(|escape| *escape != options.enclosure) {
        builder.escape(Some(escape));
    }
    if options.size > 0 {
        builder.buffer_capacity(options.size);
    }

    let mut reader = builder.from_reader(text.as_bytes());
    let mut table = CsvTable::new();
    for record in reader.records() {
        let record = record?;
        table.push(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

/// Render a table as CSV bytes.
///
/// Every non-empty cell is wrapped in double quotes with embedded quotes
/// doubled; empty cells are written bare. Rows end with `\n`.
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`] if the output charset is not
/// recognised.
///
/// # Examples
///
/// ```
/// use filekit::text::{mk_csv, CsvWriteOptions};
///
/// let rows = [vec!["a", "b,c"], vec!["d", "e\"e", "f"]];
/// let bytes = mk_csv(&rows, &CsvWriteOptions::default()).unwrap();
/// assert_eq!(bytes, b"\"a\",\"b,c\"\n\"d\",\"e\"\"e\",\"f\"\n");
/// ```
pub fn mk_csv<R, S>(rows: &[R], options: &CsvWriteOptions) -> Result<Vec<u8>>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let encoding = charset(&options.charset)?;
    let mut out = String::new();
    for row in rows {
        let cells = row.as_ref();
        for (idx, cell) in cells.iter().enumerate() {
            if idx > 0 {
                out.push(',');
            }
            let cell = cell.as_ref();
            if !cell.is_empty() {
                out.push('"');
                out.push_str(&cell.replace('"', "\"\""));
                out.push('"');
            }
        }
        out.push('\n');
    }
    Ok(encode(&out, encoding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::SHIFT_JIS;

    fn table(rows: &[&[&str]]) -> CsvTable {
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_basic() {
        let parsed = parse_csv(b"a,b,c\n1,2,3\n", &CsvReadOptions::default()).unwrap();
        assert_eq!(parsed, table(&[&["a", "b", "c"], &["1", "2", "3"]]));
    }

    #[test]
    fn test_parse_multiline_quoted_cell() {
        let parsed = parse_csv(
            b"id,note\n1,\"line one\nline two\"\n",
            &CsvReadOptions::default(),
        )
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1][1], "line one\nline two");
    }

    #[test]
    fn test_parse_quoted_cell_with_blank_line() {
        let parsed = parse_csv(b"a,\"line1\n\nline2\"\n", &CsvReadOptions::default()).unwrap();
        assert_eq!(parsed, table(&[&["a", "line1\n\nline2"]]));
    }

    #[test]
    fn test_parse_doubled_quotes() {
        let parsed = parse_csv(b"\"say \"\"hi\"\"\",x\n", &CsvReadOptions::default()).unwrap();
        assert_eq!(parsed, table(&[&["say \"hi\"", "x"]]));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let parsed = parse_csv(b"a\nb,c\n", &CsvReadOptions::default()).unwrap();
        assert_eq!(parsed, table(&[&["a"], &["b", "c"]]));
    }

    #[test]
    fn test_parse_custom_delimiter_and_enclosure() {
        let options = CsvReadOptions::default()
            .with_delimiter(b';')
            .with_enclosure(b'\'');
        let parsed = parse_csv(b"'a;b';c\n", &options).unwrap();
        assert_eq!(parsed, table(&[&["a;b", "c"]]));
    }

    #[test]
    fn test_parse_escape_character() {
        let options = CsvReadOptions::default().with_escape(b'\\');
        let parsed = parse_csv(b"\"a\\\"b\",c\n", &options).unwrap();
        assert_eq!(parsed, table(&[&["a\"b", "c"]]));
    }

    #[test]
    fn test_parse_shift_jis() {
        let bytes = encode("名前,値\n山田,1\n", SHIFT_JIS);
        let parsed = parse_csv(&bytes, &CsvReadOptions::default()).unwrap();
        assert_eq!(parsed, table(&[&["名前", "値"], &["山田", "1"]]));
    }

    #[test]
    fn test_parse_unknown_charset() {
        let options = CsvReadOptions::default().with_charsets(["no-such-charset"]);
        assert!(parse_csv(b"a", &options).is_err());
    }

    #[test]
    fn test_mk_csv_quoting() {
        let rows = [vec!["a", "b,c"], vec!["d", "e\"e", "f"]];
        let bytes = mk_csv(&rows, &CsvWriteOptions::default()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "\"a\",\"b,c\"\n\"d\",\"e\"\"e\",\"f\"\n"
        );
    }

    #[test]
    fn test_mk_csv_empty_cells_bare() {
        let rows = [vec!["", "x", ""]];
        let bytes = mk_csv(&rows, &CsvWriteOptions::default()).unwrap();
        assert_eq!(bytes, b",\"x\",\n");
    }

    #[test]
    fn test_mk_csv_keeps_all_but_last_delimiter() {
        let rows = [vec!["a", "", ""], vec!["", ""]];
        let bytes = mk_csv(&rows, &CsvWriteOptions::default()).unwrap();
        assert_eq!(bytes, b"\"a\",,\n,\n");
    }

    #[test]
    fn test_mk_csv_empty_row() {
        let rows: [Vec<&str>; 2] = [vec![], vec!["a"]];
        let bytes = mk_csv(&rows, &CsvWriteOptions::default()).unwrap();
        assert_eq!(bytes, b"\n\"a\"\n");
    }

    #[test]
    fn test_mk_csv_charset() {
        let rows = [vec!["日本"]];
        let options = CsvWriteOptions::default().with_charset("SJIS-win");
        let bytes = mk_csv(&rows, &options).unwrap();
        assert_eq!(bytes, [b'"', 0x93, 0xfa, 0x96, 0x7b, b'"', b'\n']);
    }

    #[test]
    fn test_written_csv_parses_back() {
        let rows = [vec!["x", "multi\nline", "q\"uote"], vec!["", "tail"]];
        let bytes = mk_csv(&rows, &CsvWriteOptions::default()).unwrap();
        let parsed = parse_csv(&bytes, &CsvReadOptions::default()).unwrap();
        assert_eq!(
            parsed,
            table(&[&["x", "multi\nline", "q\"uote"], &["", "tail"]])
        );
    }
}

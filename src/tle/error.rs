use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("2 or 3 lines expected, got {0}")]
    LineCount(usize),
    #[error("invalid line length: line {line} has {length} characters, expected 69")]
    LineLength { line: u8, length: usize },
    #[error("line {line} contains non-ASCII characters")]
    NonAscii { line: u8 },
    #[error("unexpected line sequence: line {line} starts with {found:?}, expected '{expected}'")]
    LineMarker {
        line: u8,
        expected: char,
        found: Option<char>,
    },
    #[error("catalog numbers do not match: {line1:?} != {line2:?}")]
    CatalogMismatch { line1: String, line2: String },
    #[error("line {line} failed checksum: computed {computed}, expected {expected}")]
    Checksum { line: u8, computed: u32, expected: u32 },
    #[error("unknown classification code {0:?}")]
    Classification(char),
    #[error("invalid {field} field: {value:?}")]
    Field { field: &'static str, value: String },
    #[error("incomplete record at end of input: {0} line(s) without a closing line 2")]
    IncompleteRecord(usize),
}

impl FormatError {
    pub(crate) fn field(field: &'static str, value: &str) -> Self {
        FormatError::Field {
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TleError {
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Invalid TLE format: {0}")]
    Format(#[from] FormatError),
}

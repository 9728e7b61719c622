mod classification;
pub mod decode;
mod error;
mod file;
pub mod layout;
mod record;

pub use classification::Classification;
pub use error::{FormatError, TleError};
pub use file::{parse_all, read_lines, records, Records, TleFile};
pub use record::{RecordLines, Tle};

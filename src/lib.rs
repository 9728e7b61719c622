//! Parser for Two-Line Element (TLE) sets, in both the classic 2-line form
//! and the 3-line form with a leading `'0'` name line.

pub mod tle;

pub use tle::{parse_all, Classification, FormatError, Tle, TleError, TleFile};

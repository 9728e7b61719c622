//! Fixed-column layout of the two mandatory TLE lines.
//!
//! Offsets are 0-indexed, half-open byte ranges into a 69-character line.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::tle::classification::Classification;
use crate::tle::decode;
use crate::tle::error::FormatError;

pub const LINE_LENGTH: usize = 69;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    First,
    Second,
}

impl Line {
    pub fn number(&self) -> u8 {
        match self {
            Line::First => 1,
            Line::Second => 2,
        }
    }
}

/// How the text of a column is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Line number marker
    Marker,
    CatalogNumber,
    Classification,
    /// Kept exactly as written
    Verbatim,
    /// Trimmed text
    Text,
    Integer,
    /// Integer where a blank field means 0
    OptionalInteger,
    Float,
    /// `[sign][5 digits][signed exponent]` with an implied decimal point
    Scientific,
    /// Digits with an implied leading `0.`
    Fraction,
    /// Two-digit year followed by the fractional day of year
    Epoch,
    Checksum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub line: Line,
    pub start: usize,
    pub end: usize,
    pub rule: Rule,
}

pub const LINE1_MARKER: Column = Column::new("line_number", Line::First, 0, 1, Rule::Marker);
pub const CATALOG_NUMBER_1: Column =
    Column::new("satellite_catalog_num", Line::First, 2, 7, Rule::CatalogNumber);
pub const CLASSIFICATION: Column =
    Column::new("classification", Line::First, 7, 8, Rule::Classification);
pub const LAUNCH_YEAR: Column = Column::new("launch_year", Line::First, 9, 11, Rule::Verbatim);
pub const LAUNCH_NUMBER: Column =
    Column::new("launch_number", Line::First, 11, 14, Rule::OptionalInteger);
pub const LAUNCH_PIECE: Column = Column::new("launch_piece", Line::First, 14, 17, Rule::Text);
pub const EPOCH: Column = Column::new("epoch", Line::First, 18, 32, Rule::Epoch);
pub const MEAN_MOTION_1ST_DERIVATIVE: Column =
    Column::new("mean_motion_1st_derivative", Line::First, 33, 43, Rule::Float);
pub const MEAN_MOTION_2ND_DERIVATIVE: Column =
    Column::new("mean_motion_2nd_derivative", Line::First, 44, 52, Rule::Scientific);
pub const BSTAR_DRAG_TERM: Column =
    Column::new("bstar_drag_term", Line::First, 53, 61, Rule::Scientific);
pub const EPHEMERIS_TYPE: Column =
    Column::new("ephemeris_type", Line::First, 62, 63, Rule::Integer);
pub const ELEMENT_SET_NUMBER: Column =
    Column::new("element_set_number", Line::First, 64, 68, Rule::Integer);
pub const CHECKSUM_1: Column = Column::new("checksum1", Line::First, 68, 69, Rule::Checksum);

pub const LINE2_MARKER: Column = Column::new("line_number", Line::Second, 0, 1, Rule::Marker);
pub const CATALOG_NUMBER_2: Column =
    Column::new("satellite_catalog_num", Line::Second, 2, 7, Rule::CatalogNumber);
pub const INCLINATION: Column = Column::new("inclination", Line::Second, 8, 16, Rule::Float);
pub const RIGHT_ASCENSION: Column =
    Column::new("right_ascension", Line::Second, 17, 25, Rule::Float);
pub const ECCENTRICITY: Column = Column::new("eccentricity", Line::Second, 26, 33, Rule::Fraction);
pub const ARGUMENT_OF_PERIGREE: Column =
    Column::new("argument_of_perigree", Line::Second, 34, 42, Rule::Float);
pub const MEAN_ANOMALY: Column = Column::new("mean_anomaly", Line::Second, 43, 51, Rule::Float);
pub const MEAN_MOTION: Column = Column::new("mean_motion", Line::Second, 52, 62, Rule::Float);
pub const REVOLUTION_NUMBER: Column =
    Column::new("revolution_number", Line::Second, 63, 68, Rule::Integer);
pub const CHECKSUM_2: Column = Column::new("checksum2", Line::Second, 68, 69, Rule::Checksum);

pub const LINE_1: [Column; 13] = [
    LINE1_MARKER,
    CATALOG_NUMBER_1,
    CLASSIFICATION,
    LAUNCH_YEAR,
    LAUNCH_NUMBER,
    LAUNCH_PIECE,
    EPOCH,
    MEAN_MOTION_1ST_DERIVATIVE,
    MEAN_MOTION_2ND_DERIVATIVE,
    BSTAR_DRAG_TERM,
    EPHEMERIS_TYPE,
    ELEMENT_SET_NUMBER,
    CHECKSUM_1,
];

pub const LINE_2: [Column; 10] = [
    LINE2_MARKER,
    CATALOG_NUMBER_2,
    INCLINATION,
    RIGHT_ASCENSION,
    ECCENTRICITY,
    ARGUMENT_OF_PERIGREE,
    MEAN_ANOMALY,
    MEAN_MOTION,
    REVOLUTION_NUMBER,
    CHECKSUM_2,
];

/// A decoded column, whatever its rule.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Classification(Classification),
    Epoch(DateTime<Utc>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{:?}", s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{:e}", x),
            FieldValue::Classification(c) => write!(f, "{}", c),
            FieldValue::Epoch(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl Column {
    pub const fn new(name: &'static str, line: Line, start: usize, end: usize, rule: Rule) -> Self {
        Self {
            name,
            line,
            start,
            end,
            rule,
        }
    }

    pub fn width(&self) -> usize {
        self.end - self.start
    }

    /// The column's text, or an error if `line` is too short to hold it or
    /// the column is not ASCII.
    pub fn raw<'a>(&self, line: &'a str) -> Result<&'a str, FormatError> {
        line.get(self.start..self.end)
            .filter(|s| s.is_ascii())
            .ok_or_else(|| FormatError::field(self.name, line))
    }

    fn invalid(&self, raw: &str) -> FormatError {
        FormatError::field(self.name, raw)
    }

    pub fn verbatim(&self, line: &str) -> Result<String, FormatError> {
        self.raw(line).map(str::to_string)
    }

    pub fn text(&self, line: &str) -> Result<String, FormatError> {
        self.raw(line).map(|s| s.trim().to_string())
    }

    pub fn integer<T: FromStr>(&self, line: &str) -> Result<T, FormatError> {
        let raw = self.raw(line)?;
        decode::integer(raw).ok_or_else(|| self.invalid(raw))
    }

    pub fn optional_integer<T: FromStr + Default>(&self, line: &str) -> Result<T, FormatError> {
        let raw = self.raw(line)?;
        decode::optional_integer(raw).ok_or_else(|| self.invalid(raw))
    }

    pub fn float(&self, line: &str) -> Result<f64, FormatError> {
        let raw = self.raw(line)?;
        decode::float(raw).ok_or_else(|| self.invalid(raw))
    }

    pub fn scientific(&self, line: &str) -> Result<f64, FormatError> {
        let raw = self.raw(line)?;
        let mut chars = raw.chars();
        let sign = chars.next().ok_or_else(|| self.invalid(raw))?;
        let rest = chars.as_str();
        if rest.len() < 2 {
            return Err(self.invalid(raw));
        }
        let (digits, exponent) = rest.split_at(rest.len() - 2);
        decode::reconstruct_scientific(sign, digits, exponent).ok_or_else(|| self.invalid(raw))
    }

    pub fn fraction(&self, line: &str) -> Result<f64, FormatError> {
        let raw = self.raw(line)?;
        decode::reconstruct_fraction(raw).ok_or_else(|| self.invalid(raw))
    }

    pub fn catalog_number(&self, line: &str) -> Result<String, FormatError> {
        let raw = self.raw(line)?;
        decode::catalog_number(raw).ok_or_else(|| self.invalid(raw))
    }

    pub fn classification(&self, line: &str) -> Result<Classification, FormatError> {
        let raw = self.raw(line)?;
        let code = raw.chars().next().ok_or_else(|| self.invalid(raw))?;
        Classification::from_char(code)
    }

    pub fn epoch(&self, line: &str) -> Result<DateTime<Utc>, FormatError> {
        let raw = self.raw(line)?;
        if raw.len() < 2 {
            return Err(self.invalid(raw));
        }
        let (year, day) = raw.split_at(2);
        decode::epoch(year, day).ok_or_else(|| self.invalid(raw))
    }

    /// The single checksum digit at the end of a line.
    pub fn digit(&self, line: &str) -> Result<u8, FormatError> {
        let raw = self.raw(line)?;
        let mut chars = raw.chars();
        match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
            (Some(d), None) => Ok(d as u8),
            _ => Err(self.invalid(raw)),
        }
    }

    /// Decodes the column according to its rule.
    pub fn decode(&self, line: &str) -> Result<FieldValue, FormatError> {
        let value = match self.rule {
            Rule::Marker | Rule::Verbatim => FieldValue::Text(self.verbatim(line)?),
            Rule::Text => FieldValue::Text(self.text(line)?),
            Rule::CatalogNumber => FieldValue::Text(self.catalog_number(line)?),
            Rule::Classification => FieldValue::Classification(self.classification(line)?),
            Rule::Integer => FieldValue::Integer(self.integer(line)?),
            Rule::OptionalInteger => FieldValue::Integer(self.optional_integer(line)?),
            Rule::Float => FieldValue::Float(self.float(line)?),
            Rule::Scientific => FieldValue::Float(self.scientific(line)?),
            Rule::Fraction => FieldValue::Float(self.fraction(line)?),
            Rule::Epoch => FieldValue::Epoch(self.epoch(line)?),
            Rule::Checksum => FieldValue::Integer(i64::from(self.digit(line)?)),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn assert_layout(columns: &[Column], line: Line) {
        let mut previous_end = 0;
        for column in columns {
            assert_eq!(column.line, line, "{} is on the wrong line", column.name);
            assert!(column.start < column.end, "{} is empty", column.name);
            assert!(column.end <= LINE_LENGTH, "{} overruns the line", column.name);
            assert!(
                column.start >= previous_end,
                "{} overlaps the previous column",
                column.name
            );
            previous_end = column.end;
        }
        assert_eq!(previous_end, LINE_LENGTH);
    }

    #[test]
    fn columns_are_ordered_and_disjoint() {
        assert_layout(&LINE_1, Line::First);
        assert_layout(&LINE_2, Line::Second);
    }

    #[test]
    fn raw_slices() {
        assert_eq!(CATALOG_NUMBER_1.raw(ISS_LINE1).unwrap(), "25544");
        assert_eq!(LAUNCH_PIECE.raw(ISS_LINE1).unwrap(), "A  ");
        assert_eq!(MEAN_MOTION_2ND_DERIVATIVE.raw(ISS_LINE1).unwrap(), " 00000-0");
        assert_eq!(BSTAR_DRAG_TERM.raw(ISS_LINE1).unwrap(), "-11606-4");
        assert_eq!(ECCENTRICITY.raw(ISS_LINE2).unwrap(), "0006703");
        assert_eq!(CHECKSUM_2.width(), 1);
    }

    #[test]
    fn raw_on_short_line_is_an_error() {
        assert_eq!(
            MEAN_MOTION.raw("2 25544"),
            Err(FormatError::Field {
                field: "mean_motion",
                value: "2 25544".to_string()
            })
        );
    }

    #[test]
    fn decode_line_1() {
        let decoded: Vec<_> = LINE_1
            .iter()
            .map(|c| c.decode(ISS_LINE1).unwrap())
            .collect();
        assert_eq!(decoded[0], FieldValue::Text("1".into()));
        assert_eq!(decoded[1], FieldValue::Text("25544".into()));
        assert_eq!(
            decoded[2],
            FieldValue::Classification(Classification::Unclassified)
        );
        assert_eq!(decoded[3], FieldValue::Text("98".into()));
        assert_eq!(decoded[4], FieldValue::Integer(67));
        assert_eq!(decoded[5], FieldValue::Text("A".into()));
        assert_eq!(decoded[7], FieldValue::Float(-0.00002182));
        assert_eq!(decoded[8], FieldValue::Float(0.0));
        assert_eq!(decoded[9], FieldValue::Float(-0.11606e-4));
        assert_eq!(decoded[10], FieldValue::Integer(0));
        assert_eq!(decoded[11], FieldValue::Integer(292));
        assert_eq!(decoded[12], FieldValue::Integer(7));
    }

    #[test]
    fn decode_line_2() {
        assert_eq!(INCLINATION.decode(ISS_LINE2), Ok(FieldValue::Float(51.6416)));
        assert_eq!(ECCENTRICITY.decode(ISS_LINE2), Ok(FieldValue::Float(0.0006703)));
        assert_eq!(MEAN_MOTION.decode(ISS_LINE2), Ok(FieldValue::Float(15.7212539)));
        assert_eq!(REVOLUTION_NUMBER.decode(ISS_LINE2), Ok(FieldValue::Integer(56353)));
    }

    #[test]
    fn scientific_field_errors_name_the_column() {
        let line = ISS_LINE1.replace("-11606-4", "-11x06-4");
        assert_eq!(
            BSTAR_DRAG_TERM.scientific(&line),
            Err(FormatError::Field {
                field: "bstar_drag_term",
                value: "-11x06-4".to_string()
            })
        );
    }

    #[test]
    fn blank_launch_number_is_zero() {
        let line = ISS_LINE1.replace("98067A", "98   A");
        assert_eq!(LAUNCH_NUMBER.optional_integer::<u32>(&line), Ok(0));
    }

    #[test]
    fn checksum_digit_must_be_a_digit() {
        let line = format!("{}X", &ISS_LINE1[..68]);
        assert!(CHECKSUM_1.digit(&line).is_err());
        assert_eq!(CHECKSUM_1.digit(ISS_LINE1), Ok(7));
    }
}

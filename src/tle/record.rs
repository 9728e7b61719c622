use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::tle::classification::Classification;
use crate::tle::decode;
use crate::tle::error::FormatError;
use crate::tle::layout::{self, LINE_LENGTH};

/// The physical lines of one logical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLines<'a> {
    TwoLine {
        line1: &'a str,
        line2: &'a str,
    },
    ThreeLine {
        name: &'a str,
        line1: &'a str,
        line2: &'a str,
    },
}

impl<'a> RecordLines<'a> {
    pub fn from_lines<S: AsRef<str>>(lines: &'a [S]) -> Result<Self, FormatError> {
        match lines {
            [line1, line2] => Ok(RecordLines::TwoLine {
                line1: line1.as_ref(),
                line2: line2.as_ref(),
            }),
            [name, line1, line2] => Ok(RecordLines::ThreeLine {
                name: name.as_ref(),
                line1: line1.as_ref(),
                line2: line2.as_ref(),
            }),
            _ => Err(FormatError::LineCount(lines.len())),
        }
    }

    pub fn name_line(&self) -> Option<&'a str> {
        match *self {
            RecordLines::TwoLine { .. } => None,
            RecordLines::ThreeLine { name, .. } => Some(name),
        }
    }

    pub fn element_lines(&self) -> (&'a str, &'a str) {
        match *self {
            RecordLines::TwoLine { line1, line2 } => (line1, line2),
            RecordLines::ThreeLine { line1, line2, .. } => (line1, line2),
        }
    }
}

/// A parsed two-line element set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tle {
    pub name: Option<String>,
    pub satellite_catalog_num: String,
    pub classification: Classification,
    pub launch_year: String,
    pub launch_number: u32,
    pub launch_piece: String,
    pub epoch: DateTime<Utc>,
    pub mean_motion_1st_derivative: f64,
    pub mean_motion_2nd_derivative: f64,
    pub bstar_drag_term: f64,
    pub ephemeris_type: u8,
    pub element_set_number: u32,
    pub inclination: f64,
    pub right_ascension: f64,
    pub eccentricity: f64,
    pub argument_of_perigree: f64,
    pub mean_anomaly: f64,
    pub mean_motion: f64,
    pub revolution_number: u32,
    pub checksum1: u8,
    pub checksum2: u8,
}

impl Tle {
    /// Parses 2 lines, or 3 when the first one is a `'0'` name line.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, FormatError> {
        Self::from_record(RecordLines::from_lines(lines)?)
    }

    /// Parses a pasted block of text, ignoring surrounding whitespace and
    /// blank lines.
    pub fn from_text(text: &str) -> Result<Self, FormatError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        Self::parse(&lines)
    }

    pub fn from_record(record: RecordLines<'_>) -> Result<Self, FormatError> {
        let (line1, line2) = record.element_lines();

        check_length(line1, 1)?;
        check_length(line2, 2)?;
        let name = record.name_line().map(parse_name).transpose()?;
        check_marker(line1, 1, '1')?;
        check_marker(line2, 2, '2')?;

        let catalog1 = layout::CATALOG_NUMBER_1.raw(line1)?;
        let catalog2 = layout::CATALOG_NUMBER_2.raw(line2)?;
        if catalog1 != catalog2 {
            return Err(FormatError::CatalogMismatch {
                line1: catalog1.to_string(),
                line2: catalog2.to_string(),
            });
        }

        let checksum1 = verify_checksum(line1, 1)?;
        let checksum2 = verify_checksum(line2, 2)?;

        let tle = Tle {
            name,
            satellite_catalog_num: layout::CATALOG_NUMBER_1.catalog_number(line1)?,
            classification: layout::CLASSIFICATION.classification(line1)?,
            launch_year: layout::LAUNCH_YEAR.verbatim(line1)?,
            launch_number: layout::LAUNCH_NUMBER.optional_integer(line1)?,
            launch_piece: layout::LAUNCH_PIECE.text(line1)?,
            epoch: layout::EPOCH.epoch(line1)?,
            mean_motion_1st_derivative: layout::MEAN_MOTION_1ST_DERIVATIVE.float(line1)?,
            mean_motion_2nd_derivative: layout::MEAN_MOTION_2ND_DERIVATIVE.scientific(line1)?,
            bstar_drag_term: layout::BSTAR_DRAG_TERM.scientific(line1)?,
            ephemeris_type: layout::EPHEMERIS_TYPE.integer(line1)?,
            element_set_number: layout::ELEMENT_SET_NUMBER.integer(line1)?,
            inclination: layout::INCLINATION.float(line2)?,
            right_ascension: layout::RIGHT_ASCENSION.float(line2)?,
            eccentricity: layout::ECCENTRICITY.fraction(line2)?,
            argument_of_perigree: layout::ARGUMENT_OF_PERIGREE.float(line2)?,
            mean_anomaly: layout::MEAN_ANOMALY.float(line2)?,
            mean_motion: layout::MEAN_MOTION.float(line2)?,
            revolution_number: layout::REVOLUTION_NUMBER.integer(line2)?,
            checksum1,
            checksum2,
        };

        log::debug!(
            "Parsed TLE {} ({}) at epoch {}",
            tle.satellite_catalog_num,
            tle.name.as_deref().unwrap_or("unnamed"),
            tle.epoch
        );
        Ok(tle)
    }
}

fn check_length(line: &str, number: u8) -> Result<(), FormatError> {
    let length = line.chars().count();
    if length != LINE_LENGTH {
        return Err(FormatError::LineLength {
            line: number,
            length,
        });
    }
    if !line.is_ascii() {
        return Err(FormatError::NonAscii { line: number });
    }
    Ok(())
}

fn check_marker(line: &str, number: u8, expected: char) -> Result<(), FormatError> {
    let found = line.chars().next();
    if found != Some(expected) {
        return Err(FormatError::LineMarker {
            line: number,
            expected,
            found,
        });
    }
    Ok(())
}

fn parse_name(line: &str) -> Result<String, FormatError> {
    check_marker(line, 0, '0')?;
    Ok(line[1..].trim().to_string())
}

fn verify_checksum(line: &str, number: u8) -> Result<u8, FormatError> {
    let checksum = if number == 1 {
        layout::CHECKSUM_1
    } else {
        layout::CHECKSUM_2
    };
    let expected = checksum.digit(line)?;
    let computed = decode::checksum(line);
    if computed != u32::from(expected) {
        return Err(FormatError::Checksum {
            line: number,
            computed,
            expected: u32::from(expected),
        });
    }
    Ok(expected)
}

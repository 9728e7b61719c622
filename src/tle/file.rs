use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::tle::error::{FormatError, TleError};
use crate::tle::record::Tle;

/// Iterator over the raw lines of each logical record, see [`records`].
pub struct Records<I> {
    lines: I,
    done: bool,
}

impl<I, S> Iterator for Records<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Vec<String>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buffer = Vec::with_capacity(3);
        for line in self.lines.by_ref() {
            let line = line.as_ref().trim_end();
            if line.is_empty() {
                break;
            }
            buffer.push(line.to_string());
            if line.starts_with('2') {
                log::debug!("Closing record of {} line(s)", buffer.len());
                return Some(Ok(buffer));
            }
        }

        self.done = true;
        if buffer.is_empty() {
            None
        } else {
            Some(Err(FormatError::IncompleteRecord(buffer.len())))
        }
    }
}

/// Groups `lines` into records, each one with trailing whitespace stripped.
///
/// A line starting with `'2'` closes the record buffered so far. Grouping
/// stops at the first blank line; lines still buffered at that point are
/// yielded as an incomplete record error.
pub fn records<I, S>(lines: I) -> Records<I::IntoIter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Records {
        lines: lines.into_iter(),
        done: false,
    }
}

/// Parses consecutive TLE records from `lines`, in input order, stopping at
/// the first failure.
pub fn parse_all<I, S>(lines: I) -> Result<Vec<Tle>, FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    records(lines)
        .map(|record| record.and_then(|lines| Tle::parse(&lines)))
        .collect()
}

/// Reads lines up to, not including, the first blank one. Nothing after it
/// is read.
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines)
}

/// An ordered collection of TLE records read from one source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TleFile {
    pub tles: Vec<Tle>,
}

impl TleFile {
    pub fn from_lines<I, S>(lines: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            tles: parse_all(lines)?,
        })
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TleError> {
        Ok(Self::from_lines(read_lines(reader)?)?)
    }

    /// Read and parse a TLE file, up to its first blank line
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TleError> {
        let path = path.as_ref();
        let file = Self::from_reader(BufReader::new(File::open(path)?))?;
        log::info!("Loaded {} TLE records from {}", file.len(), path.display());
        Ok(file)
    }

    pub fn len(&self) -> usize {
        self.tles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tle> {
        self.tles.iter()
    }

    /// First record with the given (normalized) catalog number
    pub fn find(&self, catalog_num: &str) -> Option<&Tle> {
        self.tles
            .iter()
            .find(|tle| tle.satellite_catalog_num == catalog_num)
    }
}

impl IntoIterator for TleFile {
    type Item = Tle;
    type IntoIter = std::vec::IntoIter<Tle>;

    fn into_iter(self) -> Self::IntoIter {
        self.tles.into_iter()
    }
}

impl<'a> IntoIterator for &'a TleFile {
    type Item = &'a Tle;
    type IntoIter = std::slice::Iter<'a, Tle>;

    fn into_iter(self) -> Self::IntoIter {
        self.tles.iter()
    }
}

use serde::Serialize;
use strum_macros::Display;

use crate::tle::error::FormatError;

/// Security classification of an element set (line 1, column 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Classification {
    #[strum(to_string = "U")]
    #[serde(rename = "U")]
    Unclassified,
    #[strum(to_string = "C")]
    #[serde(rename = "C")]
    Classified,
    #[strum(to_string = "S")]
    #[serde(rename = "S")]
    Secret,
}

impl Classification {
    pub fn from_char(code: char) -> Result<Self, FormatError> {
        match code {
            'U' => Ok(Classification::Unclassified),
            'C' => Ok(Classification::Classified),
            'S' => Ok(Classification::Secret),
            other => Err(FormatError::Classification(other)),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Classification::Unclassified => 'U',
            Classification::Classified => 'C',
            Classification::Secret => 'S',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_codes() {
        for (code, expected) in [
            ('U', Classification::Unclassified),
            ('C', Classification::Classified),
            ('S', Classification::Secret),
        ] {
            let decoded = Classification::from_char(code).unwrap();
            assert_eq!(decoded, expected);
            assert_eq!(decoded.as_char(), code);
            assert_eq!(decoded.to_string(), code.to_string());
        }
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(
            Classification::from_char('X'),
            Err(FormatError::Classification('X'))
        );
        // Codes are case sensitive
        assert!(Classification::from_char('u').is_err());
    }

    #[test]
    fn serializes_as_code_letter() {
        let json = serde_json::to_string(&Classification::Secret).unwrap();
        assert_eq!(json, "\"S\"");
    }
}

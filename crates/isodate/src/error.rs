//! Error types for isodate operations.

use std::fmt;

use thiserror::Error;

/// A date or time field that can be rejected for being out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    OffsetHours,
    OffsetMinutes,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
            Field::OffsetHours => "offset hours",
            Field::OffsetMinutes => "offset minutes",
        };
        f.write_str(name)
    }
}

/// The kind of an [`IsoDateError`], without any of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    MissingYear,
    Structural,
    UnexpectedToken,
    OutOfRange,
    Unsupported,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsoDateError {
    #[error("Character '{character}' not recognized at position {position}")]
    Lexical { character: char, position: usize },

    #[error("No year in date")]
    MissingYear,

    #[error("Invalid structure: {0}")]
    Structural(String),

    #[error("Unexpected token in {context}: '{token}'")]
    UnexpectedToken {
        context: &'static str,
        token: String,
    },

    #[error("Value {value} out of range for {field}")]
    OutOfRange { field: Field, value: String },

    #[error("Not supported: {0}")]
    Unsupported(String),
}

impl IsoDateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IsoDateError::Lexical { .. } => ErrorKind::Lexical,
            IsoDateError::MissingYear => ErrorKind::MissingYear,
            IsoDateError::Structural(_) => ErrorKind::Structural,
            IsoDateError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            IsoDateError::OutOfRange { .. } => ErrorKind::OutOfRange,
            IsoDateError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }

    pub(crate) fn out_of_range(field: Field, value: impl Into<String>) -> Self {
        IsoDateError::OutOfRange {
            field,
            value: value.into(),
        }
    }

    pub(crate) fn unexpected(context: &'static str, token: impl Into<String>) -> Self {
        IsoDateError::UnexpectedToken {
            context,
            token: token.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IsoDateError>;

//! # isodate
//!
//! ISO 8601 date, date-time and interval parsing for loosely specified input.
//!
//! An expression is parsed into raw [`Components`] for its start and end
//! endpoints, then completed into concrete [`BoundaryInstants`]: the first
//! and last instants the expression covers, and their midpoint. Interval
//! ends may omit fields implied by the start, so `1973-06-18/26` ends on
//! June 26th and `2008-02-15/03-14` on March 14th, 2008.
//!
//! ## Modules
//!
//! - [`lexer`]: input text to a disambiguated token stream
//! - [`parser`]: token stream to per-endpoint components
//! - [`boundary`]: components to start/end/midpoint instants
//! - [`trace`]: diagnostic sinks observing the pipeline
//! - [`error`]: Error types
//!
//! Durations (`P1Y2M`), repeating intervals (`R5/...`), calendar-week dates
//! (`2017-W34`) and ordinal dates (`2017-236`) are recognized and rejected
//! with [`IsoDateError::Unsupported`].
//!
//! ```
//! let parsed = isodate::parse("1990-01/2014-05").unwrap();
//! assert_eq!(parsed.components.end.month, Some(5));
//! assert_eq!(parsed.datetimes.end.to_string(), "2014-05-31 23:59:59.999999");
//! ```

use std::fmt;

use serde::Serialize;

pub mod boundary;
pub mod components;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod trace;

pub use boundary::{days_in_month, BoundaryInstants};
pub use components::{Components, Endpoint, ParsedComponents};
pub use error::{ErrorKind, Field, IsoDateError, Result};
pub use token::{Token, TokenKind};
pub use trace::{LogSink, NullSink, Stage, TraceEvent, TraceSink};

/// The full result of parsing one expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIso {
    pub input: String,
    #[serde(skip)]
    pub tokens: Vec<Token>,
    pub components: ParsedComponents,
    pub datetimes: BoundaryInstants,
}

/// Parse an ISO 8601 expression, logging each stage at debug level.
///
/// # Errors
///
/// Returns the first [`IsoDateError`] any stage raises; no partial result
/// is produced.
pub fn parse(input: &str) -> Result<ParsedIso> {
    parse_with_sink(input, &mut LogSink)
}

/// Parse an ISO 8601 expression, reporting each stage to `sink`.
pub fn parse_with_sink(input: &str, sink: &mut dyn TraceSink) -> Result<ParsedIso> {
    let tokens = lexer::lex(input)?;
    sink.record(&TraceEvent {
        stage: Stage::Tokens,
        endpoint: None,
        tokens: &tokens,
    });

    let components = parser::parse_tokens(&tokens, sink)?;
    let datetimes = BoundaryInstants::from_components(&components)?;

    Ok(ParsedIso {
        input: input.to_string(),
        tokens,
        components,
        datetimes,
    })
}

impl fmt::Display for ParsedIso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input: {}", self.input)?;
        writeln!(f, "{}", token::render_tokens(&self.tokens))?;
        let json = serde_json::to_string(&self.components).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

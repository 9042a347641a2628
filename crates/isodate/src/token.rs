//! Lexical tokens of an ISO 8601 expression.

use std::fmt;

/// The closed set of token kinds produced by the lexer.
///
/// `Minus` only exists between tokenizing and disambiguation: every `Minus`
/// is rewritten to either `DateSeparator` or `TimeZoneSign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    DateTimeSeparator,
    TimeSeparator,
    IntervalSeparator,
    Utc,
    TimeZoneSign,
    Minus,
    Period,
    Designator,
    Repeat,
    DateSeparator,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::DateTimeSeparator => "DATETIMESEPARATOR",
            TokenKind::TimeSeparator => "TIMESEPARATOR",
            TokenKind::IntervalSeparator => "INTERVALSEPARATOR",
            TokenKind::Utc => "UTC",
            TokenKind::TimeZoneSign => "TIMEZONESIGN",
            TokenKind::Minus => "MINUS",
            TokenKind::Period => "PERIOD",
            TokenKind::Designator => "DESIGNATOR",
            TokenKind::Repeat => "REPEAT",
            TokenKind::DateSeparator => "DATESEPARATOR",
        }
    }
}

/// A single token. `value` holds the source text the token was lexed from
/// (the full digit run for numbers, leading zeros included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: Some(value.into()),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The token text, or the empty string for a valueless token.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} ({})", self.kind.name(), value),
            None => f.write_str(self.kind.name()),
        }
    }
}

/// Render tokens one per line, as `KIND (value)`.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render tokens back to their compact source form.
pub fn render_short(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}

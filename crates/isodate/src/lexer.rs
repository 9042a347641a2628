//! Tokenizer and minus-sign disambiguation.
//!
//! Lexing is two passes over the input: [`tokenize`] classifies characters
//! into tokens, leaving every `-` as an ambiguous [`TokenKind::Minus`], and
//! [`disambiguate`] rewrites those minus tokens from context.

use crate::error::{IsoDateError, Result};
use crate::token::{Token, TokenKind};

/// U+2212 MINUS SIGN, accepted wherever an ASCII hyphen is.
const MINUS_SIGN: char = '\u{2212}';

/// Split `input` into tokens.
///
/// Digit runs become a single [`TokenKind::Number`] whose value keeps the
/// exact digits, so later stages can tell `06` from `6`.
///
/// # Errors
///
/// Returns [`IsoDateError::Lexical`] at the first character outside the
/// recognized set.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut num_buf = String::new();

    // The trailing `None` flushes a pending digit run.
    let chars = input.chars().map(Some).chain(std::iter::once(None));
    for (position, ch) in chars.enumerate() {
        if let Some(c) = ch.filter(char::is_ascii_digit) {
            num_buf.push(c);
            continue;
        }
        if !num_buf.is_empty() {
            tokens.push(Token::new(TokenKind::Number, std::mem::take(&mut num_buf)));
        }
        let Some(c) = ch else { break };

        let kind = match c {
            ' ' | 'T' => TokenKind::DateTimeSeparator,
            ':' => TokenKind::TimeSeparator,
            '/' => TokenKind::IntervalSeparator,
            'Z' => TokenKind::Utc,
            '+' => TokenKind::TimeZoneSign,
            '-' | MINUS_SIGN => TokenKind::Minus,
            'P' => TokenKind::Period,
            'Y' | 'M' | 'W' | 'D' | 'H' | 'S' => TokenKind::Designator,
            'R' => TokenKind::Repeat,
            _ => {
                return Err(IsoDateError::Lexical {
                    character: c,
                    position,
                })
            }
        };
        tokens.push(Token::new(kind, c));
    }

    Ok(tokens)
}

/// Resolve every [`TokenKind::Minus`] in place.
///
/// A minus seen after a time separator within the same interval endpoint is
/// the sign of a negative UTC offset; any other minus separates date fields.
pub fn disambiguate(tokens: &mut [Token]) {
    let mut in_time = false;
    for token in tokens.iter_mut() {
        match token.kind {
            TokenKind::TimeSeparator => in_time = true,
            TokenKind::IntervalSeparator => in_time = false,
            TokenKind::Minus => {
                let kind = if in_time {
                    TokenKind::TimeZoneSign
                } else {
                    TokenKind::DateSeparator
                };
                *token = Token::new(kind, "-");
            }
            _ => {}
        }
    }
}

/// Tokenize and disambiguate in one call.
pub fn lex(input: &str) -> Result<Vec<Token>> {
    let mut tokens = tokenize(input)?;
    disambiguate(&mut tokens);
    Ok(tokens)
}

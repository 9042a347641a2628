//! Recursive-descent parsing of a disambiguated token stream into
//! [`ParsedComponents`].
//!
//! The stream is split at the interval separator and each endpoint is parsed
//! on its own. The end endpoint is parsed against the already-parsed start:
//! when it supplies fewer date numbers than the start defined, its numbers
//! fill the least significant fields (`1973-06-18/26` ends on the 26th).

use crate::boundary::days_in_month;
use crate::components::{Components, Endpoint, ParsedComponents};
use crate::error::{Field, IsoDateError, Result};
use crate::token::{Token, TokenKind};
use crate::trace::{Stage, TraceEvent, TraceSink};

/// Parse a disambiguated token stream.
///
/// # Errors
///
/// Fails on the first structural, range or grammar error; there is no
/// partial result.
pub fn parse_tokens(tokens: &[Token], sink: &mut dyn TraceSink) -> Result<ParsedComponents> {
    // `Rn/start/end` carries two interval separators.
    if tokens.first().is_some_and(|t| t.is(TokenKind::Repeat)) {
        return Err(IsoDateError::Unsupported("repeating intervals".to_string()));
    }
    let (start_tokens, end_tokens) = split_interval(tokens)?;

    let start = parse_part(Endpoint::Start, start_tokens, &Components::default(), sink)?;
    let end = match end_tokens {
        Some(tokens) => parse_part(Endpoint::End, tokens, &start, sink)?,
        None => Components::default(),
    };

    Ok(ParsedComponents {
        start,
        end,
        is_interval: end_tokens.is_some(),
    })
}

// ── Interval splitting ──────────────────────────────────────────────────────

/// Split at the interval separator, which is dropped from both halves.
fn split_interval(tokens: &[Token]) -> Result<(&[Token], Option<&[Token]>)> {
    let mut parts = tokens.split(|t| t.is(TokenKind::IntervalSeparator));
    let start = parts.next().unwrap_or(&[]);
    let end = parts.next();
    if parts.next().is_some() {
        return Err(IsoDateError::Structural("more than one interval separator".to_string()));
    }
    Ok((start, end))
}

// ── Part dispatch ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grammar {
    DateTime,
    Duration,
}

/// Decide which grammar a part uses from the first separator or designator.
fn detect_grammar(tokens: &[Token]) -> Result<Grammar> {
    for token in tokens {
        match token.kind {
            TokenKind::DateSeparator | TokenKind::TimeSeparator => return Ok(Grammar::DateTime),
            // Basic-format week date such as `2017W34`.
            TokenKind::Designator if token.text() == "W" => {
                return Err(IsoDateError::Unsupported("calendar week dates".to_string()))
            }
            TokenKind::Designator | TokenKind::Period => return Ok(Grammar::Duration),
            TokenKind::Repeat => {
                return Err(IsoDateError::Unsupported("repeating intervals".to_string()))
            }
            _ => {}
        }
    }

    // A lone number is a bare year, or a short end such as the `26` in
    // `1973-06-18/26`.
    match tokens {
        [token] if token.is(TokenKind::Number) => Ok(Grammar::DateTime),
        _ => Err(IsoDateError::Structural(
            "no date separator or duration designator found".to_string(),
        )),
    }
}

fn parse_part(
    endpoint: Endpoint,
    tokens: &[Token],
    start: &Components,
    sink: &mut dyn TraceSink,
) -> Result<Components> {
    sink.record(&TraceEvent {
        stage: Stage::Part,
        endpoint: Some(endpoint),
        tokens,
    });

    match detect_grammar(tokens)? {
        Grammar::DateTime => parse_date_time(endpoint, tokens, start, sink),
        Grammar::Duration => Err(IsoDateError::Unsupported("durations".to_string())),
    }
}

// ── Date-time ───────────────────────────────────────────────────────────────

fn parse_date_time(
    endpoint: Endpoint,
    tokens: &[Token],
    start: &Components,
    sink: &mut dyn TraceSink,
) -> Result<Components> {
    let (date, time) = match tokens.iter().position(|t| t.is(TokenKind::DateTimeSeparator)) {
        Some(i) => (&tokens[..i], Some(&tokens[i + 1..])),
        // A bare time, such as the end of `1990-01-02T03:04/07:08`.
        None if tokens.iter().any(|t| t.is(TokenKind::TimeSeparator)) => {
            (&tokens[..0], Some(tokens))
        }
        None => (tokens, None),
    };

    let mut components = if endpoint == Endpoint::Start || !date.is_empty() {
        sink.record(&TraceEvent {
            stage: Stage::Date,
            endpoint: Some(endpoint),
            tokens: date,
        });
        parse_date(endpoint, date, start)?
    } else {
        Components::default()
    };

    match endpoint {
        Endpoint::Start => validate_date(&components)?,
        Endpoint::End => validate_date(&components.inherit_date(start))?,
    }

    if let Some(time) = time {
        parse_time_and_zone(endpoint, time, &mut components, sink)?;
    }

    Ok(components)
}

// ── Date ────────────────────────────────────────────────────────────────────

/// The next date field a number is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateSlot {
    Year,
    Month,
    Day,
    Full,
}

impl DateSlot {
    /// Where an end endpoint's numbers start filling, given how many date
    /// fields the start set and how many numbers the end supplies.
    fn first_for_end(start_depth: usize, supplied: usize) -> Self {
        match start_depth.saturating_sub(supplied) {
            0 => DateSlot::Year,
            1 => DateSlot::Month,
            _ => DateSlot::Day,
        }
    }
}

fn parse_date(endpoint: Endpoint, tokens: &[Token], start: &Components) -> Result<Components> {
    let mut numbers = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::Number => numbers.push(token.text()),
            TokenKind::DateSeparator => {}
            TokenKind::Designator if token.text() == "W" => {
                return Err(IsoDateError::Unsupported("calendar week dates".to_string()))
            }
            TokenKind::Designator | TokenKind::Period => {
                return Err(IsoDateError::Unsupported("durations".to_string()))
            }
            _ => return Err(IsoDateError::unexpected("date", token.text())),
        }
    }

    if endpoint == Endpoint::Start {
        if let [_, day_of_year] = numbers.as_slice() {
            if day_of_year.len() == 3 {
                return Err(IsoDateError::Unsupported("ordinal dates".to_string()));
            }
        }
    }

    let first = match endpoint {
        Endpoint::Start => DateSlot::Year,
        Endpoint::End if numbers.is_empty() => {
            return Err(IsoDateError::Structural("no numbers in end date".to_string()))
        }
        Endpoint::End => DateSlot::first_for_end(start.date_depth(), numbers.len()),
    };

    assign_date(endpoint, &numbers, first)
}

/// Assign date numbers to fields in order, beginning at `first`.
fn assign_date(endpoint: Endpoint, numbers: &[&str], first: DateSlot) -> Result<Components> {
    if numbers.is_empty() {
        return Err(IsoDateError::MissingYear);
    }

    let mut components = Components::default();
    let mut slot = first;
    for &text in numbers {
        slot = match slot {
            DateSlot::Year => {
                if text.len() != 4 {
                    return Err(match endpoint {
                        Endpoint::Start => IsoDateError::MissingYear,
                        Endpoint::End => IsoDateError::unexpected("date", text),
                    });
                }
                components.year = Some(parse_number(text, Field::Year)? as i32);
                DateSlot::Month
            }
            DateSlot::Month => {
                components.month = Some(parse_short_date_number(text, Field::Month)?);
                DateSlot::Day
            }
            DateSlot::Day => {
                components.day = Some(parse_short_date_number(text, Field::Day)?);
                DateSlot::Full
            }
            DateSlot::Full => return Err(IsoDateError::unexpected("date", text)),
        };
    }

    Ok(components)
}

fn parse_short_date_number(text: &str, field: Field) -> Result<u32> {
    if text.len() > 2 {
        return Err(IsoDateError::unexpected("date", text));
    }
    parse_number(text, field)
}

/// Reject months outside 1-12 and days past the end of their month.
fn validate_date(components: &Components) -> Result<()> {
    if let Some(month) = components.month {
        if !(1..=12).contains(&month) {
            return Err(IsoDateError::out_of_range(Field::Month, month.to_string()));
        }
    }
    if let (Some(year), Some(month), Some(day)) = (components.year, components.month, components.day)
    {
        if day < 1 || day > days_in_month(year, month) {
            return Err(IsoDateError::out_of_range(Field::Day, day.to_string()));
        }
    }
    Ok(())
}

// ── Time ────────────────────────────────────────────────────────────────────

/// The next time field a number is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeSlot {
    Hour,
    Minute,
    Second,
    Full,
}

fn parse_time_and_zone(
    endpoint: Endpoint,
    tokens: &[Token],
    components: &mut Components,
    sink: &mut dyn TraceSink,
) -> Result<()> {
    let split = tokens
        .iter()
        .position(|t| matches!(t.kind, TokenKind::TimeZoneSign | TokenKind::Utc));
    let (time, zone) = match split {
        Some(i) => (&tokens[..i], Some(&tokens[i..])),
        None => (tokens, None),
    };

    sink.record(&TraceEvent {
        stage: Stage::Time,
        endpoint: Some(endpoint),
        tokens: time,
    });
    parse_time(time, components)?;

    if let Some(zone) = zone {
        sink.record(&TraceEvent {
            stage: Stage::Timezone,
            endpoint: Some(endpoint),
            tokens: zone,
        });
        components.timezone = Some(parse_timezone(zone)?);
    }

    Ok(())
}

fn parse_time(tokens: &[Token], components: &mut Components) -> Result<()> {
    let mut slot = TimeSlot::Hour;
    for token in tokens {
        match token.kind {
            TokenKind::TimeSeparator => continue,
            TokenKind::Number => {}
            _ => return Err(IsoDateError::unexpected("time", token.text())),
        }
        let text = token.text();
        slot = match slot {
            TimeSlot::Hour => {
                components.hour = Some(parse_bounded(text, Field::Hour, 23)?);
                TimeSlot::Minute
            }
            TimeSlot::Minute => {
                components.minute = Some(parse_bounded(text, Field::Minute, 59)?);
                TimeSlot::Second
            }
            TimeSlot::Second => {
                components.second = Some(parse_bounded(text, Field::Second, 59)?);
                TimeSlot::Full
            }
            TimeSlot::Full => return Err(IsoDateError::unexpected("time", text)),
        };
    }

    if slot == TimeSlot::Hour {
        return Err(IsoDateError::Structural("no hour in time".to_string()));
    }
    Ok(())
}

// ── Timezone ────────────────────────────────────────────────────────────────

/// Progress through a numeric UTC offset after its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneState {
    /// Expecting `HH` or `HHMM`.
    Hours,
    /// Hours read; an optional `:MM` may follow.
    AfterHours,
    /// Colon read; expecting `MM`.
    Minutes,
    Done,
}

/// Parse a `Z`, `±HH`, `±HHMM` or `±HH:MM` suffix into signed fractional
/// hours.
fn parse_timezone(tokens: &[Token]) -> Result<f64> {
    let Some((first, rest)) = tokens.split_first() else {
        return Err(IsoDateError::Structural("empty timezone".to_string()));
    };

    let sign = match first.kind {
        TokenKind::Utc => {
            return match rest.first() {
                Some(extra) => Err(IsoDateError::unexpected("timezone", extra.text())),
                None => Ok(0.0),
            };
        }
        TokenKind::TimeZoneSign if first.text() == "-" => -1.0,
        TokenKind::TimeZoneSign => 1.0,
        _ => return Err(IsoDateError::unexpected("timezone", first.text())),
    };

    let mut hours = 0;
    let mut minutes = 0;
    let mut state = ZoneState::Hours;
    for token in rest {
        let text = token.text();
        state = match (state, token.kind) {
            (ZoneState::Hours, TokenKind::Number) if text.len() == 4 => {
                hours = parse_bounded(&text[..2], Field::OffsetHours, 23)?;
                minutes = parse_bounded(&text[2..], Field::OffsetMinutes, 59)?;
                ZoneState::Done
            }
            (ZoneState::Hours, TokenKind::Number) if text.len() == 2 => {
                hours = parse_bounded(text, Field::OffsetHours, 23)?;
                ZoneState::AfterHours
            }
            (ZoneState::AfterHours, TokenKind::TimeSeparator) => ZoneState::Minutes,
            (ZoneState::AfterHours | ZoneState::Minutes, TokenKind::Number) if text.len() == 2 => {
                minutes = parse_bounded(text, Field::OffsetMinutes, 59)?;
                ZoneState::Done
            }
            _ => return Err(IsoDateError::unexpected("timezone", text)),
        };
    }

    match state {
        // `-00:00` is plain UTC, not negative zero.
        ZoneState::AfterHours | ZoneState::Done if hours == 0 && minutes == 0 => Ok(0.0),
        ZoneState::AfterHours | ZoneState::Done => {
            Ok(sign * (f64::from(hours) + f64::from(minutes) / 60.0))
        }
        ZoneState::Hours | ZoneState::Minutes => {
            Err(IsoDateError::Structural("incomplete timezone offset".to_string()))
        }
    }
}

// ── Numbers ─────────────────────────────────────────────────────────────────

fn parse_number(text: &str, field: Field) -> Result<u32> {
    text.parse::<u32>()
        .map_err(|_| IsoDateError::out_of_range(field, text))
}

fn parse_bounded(text: &str, field: Field, max: u32) -> Result<u32> {
    let value = parse_number(text, field)?;
    if value > max {
        return Err(IsoDateError::out_of_range(field, text));
    }
    Ok(value)
}

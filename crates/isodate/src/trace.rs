//! Diagnostic hooks into the parsing pipeline.
//!
//! The parser reports each stage it enters to a [`TraceSink`]. Sinks only
//! observe; nothing they do can change a parse result. [`LogSink`] forwards
//! events to the `log` facade and is what [`crate::parse`] uses.

use std::fmt;

use crate::components::Endpoint;
use crate::token::{render_short, render_tokens, Token};

/// Pipeline stage a [`TraceEvent`] was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Tokens,
    Part,
    Date,
    Time,
    Timezone,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Tokens => "tokens",
            Stage::Part => "part",
            Stage::Date => "date",
            Stage::Time => "time",
            Stage::Timezone => "timezone",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TraceEvent<'a> {
    pub stage: Stage,
    pub endpoint: Option<Endpoint>,
    pub tokens: &'a [Token],
}

pub trait TraceSink {
    fn record(&mut self, event: &TraceEvent<'_>);
}

/// Forwards events to `log::debug!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, event: &TraceEvent<'_>) {
        match (event.stage, event.endpoint) {
            (Stage::Tokens, _) => {
                log::debug!("tokens:\n{}", render_tokens(event.tokens));
            }
            (stage, Some(endpoint)) => {
                log::debug!("parse {stage} ({endpoint}): {}", render_short(event.tokens));
            }
            (stage, None) => {
                log::debug!("parse {stage}: {}", render_short(event.tokens));
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _event: &TraceEvent<'_>) {}
}

impl<F> TraceSink for F
where
    F: FnMut(&TraceEvent<'_>),
{
    fn record(&mut self, event: &TraceEvent<'_>) {
        self(event)
    }
}

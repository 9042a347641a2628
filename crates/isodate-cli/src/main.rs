//! Command-line inspection of how ISO 8601 expressions parse.
//!
//! Prints the parsed components of each endpoint and the resolved
//! start/end/midpoint instants for every expression given.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use isodate::{token::render_tokens, Components, ParsedIso};

#[derive(Parser)]
#[command(name = "isodate", version, about = "Parse ISO 8601 dates, date-times and intervals")]
struct Cli {
    /// ISO 8601 expressions, e.g. 1990-01-02T03:04:05/2014-05-06
    #[arg(required = true)]
    expressions: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also print the token stream
    #[arg(long)]
    tokens: bool,

    /// Log each parsing stage to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for expression in &cli.expressions {
        let parsed = isodate::parse(expression)
            .with_context(|| format!("failed to parse '{expression}'"))?;
        match cli.format {
            Format::Text => write_text(&mut out, &parsed, cli.tokens)?,
            Format::Json => write_json(&mut out, &parsed, cli.tokens)?,
        }
    }

    Ok(())
}

fn write_text(out: &mut impl Write, parsed: &ParsedIso, tokens: bool) -> Result<()> {
    writeln!(out, "input: {}", parsed.input)?;
    if tokens {
        for line in render_tokens(&parsed.tokens).lines() {
            writeln!(out, "  {line}")?;
        }
    }
    writeln!(out, "start: {}", describe(&parsed.components.start))?;
    writeln!(out, "end: {}", describe(&parsed.components.end))?;
    let dt = &parsed.datetimes;
    writeln!(
        out,
        "datetimes: start={} end={} mid={}",
        dt.start.format("%Y-%m-%dT%H:%M:%S%.6f"),
        dt.end.format("%Y-%m-%dT%H:%M:%S%.6f"),
        dt.mid.format("%Y-%m-%dT%H:%M:%S%.6f"),
    )?;
    Ok(())
}

fn write_json(out: &mut impl Write, parsed: &ParsedIso, tokens: bool) -> Result<()> {
    let mut value = serde_json::to_value(parsed).context("failed to serialize result")?;
    if tokens {
        let rendered: Vec<String> = parsed.tokens.iter().map(ToString::to_string).collect();
        value["tokens"] = serde_json::json!(rendered);
    }
    writeln!(out, "{value}")?;
    Ok(())
}

/// Render the set fields of an endpoint, e.g. `year=1990 month=1`.
fn describe(c: &Components) -> String {
    let fields = [
        ("year", c.year.map(i64::from)),
        ("month", c.month.map(i64::from)),
        ("day", c.day.map(i64::from)),
        ("hour", c.hour.map(i64::from)),
        ("minute", c.minute.map(i64::from)),
        ("second", c.second.map(i64::from)),
        ("microsecond", c.microsecond.map(i64::from)),
    ];
    let mut parts: Vec<String> = fields
        .iter()
        .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
        .collect();
    if let Some(tz) = c.timezone {
        parts.push(format!("timezone={tz}"));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" ")
    }
}

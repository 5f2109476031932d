//! Command handlers for the `tokscan` CLI.
//!
//! Each handler takes a character source and an output sink, drives a
//! [`Scanner`] over the source and writes one result per line. Handlers
//! return how many items they wrote.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokscan_core::{CharSource, Decimal, FromToken, ReaderSource, ScanError, Scanner};
use tracing::debug;

/// Numeric type read by the `numbers` command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumberKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    #[default]
    I64,
    U64,
    F32,
    F64,
    Decimal,
}

impl NumberKind {
    /// Accepted `--type=` values, in the order they are listed in usage text.
    pub const NAMES: &'static [&'static str] = &[
        "i8", "u8", "i16", "u16", "i32", "u32", "i64", "u64", "f32", "f64", "decimal",
    ];

    /// Parse a `--type=` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "i8" => Some(Self::I8),
            "u8" => Some(Self::U8),
            "i16" => Some(Self::I16),
            "u16" => Some(Self::U16),
            "i32" => Some(Self::I32),
            "u32" => Some(Self::U32),
            "i64" => Some(Self::I64),
            "u64" => Some(Self::U64),
            "f32" => Some(Self::F32),
            "f64" => Some(Self::F64),
            "decimal" => Some(Self::Decimal),
            _ => None,
        }
    }
}

/// Options shared by all scanning commands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Input file; standard input when `None`.
    pub input: Option<PathBuf>,
    /// Target type for `numbers`.
    pub number_kind: NumberKind,
}

/// Errors reported by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown number type '{0}' (expected one of: {})", NumberKind::NAMES.join(", "))]
    UnknownNumberType(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("{}", open_message(.path, .source))]
    Open { path: PathBuf, source: io::Error },
    /// A numeric token could not be read; `index` counts from 1.
    #[error("token {index}: {source}")]
    Token { index: usize, source: ScanError },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

fn open_message(path: &Path, e: &io::Error) -> String {
    let path = path.display();
    match e.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        _ => format!("error opening '{path}': {e}"),
    }
}

/// Parse command options from `args`.
///
/// Recognizes `--type=<kind>` and at most one positional input path.
pub fn parse_scan_options(args: &[String]) -> Result<ScanOptions, CommandError> {
    let mut options = ScanOptions::default();
    for arg in args {
        if let Some(kind) = arg.strip_prefix("--type=") {
            options.number_kind = NumberKind::parse(kind)
                .ok_or_else(|| CommandError::UnknownNumberType(kind.to_string()))?;
        } else if arg.starts_with('-') && arg != "-" {
            return Err(CommandError::UnknownOption(arg.clone()));
        } else if options.input.is_none() {
            // "-" names standard input explicitly.
            if arg != "-" {
                options.input = Some(PathBuf::from(arg));
            }
        } else {
            return Err(CommandError::UnexpectedArgument(arg.clone()));
        }
    }
    Ok(options)
}

/// Open the configured input as a character source.
pub fn open_input(options: &ScanOptions) -> Result<ReaderSource<Box<dyn Read>>, CommandError> {
    let reader: Box<dyn Read> = match &options.input {
        Some(path) => {
            debug!(path = %path.display(), "opening input file");
            let file = File::open(path).map_err(|source| CommandError::Open {
                path: path.clone(),
                source,
            })?;
            Box::new(file)
        }
        None => Box::new(io::stdin().lock()),
    };
    Ok(ReaderSource::new(reader))
}

/// Write every whitespace-delimited token on its own line.
pub fn dump_tokens<S: CharSource + ?Sized>(
    source: &mut S,
    out: &mut impl Write,
) -> Result<usize, CommandError> {
    let mut scanner = Scanner::new(source);
    let mut count = 0;
    loop {
        match scanner.read_token() {
            Ok(token) => writeln!(out, "{token}")?,
            Err(ScanError::EndOfSource) => return Ok(count),
            Err(e) => return Err(e.into()),
        }
        count += 1;
    }
}

/// Write every line prefixed with its 1-based line number.
pub fn dump_lines<S: CharSource + ?Sized>(
    source: &mut S,
    out: &mut impl Write,
) -> Result<usize, CommandError> {
    let mut scanner = Scanner::new(source);
    let mut count = 0;
    loop {
        match scanner.read_line() {
            Ok(line) => {
                count += 1;
                writeln!(out, "{count:>6}  {line}")?;
            }
            Err(ScanError::EndOfSource) => return Ok(count),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read values of `kind` until end of input, writing each in canonical form.
///
/// Stops at the first token that is malformed or does not fit `kind`.
pub fn dump_numbers<S: CharSource + ?Sized>(
    source: &mut S,
    kind: NumberKind,
    out: &mut impl Write,
) -> Result<usize, CommandError> {
    let mut scanner = Scanner::new(source);
    match kind {
        NumberKind::I8 => write_values::<i8, _>(&mut scanner, out),
        NumberKind::U8 => write_values::<u8, _>(&mut scanner, out),
        NumberKind::I16 => write_values::<i16, _>(&mut scanner, out),
        NumberKind::U16 => write_values::<u16, _>(&mut scanner, out),
        NumberKind::I32 => write_values::<i32, _>(&mut scanner, out),
        NumberKind::U32 => write_values::<u32, _>(&mut scanner, out),
        NumberKind::I64 => write_values::<i64, _>(&mut scanner, out),
        NumberKind::U64 => write_values::<u64, _>(&mut scanner, out),
        NumberKind::F32 => write_values::<f32, _>(&mut scanner, out),
        NumberKind::F64 => write_values::<f64, _>(&mut scanner, out),
        NumberKind::Decimal => write_values::<Decimal, _>(&mut scanner, out),
    }
}

fn write_values<T, S>(
    scanner: &mut Scanner<'_, S>,
    out: &mut impl Write,
) -> Result<usize, CommandError>
where
    T: FromToken + Display,
    S: CharSource + ?Sized,
{
    let mut count = 0;
    loop {
        match scanner.read::<T>() {
            Ok(value) => writeln!(out, "{value}")?,
            Err(ScanError::EndOfSource) => return Ok(count),
            Err(source) => {
                return Err(CommandError::Token {
                    index: count + 1,
                    source,
                })
            }
        }
        count += 1;
    }
}

/// Write each span between occurrences of `delimiter`, quoted.
///
/// The text after the last delimiter is written as a final span when it is
/// not empty.
pub fn dump_split<S: CharSource + ?Sized>(
    source: &mut S,
    delimiter: &str,
    out: &mut impl Write,
) -> Result<usize, CommandError> {
    let mut scanner = Scanner::new(source);
    let mut count = 0;
    loop {
        match scanner.read_through(delimiter) {
            Ok(span) => writeln!(out, "{span:?}")?,
            Err(ScanError::EndOfSource) => {
                let rest = scanner.read_all()?;
                if rest.is_empty() {
                    return Ok(count);
                }
                writeln!(out, "{rest:?}")?;
                return Ok(count + 1);
            }
            Err(e) => return Err(e.into()),
        }
        count += 1;
    }
}

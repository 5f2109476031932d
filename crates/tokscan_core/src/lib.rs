//! Character-stream tokenizer with unlimited lookahead.
//!
//! A [`Scanner`] sits on top of any [`CharSource`] (a string, a byte reader,
//! a `char` iterator) and reads whitespace-delimited words, lines,
//! delimiter-bounded spans, and typed numbers from it.
//!
//! ```text
//! source ──pull──▶ Lookahead (FIFO) ──consume──▶ caller
//!                     ▲        │
//!                     └─restore┘  (rollback of a failed numeric parse)
//! ```
//!
//! ```
//! use tokscan_core::{Scanner, StrSource};
//!
//! let mut source = StrSource::new("  42 -7 3.5\nrest of line");
//! let mut scanner = Scanner::new(&mut source);
//! assert_eq!(scanner.read_u32().ok(), Some(42));
//! assert_eq!(scanner.read_i64().ok(), Some(-7));
//! assert_eq!(scanner.read_f64().ok(), Some(3.5));
//! assert_eq!(scanner.read_line().ok().as_deref(), Some(""));
//! assert_eq!(scanner.read_token().ok().as_deref(), Some("rest"));
//! ```
//!
//! The crate is standalone: it depends on nothing but `thiserror` and
//! `tracing`, and installs no subscriber.

mod convert;
mod decimal;
mod error;
mod lookahead;
mod scanner;
mod source;

pub use convert::FromToken;
pub use decimal::{Decimal, DecimalParseError};
pub use error::{ScanError, ScanResult, TokenShape};
pub use scanner::Scanner;
pub use source::{CharSource, IterSource, ReaderSource, StrSource};

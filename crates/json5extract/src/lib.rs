//! Extracts JSON5 values embedded anywhere in arbitrary text.
//!
//! Log files, source code and prose often carry configuration-like fragments
//! that a whole-document parser would reject. This crate scans such input one
//! character at a time and returns every JSON5 value it can recognize, each
//! with its decoded [`Payload`] and its raw source text.
//!
//! ```rust
//! use json5extract::{Kind, scan_str};
//!
//! let log = r#"retry policy {max: 3, backoff: 'exp'} applied, ratio=.75"#;
//! let values = scan_str(log).unwrap();
//!
//! assert_eq!(values.len(), 2);
//! assert_eq!(values[0].kind(), Kind::Object);
//! assert_eq!(values[0].raw_text(), "{max:3,backoff:'exp'}");
//! assert_eq!(values[0].as_object().unwrap()["max"].as_i64(), Ok(3));
//! assert_eq!(values[1].as_f64(), Ok(0.75));
//! ```
//!
//! Scanning is best-effort: a candidate that starts like a value but breaks
//! the grammar is dropped and the scan continues. Only a failing source
//! (an I/O error) ends a scan with an error. See [`Recovery`] for how scanning
//! resumes after a dropped candidate.
//!
//! Dropped candidates are reported through [`tracing`] at `debug` level.

#![allow(missing_docs)]

mod cursor;
mod error;
mod escape_buffer;
mod literal_buffer;
mod options;
mod parser;
mod save;
mod scanner;
mod value;

#[cfg(test)]
mod tests;

pub use cursor::{ByteSource, CharSource, Cursor, Position, ReadSource, StrSource};
pub use error::{CursorError, KindError, ParseError, ScanError, SyntaxError};
pub use options::{Recovery, ScanOptions};
pub use save::{DEFAULT_SAVE_PATH, save, save_to_path, to_json5_array, write_values};
pub use scanner::{
    Extractor, scan, scan_bytes, scan_bytes_with, scan_path, scan_path_with, scan_reader,
    scan_reader_with, scan_str, scan_str_with, scan_with,
};
pub use value::{Array, Kind, Map, Payload, Value};

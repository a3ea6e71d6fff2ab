//! Re-emitting extracted values as one JSON5 array literal.
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::value::Value;

/// File written by [`save`].
pub const DEFAULT_SAVE_PATH: &str = "./extracted_jsons.json5";

/// Writes `[` + the comma-joined raw text of `values` + `]` to `writer`.
///
/// # Errors
///
/// Propagates write errors of `writer`.
pub fn write_values<W: Write>(values: &[Value], mut writer: W) -> io::Result<()> {
    writer.write_all(b"[")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(value.raw_bytes())?;
    }
    writer.write_all(b"]")
}

/// Returns the array literal [`write_values`] would write.
#[must_use]
pub fn to_json5_array(values: &[Value]) -> String {
    let mut out = String::from("[");
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(value.raw_text());
    }
    out.push(']');
    out
}

/// Creates (or truncates) the file at `path` and writes `values` into it as
/// one array literal.
///
/// # Errors
///
/// Propagates errors creating, writing or flushing the file.
pub fn save_to_path(values: &[Value], path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_values(values, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), count = values.len(), "saved values");
    Ok(())
}

/// Writes `values` to [`DEFAULT_SAVE_PATH`] in the working directory.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save(values: &[Value]) -> io::Result<()> {
    save_to_path(values, DEFAULT_SAVE_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_str;

    #[test]
    fn joins_raw_texts() {
        let values = scan_str("a: 1, b: 'two', c: {d: [true, null]}").unwrap();
        let expected = "[1,'two',{d:[true,null]}]";
        assert_eq!(to_json5_array(&values), expected);

        let mut out = Vec::new();
        write_values(&values, &mut out).unwrap();
        assert_eq!(out, expected.as_bytes());
    }

    #[test]
    fn save_writes_the_default_file() {
        let values = scan_str("a=1 b='two'").unwrap();
        save(&values).unwrap();

        let saved = std::fs::read_to_string(DEFAULT_SAVE_PATH).unwrap();
        std::fs::remove_file(DEFAULT_SAVE_PATH).unwrap();
        assert_eq!(saved, "[1,'two']");
    }

    #[test]
    fn empty_input_is_an_empty_array() {
        assert_eq!(to_json5_array(&[]), "[]");
    }

    #[test]
    fn saved_array_scans_back_to_the_same_values() {
        let values = scan_str("x=0x1F y=-Infinity z=\"q\\u0041\" w=[1,]").unwrap();
        let path = std::env::temp_dir()
            .join(format!("json5extract-save-{}.json5", std::process::id()));
        save_to_path(&values, &path).unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let reparsed = scan_str(&saved).unwrap();
        assert_eq!(reparsed.len(), 1);
        assert_eq!(reparsed[0].as_array().unwrap().len(), values.len());
        assert_eq!(reparsed[0].raw_text(), saved);
    }
}

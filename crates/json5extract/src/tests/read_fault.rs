use std::io::{self, Read};

use crate::{Extractor, ReadSource, ScanError, ScanOptions, scan_reader};

/// Serves `data` in small reads, then fails with `error` (if any) instead of
/// reporting end of input.
struct FlakyReader {
    data: &'static [u8],
    interrupt_first: bool,
    error: Option<io::ErrorKind>,
}

impl Read for FlakyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_first {
            self.interrupt_first = false;
            return Err(io::ErrorKind::Interrupted.into());
        }
        if self.data.is_empty() {
            return match self.error {
                Some(kind) => Err(io::Error::new(kind, "device unplugged")),
                None => Ok(0),
            };
        }
        let n = buf.len().min(self.data.len()).min(3);
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn read_fault_aborts_the_scan() {
    let reader = FlakyReader {
        data: b"[1] 'a",
        interrupt_first: false,
        error: Some(io::ErrorKind::BrokenPipe),
    };
    match scan_reader(reader).unwrap_err() {
        ScanError::Read {
            source,
            line,
            column,
        } => {
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            assert_eq!((line, column), (1, 7));
        }
        other => panic!("expected a read fault, got {other:?}"),
    }
}

#[test]
fn values_before_the_fault_are_still_yielded() {
    let reader = FlakyReader {
        data: b"x = 42, y = 'unfinished",
        interrupt_first: false,
        error: Some(io::ErrorKind::ConnectionReset),
    };
    let source = ReadSource::new(io::BufReader::new(reader));
    let mut extractor = Extractor::new(source, ScanOptions::default());

    assert_eq!(extractor.next().unwrap().unwrap().as_i64(), Ok(42));
    assert!(matches!(
        extractor.next(),
        Some(Err(ScanError::Read { .. }))
    ));
    assert!(extractor.next().is_none());
}

#[test]
fn interrupted_reads_are_retried() {
    let reader = FlakyReader {
        data: b"{k: [true, 'v']}",
        interrupt_first: true,
        error: None,
    };
    let values = scan_reader(reader).unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].raw_text(), "{k:[true,'v']}");
}

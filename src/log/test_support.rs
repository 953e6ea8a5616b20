//! Capture writers shared by the unit tests of the `log` module.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory writer whose clones share one buffer.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner()).clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that rejects every write.
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const LEVEL_TAGS: [&str; 4] = ["[DEBUG] ", "[INFO] ", "[WARN] ", "[ERROR] "];

/// Checks `[dd-mm-yyyyTHH:MM:SS.ffffff]` followed by an optional caller
/// bracket and a `[LEVEL] ` tag.
pub fn assert_line_format(line: &str) {
    let ts = line
        .strip_prefix('[')
        .and_then(|rest| rest.get(..26))
        .unwrap_or_else(|| panic!("missing timestamp: {line}"));
    let shape_ok = ts.char_indices().all(|(i, c)| match i {
        2 | 5 => c == '-',
        10 => c == 'T',
        13 | 16 => c == ':',
        19 => c == '.',
        _ => c.is_ascii_digit(),
    });
    assert!(shape_ok, "bad timestamp {ts:?} in {line}");
    assert_eq!(&line[27..28], "]", "unterminated timestamp: {line}");

    let rest = &line[28..];
    let starts_with_level = |s: &str| LEVEL_TAGS.iter().any(|tag| s.starts_with(tag));
    let level_part = if starts_with_level(rest) {
        rest
    } else {
        rest.find("][").map_or(rest, |i| &rest[i + 1..])
    };
    assert!(starts_with_level(level_part), "missing level tag: {line}");
}

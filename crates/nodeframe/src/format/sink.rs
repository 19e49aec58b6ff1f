// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Export sinks.

use std::io;

/// Append-only destination for rendered chunks.
pub trait ExportSink {
    fn push_str(&mut self, chunk: &str);
}

impl ExportSink for String {
    fn push_str(&mut self, chunk: &str) {
        String::push_str(self, chunk);
    }
}

/// Sink over any [`io::Write`].
///
/// Rendering cannot fail, so the first I/O error is kept and later chunks
/// are dropped. [`WriteSink::finish`] reports it.
#[derive(Debug)]
pub struct WriteSink<W: io::Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Flush and return the writer, or the first error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: io::Write> ExportSink for WriteSink<W> {
    fn push_str(&mut self, chunk: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.inner.write_all(chunk.as_bytes()) {
            self.error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_sink_collects_bytes() {
        let mut sink = WriteSink::new(Vec::new());
        sink.push_str("a");
        sink.push_str("b");
        assert_eq!(sink.finish().expect("finish"), b"ab");
    }

    #[test]
    fn test_write_sink_reports_first_error() {
        let mut sink = WriteSink::new(FailingWriter);
        sink.push_str("a");
        sink.push_str("b");
        let err = sink.finish().expect_err("broken pipe");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}

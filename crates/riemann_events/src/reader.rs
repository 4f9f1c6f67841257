use std::io::{BufRead, ErrorKind};

#[derive(Debug)]
pub(crate) enum BoundedLine {
    Line {
        line_number: usize,
        bytes: Vec<u8>,
    },
    LineTooLong {
        line_number: usize,
        observed_bytes: usize,
        max_line_bytes: usize,
    },
    IoError {
        line_number: usize,
    },
}

/// Splits a reader into lines without ever buffering more than
/// `max_line_bytes` of a single line.
pub(crate) struct BoundedLineReader<R: BufRead> {
    reader: R,
    max_line_bytes: usize,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> BoundedLineReader<R> {
    pub(crate) fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader,
            max_line_bytes,
            line_number: 0,
            done: false,
        }
    }

    /// Reads up to and including the next `\n`. Returns the observed length and
    /// whether anything was read at all.
    fn read_line(&mut self, line: &mut Vec<u8>) -> std::io::Result<(usize, bool)> {
        let mut observed = 0usize;
        let mut any = false;
        loop {
            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if chunk.is_empty() {
                return Ok((observed, any));
            }
            any = true;
            let (segment, consumed, finished) = match chunk.iter().position(|b| *b == b'\n') {
                Some(idx) => (&chunk[..idx], idx + 1, true),
                None => (chunk, chunk.len(), false),
            };
            observed = observed.saturating_add(segment.len());
            if observed <= self.max_line_bytes {
                line.extend_from_slice(segment);
            } else {
                line.clear();
            }
            self.reader.consume(consumed);
            if finished {
                return Ok((observed, any));
            }
        }
    }
}

impl<R: BufRead> Iterator for BoundedLineReader<R> {
    type Item = BoundedLine;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut bytes = Vec::new();
        let result = self.read_line(&mut bytes);
        self.line_number += 1;
        let line_number = self.line_number;

        match result {
            Err(_) => {
                self.done = true;
                Some(BoundedLine::IoError { line_number })
            }
            Ok((_, false)) => {
                self.done = true;
                None
            }
            Ok((observed_bytes, true)) if observed_bytes > self.max_line_bytes => {
                Some(BoundedLine::LineTooLong {
                    line_number,
                    observed_bytes,
                    max_line_bytes: self.max_line_bytes,
                })
            }
            Ok((_, true)) => Some(BoundedLine::Line { line_number, bytes }),
        }
    }
}

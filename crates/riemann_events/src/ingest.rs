use std::io::BufRead;

use crate::config::NormalizeConfig;
use crate::error::{LineRecord, LineRecordError};
use crate::normalize::EventNormalizer;
use crate::reader::{BoundedLine, BoundedLineReader};
use crate::record::EventRecord;
use crate::wire::WireEvent;

/// Reads newline-delimited JSON events and normalizes each one.
///
/// Every non-blank line yields exactly one [`LineRecord`]; a bad line never
/// stops the stream, except for an I/O error which ends it.
pub struct EventIngestor<R: BufRead> {
    reader: BoundedLineReader<R>,
    normalizer: EventNormalizer,
}

impl<R: BufRead> EventIngestor<R> {
    pub fn new(reader: R, config: &NormalizeConfig) -> Self {
        Self {
            reader: BoundedLineReader::new(reader, config.max_line_bytes),
            normalizer: EventNormalizer::new(config),
        }
    }

    pub fn normalizer(&self) -> &EventNormalizer {
        &self.normalizer
    }

    fn normalize_line(line: &str) -> &str {
        line.strip_suffix('\r').unwrap_or(line)
    }

    fn line_is_blank(line: &str) -> bool {
        line.chars().all(|ch| ch.is_whitespace())
    }

    fn decode(&self, line: &str) -> Result<WireEvent, LineRecordError> {
        let record = EventRecord::from_json_str(line).map_err(|err| LineRecordError::Decode {
            summary: format!("{} at column {}", classify(&err), err.column()),
        })?;
        Ok(self.normalizer.normalize_event(&record)?)
    }
}

/// Describes a decode failure without echoing the line's content.
fn classify(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        serde_json::error::Category::Io => "read error",
        serde_json::error::Category::Syntax => "malformed JSON",
        serde_json::error::Category::Data => "unexpected event shape",
        serde_json::error::Category::Eof => "truncated JSON",
    }
}

impl<R: BufRead> Iterator for EventIngestor<R> {
    type Item = LineRecord<WireEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (line_number, outcome) = match self.reader.next()? {
                BoundedLine::IoError { line_number } => (line_number, Err(LineRecordError::Io)),
                BoundedLine::LineTooLong {
                    line_number,
                    observed_bytes,
                    max_line_bytes,
                } => (
                    line_number,
                    Err(LineRecordError::LineTooLong {
                        observed_bytes,
                        max_line_bytes,
                    }),
                ),
                BoundedLine::Line { line_number, bytes } => {
                    let Ok(raw_line) = String::from_utf8(bytes) else {
                        return Some(LineRecord {
                            line_number,
                            outcome: Err(LineRecordError::InvalidUtf8),
                        });
                    };
                    let line = Self::normalize_line(&raw_line);
                    if Self::line_is_blank(line) {
                        continue;
                    }
                    (line_number, self.decode(line))
                }
            };

            return Some(LineRecord {
                line_number,
                outcome,
            });
        }
    }
}

use std::convert::Infallible;

use tracing::{debug, warn};

use crate::error::{ForwardError, LineRecord};
use crate::wire::WireEvent;

/// Downstream collaborator that owns serialization and the connection to the
/// backend.
pub trait EventSink {
    type Error: std::error::Error + 'static;

    fn send(&mut self, event: WireEvent) -> Result<(), Self::Error>;
}

impl EventSink for Vec<WireEvent> {
    type Error = Infallible;

    fn send(&mut self, event: WireEvent) -> Result<(), Self::Error> {
        self.push(event);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ForwardStats {
    pub sent: usize,
    pub rejected: usize,
}

/// Sends every successfully normalized record to `sink`.
///
/// Failed records are logged and counted, then skipped. The first sink error
/// ends forwarding; nothing is retried.
pub fn forward<I, S>(records: I, sink: &mut S) -> Result<ForwardStats, ForwardError<S::Error>>
where
    I: IntoIterator<Item = LineRecord<WireEvent>>,
    S: EventSink + ?Sized,
{
    let mut stats = ForwardStats::default();
    for record in records {
        match record.outcome {
            Ok(event) => {
                sink.send(event).map_err(|source| ForwardError::Sink {
                    line_number: record.line_number,
                    source,
                })?;
                stats.sent += 1;
            }
            Err(err) => {
                warn!(line_number = record.line_number, error = %err, "rejected event");
                stats.rejected += 1;
            }
        }
    }
    debug!(sent = stats.sent, rejected = stats.rejected, "forwarding finished");
    Ok(stats)
}

// MotionStream — Batch Publisher
//
// Concatenates a drained batch into one array-framed text message and hands
// it to the transport. Delivery is fire-and-forget: nothing is queued or
// retried here, and a batch completed with nobody listening is dropped.

use crate::config::FRAME_RESERVE_BYTES;

/// Transport capability consumed by the publisher.
///
/// `broadcast` is expected to be best-effort and non-blocking from the
/// sampler's point of view; per-client queuing lives in the transport.
pub trait Broadcast {
    fn client_count(&self) -> usize;
    fn broadcast(&self, frame: &str) -> anyhow::Result<()>;
}

impl<B: Broadcast + ?Sized> Broadcast for std::sync::Arc<B> {
    fn client_count(&self) -> usize {
        (**self).client_count()
    }

    fn broadcast(&self, frame: &str) -> anyhow::Result<()> {
        (**self).broadcast(frame)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Frame handed to the transport (no per-client acknowledgement).
    Sent,
    /// No clients attached; batch discarded.
    Skipped,
}

pub struct Publisher<B: Broadcast> {
    transport: B,
}

impl<B: Broadcast> Publisher<B> {
    pub fn new(transport: B) -> Self {
        Self { transport }
    }

    /// Broadcast one full batch of wire-form records, or drop it when no
    /// clients are attached.
    pub fn publish(&self, records: &[String]) -> PublishOutcome {
        if self.transport.client_count() == 0 {
            log::info!("no websocket clients connected — dropping batch of {} samples", records.len());
            return PublishOutcome::Skipped;
        }

        let frame = assemble_frame(records);
        if let Err(e) = self.transport.broadcast(&frame) {
            // Fire-and-forget: a failed send costs this frame, nothing more.
            log::warn!("batch broadcast failed: {e:#}");
        } else {
            log::debug!("batch sent ({} records, {} bytes)", records.len(), frame.len());
        }
        PublishOutcome::Sent
    }
}

/// `[rec0,rec1,...,recN-1]` — comma-separated, no trailing comma.
fn assemble_frame(records: &[String]) -> String {
    let mut frame = String::with_capacity(FRAME_RESERVE_BYTES);
    frame.push('[');
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            frame.push(',');
        }
        frame.push_str(record);
    }
    frame.push(']');
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Recording transport: captures every frame, reports a fixed client count.
    struct RecordingTransport {
        clients: usize,
        frames: Mutex<Vec<String>>,
    }

    impl RecordingTransport {
        fn new(clients: usize) -> Self {
            Self {
                clients,
                frames: Mutex::new(Vec::new()),
            }
        }
    }

    impl Broadcast for RecordingTransport {
        fn client_count(&self) -> usize {
            self.clients
        }

        fn broadcast(&self, frame: &str) -> anyhow::Result<()> {
            self.frames.lock().unwrap().push(frame.to_owned());
            Ok(())
        }
    }

    #[test]
    fn zero_clients_skips_without_touching_transport() {
        let publisher = Publisher::new(RecordingTransport::new(0));
        let records = vec!["{\"a\":1}".to_owned()];

        assert_eq!(publisher.publish(&records), PublishOutcome::Skipped);
        assert!(publisher.transport.frames.lock().unwrap().is_empty());
    }

    #[test]
    fn frames_batch_as_json_array_in_order() {
        let publisher = Publisher::new(RecordingTransport::new(2));
        let records = vec![
            "{\"t\":0}".to_owned(),
            "{\"t\":1}".to_owned(),
            "{\"t\":2}".to_owned(),
        ];

        assert_eq!(publisher.publish(&records), PublishOutcome::Sent);

        let frames = publisher.transport.frames.lock().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0], "[{\"t\":0},{\"t\":1},{\"t\":2}]");
    }
}

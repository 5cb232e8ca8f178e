// MotionStream — Client Presence
//
// Connection counter shared between the network context (writer) and the
// sampler task (reader). A one-tick-stale read is harmless, so relaxed
// ordering is enough.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct ClientPresence(Arc<AtomicUsize>);

impl ClientPresence {
    pub fn new() -> Self {
        Self::default()
    }

    /// One client connected.
    pub fn attach(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// One client disconnected. Counts individually, so a departing client
    /// does not mute the stream for everyone still attached.
    pub fn detach(&self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }

    pub fn connected(&self) -> bool {
        self.count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_attach_detach_arithmetic() {
        let presence = ClientPresence::new();
        assert!(!presence.connected());

        presence.attach();
        presence.attach();
        assert_eq!(presence.count(), 2);

        // One disconnect leaves the other client attached.
        presence.detach();
        assert!(presence.connected());

        presence.detach();
        assert!(!presence.connected());
    }

    #[test]
    fn clones_share_the_same_counter() {
        let presence = ClientPresence::new();
        let writer = presence.clone();

        writer.attach();
        assert!(presence.connected());
        writer.detach();
        assert!(!presence.connected());
    }
}

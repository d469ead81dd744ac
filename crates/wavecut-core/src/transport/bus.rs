use super::{PlaybackEvent, PlaybackState};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Default number of undelivered events kept before the oldest is dropped.
const DEFAULT_CAPACITY: usize = 64;

/// One subscriber's queue, seen from the publishing side.
#[derive(Debug)]
struct Outlet {
    tx: Sender<PlaybackEvent>,
    /// Used to discard the oldest event when the queue is full.
    overflow: Receiver<PlaybackEvent>,
}

impl Outlet {
    /// Returns `false` once the subscriber is gone.
    fn send(&self, mut event: PlaybackEvent) -> bool {
        loop {
            match self.tx.try_send(event) {
                Ok(()) => return true,
                Err(TrySendError::Disconnected(_)) => return false,
                Err(TrySendError::Full(back)) => {
                    let _ = self.overflow.try_recv();
                    event = back;
                }
            }
        }
    }
}

/// Broadcasts [`PlaybackEvent`]s from a facade to every subscriber.
///
/// Each subscriber has its own bounded queue. When one falls behind, its
/// oldest undelivered event is discarded so the newest position always gets
/// through; other subscribers are unaffected.
#[derive(Debug, Clone)]
pub struct PositionBus {
    capacity: usize,
    outlets: Arc<Mutex<Vec<Outlet>>>,
}

impl Default for PositionBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl PositionBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            outlets: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// New receiver that sees every event published from now on.
    pub fn subscribe(&self) -> PlaybackSubscriber {
        let (tx, rx) = crossbeam_channel::bounded(self.capacity);
        self.outlets.lock().push(Outlet {
            tx,
            overflow: rx.clone(),
        });
        PlaybackSubscriber { rx }
    }

    pub fn publish(&self, event: PlaybackEvent) {
        self.outlets.lock().retain(|outlet| outlet.send(event));
    }

    pub fn subscriber_count(&self) -> usize {
        self.outlets.lock().len()
    }
}

/// Everything a subscriber learned from one drain of the bus.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransportUpdate {
    pub position: Option<Duration>,
    pub state: Option<PlaybackState>,
}

/// Receiving end of a [`PositionBus`].
///
/// Dropping it unsubscribes; the bus prunes it on the next publish.
#[derive(Debug)]
pub struct PlaybackSubscriber {
    rx: Receiver<PlaybackEvent>,
}

impl PlaybackSubscriber {
    /// Drain every pending event; the newest position and state win.
    pub fn poll(&self) -> TransportUpdate {
        let mut update = TransportUpdate::default();
        while let Ok(event) = self.rx.try_recv() {
            match event {
                PlaybackEvent::Position(p) => update.position = Some(p),
                PlaybackEvent::State(s) => update.state = Some(s),
            }
        }
        update
    }

    /// Newest pending position, discarding older ones.
    pub fn latest(&self) -> Option<Duration> {
        self.poll().position
    }
}

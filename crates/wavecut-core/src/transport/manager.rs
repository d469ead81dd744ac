use super::{PlaybackEvent, PlaybackFacade, PlaybackState, PlaybackSubscriber, PositionBus};
use std::time::Duration;

/// Clock-driven playback facade.
///
/// Time only moves when the owner calls [`advance`](Transport::advance),
/// typically from the UI timer or from an output stream callback. Position
/// events go out once per `tick_interval` of played time.
#[derive(Debug)]
pub struct Transport {
    duration: Duration,
    position: Duration,
    state: PlaybackState,
    tick_interval: Duration,
    since_tick: Duration,
    bus: PositionBus,
}

impl Transport {
    pub fn new(duration: Duration, tick_interval: Duration) -> Self {
        Self {
            duration,
            position: Duration::ZERO,
            state: PlaybackState::Stopped,
            tick_interval,
            since_tick: Duration::ZERO,
            bus: PositionBus::default(),
        }
    }

    pub fn subscribe(&self) -> PlaybackSubscriber {
        self.bus.subscribe()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Replace the media; stops and rewinds.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
        self.stop();
        self.publish_position();
    }

    /// Move the playhead by `elapsed` if playing.
    ///
    /// Reaching the end clamps the position to the duration and stops.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.state != PlaybackState::Playing {
            return;
        }

        self.position = (self.position + elapsed).min(self.duration);
        self.since_tick += elapsed;

        if self.position >= self.duration {
            self.since_tick = Duration::ZERO;
            self.publish_position();
            self.set_state(PlaybackState::Stopped);
            tracing::debug!(position = ?self.position, "playback reached end");
            return;
        }

        if self.since_tick >= self.tick_interval {
            self.since_tick = Duration::ZERO;
            self.publish_position();
        }
    }

    fn publish_position(&self) {
        self.bus.publish(PlaybackEvent::Position(self.position));
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.bus.publish(PlaybackEvent::State(state));
        }
    }
}

impl PlaybackFacade for Transport {
    fn play(&mut self) {
        if self.duration.is_zero() {
            return;
        }
        if self.position >= self.duration {
            self.position = Duration::ZERO;
            self.publish_position();
        }
        self.set_state(PlaybackState::Playing);
    }

    fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
    }

    fn stop(&mut self) {
        self.position = Duration::ZERO;
        self.since_tick = Duration::ZERO;
        self.set_state(PlaybackState::Stopped);
    }

    fn seek(&mut self, position: Duration) {
        self.position = position.min(self.duration);
        self.since_tick = Duration::ZERO;
        self.publish_position();
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn state(&self) -> PlaybackState {
        self.state
    }
}

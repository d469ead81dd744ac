mod bus;
mod manager;

pub use bus::{PlaybackSubscriber, PositionBus, TransportUpdate};
pub use manager::Transport;

use std::time::Duration;

/// Playback state reported by a facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Notification published by a playback facade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    Position(Duration),
    State(PlaybackState),
}

/// Boundary between the editor and whatever produces sound.
///
/// Implementations publish [`PlaybackEvent`]s on a [`PositionBus`]: a
/// position event at a bounded interval while playing and after every
/// seek, and a state event only when the state actually changes.
pub trait PlaybackFacade {
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and rewind to zero.
    fn stop(&mut self);
    /// Move to `position`, clamped to `[0, duration]`.
    fn seek(&mut self, position: Duration);
    fn position(&self) -> Duration;
    fn duration(&self) -> Duration;
    fn state(&self) -> PlaybackState;
}

//! Core services for wavecut: the WAV source, background loading,
//! configuration and the playback transport.
//!
//! ```ignore
//! use wavecut_core::{load, WavecutConfig};
//!
//! let config = WavecutConfig::default();
//! let loaded = load("album.wav", config.display_rate)?;
//! println!("{:?} of audio", loaded.duration());
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod import;
pub mod load;
pub mod source;
pub mod transport;

pub use audio::{AudioMetadata, SampleBuffer, SampleKind};
pub use config::{WavecutConfig, WavecutConfigBuilder, MAX_WINDOW_SECONDS};
pub use error::{Error, Result};
pub use import::{LoadHandle, LoadStatus};
pub use load::{load, load_with_progress, DisplayAccumulator, LoadedAudio};
pub use source::{RawSamples, SourceReader, WavSource};
pub use transport::{
    PlaybackEvent, PlaybackFacade, PlaybackState, PlaybackSubscriber, PositionBus, Transport,
    TransportUpdate,
};

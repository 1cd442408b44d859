//! Audiotrack - Track Playback
//!
//! One independent, ordered audio playback lane inside a multi-track player.
//!
//! This crate provides:
//! - FIFO queue with priority insertion and duplicate rejection
//! - Forced termination (skip) by index, exact source or source fragment
//! - Track state publication (queue, transport, volume/mute/loop/autoplay)
//! - Stream publication (audible item, device snapshot, active caption)
//! - Volume / loop / mute cascade and master-volume scaling
//!
//! # Architecture
//!
//! `audiotrack-playback` never touches an audio device. Items are built by an
//! `AudioItemFactory` supplied by the platform and report back through an
//! event channel that the track drains single-threaded.
//!
//! # Example
//!
//! ```rust
//! use audiotrack_core::{
//!     AudioItemFactory, AudioItemId, AudioItemRequest, AudioItemState, InnerAudioState,
//!     ItemEventSender, PlayableItem,
//! };
//! use audiotrack_playback::{RegisterOptions, Track, TrackConfig};
//!
//! struct SilentItem {
//!     request: AudioItemRequest,
//! }
//!
//! impl PlayableItem for SilentItem {
//!     fn id(&self) -> &AudioItemId {
//!         &self.request.id
//!     }
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn end(&mut self) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn set_loop(&mut self, _looped: bool) {}
//!     fn toggle_mute(&mut self, _muted: bool) {}
//!     fn remove_all_listeners(&mut self) {}
//!     fn state(&self) -> AudioItemState {
//!         AudioItemState {
//!             id: self.request.id.clone(),
//!             src: self.request.src.clone(),
//!             filename: self.request.filename.clone(),
//!             started: false,
//!             paused: false,
//!             volume: self.request.settings.volume,
//!             muted: self.request.settings.muted,
//!             looped: self.request.settings.looped,
//!         }
//!     }
//!     fn inner_audio_state(&self) -> InnerAudioState {
//!         InnerAudioState::default()
//!     }
//! }
//!
//! struct SilentFactory;
//!
//! impl AudioItemFactory for SilentFactory {
//!     fn create(
//!         &mut self,
//!         request: AudioItemRequest,
//!         _events: ItemEventSender,
//!     ) -> audiotrack_core::Result<Box<dyn PlayableItem>> {
//!         Ok(Box::new(SilentItem { request }))
//!     }
//! }
//!
//! let mut track = Track::new(TrackConfig::for_index(1), Box::new(SilentFactory), |_| {});
//! assert_eq!(track.name(), "Track #1");
//!
//! track.register_audio("/sfx/intro.mp3", RegisterOptions::new()).unwrap();
//! track.register_audio("/sfx/outro.mp3", RegisterOptions::new().volume(0.5)).unwrap();
//!
//! assert_eq!(track.state().queue.len(), 2);
//! assert_eq!(track.current_audio().unwrap().filename, "intro.mp3");
//!
//! // Duplicates are rejected unless allowed
//! assert!(track.register_audio("/sfx/intro.mp3", RegisterOptions::new()).is_err());
//! ```

mod config;
mod error;
mod listeners;
mod queue;
mod track;
pub mod types;
mod volume;

// Public exports
pub use config::{default_name, TrackConfig, ENV_PREFIX};
pub use error::{Result, TrackError};
pub use listeners::{Listener, ListenerHandle, ListenerRegistry};
pub use queue::{AudioQueue, QueueEntry};
pub use track::Track;
pub use types::{AudioCallbacks, RegisterOptions, SkipMethod, SkipTarget, TrackSettingsUpdate};
pub use volume::{clamp_volume, master_scaled};

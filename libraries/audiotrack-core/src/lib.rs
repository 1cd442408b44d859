//! Audiotrack Core
//!
//! Platform-agnostic types, traits and helpers shared by every audiotrack crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TrackState`, `TrackStream`, `AudioItemState`, `Subtitle`, ids
//! - **Core Traits**: `PlayableItem` (one device-level audio source) and
//!   `AudioItemFactory` (builds them)
//! - **Events**: the one-way channel items use to report play/pause/update/end/error
//! - **Captions**: stateless subtitle lookup by timestamp and locale
//! - **Settings**: the layered per-call -> per-track -> inherited -> global resolver
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use audiotrack_core::{caption::current_caption, Subtitle};
//!
//! let subtitles = vec![Subtitle::new(0.0, 5.0, "hi")];
//!
//! assert_eq!(current_caption(&subtitles, 1.0, None).map(|s| s.text.as_str()), Some("hi"));
//! assert!(current_caption(&subtitles, 6.0, None).is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod caption;
pub mod error;
pub mod events;
pub mod settings;
pub mod source;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use events::{item_event_channel, AudioItemEvent, ItemEvent, ItemEventReceiver, ItemEventSender};
pub use settings::{AudioOptions, ResolvedAudioSettings, DEFAULT_VOLUME};
pub use traits::{AudioItemFactory, AudioItemRequest, PlayableItem};

pub use types::{
    AudioItemId, AudioItemState, InnerAudioState, Subtitle, SubtitlesJson, TrackId, TrackState,
    TrackStream,
};

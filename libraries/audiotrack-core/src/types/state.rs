/// Published state types: track state, stream and item snapshots
use super::{AudioItemId, Subtitle, TrackId};
use serde::{Deserialize, Serialize};

/// Snapshot of one queued audio item's transport state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioItemState {
    /// Item identifier
    pub id: AudioItemId,

    /// Source locator the item was registered with
    pub src: String,

    /// Display filename (original filename if supplied, else derived from `src`)
    pub filename: String,

    /// Whether playback has been started at least once
    pub started: bool,

    /// Whether the item is currently paused
    pub paused: bool,

    /// Item volume as last applied
    pub volume: f32,

    /// Whether the item is muted
    pub muted: bool,

    /// Whether the item loops
    #[serde(rename = "loop")]
    pub looped: bool,
}

impl AudioItemState {
    /// True while the item has started and is not paused
    pub fn is_playing(&self) -> bool {
        self.started && !self.paused
    }
}

/// Snapshot of the underlying device-level audio element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerAudioState {
    /// Current playback position in seconds
    pub current_time: f64,

    /// Total duration in seconds, when known
    pub duration: Option<f64>,

    /// Device volume
    pub volume: f32,

    /// Device mute flag
    pub muted: bool,

    /// Device loop flag
    #[serde(rename = "loop")]
    pub looped: bool,

    /// Device paused flag
    pub paused: bool,

    /// Whether the device reached the end of the media
    pub ended: bool,
}

/// Coarse track view, republished on structural and settings changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackState {
    /// Track identifier, immutable after construction
    pub id: TrackId,

    /// Item snapshots in playback order; the front is the active item
    pub queue: Vec<AudioItemState>,

    /// True only while the front item is playing
    pub is_playing: bool,

    /// Track volume (0.0 - 1.0 at construction)
    pub volume: f32,

    /// Track mute flag
    pub muted: bool,

    /// Track loop flag
    #[serde(rename = "loop")]
    pub looped: bool,

    /// Start the front item automatically when it becomes active
    pub auto_play: bool,

    /// Accept sources that are already queued
    pub allow_duplicates: bool,
}

impl TrackState {
    /// Create an empty, idle track state
    pub fn new(id: TrackId) -> Self {
        Self {
            id,
            queue: Vec::new(),
            is_playing: false,
            volume: 1.0,
            muted: false,
            looped: false,
            auto_play: false,
            allow_duplicates: false,
        }
    }
}

/// Fine-grained view of the audible item, republished on every playback tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStream {
    /// Snapshot of the front item, if anything is audible
    pub audio_item_state: Option<AudioItemState>,

    /// Device snapshot paired with `audio_item_state`
    pub inner_audio_state: Option<InnerAudioState>,

    /// Caption active at the current playback position
    pub caption: Option<Subtitle>,
}

impl TrackStream {
    /// True when nothing is audible (all three fields empty)
    pub fn is_idle(&self) -> bool {
        self.audio_item_state.is_none() && self.inner_audio_state.is_none() && self.caption.is_none()
    }

    /// Reset every field to empty
    pub fn clear(&mut self) {
        self.audio_item_state = None;
        self.inner_audio_state = None;
        self.caption = None;
    }
}

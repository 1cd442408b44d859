/// Core traits for audiotrack
use crate::error::Result;
use crate::events::ItemEventSender;
use crate::settings::ResolvedAudioSettings;
use crate::types::{AudioItemId, AudioItemState, InnerAudioState};

/// One playable audio request, backed by a device-level audio element
///
/// Implementers perform the actual device control. Transport requests
/// (`play`, `pause`, `end`) are fire-and-forget: their outcome is reported
/// later through the `ItemEventSender` the item received at creation.
/// After `remove_all_listeners` an item must not emit any further events.
pub trait PlayableItem {
    /// Stable item identifier
    fn id(&self) -> &AudioItemId;

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Force-terminate the item; it reports `End` once stopped
    fn end(&mut self);

    /// Apply a new volume
    fn set_volume(&mut self, volume: f32);

    /// Apply a new loop flag
    fn set_loop(&mut self, looped: bool);

    /// Apply a new mute flag
    fn toggle_mute(&mut self, muted: bool);

    /// Detach the item from its track; no events are emitted afterwards
    fn remove_all_listeners(&mut self);

    /// Transport snapshot
    fn state(&self) -> AudioItemState;

    /// Device snapshot
    fn inner_audio_state(&self) -> InnerAudioState;

    /// Whether the item was registered with exactly `src`
    fn src_equal_to(&self, src: &str) -> bool {
        self.state().src == src
    }

    /// Whether the item carries `id`
    fn id_equal_to(&self, id: &AudioItemId) -> bool {
        self.id() == id
    }
}

/// Everything a factory needs to build one item
#[derive(Debug, Clone, PartialEq)]
pub struct AudioItemRequest {
    /// Id assigned by the track
    pub id: AudioItemId,

    /// Source locator
    pub src: String,

    /// Display filename
    pub filename: String,

    /// Resolved volume / mute / loop / locale
    pub settings: ResolvedAudioSettings,
}

/// Builds playable items for a track
///
/// This is the seam to the platform audio layer (a browser element, a
/// desktop output stream, a test double).
pub trait AudioItemFactory {
    /// Create an item wired to `events`
    ///
    /// # Errors
    /// Returns an error if the device layer cannot open the source
    fn create(
        &mut self,
        request: AudioItemRequest,
        events: ItemEventSender,
    ) -> Result<Box<dyn PlayableItem>>;
}

//! Item events
//!
//! One-way messages from a playable item to the track that owns it.
//! Items never call back into their track; they emit an `ItemEvent` and the
//! track drains its receiver on its own schedule:
//! - `Play` when playback starts or resumes
//! - `Update` on periodic playback ticks
//! - `Pause` when playback pauses
//! - `End` when playback finishes or is force-terminated
//! - `Error` on a device-level failure (terminal for the item)

use crate::types::AudioItemId;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use serde::{Deserialize, Serialize};

/// Lifecycle event kinds emitted by a playable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioItemEvent {
    /// Playback started or resumed
    Play {
        /// True only for the very first start of this item
        first_run: bool,
    },

    /// Periodic playback tick
    Update,

    /// Playback paused
    Pause,

    /// Playback finished (naturally or forced)
    End,

    /// Device-level failure, implies end of the item
    Error {
        /// Error message from the device layer
        message: String,
    },
}

/// Event tagged with the id of the item that emitted it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEvent {
    /// Emitting item
    pub item_id: AudioItemId,

    /// What happened
    pub kind: AudioItemEvent,
}

/// Sending half, handed to each item when it is created
#[derive(Debug, Clone)]
pub struct ItemEventSender {
    tx: Sender<ItemEvent>,
}

impl ItemEventSender {
    /// Emit an event for `item_id`
    ///
    /// Returns false if the owning track is gone.
    pub fn emit(&self, item_id: &AudioItemId, kind: AudioItemEvent) -> bool {
        self.tx
            .send(ItemEvent {
                item_id: item_id.clone(),
                kind,
            })
            .is_ok()
    }
}

/// Receiving half, owned by the track
#[derive(Debug)]
pub struct ItemEventReceiver {
    rx: Receiver<ItemEvent>,
}

impl ItemEventReceiver {
    /// Take the next pending event without blocking
    pub fn try_next(&self) -> Option<ItemEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Number of events waiting to be drained
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

/// Create a connected sender/receiver pair
pub fn item_event_channel() -> (ItemEventSender, ItemEventReceiver) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (ItemEventSender { tx }, ItemEventReceiver { rx })
}

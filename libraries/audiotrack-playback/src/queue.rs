//! Track queue
//!
//! Ordered collection of live playable items. The front entry is the active
//! item; insertion order is playback order.
//!
//! ```text
//! index 0   Intro.mp3      <- active (playing or paused)
//! ─────────────────────────
//! index 1   Priority.mp3   <- inserted with priority
//! index 2   Outro.mp3      <- appended
//! ```

use crate::types::AudioCallbacks;
use audiotrack_core::{AudioItemId, AudioItemState, PlayableItem, Subtitle};

/// One queued item with everything resolved at registration time
pub struct QueueEntry {
    /// Device-level item
    pub item: Box<dyn PlayableItem>,

    /// Caller hooks
    pub callbacks: AudioCallbacks,

    /// Subtitles resolved once at creation
    pub subtitles: Vec<Subtitle>,

    /// Caption locale filter
    pub locale: Option<String>,

    /// Filename used in logs
    pub filename: String,
}

impl std::fmt::Debug for QueueEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueEntry")
            .field("id", self.item.id())
            .field("filename", &self.filename)
            .field("subtitles", &self.subtitles.len())
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Ordered queue of playable items
#[derive(Debug, Default)]
pub struct AudioQueue {
    entries: Vec<QueueEntry>,
}

impl AudioQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append to the tail
    pub fn push(&mut self, entry: QueueEntry) {
        self.entries.push(entry);
    }

    /// Insert at `index`, shifting later entries back
    ///
    /// Indices past the tail append.
    pub fn insert(&mut self, index: usize, entry: QueueEntry) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
    }

    /// Remove entry by index
    ///
    /// Returns the removed entry if successful
    pub fn remove(&mut self, index: usize) -> Option<QueueEntry> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    /// Drop everything behind the front entry, returning the dropped entries
    pub fn truncate_to_front(&mut self) -> Vec<QueueEntry> {
        if self.entries.len() <= 1 {
            return Vec::new();
        }
        self.entries.split_off(1)
    }

    /// Index of the item carrying `id`
    pub fn position_of(&self, id: &AudioItemId) -> Option<usize> {
        self.entries.iter().position(|e| e.item.id_equal_to(id))
    }

    /// Index of the first item registered with exactly `src`
    pub fn find_by_src(&self, src: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.item.src_equal_to(src))
    }

    /// Index of the first item whose source contains `fragment`
    pub fn find_containing(&self, fragment: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.item.state().src.contains(fragment))
    }

    pub fn front(&self) -> Option<&QueueEntry> {
        self.entries.first()
    }

    pub fn front_mut(&mut self) -> Option<&mut QueueEntry> {
        self.entries.first_mut()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut QueueEntry> {
        self.entries.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut QueueEntry> {
        self.entries.iter_mut()
    }

    /// Item snapshots in queue order
    pub fn snapshots(&self) -> Vec<AudioItemState> {
        self.entries.iter().map(|e| e.item.state()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiotrack_core::InnerAudioState;

    struct StubItem {
        id: AudioItemId,
        src: String,
    }

    impl PlayableItem for StubItem {
        fn id(&self) -> &AudioItemId {
            &self.id
        }
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn end(&mut self) {}
        fn set_volume(&mut self, _volume: f32) {}
        fn set_loop(&mut self, _looped: bool) {}
        fn toggle_mute(&mut self, _muted: bool) {}
        fn remove_all_listeners(&mut self) {}
        fn state(&self) -> AudioItemState {
            AudioItemState {
                id: self.id.clone(),
                src: self.src.clone(),
                filename: self.src.clone(),
                started: false,
                paused: false,
                volume: 1.0,
                muted: false,
                looped: false,
            }
        }
        fn inner_audio_state(&self) -> InnerAudioState {
            InnerAudioState::default()
        }
    }

    fn entry(id: &str, src: &str) -> QueueEntry {
        QueueEntry {
            item: Box::new(StubItem {
                id: AudioItemId::new(id),
                src: src.to_string(),
            }),
            callbacks: AudioCallbacks::default(),
            subtitles: Vec::new(),
            locale: None,
            filename: src.to_string(),
        }
    }

    fn ids(queue: &AudioQueue) -> Vec<String> {
        queue.snapshots().into_iter().map(|s| s.id.to_string()).collect()
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut queue = AudioQueue::new();
        queue.push(entry("a", "/a.mp3"));
        queue.push(entry("b", "/b.mp3"));
        queue.push(entry("c", "/c.mp3"));

        assert_eq!(ids(&queue), ["a", "b", "c"]);
    }

    #[test]
    fn test_insert_shifts_later_entries() {
        let mut queue = AudioQueue::new();
        queue.push(entry("a", "/a.mp3"));
        queue.push(entry("c", "/c.mp3"));
        queue.insert(1, entry("b", "/b.mp3"));
        queue.insert(99, entry("d", "/d.mp3"));

        assert_eq!(ids(&queue), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut queue = AudioQueue::new();
        queue.push(entry("a", "/a.mp3"));

        assert!(queue.remove(1).is_none());
        assert_eq!(queue.remove(0).unwrap().filename, "/a.mp3");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_truncate_to_front() {
        let mut queue = AudioQueue::new();
        queue.push(entry("a", "/a.mp3"));
        queue.push(entry("b", "/b.mp3"));
        queue.push(entry("c", "/c.mp3"));

        let dropped = queue.truncate_to_front();
        assert_eq!(dropped.len(), 2);
        assert_eq!(ids(&queue), ["a"]);
        assert!(queue.truncate_to_front().is_empty());
    }

    #[test]
    fn test_lookup_by_id_and_source() {
        let mut queue = AudioQueue::new();
        queue.push(entry("a", "/sfx/click.ogg"));
        queue.push(entry("b", "/music/theme.mp3"));

        assert_eq!(queue.position_of(&AudioItemId::new("b")), Some(1));
        assert_eq!(queue.position_of(&AudioItemId::new("zz")), None);
        assert_eq!(queue.find_by_src("/music/theme.mp3"), Some(1));
        assert_eq!(queue.find_by_src("theme.mp3"), None);
        assert_eq!(queue.find_containing("theme"), Some(1));
        assert_eq!(queue.find_containing("/"), Some(0));
    }
}

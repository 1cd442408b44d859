//! Track - one ordered audio playback lane
//!
//! Owns the queue, the coarse `TrackState` and the per-tick `TrackStream`.
//! Items report lifecycle changes through the event channel; the track
//! drains it in `process_events`, which every public operation calls before
//! returning. Listeners only ever see `&TrackState` / `&TrackStream`, so they
//! cannot mutate the track from inside a notification.

use crate::{
    config::{default_name, TrackConfig},
    error::{Result, TrackError},
    listeners::{ListenerHandle, ListenerRegistry},
    queue::{AudioQueue, QueueEntry},
    types::{RegisterOptions, SkipMethod, SkipTarget, TrackSettingsUpdate},
    volume::{clamp_volume, master_scaled},
};
use audiotrack_core::{
    caption::current_caption,
    item_event_channel,
    source::{file_name_from_src, subtitle_key},
    AudioItemEvent, AudioItemFactory, AudioItemId, AudioItemRequest, AudioItemState, AudioOptions,
    ItemEvent, ItemEventReceiver, ItemEventSender, ResolvedAudioSettings, Subtitle, SubtitlesJson,
    TrackId, TrackState, TrackStream,
};
use tracing::{debug, info, warn};

/// Where a newly registered item goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Append,
    Insert { index: usize, skip_current: bool },
}

impl Placement {
    /// Priority `0` on a non-empty queue lands behind the front item and
    /// skips it. Negative or `>= queue_len` priorities append.
    fn for_priority(priority: Option<i64>, queue_len: usize) -> Self {
        let index = priority
            .and_then(|p| usize::try_from(p).ok())
            .filter(|&p| p < queue_len);

        match index {
            Some(0) => Self::Insert {
                index: 1,
                skip_current: true,
            },
            Some(index) => Self::Insert {
                index,
                skip_current: false,
            },
            None => Self::Append,
        }
    }
}

/// One independently controlled playback lane
pub struct Track {
    index: usize,
    name: String,
    queue: AudioQueue,
    subtitles: SubtitlesJson,
    default_audio_options: AudioOptions,
    inherited_options: Box<dyn Fn() -> AudioOptions>,
    factory: Box<dyn AudioItemFactory>,
    events_tx: ItemEventSender,
    events_rx: ItemEventReceiver,

    state: TrackState,
    state_listeners: ListenerRegistry<TrackState>,
    stream: TrackStream,
    stream_listeners: ListenerRegistry<TrackStream>,
    update_track_callback: Box<dyn FnMut(&TrackState)>,
}

impl Track {
    /// Create a track
    ///
    /// `update_track_callback` fires on every state change, before any
    /// registered state listener. Volume from `config` is clamped into 0.0 - 1.0.
    pub fn new(
        config: TrackConfig,
        factory: Box<dyn AudioItemFactory>,
        update_track_callback: impl FnMut(&TrackState) + 'static,
    ) -> Self {
        let (events_tx, events_rx) = item_event_channel();

        let mut state = TrackState::new(TrackId::generate());
        state.volume = clamp_volume(config.volume);
        state.muted = config.muted;
        state.looped = config.looped;
        state.auto_play = config.auto_play;
        state.allow_duplicates = config.allow_duplicates;

        Self {
            index: config.index,
            name: config.name.unwrap_or_else(|| default_name(config.index)),
            queue: AudioQueue::new(),
            subtitles: SubtitlesJson::new(),
            default_audio_options: AudioOptions::default(),
            inherited_options: Box::new(AudioOptions::default),
            factory,
            events_tx,
            events_rx,
            state,
            state_listeners: ListenerRegistry::new(),
            stream: TrackStream::default(),
            stream_listeners: ListenerRegistry::new(),
            update_track_callback: Box::new(update_track_callback),
        }
    }

    /// Supply the parent's audio options (third layer of the settings chain)
    #[must_use]
    pub fn with_inherited_options(mut self, options: impl Fn() -> AudioOptions + 'static) -> Self {
        self.inherited_options = Box::new(options);
        self
    }

    /// Per-track defaults (second layer of the settings chain)
    pub fn set_default_audio_options(&mut self, options: AudioOptions) {
        self.default_audio_options = options;
    }

    pub fn default_audio_options(&self) -> &AudioOptions {
        &self.default_audio_options
    }

    // ===== Reads =====

    pub fn id(&self) -> &TrackId {
        &self.state.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn stream(&self) -> &TrackStream {
        &self.stream
    }

    /// Snapshot of the front (active) item
    pub fn current_audio(&self) -> Option<&AudioItemState> {
        self.state.queue.first()
    }

    /// Snapshot of the item queued behind the active one
    pub fn next_audio(&self) -> Option<&AudioItemState> {
        self.state.queue.get(1)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    // ===== Subscriptions =====

    /// Subscribe to track state changes
    pub fn on_state_change(&mut self, listener: impl FnMut(&TrackState) + 'static) -> ListenerHandle {
        self.state_listeners.subscribe(Box::new(listener))
    }

    pub fn remove_state_listener(&mut self, handle: ListenerHandle) -> bool {
        self.state_listeners.unsubscribe(handle)
    }

    /// Subscribe to stream changes (every playback tick)
    pub fn on_stream_change(&mut self, listener: impl FnMut(&TrackStream) + 'static) -> ListenerHandle {
        self.stream_listeners.subscribe(Box::new(listener))
    }

    pub fn remove_stream_listener(&mut self, handle: ListenerHandle) -> bool {
        self.stream_listeners.unsubscribe(handle)
    }

    // ===== Queue operations =====

    /// Enqueue a new audio request
    ///
    /// Rejected if `src` is already queued and neither `options` nor the
    /// track allow duplicates. With autoplay on and an empty queue the new
    /// item starts immediately.
    pub fn register_audio(&mut self, src: &str, options: RegisterOptions) -> Result<AudioItemId> {
        let allow_duplicates = options.allow_duplicates || self.state.allow_duplicates;
        if !allow_duplicates && self.queue.find_by_src(src).is_some() {
            warn!(track = %self.state.id, src, "Prevented queueing a duplicate audio");
            return Err(TrackError::Duplicate(src.to_string()));
        }

        let queue_len = self.queue.len();
        let placement = Placement::for_priority(options.priority, queue_len);

        let entry = self.create_entry(src, options).map_err(|e| {
            warn!(track = %self.state.id, src, error = %e, "Failed to create audio item");
            e
        })?;
        let id = entry.item.id().clone();

        match placement {
            Placement::Append => {
                debug!(track = %self.state.id, src, "Queued audio at tail");
                self.mutate_queue(|queue| queue.push(entry));
            }
            Placement::Insert {
                index,
                skip_current,
            } => {
                debug!(track = %self.state.id, src, index, "Queued audio with priority");
                self.mutate_queue(|queue| queue.insert(index, entry));
                if skip_current {
                    self.end_item_at(0);
                }
            }
        }

        if self.state.auto_play && queue_len == 0 {
            if let Some(index) = self.queue.position_of(&id) {
                if let Some(entry) = self.queue.get_mut(index) {
                    entry.item.play();
                }
            }
        }

        self.process_events();
        Ok(id)
    }

    /// Force-terminate one queued item
    ///
    /// The item is not removed here; its `End` event removes it.
    pub fn skip_audio(&mut self, target: SkipTarget) -> Result<()> {
        let index = match &target {
            SkipTarget::Index(index) => {
                let len = self.queue.len();
                match usize::try_from(*index).ok().filter(|&i| i < len) {
                    Some(i) => i,
                    None => {
                        debug!(track = %self.state.id, index, len, "Skip index out of range");
                        return Err(TrackError::IndexOutOfBounds { index: *index, len });
                    }
                }
            }
            SkipTarget::Source { pattern, method } => {
                let found = match method {
                    SkipMethod::Match => self.queue.find_by_src(pattern),
                    SkipMethod::Include => self.queue.find_containing(pattern),
                };
                match found {
                    Some(i) => i,
                    None => {
                        debug!(track = %self.state.id, pattern = %pattern, %method, "No queued audio to skip");
                        return Err(TrackError::NoMatch(pattern.clone()));
                    }
                }
            }
        };

        self.end_item_at(index);
        self.process_events();
        Ok(())
    }

    /// Force-terminate the active item
    pub fn skip_current(&mut self) -> Result<()> {
        self.skip_audio(SkipTarget::default())
    }

    /// Hard reset: keep only the front item and terminate it
    ///
    /// Items behind the front are detached first so they never report back.
    pub fn purge_track(&mut self) {
        if !self.queue.is_empty() {
            for entry in self.queue.iter_mut().skip(1) {
                entry.item.remove_all_listeners();
            }
            if self.queue.len() > 1 {
                self.mutate_queue(|queue| {
                    queue.truncate_to_front();
                });
            }
            info!(track = %self.state.id, "Purging track");
            self.end_item_at(0);
        }

        self.emit_state();
        self.process_events();
    }

    /// Play the front item if it is paused or has never started, else pause it
    pub fn toggle_play(&mut self) -> Result<()> {
        let front = self.queue.front_mut().ok_or(TrackError::QueueEmpty)?;

        let state = front.item.state();
        if state.paused || !state.started {
            front.item.play();
        } else {
            front.item.pause();
        }

        self.process_events();
        Ok(())
    }

    /// Resume the front item if it is paused
    pub fn resume_track(&mut self) {
        self.resume_front();
        self.process_events();
    }

    /// Apply a partial settings update
    ///
    /// Loop, volume and mute cascade to every queued item. Volume is stored
    /// as given. Setting `auto_play` (either way) also resumes the front item.
    pub fn update_state(&mut self, update: TrackSettingsUpdate) {
        if update.auto_play.is_some() {
            self.resume_front();
        }
        if let Some(looped) = update.looped {
            for entry in self.queue.iter_mut() {
                entry.item.set_loop(looped);
            }
        }
        if let Some(volume) = update.volume {
            for entry in self.queue.iter_mut() {
                entry.item.set_volume(volume);
            }
        }
        if let Some(muted) = update.muted {
            for entry in self.queue.iter_mut() {
                entry.item.toggle_mute(muted);
            }
        }

        self.mutate_state(|state| {
            if let Some(auto_play) = update.auto_play {
                state.auto_play = auto_play;
            }
            if let Some(looped) = update.looped {
                state.looped = looped;
            }
            if let Some(volume) = update.volume {
                state.volume = volume;
            }
            if let Some(muted) = update.muted {
                state.muted = muted;
            }
            if let Some(allow_duplicates) = update.allow_duplicates {
                state.allow_duplicates = allow_duplicates;
            }
        });

        self.process_events();
    }

    /// Scale every queued item by `multiplier * track volume`
    ///
    /// Called by the owning manager only. A zero multiplier is ignored.
    pub fn apply_master_volume(&mut self, multiplier: f32) {
        let Some(volume) = master_scaled(multiplier, self.state.volume) else {
            return;
        };
        for entry in self.queue.iter_mut() {
            entry.item.set_volume(volume);
        }
    }

    /// Update the track's position inside its manager
    ///
    /// The default "Track #<index>" name follows the index; custom names stay.
    pub fn update_index(&mut self, index: usize) {
        let prev = self.index;
        self.index = index;
        if self.name == default_name(prev) {
            self.name = default_name(index);
        }
    }

    /// Replace the subtitle mapping used for items registered from now on
    pub fn inject_subtitles(&mut self, subtitles: SubtitlesJson) {
        self.subtitles = subtitles;
    }

    // ===== Item events =====

    /// Drain pending item events, returns how many were handled
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events_rx.try_next() {
            self.handle_item_event(event);
            handled += 1;
        }
        handled
    }

    fn handle_item_event(&mut self, event: ItemEvent) {
        let ItemEvent { item_id, kind } = event;
        let Some(index) = self.queue.position_of(&item_id) else {
            debug!(track = %self.state.id, item = %item_id, ?kind, "Ignoring event from an item no longer queued");
            return;
        };

        match kind {
            AudioItemEvent::Play { first_run } => self.on_item_play(index, first_run),
            AudioItemEvent::Update => self.on_item_update(index),
            AudioItemEvent::Pause => self.on_item_pause(index),
            AudioItemEvent::End => self.on_item_end(index, &item_id),
            AudioItemEvent::Error { message } => self.on_item_error(index, &item_id, &message),
        }
    }

    fn on_item_play(&mut self, index: usize, first_run: bool) {
        let Some(entry) = self.queue.get_mut(index) else {
            return;
        };
        if first_run {
            if let Some(on_play) = entry.callbacks.on_play.as_mut() {
                on_play();
            }
        }

        let item_state = entry.item.state();
        let inner_state = entry.item.inner_audio_state();
        let caption = caption_at(entry, 0.0);

        let snapshots = self.queue.snapshots();
        self.mutate_state(|state| {
            state.queue = snapshots;
            state.is_playing = true;
        });
        self.mutate_stream(|stream| {
            stream.audio_item_state = Some(item_state);
            stream.inner_audio_state = Some(inner_state);
            if let Some(caption) = caption {
                stream.caption = caption;
            }
        });
    }

    fn on_item_update(&mut self, index: usize) {
        let Some(entry) = self.queue.get_mut(index) else {
            return;
        };
        if let Some(on_update) = entry.callbacks.on_update.as_mut() {
            on_update();
        }

        let item_state = entry.item.state();
        let inner_state = entry.item.inner_audio_state();
        let caption = caption_at(entry, inner_state.current_time);

        self.mutate_stream(|stream| {
            stream.audio_item_state = Some(item_state);
            stream.inner_audio_state = Some(inner_state);
            if let Some(caption) = caption {
                stream.caption = caption;
            }
        });
    }

    fn on_item_pause(&mut self, index: usize) {
        let Some(entry) = self.queue.get_mut(index) else {
            return;
        };
        if let Some(on_pause) = entry.callbacks.on_pause.as_mut() {
            on_pause();
        }

        let item_state = entry.item.state();
        let inner_state = entry.item.inner_audio_state();

        let snapshots = self.queue.snapshots();
        self.mutate_state(|state| {
            state.queue = snapshots;
            state.is_playing = false;
        });
        // the last caption stays visible while paused
        self.mutate_stream(|stream| {
            stream.audio_item_state = Some(item_state);
            stream.inner_audio_state = Some(inner_state);
        });
    }

    fn on_item_end(&mut self, index: usize, id: &AudioItemId) {
        if let Some(on_end) = self
            .queue
            .get_mut(index)
            .and_then(|entry| entry.callbacks.on_end.as_mut())
        {
            on_end();
        }

        self.clear_audio(id);
        self.mutate_stream(TrackStream::clear);
    }

    fn on_item_error(&mut self, index: usize, id: &AudioItemId, message: &str) {
        if let Some(entry) = self.queue.get_mut(index) {
            warn!(item = %id, filename = %entry.filename, message, "Audio item failed");
            if let Some(on_error) = entry.callbacks.on_error.as_mut() {
                on_error(message);
            }
            if let Some(on_end) = entry.callbacks.on_end.as_mut() {
                on_end();
            }
        }

        self.mutate_stream(TrackStream::clear);
        self.clear_audio(id);
    }

    /// Remove a finished item and start the next one under autoplay
    fn clear_audio(&mut self, id: &AudioItemId) {
        let Some(index) = self.queue.position_of(id) else {
            warn!(track = %self.state.id, item = %id, "Cannot clear audio (queue index not found)");
            return;
        };

        if let Some(removed) = self.mutate_queue(|queue| queue.remove(index)) {
            debug!(track = %self.state.id, filename = %removed.filename, "Cleared audio");
        }

        if self.state.auto_play {
            if let Some(next) = self.queue.front_mut() {
                debug!(filename = %next.filename, "Next playing");
                next.item.play();
            }
        }
    }

    // ===== Internal helpers =====

    fn create_entry(&mut self, src: &str, options: RegisterOptions) -> Result<QueueEntry> {
        let RegisterOptions {
            audio,
            key_for_subtitles,
            subtitles,
            original_filename,
            callbacks,
            ..
        } = options;

        let derived_filename = file_name_from_src(src);
        let inherited = (self.inherited_options)();
        let settings = ResolvedAudioSettings::resolve(&audio, &self.default_audio_options, &inherited);

        let key = subtitle_key(
            key_for_subtitles.as_deref(),
            original_filename.as_deref(),
            &derived_filename,
        );
        let subtitles: Vec<Subtitle> = subtitles
            .or_else(|| self.subtitles.get(key).cloned())
            .unwrap_or_default();

        let filename = original_filename.unwrap_or(derived_filename);
        let locale = settings.locale.clone();
        let request = AudioItemRequest {
            id: AudioItemId::generate(),
            src: src.to_string(),
            filename: filename.clone(),
            settings,
        };
        let item = self.factory.create(request, self.events_tx.clone())?;

        Ok(QueueEntry {
            item,
            callbacks,
            subtitles,
            locale,
            filename,
        })
    }

    fn end_item_at(&mut self, index: usize) {
        if let Some(entry) = self.queue.get_mut(index) {
            info!(track = %self.state.id, src = %entry.item.state().src, "Force stopping");
            entry.item.end();
        }
    }

    fn resume_front(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            if front.item.state().paused {
                front.item.play();
            }
        }
    }

    /// Mutate the queue, then republish the queue snapshot
    ///
    /// Empty queue: stream cleared, not playing. Without autoplay the stream
    /// shows the front item and `is_playing` follows its transport state.
    fn mutate_queue<R>(&mut self, f: impl FnOnce(&mut AudioQueue) -> R) -> R {
        let out = f(&mut self.queue);

        let snapshots = self.queue.snapshots();
        let front = self
            .queue
            .front()
            .map(|entry| (entry.item.state(), entry.item.inner_audio_state()));

        match front {
            None => {
                self.mutate_stream(TrackStream::clear);
                self.mutate_state(|state| {
                    state.queue = snapshots;
                    state.is_playing = false;
                });
            }
            Some((item_state, inner_state)) if !self.state.auto_play => {
                let is_playing = item_state.is_playing();
                self.mutate_stream(|stream| {
                    stream.audio_item_state = Some(item_state);
                    stream.inner_audio_state = Some(inner_state);
                });
                self.mutate_state(|state| {
                    state.queue = snapshots;
                    state.is_playing = is_playing;
                });
            }
            Some(_) => self.mutate_state(|state| state.queue = snapshots),
        }

        out
    }

    fn mutate_state(&mut self, f: impl FnOnce(&mut TrackState)) {
        f(&mut self.state);
        self.emit_state();
    }

    fn mutate_stream(&mut self, f: impl FnOnce(&mut TrackStream)) {
        f(&mut self.stream);
        self.emit_stream();
    }

    fn emit_state(&mut self) {
        (self.update_track_callback)(&self.state);
        self.state_listeners.notify(&self.state);
    }

    fn emit_stream(&mut self) {
        self.stream_listeners.notify(&self.stream);
    }
}

/// Caption update for an item at `time`
///
/// Outer `None`: the item has no subtitles and the caption is left alone.
fn caption_at(entry: &QueueEntry, time: f64) -> Option<Option<Subtitle>> {
    if entry.subtitles.is_empty() {
        return None;
    }
    Some(current_caption(&entry.subtitles, time, entry.locale.as_deref()).cloned())
}

impl std::fmt::Debug for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("id", &self.state.id)
            .field("index", &self.index)
            .field("name", &self.name)
            .field("queue", &self.queue)
            .field("state_listeners", &self.state_listeners)
            .field("stream_listeners", &self.stream_listeners)
            .finish_non_exhaustive()
    }
}

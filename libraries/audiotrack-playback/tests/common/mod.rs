//! Shared test helpers: a scripted playable item and its factory
//!
//! `FakeItem` behaves like a device element that reports transport changes
//! synchronously through its event sender. Tests reach the device state via
//! `FakeFactory` to simulate ticks, natural ends and failures.

#![allow(dead_code)]

use audiotrack_core::{
    AudioItemEvent, AudioItemFactory, AudioItemId, AudioItemRequest, AudioItemState, CoreError,
    InnerAudioState, ItemEventSender, PlayableItem, TrackState, TrackStream,
};
use audiotrack_playback::{Track, TrackConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ===== Fake device =====

#[derive(Debug)]
pub struct FakeDevice {
    pub request: AudioItemRequest,
    pub started: bool,
    pub paused: bool,
    pub volume: f32,
    pub muted: bool,
    pub looped: bool,
    pub current_time: f64,
    pub ended: bool,
    pub detached: bool,
    pub play_calls: usize,
    pub end_calls: usize,
    events: ItemEventSender,
}

impl FakeDevice {
    fn emit(&self, kind: AudioItemEvent) {
        if !self.detached {
            self.events.emit(&self.request.id, kind);
        }
    }
}

pub type DeviceHandle = Rc<RefCell<FakeDevice>>;

pub struct FakeItem {
    id: AudioItemId,
    device: DeviceHandle,
}

impl PlayableItem for FakeItem {
    fn id(&self) -> &AudioItemId {
        &self.id
    }

    fn play(&mut self) {
        let mut device = self.device.borrow_mut();
        device.play_calls += 1;
        if device.started && !device.paused {
            return;
        }
        let first_run = !device.started;
        device.started = true;
        device.paused = false;
        device.emit(AudioItemEvent::Play { first_run });
    }

    fn pause(&mut self) {
        let mut device = self.device.borrow_mut();
        if !device.started || device.paused {
            return;
        }
        device.paused = true;
        device.emit(AudioItemEvent::Pause);
    }

    fn end(&mut self) {
        let mut device = self.device.borrow_mut();
        device.end_calls += 1;
        device.ended = true;
        device.paused = true;
        device.emit(AudioItemEvent::End);
    }

    fn set_volume(&mut self, volume: f32) {
        self.device.borrow_mut().volume = volume;
    }

    fn set_loop(&mut self, looped: bool) {
        self.device.borrow_mut().looped = looped;
    }

    fn toggle_mute(&mut self, muted: bool) {
        self.device.borrow_mut().muted = muted;
    }

    fn remove_all_listeners(&mut self) {
        self.device.borrow_mut().detached = true;
    }

    fn state(&self) -> AudioItemState {
        let device = self.device.borrow();
        AudioItemState {
            id: device.request.id.clone(),
            src: device.request.src.clone(),
            filename: device.request.filename.clone(),
            started: device.started,
            paused: device.paused,
            volume: device.volume,
            muted: device.muted,
            looped: device.looped,
        }
    }

    fn inner_audio_state(&self) -> InnerAudioState {
        let device = self.device.borrow();
        InnerAudioState {
            current_time: device.current_time,
            duration: Some(30.0),
            volume: device.volume,
            muted: device.muted,
            looped: device.looped,
            paused: !device.started || device.paused,
            ended: device.ended,
        }
    }
}

// ===== Fake factory =====

#[derive(Clone, Default)]
pub struct FakeFactory {
    devices: Rc<RefCell<Vec<DeviceHandle>>>,
    failing_sources: Rc<RefCell<Vec<String>>>,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create` fail for `src`
    pub fn fail_creation_of(&self, src: &str) {
        self.failing_sources.borrow_mut().push(src.to_string());
    }

    /// Every request the factory has seen, in creation order
    pub fn requests(&self) -> Vec<AudioItemRequest> {
        self.devices
            .borrow()
            .iter()
            .map(|d| d.borrow().request.clone())
            .collect()
    }

    /// Most recently created device for `src`
    pub fn device(&self, src: &str) -> DeviceHandle {
        self.devices
            .borrow()
            .iter()
            .rev()
            .find(|d| d.borrow().request.src == src)
            .cloned()
            .unwrap_or_else(|| panic!("no device created for {src}"))
    }

    /// Advance playback of `src` to `time` and emit a tick
    pub fn tick(&self, src: &str, time: f64) {
        let device = self.device(src);
        let mut device = device.borrow_mut();
        device.current_time = time;
        device.emit(AudioItemEvent::Update);
    }

    /// Natural end of playback
    pub fn finish(&self, src: &str) {
        let device = self.device(src);
        let mut device = device.borrow_mut();
        device.ended = true;
        device.emit(AudioItemEvent::End);
    }

    /// Device-level failure
    pub fn fail(&self, src: &str, message: &str) {
        let device = self.device(src);
        let device = device.borrow();
        device.emit(AudioItemEvent::Error {
            message: message.to_string(),
        });
    }
}

impl AudioItemFactory for FakeFactory {
    fn create(
        &mut self,
        request: AudioItemRequest,
        events: ItemEventSender,
    ) -> audiotrack_core::Result<Box<dyn PlayableItem>> {
        if self.failing_sources.borrow().contains(&request.src) {
            return Err(CoreError::audio(format!("cannot open {}", request.src)));
        }

        let device = Rc::new(RefCell::new(FakeDevice {
            started: false,
            paused: false,
            volume: request.settings.volume,
            muted: request.settings.muted,
            looped: request.settings.looped,
            current_time: 0.0,
            ended: false,
            detached: false,
            play_calls: 0,
            end_calls: 0,
            events,
            request: request.clone(),
        }));
        self.devices.borrow_mut().push(Rc::clone(&device));

        Ok(Box::new(FakeItem {
            id: request.id,
            device,
        }))
    }
}

// ===== Track helpers =====

/// Track backed by `factory`, without a parent callback
pub fn track_with(factory: &FakeFactory, config: TrackConfig) -> Track {
    init_tracing();
    Track::new(config, Box::new(factory.clone()), |_| {})
}

/// Track with autoplay enabled
pub fn autoplay_track(factory: &FakeFactory) -> Track {
    track_with(
        factory,
        TrackConfig {
            auto_play: true,
            ..TrackConfig::default()
        },
    )
}

/// Every state published through `on_state_change`
pub fn record_states(track: &mut Track) -> Rc<RefCell<Vec<TrackState>>> {
    let states = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&states);
    track.on_state_change(move |state| sink.borrow_mut().push(state.clone()));
    states
}

/// Every stream published through `on_stream_change`
pub fn record_streams(track: &mut Track) -> Rc<RefCell<Vec<TrackStream>>> {
    let streams = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&streams);
    track.on_stream_change(move |stream| sink.borrow_mut().push(stream.clone()));
    streams
}

/// Sources of the published queue, front first
pub fn queued_sources(track: &Track) -> Vec<String> {
    track.state().queue.iter().map(|item| item.src.clone()).collect()
}

/// Shared counter for callback assertions
pub fn counter() -> Rc<RefCell<usize>> {
    Rc::new(RefCell::new(0))
}

mod ids;
mod state;
mod subtitle;

pub use ids::{AudioItemId, TrackId};
pub use state::{AudioItemState, InnerAudioState, TrackState, TrackStream};
pub use subtitle::{Subtitle, SubtitlesJson};

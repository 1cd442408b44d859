//! Caption lookup
//!
//! Stateless, called on every playback tick.

use crate::types::Subtitle;

/// Find the caption active at `time` (seconds)
///
/// With a `locale` filter, only entries tagged with that locale or untagged
/// entries are considered. Returns the first match in list order.
pub fn current_caption<'a>(
    subtitles: &'a [Subtitle],
    time: f64,
    locale: Option<&str>,
) -> Option<&'a Subtitle> {
    subtitles.iter().find(|subtitle| {
        subtitle.contains(time) && locale_matches(subtitle.locale.as_deref(), locale)
    })
}

fn locale_matches(entry: Option<&str>, filter: Option<&str>) -> bool {
    match (entry, filter) {
        (Some(entry), Some(filter)) => entry == filter,
        _ => true,
    }
}

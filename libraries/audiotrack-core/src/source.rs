//! Source locator helpers

/// Last path segment of a source locator, without query string or fragment
///
/// `"https://cdn.example.com/audio/intro.mp3?v=2"` -> `"intro.mp3"`
pub fn file_name_from_src(src: &str) -> String {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    path.trim_end_matches('/')
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_string()
}

/// Key used to look an item's subtitles up in the injected mapping
///
/// Explicit key, else original filename, else the derived filename.
pub fn subtitle_key<'a>(
    explicit: Option<&'a str>,
    original_filename: Option<&'a str>,
    derived_filename: &'a str,
) -> &'a str {
    explicit.or(original_filename).unwrap_or(derived_filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_path_and_query() {
        assert_eq!(file_name_from_src("https://cdn.example.com/a/intro.mp3?v=2"), "intro.mp3");
        assert_eq!(file_name_from_src("/sounds/click.ogg#t=3"), "click.ogg");
        assert_eq!(file_name_from_src("beep.wav"), "beep.wav");
        assert_eq!(file_name_from_src("C:\\audio\\song.flac"), "song.flac");
    }

    #[test]
    fn subtitle_key_priority() {
        assert_eq!(subtitle_key(Some("key"), Some("orig.mp3"), "a.mp3"), "key");
        assert_eq!(subtitle_key(None, Some("orig.mp3"), "a.mp3"), "orig.mp3");
        assert_eq!(subtitle_key(None, None, "a.mp3"), "a.mp3");
    }
}

//! YouTube link helpers: video id extraction and embed URLs.

/// Markers tried in order, each paired with the character ending the id.
const ID_MARKERS: [(&str, char); 3] = [("shorts/", '?'), ("youtu.be/", '?'), ("v=", '&')];

/// Extract the video identifier from a YouTube link.
///
/// The first marker found in the URL wins (`shorts/`, then `youtu.be/`, then `v=`). The id runs
/// from the end of the marker's first occurrence up to its terminator or to the next occurrence
/// of the marker, whichever comes first. An empty id counts as no id.
///
/// ```ignore
/// extract_video_id("https://youtu.be/abc123?t=4")                  // Some("abc123")
/// extract_video_id("https://www.youtube.com/watch?v=XYZ987&t=10") // Some("XYZ987")
/// extract_video_id("https://example.com/video")                    // None
/// ```
pub fn extract_video_id(url: &str) -> Option<&str> {
    if url.is_empty() {
        return None;
    }

    let (marker, terminator) = ID_MARKERS
        .iter()
        .find(|(marker, _)| url.contains(marker))?;

    let (_, after) = url.split_once(marker)?;
    let segment = after.split(marker).next().unwrap_or(after);
    let id = segment.split(*terminator).next().unwrap_or(segment);

    (!id.is_empty()).then_some(id)
}

/// Embed URL for `video_id`, autoplaying with controls and without related videos.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?autoplay=1&controls=1&showinfo=0&rel=0")
}

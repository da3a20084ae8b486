//! Session view returned by every participant and host endpoint.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::{phase::VisibleGamePhase, track::TrackSummary},
    services::youtube::embed_url,
    state::{game::Track, session::PlayerSession},
};

/// Everything a client needs to render the current screen of a session.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    /// Identifier to send back in the `X-Session-Id` header.
    pub session_id: Uuid,
    /// Current phase of the session.
    pub phase: VisibleGamePhase,
    /// Incremented on every phase transition; clients may skip redraws while it is unchanged.
    pub state_version: usize,
    /// True while playing or finished.
    pub game_started: bool,
    /// Whether the request carried the host passphrase.
    pub is_host: bool,
    /// Number of tracks currently in the shared playlist.
    pub track_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Display name registered for this session.
    pub registered_name: Option<String>,
    /// Last track submitted from this session, available for undo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_last_add: Option<TrackSummary>,
    /// Host may launch a new game now.
    pub can_start: bool,
    /// Host may resume a paused game now.
    pub can_resume: bool,
    /// Present for the host while a track is playing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub now_playing: Option<NowPlaying>,
    /// Message shown instead of the player (guest placeholder, end of playlist).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Set when the playlist could not be loaded for this view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
}

/// Track currently playing on the host screen.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct NowPlaying {
    /// One-based position in the shuffled order.
    pub position: usize,
    /// Number of tracks in the shuffled order.
    pub total: usize,
    /// YouTube video identifier.
    pub video_id: String,
    /// Autoplaying embed URL; the client keeps it blurred until the title is revealed.
    pub embed_url: String,
    /// Submitter, shown only when the host reveals it.
    pub submitter: String,
}

impl NowPlaying {
    /// Build the playback card for `track` at zero-based `index` out of `total`.
    pub fn new(track: &Track, index: usize, total: usize) -> Self {
        Self {
            position: index + 1,
            total,
            video_id: track.video_id.clone(),
            embed_url: embed_url(&track.video_id),
            submitter: track.user.clone(),
        }
    }
}

impl SessionView {
    /// Project `session` into the view sent to a host or guest client.
    pub fn from_session(
        session: &PlayerSession,
        is_host: bool,
        track_count: usize,
        store_error: Option<String>,
    ) -> Self {
        let snapshot = session.snapshot();
        let phase = VisibleGamePhase::from(snapshot.phase);
        let (now_playing, notice) = match (phase, is_host) {
            (VisibleGamePhase::Playing | VisibleGamePhase::Finished, false) => {
                (None, Some(WATCH_HOST_NOTICE.to_string()))
            }
            (VisibleGamePhase::Playing, true) => (
                session
                    .current_track()
                    .map(|track| NowPlaying::new(track, session.current_index(), session.order_len())),
                None,
            ),
            (VisibleGamePhase::Finished, true) => (None, Some(FINISHED_NOTICE.to_string())),
            _ => (None, None),
        };

        let collecting = session.is_collecting();
        Self {
            session_id: session.id(),
            phase,
            state_version: snapshot.version,
            game_started: session.game_started(),
            is_host,
            track_count,
            registered_name: session.registered_name().map(str::to_owned),
            my_last_add: session.my_last_add().map(TrackSummary::from),
            can_start: is_host && collecting && track_count > 0,
            can_resume: is_host && session.is_paused(),
            now_playing,
            notice,
            store_error,
        }
    }
}

/// Placeholder shown to non-host sessions while a game runs.
pub const WATCH_HOST_NOTICE: &str = "Watch the host's screen!";
/// Message shown to the host once the shuffled order is exhausted.
pub const FINISHED_NOTICE: &str = "Playlist finished!";

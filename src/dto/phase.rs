use serde::Serialize;
use utoipa::ToSchema;

use crate::state::state_machine::{CollectingStatus, GamePhase};

/// Session phase exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleGamePhase {
    /// Submissions are open.
    Collecting,
    /// Submissions are open and a paused game can be resumed.
    Paused,
    /// The host is playing tracks.
    Playing,
    /// Every track has been played.
    Finished,
}

impl From<GamePhase> for VisibleGamePhase {
    fn from(value: GamePhase) -> Self {
        match value {
            GamePhase::Collecting(CollectingStatus::Fresh) => VisibleGamePhase::Collecting,
            GamePhase::Collecting(CollectingStatus::Paused) => VisibleGamePhase::Paused,
            GamePhase::Playing => VisibleGamePhase::Playing,
            GamePhase::Finished => VisibleGamePhase::Finished,
        }
    }
}

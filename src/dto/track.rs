//! DTO definitions for track submission and name registration.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::validation::validate_display_name,
    state::game::Track,
};

/// Payload submitted by a participant to add a song to the shared playlist.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubmitTrackRequest {
    /// Display name; when omitted the session's registered name is used.
    #[serde(default)]
    #[validate(custom(function = "validate_display_name"))]
    pub name: Option<String>,
    /// YouTube link (`watch?v=`, `youtu.be/` or `shorts/` form).
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub link: String,
}

/// Payload registering the display name used for later submissions.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterNameRequest {
    /// Display name, trimmed before it is stored.
    #[validate(custom(function = "validate_display_name"))]
    pub name: String,
}

/// Public projection of a submitted track.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct TrackSummary {
    /// Submitter's display name.
    pub user: String,
    /// YouTube video identifier.
    pub video_id: String,
    /// Link as submitted, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl From<&Track> for TrackSummary {
    fn from(track: &Track) -> Self {
        Self {
            user: track.user.clone(),
            video_id: track.video_id.clone(),
            link: track.link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: Option<&str>) -> SubmitTrackRequest {
        SubmitTrackRequest {
            name: name.map(str::to_owned),
            link: "https://youtu.be/abc123".into(),
        }
    }

    #[test]
    fn submitted_and_registered_names_share_one_rule() {
        let padded = format!("  {}  ", "a".repeat(64));
        assert!(submission(Some(&padded)).validate().is_ok());
        assert!(
            RegisterNameRequest { name: padded }
                .validate()
                .is_ok()
        );

        let too_long = "a".repeat(65);
        assert!(submission(Some(&too_long)).validate().is_err());
        assert!(
            RegisterNameRequest { name: too_long }
                .validate()
                .is_err()
        );

        assert!(submission(Some("   ")).validate().is_err());
        assert!(submission(None).validate().is_ok());
    }
}

use rand::{Rng, seq::SliceRandom};

use crate::dao::models::TrackEntity;

/// Runtime representation of a submitted song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Display name of the participant who submitted the track.
    pub user: String,
    /// YouTube video identifier.
    pub video_id: String,
    /// Link as originally submitted, when known.
    pub link: Option<String>,
}

impl Track {
    /// Build a track from a freshly validated submission.
    pub fn new(user: impl Into<String>, video_id: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            video_id: video_id.into(),
            link: Some(link.into()),
        }
    }
}

/// Copy `playlist` into a uniformly shuffled play order.
pub fn shuffled_order<R>(playlist: &[Track], rng: &mut R) -> Vec<Track>
where
    R: Rng + ?Sized,
{
    let mut order = playlist.to_vec();
    order.shuffle(rng);
    order
}

impl From<TrackEntity> for Track {
    fn from(value: TrackEntity) -> Self {
        Self {
            user: value.user,
            video_id: value.id,
            link: value.link,
        }
    }
}

impl From<Track> for TrackEntity {
    fn from(value: Track) -> Self {
        Self {
            user: value.user,
            id: value.video_id,
            link: value.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn shuffled_order_is_a_permutation() {
        let playlist = (0..20)
            .map(|i| Track::new(format!("user{i}"), format!("vid{i}"), format!("https://youtu.be/vid{i}")))
            .collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(7);

        let order = shuffled_order(&playlist, &mut rng);

        assert_eq!(order.len(), playlist.len());
        let mut sorted = order.iter().map(|t| t.video_id.clone()).collect::<Vec<_>>();
        let mut expected = playlist.iter().map(|t| t.video_id.clone()).collect::<Vec<_>>();
        sorted.sort();
        expected.sort();
        assert_eq!(sorted, expected);
    }
}

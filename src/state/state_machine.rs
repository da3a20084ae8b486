use thiserror::Error;

/// High-level phases a session can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Participants submit tracks; the host may start (or resume) the game.
    Collecting(CollectingStatus),
    /// The host is playing the shuffled order track by track.
    Playing,
    /// Every track of the shuffled order has been played.
    Finished,
}

/// Sub-state of the collecting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectingStatus {
    /// No game has been started since the last restart.
    Fresh,
    /// The host went back to the menu mid-game; order and index are kept for a resume.
    Paused,
}

impl GamePhase {
    /// Whether the game has been launched (playing or finished).
    pub fn game_started(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Finished)
    }
}

/// Events that can be applied to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Host launches a new game with a freshly shuffled order.
    StartGame,
    /// Host goes back to a paused game.
    ResumeGame,
    /// Host moves to the next track and at least one track remains.
    NextTrack,
    /// Host moves past the last track.
    Finish,
    /// Host leaves playback and returns to the menu.
    BackToMenu,
    /// Host closes a finished game and reopens submissions.
    Restart,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: GamePhase,
    /// The event that cannot be applied from this phase.
    pub event: SessionEvent,
}

/// Snapshot of the current state machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Current phase of the state machine.
    pub phase: GamePhase,
    /// Version number of the state machine (increments on each transition).
    pub version: usize,
}

/// State machine implementing the per-session game lifecycle.
#[derive(Debug, Clone)]
pub struct SessionStateMachine {
    phase: GamePhase,
    version: usize,
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self {
            phase: GamePhase::Collecting(CollectingStatus::Fresh),
            version: 0,
        }
    }
}

impl SessionStateMachine {
    /// Create a new state machine initialised in the fresh collecting state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Create a snapshot of the current state machine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            version: self.version,
        }
    }

    /// Validate `event` against the current phase without changing anything.
    pub fn check(&self, event: SessionEvent) -> Result<GamePhase, InvalidTransition> {
        self.compute_transition(event)
    }

    /// Apply `event`, returning the new phase.
    pub fn apply(&mut self, event: SessionEvent) -> Result<GamePhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(next)
    }

    fn compute_transition(&self, event: SessionEvent) -> Result<GamePhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (GamePhase::Collecting(_), SessionEvent::StartGame) => GamePhase::Playing,
            (GamePhase::Collecting(CollectingStatus::Paused), SessionEvent::ResumeGame) => {
                GamePhase::Playing
            }
            (GamePhase::Playing, SessionEvent::NextTrack) => GamePhase::Playing,
            (GamePhase::Playing, SessionEvent::Finish) => GamePhase::Finished,
            (GamePhase::Playing, SessionEvent::BackToMenu) => {
                GamePhase::Collecting(CollectingStatus::Paused)
            }
            (GamePhase::Finished, SessionEvent::Restart) => {
                GamePhase::Collecting(CollectingStatus::Fresh)
            }
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(sm: &mut SessionStateMachine, event: SessionEvent) -> GamePhase {
        sm.apply(event).unwrap()
    }

    #[test]
    fn initial_state_is_fresh_collecting() {
        let sm = SessionStateMachine::new();
        assert_eq!(sm.phase(), GamePhase::Collecting(CollectingStatus::Fresh));
        assert!(!sm.phase().game_started());
    }

    #[test]
    fn full_happy_path_through_game() {
        let mut sm = SessionStateMachine::new();

        assert_eq!(apply(&mut sm, SessionEvent::StartGame), GamePhase::Playing);
        assert_eq!(apply(&mut sm, SessionEvent::NextTrack), GamePhase::Playing);
        assert_eq!(apply(&mut sm, SessionEvent::Finish), GamePhase::Finished);
        assert!(sm.phase().game_started());
        assert_eq!(
            apply(&mut sm, SessionEvent::Restart),
            GamePhase::Collecting(CollectingStatus::Fresh)
        );
        assert_eq!(sm.snapshot().version, 4);
    }

    #[test]
    fn pause_and_resume() {
        let mut sm = SessionStateMachine::new();
        apply(&mut sm, SessionEvent::StartGame);

        assert_eq!(
            apply(&mut sm, SessionEvent::BackToMenu),
            GamePhase::Collecting(CollectingStatus::Paused)
        );
        assert_eq!(apply(&mut sm, SessionEvent::ResumeGame), GamePhase::Playing);
    }

    #[test]
    fn start_is_allowed_from_paused_menu() {
        let mut sm = SessionStateMachine::new();
        apply(&mut sm, SessionEvent::StartGame);
        apply(&mut sm, SessionEvent::BackToMenu);

        assert_eq!(apply(&mut sm, SessionEvent::StartGame), GamePhase::Playing);
    }

    #[test]
    fn resume_requires_paused_game() {
        let sm = SessionStateMachine::new();
        let err = sm.check(SessionEvent::ResumeGame).unwrap_err();
        assert_eq!(err.from, GamePhase::Collecting(CollectingStatus::Fresh));
        assert_eq!(err.event, SessionEvent::ResumeGame);
    }

    #[test]
    fn invalid_transition_leaves_state_untouched() {
        let mut sm = SessionStateMachine::new();
        apply(&mut sm, SessionEvent::StartGame);
        apply(&mut sm, SessionEvent::Finish);
        let before = sm.snapshot();

        assert!(sm.apply(SessionEvent::NextTrack).is_err());
        assert!(sm.apply(SessionEvent::BackToMenu).is_err());
        assert_eq!(sm.snapshot(), before);
    }
}

//! Game Stage Machine
//!
//! Tracks which part of a turn the match is in. `LookAround` is an
//! observation mode layered on top of the others: entering it remembers
//! the stage it interrupted and leaving it restores that stage.

/// Game stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStage {
    Break,
    PlaceCueBall,
    HitCueBall,
    ViewShot,
    LookAround,
}

/// Actions that trigger stage transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAction {
    /// Cue ball placed (or table left as is); line up a shot
    StartShot,
    /// Cue released
    ReleaseShot,
    /// Turn ended on a foul; the next player has ball in hand
    Foul,
    ToggleLookAround,
}

/// Result of a stage transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_stage: GameStage,
    pub to_stage: GameStage,
    pub action: StageAction,
}

/// Stage state machine with a one-deep stack for `LookAround`
#[derive(Debug, Clone)]
pub struct StageMachine {
    current: GameStage,
    previous: Option<GameStage>,
}

impl StageMachine {
    pub fn new() -> Self {
        Self {
            current: GameStage::Break,
            previous: None,
        }
    }

    pub fn stage(&self) -> GameStage {
        self.current
    }

    /// Stage that `LookAround` will return to
    pub fn previous(&self) -> Option<GameStage> {
        self.previous
    }

    pub fn can_transition(&self, action: StageAction) -> bool {
        self.next_stage(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: StageAction) -> TransitionResult {
        let from_stage = self.current;

        let Some(to_stage) = self.next_stage(action) else {
            return TransitionResult {
                success: false,
                from_stage,
                to_stage: from_stage,
                action,
            };
        };

        match (from_stage, to_stage) {
            (GameStage::LookAround, _) => self.previous = None,
            (_, GameStage::LookAround) => self.previous = Some(from_stage),
            _ => {}
        }
        self.current = to_stage;

        TransitionResult {
            success: true,
            from_stage,
            to_stage,
            action,
        }
    }

    /// Enter `LookAround` for good, e.g. once the match is decided
    pub fn park(&mut self) {
        if self.current != GameStage::LookAround {
            self.previous = Some(self.current);
            self.current = GameStage::LookAround;
        }
    }

    /// Get next stage for a given action (if valid)
    fn next_stage(&self, action: StageAction) -> Option<GameStage> {
        match (self.current, action) {
            (GameStage::LookAround, StageAction::ToggleLookAround) => self.previous,
            (GameStage::LookAround, _) => None,
            (_, StageAction::ToggleLookAround) => Some(GameStage::LookAround),

            (GameStage::Break, StageAction::StartShot) => Some(GameStage::HitCueBall),
            (GameStage::PlaceCueBall, StageAction::StartShot) => Some(GameStage::HitCueBall),
            (GameStage::ViewShot, StageAction::StartShot) => Some(GameStage::HitCueBall),

            (GameStage::HitCueBall, StageAction::ReleaseShot) => Some(GameStage::ViewShot),

            (GameStage::ViewShot, StageAction::Foul) => Some(GameStage::PlaceCueBall),

            // Invalid transition
            _ => None,
        }
    }

    /// Check if the cue ball may be moved by hand
    pub fn is_placing(&self) -> bool {
        matches!(self.current, GameStage::Break | GameStage::PlaceCueBall)
    }
}

impl Default for StageMachine {
    fn default() -> Self {
        Self::new()
    }
}

use std::fmt;

use serde::Serialize;

use crate::components::{BallKind, Suit};
use crate::params::Params;

/// Outcome of the cue ball striking another ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitStatus {
    Ok,
    FaultOpponent,
    FaultBlack,
}

impl HitStatus {
    pub fn is_fault(self) -> bool {
        !matches!(self, HitStatus::Ok)
    }
}

/// Outcome of a ball dropping into a pocket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotStatus {
    Ok,
    FaultCueBall,
    FaultOpponent,
    Win,
    Loss,
}

/// Cumulative per-match statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub faults: u32,
    pub own_balls_potted: u32,
    pub opponent_balls_potted: u32,
    pub cue_balls_potted: u32,
    pub own_balls_left: u8,
    pub best_combo: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            faults: 0,
            own_balls_potted: 0,
            opponent_balls_potted: 0,
            cue_balls_potted: 0,
            own_balls_left: Params::OBJECT_BALLS_PER_SUIT,
            best_combo: 0,
        }
    }
}

/// One of the two players of a match
///
/// Tracks the facts of the current turn (first ball struck, rail contact,
/// whether anything was hit or potted, fouls) on top of the running stats.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    suit: Option<Suit>,
    stats: PlayerStats,

    // Per-turn facts, cleared by `reset`
    first_hit: Option<BallKind>,
    hit_rail: bool,
    none_potted: bool,
    none_hit: bool,
    fault: bool,
    combo: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suit: None,
            stats: PlayerStats::default(),
            first_hit: None,
            hit_rail: false,
            none_potted: true,
            none_hit: true,
            fault: false,
            combo: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    pub fn set_suit(&mut self, suit: Suit) {
        self.suit = Some(suit);
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn first_hit(&self) -> Option<BallKind> {
        self.first_hit
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn none_potted(&self) -> bool {
        self.none_potted
    }

    pub fn none_hit(&self) -> bool {
        self.none_hit
    }

    pub fn fault(&self) -> bool {
        self.fault
    }

    pub fn has_hit_rail(&self) -> bool {
        self.hit_rail
    }

    /// Start of a new shot: bank the combo and clear the turn facts
    pub fn reset(&mut self) {
        self.stats.best_combo = self.stats.best_combo.max(self.combo);
        self.combo = 0;
        self.first_hit = None;
        self.hit_rail = false;
        self.none_potted = true;
        self.none_hit = true;
        self.fault = false;
    }

    pub fn add_fault(&mut self) {
        self.fault = true;
        self.stats.faults += 1;
    }

    pub fn own_ball_potted(&mut self) {
        self.stats.own_balls_left = self.stats.own_balls_left.saturating_sub(1);
    }

    pub fn hit_rail(&mut self) {
        self.hit_rail = true;
    }

    /// Record the cue ball striking `kind`
    ///
    /// Only the first ball struck decides legality. A rail touched before
    /// that first contact means nothing is recorded and the hit is
    /// accepted as-is.
    pub fn hit_ball(&mut self, kind: BallKind) -> HitStatus {
        self.none_hit = false;

        if self.first_hit.is_some() || self.hit_rail {
            return HitStatus::Ok;
        }
        self.first_hit = Some(kind);

        match kind {
            BallKind::Eight if self.stats.own_balls_left > 0 => {
                self.add_fault();
                HitStatus::FaultBlack
            }
            BallKind::Object(suit) if self.suit.is_some_and(|own| own != suit) => {
                self.add_fault();
                HitStatus::FaultOpponent
            }
            _ => HitStatus::Ok,
        }
    }

    /// Record `kind` dropping into a pocket during this player's shot
    ///
    /// The first object ball potted binds its suit to the player.
    pub fn pot_ball(&mut self, kind: BallKind) -> PotStatus {
        self.none_potted = false;

        match kind {
            BallKind::Eight => {
                if self.stats.own_balls_left > 0 {
                    PotStatus::Loss
                } else {
                    PotStatus::Win
                }
            }
            BallKind::Cue => {
                self.stats.cue_balls_potted += 1;
                self.add_fault();
                PotStatus::FaultCueBall
            }
            BallKind::Object(suit) => {
                let own = *self.suit.get_or_insert(suit);
                if own == suit {
                    self.stats.own_balls_potted += 1;
                    self.combo += 1;
                    PotStatus::Ok
                } else {
                    self.stats.opponent_balls_potted += 1;
                    self.add_fault();
                    PotStatus::FaultOpponent
                }
            }
        }
    }

    /// Multi-line stats report shown at the end of a match
    pub fn stats_report(&self) -> String {
        format!("{}'s stats:\n{}", self.name, self.stats)
    }
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "> Faults: {}", self.faults)?;
        writeln!(f, "> Owned balls potted: {}", self.own_balls_potted)?;
        writeln!(f, "> Opponent's balls potted: {}", self.opponent_balls_potted)?;
        writeln!(f, "> Cue balls potted: {}", self.cue_balls_potted)?;
        write!(f, "> Best combo: {}", self.best_combo)
    }
}

/// Both players plus whose turn it is
#[derive(Debug, Clone)]
pub struct Seats {
    players: [Player; 2],
    current: usize,
}

impl Seats {
    pub fn new(players: [Player; 2], current: usize) -> Self {
        Self {
            players,
            current: current % 2,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[1 - self.current]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player; 2] {
        &mut self.players
    }

    /// Hand the table to the other player and start their turn
    pub fn switch(&mut self) {
        self.current = 1 - self.current;
        self.players[self.current].reset();
    }

    /// Once either player owns a suit, the other gets the opposite one
    pub fn bind_suits(&mut self) {
        for seat in 0..2 {
            if let Some(suit) = self.players[seat].suit() {
                self.players[1 - seat].set_suit(suit.opposite());
            }
        }
    }
}

//! Rule engine
//!
//! Feeds the ordered contacts of a tick to the shooting player and decides,
//! once the table has settled, whether they keep the table.

use crate::player::{HitStatus, PotStatus, Seats};
use crate::systems::contacts::Contact;
use crate::{Announcements, BallKind, Events};

/// How a settled shot ends the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnVerdict {
    /// A foul was committed; the opponent gets ball in hand
    Foul,
    /// The cue ball touched nothing; counts as a foul
    NoneHit,
    /// Legal shot but nothing potted; the opponent plays on
    Miss,
    /// Something was potted legally; same player again
    Continue,
}

impl TurnVerdict {
    pub fn is_foul(self) -> bool {
        matches!(self, TurnVerdict::Foul | TurnVerdict::NoneHit)
    }

    pub fn passes_turn(self) -> bool {
        !matches!(self, TurnVerdict::Continue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeReason {
    PottedEightEarly,
    PottedCueWithEight,
    ClearedTable,
}

/// Final result of a match, by seat index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: usize,
    pub loser: usize,
    pub reason: OutcomeReason,
}

impl MatchOutcome {
    /// `shooter` is the seat whose shot decided the match
    pub fn decide(shooter: usize, reason: OutcomeReason) -> Self {
        let (winner, loser) = match reason {
            OutcomeReason::ClearedTable => (shooter, 1 - shooter),
            OutcomeReason::PottedEightEarly | OutcomeReason::PottedCueWithEight => {
                (1 - shooter, shooter)
            }
        };
        Self {
            winner,
            loser,
            reason,
        }
    }

    pub fn message(&self, seats: &Seats) -> String {
        let players = seats.players();
        match self.reason {
            OutcomeReason::PottedEightEarly => format!(
                "{} lost by potting the black ball too early.",
                players[self.loser].name()
            ),
            OutcomeReason::PottedCueWithEight => format!(
                "{} lost by potting the cue ball with the black ball.",
                players[self.loser].name()
            ),
            OutcomeReason::ClearedTable => format!("{} won.", players[self.winner].name()),
        }
    }
}

/// Apply this tick's contacts to the shooting player, in order
///
/// Returns the first terminal pot (`Win` or `Loss`) if the eight ball went
/// down. A `Loss` stops applying rules; the remaining contacts are still
/// recorded in `events`.
pub fn apply_contacts(
    contacts: &[Contact],
    seats: &mut Seats,
    announcements: &mut Announcements,
    events: &mut Events,
) -> Option<PotStatus> {
    let mut terminal = None;

    for (i, contact) in contacts.iter().enumerate() {
        events.contacts.push(*contact);

        match *contact {
            Contact::Pocketed { kind, pocket, .. } => {
                let status = seats.current_mut().pot_ball(kind);
                seats.bind_suits();
                if let BallKind::Object(suit) = kind {
                    if let Some(owner) = seats
                        .players_mut()
                        .iter_mut()
                        .find(|player| player.suit() == Some(suit))
                    {
                        owner.own_ball_potted();
                    }
                }
                log::info!(
                    "{} potted {:?} in {}: {:?}",
                    seats.current().name(),
                    kind,
                    pocket,
                    status
                );
                events.pots.push((kind, status));

                match status {
                    PotStatus::Ok => {}
                    PotStatus::FaultCueBall => announcements.push("Fault! Potted the cue ball."),
                    PotStatus::FaultOpponent => {
                        announcements.push("Fault! Potted opponent ball.")
                    }
                    PotStatus::Win => {
                        terminal.get_or_insert(PotStatus::Win);
                    }
                    PotStatus::Loss => {
                        events.contacts.extend_from_slice(&contacts[i + 1..]);
                        return Some(PotStatus::Loss);
                    }
                }
            }
            Contact::Rail { .. } => seats.current_mut().hit_rail(),
            Contact::Struck {
                kind: BallKind::Cue,
                other_kind,
                ..
            } => {
                let status = seats.current_mut().hit_ball(other_kind);
                events.hits.push((other_kind, status));
                if status.is_fault() {
                    announcements.push("Fault! You have to hit your own ball first.");
                }
            }
            Contact::Struck { .. } => {}
        }
    }

    terminal
}

/// Judge the settled shot for the current player
///
/// A foul already charged during the shot takes precedence. Otherwise a
/// shot that hit nothing is charged a foul here. A shot that continues
/// starts the player's next turn straight away.
pub fn evaluate_turn(seats: &mut Seats, announcements: &mut Announcements) -> TurnVerdict {
    let player = seats.current_mut();

    let verdict = if player.fault() {
        TurnVerdict::Foul
    } else if player.none_hit() {
        player.add_fault();
        announcements.push("Fault! No balls were hit.");
        TurnVerdict::NoneHit
    } else if player.none_potted() {
        TurnVerdict::Miss
    } else {
        player.reset();
        TurnVerdict::Continue
    };

    log::info!("{}'s shot: {:?}", seats.current().name(), verdict);
    verdict
}

use std::collections::VecDeque;

use crate::player::{HitStatus, PotStatus};
use crate::systems::contacts::Contact;
use crate::BallKind;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total elapsed time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 0.016,
            now: 0.0,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Coin toss for the opening break
    pub fn lag(&mut self) -> usize {
        use rand::Rng;
        usize::from(self.0.gen_bool(0.5))
    }
}

/// Events that occurred during this frame, in pipeline order
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub contacts: Vec<Contact>,
    pub pots: Vec<(BallKind, PotStatus)>,
    pub hits: Vec<(BallKind, HitStatus)>,
    pub turn_over: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
        self.pots.clear();
        self.hits.clear();
        self.turn_over = false;
    }
}

/// Player-facing messages (fouls, turn changes, results) for the host to show
#[derive(Debug, Clone, Default)]
pub struct Announcements {
    lines: VecDeque<String>,
}

impl Announcements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        self.lines.push_back(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Take every pending message, oldest first
    pub fn drain(&mut self) -> Vec<String> {
        self.lines.drain(..).collect()
    }
}

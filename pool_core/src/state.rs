//! Match state
//!
//! `MatchState` owns everything one match needs: the ball world, table,
//! players, stage machine and cue. The host drives it with `update(dt)` once
//! per frame and issues discrete commands between frames; it reads ball
//! views, events and announcements back for presentation.

use glam::Vec3;
use hecs::World;

use crate::player::{Player, PotStatus, Seats};
use crate::stage::{GameStage, StageAction, StageMachine, TransitionResult};
use crate::systems::{
    apply_contacts, evaluate_turn, gather_rack, move_balls, none_moving, nudge_cue_ball,
    resolve_contacts, MatchOutcome, Nudge, OutcomeReason,
};
use crate::table::{rack, Table};
use crate::{
    create_ball, Announcements, Ball, BallKind, Breaker, CommandError, Config, ConfigError, Cue,
    Events, GameRng, Label, RackSlot, Time,
};

/// Read-only snapshot of one ball for rendering
#[derive(Debug, Clone)]
pub struct BallView {
    pub label: String,
    pub slot: RackSlot,
    pub ball: Ball,
}

pub struct MatchState {
    world: World,
    time: Time,
    config: Config,
    table: Table,
    seats: Seats,
    stage: StageMachine,
    cue: Cue,
    events: Events,
    announcements: Announcements,
    shot_in_progress: bool,
    pending_win: Option<usize>,
    outcome: Option<MatchOutcome>,
}

impl MatchState {
    /// Rack the balls and pick the breaker
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let table = Table::new(&config);
        let mut world = World::new();
        for (slot, entry) in rack(&config).into_iter().enumerate() {
            create_ball(&mut world, &entry.label, slot as u8, entry.ball);
        }

        let breaker = match config.breaker {
            Breaker::First => 0,
            Breaker::Second => 1,
            Breaker::Lag => GameRng::new(config.seed).lag(),
        };
        let [first, second] = &config.player_names;
        let seats = Seats::new(
            [Player::new(first.as_str()), Player::new(second.as_str())],
            breaker,
        );

        let mut announcements = Announcements::new();
        announcements.push(format!("{} is breaking. Good luck!", seats.current().name()));

        Ok(Self {
            world,
            time: Time::default(),
            table,
            seats,
            stage: StageMachine::new(),
            cue: Cue::new(config.max_cue_offset, config.cue_charge_speed),
            events: Events::new(),
            announcements,
            shot_in_progress: false,
            pending_win: None,
            outcome: None,
            config,
        })
    }

    /// Advance the simulation one frame
    pub fn update(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.time.dt = dt.min(self.config.max_dt);
        self.time.now += self.time.dt;
        self.events.clear();

        // 1. Integrate
        move_balls(&mut self.world, &self.time, &self.config);

        // 2. Pockets, rails, balls in table order
        let contacts = resolve_contacts(&mut self.world, &self.table, &self.time);
        if self.outcome.is_some() {
            self.events.contacts = contacts;
            return;
        }

        // 3. Rules
        let shooter = self.seats.current_index();
        match apply_contacts(
            &contacts,
            &mut self.seats,
            &mut self.announcements,
            &mut self.events,
        ) {
            Some(PotStatus::Loss) => {
                self.finish(MatchOutcome::decide(shooter, OutcomeReason::PottedEightEarly));
                return;
            }
            Some(PotStatus::Win) => self.pending_win = Some(shooter),
            _ => {}
        }

        let settled = none_moving(&self.world);

        // 4. A cleared table only wins once the cue ball is known to stay up
        if let Some(shooter) = self.pending_win {
            if settled {
                let reason = if self.cue_ball().is_some_and(|cue| cue.is_potted()) {
                    OutcomeReason::PottedCueWithEight
                } else {
                    OutcomeReason::ClearedTable
                };
                self.finish(MatchOutcome::decide(shooter, reason));
            }
            return;
        }

        // 5. Ball in hand never leaves the cue ball down
        if self.stage.is_placing() && self.cue_ball().is_some_and(|cue| cue.is_potted()) {
            self.reset_cue_ball();
        }

        // 6. Judge the shot once everything has stopped
        if settled && self.shot_in_progress && self.stage.stage() == GameStage::ViewShot {
            self.end_turn();
        }
    }

    fn end_turn(&mut self) {
        self.shot_in_progress = false;
        self.events.turn_over = true;

        let verdict = evaluate_turn(&mut self.seats, &mut self.announcements);
        if verdict.passes_turn() {
            self.seats.switch();
            self.announcements
                .push(format!("{}'s turn.", self.seats.current().name()));
        }
        if verdict.is_foul() {
            self.stage.transition(StageAction::Foul);
            self.reset_cue_ball();
        }
    }

    fn finish(&mut self, outcome: MatchOutcome) {
        self.announcements.push(outcome.message(&self.seats));
        for player in self.seats.players() {
            self.announcements.push(player.stats_report());
        }

        self.outcome = Some(outcome);
        self.pending_win = None;
        self.shot_in_progress = false;
        self.events.turn_over = true;
        self.stage.park();
    }

    fn reset_cue_ball(&mut self) {
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            if ball.is_cue() {
                ball.reset();
            }
        }
    }

    fn reject(&self, err: CommandError) -> CommandError {
        log::debug!("Rejected command: {}", err);
        err
    }

    fn ensure_stage(&self, command: &'static str, stage: GameStage) -> Result<(), CommandError> {
        if self.outcome.is_some() {
            return Err(self.reject(CommandError::MatchOver));
        }
        if self.stage.stage() != stage {
            return Err(self.reject(CommandError::WrongStage {
                command,
                stage: self.stage.stage(),
            }));
        }
        Ok(())
    }

    /// Pick up the cue and line up a shot at the nearest legal target
    pub fn start_shot(&mut self) -> Result<TransitionResult, CommandError> {
        if self.outcome.is_some() {
            return Err(self.reject(CommandError::MatchOver));
        }
        if self.shot_in_progress {
            return Err(self.reject(CommandError::ShotInProgress));
        }
        if !none_moving(&self.world) {
            return Err(self.reject(CommandError::BallsMoving));
        }
        if !self.stage.can_transition(StageAction::StartShot) {
            return Err(self.reject(CommandError::WrongStage {
                command: "start_shot",
                stage: self.stage.stage(),
            }));
        }

        self.aim_at_nearest_target();
        self.cue.reset();
        Ok(self.stage.transition(StageAction::StartShot))
    }

    fn aim_at_nearest_target(&mut self) {
        let Some(cue_ball) = self.cue_ball() else {
            return;
        };
        let own = self.seats.current().suit();
        let from = cue_ball.center();
        let balls = gather_rack(&self.world);
        let live: Vec<&Ball> = balls
            .iter()
            .map(|(_e, _s, ball)| ball)
            .filter(|ball| !ball.is_potted())
            .collect();
        let by_distance = |a: &&Ball, b: &&Ball| {
            a.center()
                .distance_squared(from)
                .total_cmp(&b.center().distance_squared(from))
        };

        let target = live
            .iter()
            .copied()
            .filter(|ball| match ball.kind() {
                BallKind::Object(suit) => own.map_or(true, |own| own == suit),
                _ => false,
            })
            .min_by(by_distance)
            .or_else(|| {
                live.iter()
                    .copied()
                    .filter(|ball| ball.kind() == BallKind::Eight)
                    .min_by(by_distance)
            });

        if let Some(target) = target {
            self.cue.aim_at(cue_ball.center(), target.center());
        }
    }

    /// Turn the cue by `delta` radians
    pub fn aim(&mut self, delta: f32) -> Result<(), CommandError> {
        self.ensure_stage("aim", GameStage::HitCueBall)?;
        self.cue.rotate(delta);
        Ok(())
    }

    /// Build up power; returns the current cue offset
    pub fn charge_cue(&mut self, dt: f32) -> Result<f32, CommandError> {
        self.ensure_stage("charge_cue", GameStage::HitCueBall)?;
        self.cue.charge(dt);
        Ok(self.cue.offset())
    }

    /// Strike with the cue's current aim and charge
    pub fn release_shot(&mut self) -> Result<TransitionResult, CommandError> {
        self.ensure_stage("release_shot", GameStage::HitCueBall)?;
        let (direction, power) = (self.cue.direction(), self.cue.offset());
        Ok(self.fire(direction, power))
    }

    /// Strike along an explicit direction with an explicit power
    pub fn shoot(&mut self, direction: Vec3, power: f32) -> Result<TransitionResult, CommandError> {
        self.ensure_stage("shoot", GameStage::HitCueBall)?;
        let direction = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        Ok(self.fire(direction, power))
    }

    fn fire(&mut self, direction: Vec3, power: f32) -> TransitionResult {
        for (_entity, ball) in self.world.query_mut::<&mut Ball>() {
            if ball.is_cue() {
                ball.cue_hit(direction, power);
            }
        }
        log::info!(
            "{} shoots with power {:.2}",
            self.seats.current().name(),
            power
        );

        self.cue.reset();
        self.shot_in_progress = true;
        self.stage.transition(StageAction::ReleaseShot)
    }

    /// Move the cue ball by hand; only while breaking or with ball in hand
    pub fn nudge_cue_ball(&mut self, nudge: Nudge, dt: f32) -> Result<bool, CommandError> {
        if self.outcome.is_some() {
            return Err(self.reject(CommandError::MatchOver));
        }
        if !self.stage.is_placing() {
            return Err(self.reject(CommandError::WrongStage {
                command: "nudge_cue_ball",
                stage: self.stage.stage(),
            }));
        }

        let breaking = self.stage.stage() == GameStage::Break;
        Ok(nudge_cue_ball(
            &mut self.world,
            &self.table,
            &self.config,
            nudge,
            dt,
            breaking,
        ))
    }

    /// Enter or leave the free camera mode
    pub fn toggle_look_around(&mut self) -> Result<TransitionResult, CommandError> {
        if self.outcome.is_some() {
            return Err(self.reject(CommandError::MatchOver));
        }
        Ok(self.stage.transition(StageAction::ToggleLookAround))
    }

    /// Every ball in table order
    pub fn balls(&self) -> Vec<BallView> {
        let mut views: Vec<BallView> = self
            .world
            .query::<(&Label, &RackSlot, &Ball)>()
            .iter()
            .map(|(_e, (label, slot, ball))| BallView {
                label: label.0.clone(),
                slot: *slot,
                ball: *ball,
            })
            .collect();
        views.sort_by_key(|view| view.slot);
        views
    }

    pub fn cue_ball(&self) -> Option<Ball> {
        self.world
            .query::<&Ball>()
            .iter()
            .map(|(_e, ball)| *ball)
            .find(Ball::is_cue)
    }

    pub fn stage(&self) -> GameStage {
        self.stage.stage()
    }

    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    pub fn current_player(&self) -> &Player {
        self.seats.current()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn shot_in_progress(&self) -> bool {
        self.shot_in_progress
    }

    /// No ball on the table is moving
    pub fn is_settled(&self) -> bool {
        none_moving(&self.world)
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn announcements(&self) -> &Announcements {
        &self.announcements
    }

    pub fn drain_announcements(&mut self) -> Vec<String> {
        self.announcements.drain()
    }

    pub fn cue(&self) -> &Cue {
        &self.cue
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for setting up positions
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

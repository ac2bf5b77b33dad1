//! Per-tick contact pipeline.
//!
//! Balls are processed in `RackSlot` order (cue ball first). For each
//! ball still on the table the phases in `CHECK_ORDER` run in sequence,
//! and a ball that gets potted skips the remaining phases. The resulting
//! `Contact` list preserves that order so the rule engine sees events in
//! exactly the sequence they were detected.

use hecs::{Entity, World};

use crate::systems::collision::{bounce, check_collision};
use crate::table::{PocketKind, RailContact, Table};
use crate::{Ball, BallKind, RackSlot, Time};

/// One phase of the per-ball contact checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPhase {
    Pocket,
    Rail,
    Ball,
}

/// Pockets first, then rails, then other balls
pub const CHECK_ORDER: [CheckPhase; 3] = [CheckPhase::Pocket, CheckPhase::Rail, CheckPhase::Ball];

/// Something a ball touched this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Pocketed {
        slot: RackSlot,
        kind: BallKind,
        pocket: &'static str,
    },
    Rail {
        slot: RackSlot,
        kind: BallKind,
    },
    Struck {
        slot: RackSlot,
        kind: BallKind,
        other_slot: RackSlot,
        other_kind: BallKind,
    },
}

/// Collect balls sorted by table index
pub fn gather_rack(world: &World) -> Vec<(Entity, RackSlot, Ball)> {
    let mut rack: Vec<_> = world
        .query::<(&RackSlot, &Ball)>()
        .iter()
        .map(|(e, (slot, ball))| (e, *slot, *ball))
        .collect();
    rack.sort_by_key(|(_e, slot, _ball)| *slot);
    rack
}

/// Run the pipeline over every ball in the world
pub fn resolve_contacts(world: &mut World, table: &Table, time: &Time) -> Vec<Contact> {
    let rack = gather_rack(world);
    let mut balls: Vec<(RackSlot, Ball)> = rack.iter().map(|(_e, s, b)| (*s, *b)).collect();

    let contacts = resolve_ordered(&mut balls, table, time.dt);

    // Write back
    for ((entity, _slot, _old), (_s, ball)) in rack.iter().zip(balls) {
        if let Ok(mut stored) = world.get::<&mut Ball>(*entity) {
            *stored = ball;
        }
    }

    contacts
}

/// Pipeline over an already ordered slice
pub fn resolve_ordered(balls: &mut [(RackSlot, Ball)], table: &Table, dt: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for i in 0..balls.len() {
        for phase in CHECK_ORDER {
            if balls[i].1.is_potted() {
                break;
            }
            let contact = match phase {
                CheckPhase::Pocket => pocket_phase(&mut balls[i], table, dt),
                CheckPhase::Rail => rail_phase(&mut balls[i], table),
                CheckPhase::Ball => ball_phase(balls, i, dt),
            };
            contacts.extend(contact);
        }
    }

    contacts
}

fn pocket_phase(entry: &mut (RackSlot, Ball), table: &Table, dt: f32) -> Option<Contact> {
    let (slot, ball) = entry;
    if !ball.is_moving() {
        return None;
    }

    let pocket = table
        .pockets
        .iter()
        .find(|pocket| check_collision(ball, *pocket, dt))?;

    ball.set_potted();
    Some(Contact::Pocketed {
        slot: *slot,
        kind: ball.kind(),
        pocket: pocket.label,
    })
}

fn rail_phase(entry: &mut (RackSlot, Ball), table: &Table) -> Option<Contact> {
    let (slot, ball) = entry;

    match table.rail_contact(ball.center(), ball.radius())? {
        RailContact::EndRail(offset) => ball.reflect_z(offset),
        RailContact::SideRail(offset) => ball.reflect_x(offset),
        RailContact::PocketMouth => {
            let x = ball.center().x;
            let pocket = table
                .pockets
                .iter()
                .find(|p| p.kind == PocketKind::Middle && p.center.x.signum() == x.signum())
                .map_or("middle_pocket", |p| p.label);
            ball.set_potted();
            return Some(Contact::Pocketed {
                slot: *slot,
                kind: ball.kind(),
                pocket,
            });
        }
    }

    Some(Contact::Rail {
        slot: *slot,
        kind: ball.kind(),
    })
}

/// At most one resolved pair per moving ball per tick
fn ball_phase(balls: &mut [(RackSlot, Ball)], i: usize, dt: f32) -> Option<Contact> {
    if !balls[i].1.is_moving() {
        return None;
    }

    let j = (0..balls.len()).find(|&j| {
        j != i && !balls[j].1.is_potted() && check_collision(&balls[i].1, &balls[j].1, dt)
    })?;

    let (a, b) = pair_mut(balls, i, j);
    bounce(&mut a.1, &mut b.1);

    Some(Contact::Struck {
        slot: a.0,
        kind: a.1.kind(),
        other_slot: b.0,
        other_kind: b.1.kind(),
    })
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

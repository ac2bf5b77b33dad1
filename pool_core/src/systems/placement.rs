use hecs::World;

use crate::systems::collision::are_touching;
use crate::systems::contacts::gather_rack;
use crate::table::Table;
use crate::{Ball, Config};

/// Direction of a ball-in-hand nudge, as seen from the head of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

/// Slide the cue ball while it is in hand
///
/// The ball stays inside the rails and, when `behind_head_string` is set,
/// on the breaking side of the head string. A move that would leave it
/// touching another ball is undone. Returns whether the ball moved.
pub fn nudge_cue_ball(
    world: &mut World,
    table: &Table,
    config: &Config,
    nudge: Nudge,
    dt: f32,
    behind_head_string: bool,
) -> bool {
    let rack = gather_rack(world);
    let Some((cue_entity, _slot, mut cue)) =
        rack.iter().copied().find(|(_e, _s, ball)| ball.is_cue())
    else {
        return false;
    };
    if cue.is_potted() {
        return false;
    }

    let before = cue.center();
    let speed = config.placement_speed;
    match nudge {
        Nudge::Up => cue.move_up(dt, speed),
        Nudge::Down => cue.move_down(dt, speed),
        Nudge::Left => cue.move_left(dt, speed),
        Nudge::Right => cue.move_right(dt, speed),
    }

    let mut center = table.clamp_inside(cue.center(), cue.radius());
    if behind_head_string {
        center.z = center.z.max(table.head_string());
    }
    cue.set_center(center);

    let blocked = rack
        .iter()
        .any(|(e, _s, other)| *e != cue_entity && !other.is_potted() && are_touching(&cue, other));
    if blocked || center == before {
        return false;
    }

    match world.get::<&mut Ball>(cue_entity) {
        Ok(mut stored) => {
            stored.set_center(center);
            true
        }
        Err(_) => false,
    }
}

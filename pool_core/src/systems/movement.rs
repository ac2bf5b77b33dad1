use crate::{Ball, Config, Time};
use hecs::World;

/// Integrate every ball one tick
pub fn move_balls(world: &mut World, time: &Time, config: &Config) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.update(time.dt, config.damping, config.stop_speed);
    }
}

/// True once every ball on the table has come to rest
pub fn none_moving(world: &World) -> bool {
    world
        .query::<&Ball>()
        .iter()
        .all(|(_e, ball)| ball.is_potted() || !ball.is_moving())
}

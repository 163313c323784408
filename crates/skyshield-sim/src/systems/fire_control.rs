//! Fire control: turns a player aim point into an interceptor launch from
//! the nearest battery that can still shoot.

use hecs::{Entity, World};

use skyshield_core::components::{Battery, Health};
use skyshield_core::config::GameConfig;
use skyshield_core::types::Position;

use crate::world_setup;

/// Result of a successful launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Launch {
    pub interceptor_id: u32,
    pub battery_id: u32,
}

/// Clamp an aim point into the arena.
pub fn clamp_to_arena(x: f64, y: f64, config: &GameConfig) -> Position {
    Position::new(
        x.clamp(0.0, config.arena.width),
        y.clamp(0.0, config.arena.height),
    )
}

/// Pick the live battery with ammunition closest to `x` horizontally.
/// Ties go to the lowest battery id.
pub fn select_battery(world: &World, x: f64) -> Option<(Entity, u32, Position)> {
    world
        .query::<(&Battery, &Position, &Health)>()
        .iter()
        .filter(|(_, (battery, _, health))| !health.destroyed && battery.ammo > 0)
        .map(|(entity, (battery, pos, _))| (entity, battery.id, *pos))
        .min_by(|a, b| {
            let da = (a.2.x - x).abs();
            let db = (b.2.x - x).abs();
            da.total_cmp(&db).then(a.1.cmp(&b.1))
        })
}

/// Launch one interceptor at `target`. Returns `None` when no battery
/// can fire; ammunition is only spent on a successful launch.
pub fn fire(
    world: &mut World,
    config: &GameConfig,
    next_id: &mut u32,
    target: Position,
) -> Option<Launch> {
    let (entity, battery_id, origin) = select_battery(world, target.x)?;
    {
        let mut battery = world.get::<&mut Battery>(entity).ok()?;
        battery.ammo -= 1;
    }
    let interceptor_id =
        world_setup::spawn_interceptor(world, config, next_id, origin, target, battery_id);
    Some(Launch {
        interceptor_id,
        battery_id,
    })
}

//! Cleanup system: removes entities that have left the arena.

use hecs::{Entity, World};

use skyshield_core::components::{Aircraft, Debris, Health};
use skyshield_core::config::GameConfig;
use skyshield_core::enums::FlightDirection;
use skyshield_core::types::Position;

/// Despawn debris beyond the margin, fallen aircraft below the bottom edge,
/// and cruising aircraft past the exit margin on the side they fly toward.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, config: &GameConfig, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    let width = config.arena.width;
    let height = config.arena.height;
    let margin = config.debris.margin;

    for (entity, (_debris, pos)) in world.query_mut::<(&Debris, &Position)>() {
        if pos.x < -margin || pos.x > width + margin || pos.y < -margin || pos.y > height + margin
        {
            despawn_buffer.push(entity);
        }
    }

    let exit = config.aircraft.exit_margin;
    for (entity, (aircraft, pos, health)) in world.query_mut::<(&Aircraft, &Position, &Health)>() {
        let gone = if health.destroyed {
            pos.y > height
        } else {
            match aircraft.direction {
                FlightDirection::East => pos.x > width + exit,
                FlightDirection::West => pos.x < -exit,
            }
        };
        if gone {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

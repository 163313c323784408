//! Battery formation controller.
//!
//! Cycles the battery line through Line, V and Arc shapes on a fixed
//! period and eases every live battery toward its slot in the current shape.

use hecs::World;
use serde::Serialize;

use skyshield_core::components::{Battery, Health};
use skyshield_core::config::FormationConfig;
use skyshield_core::enums::FormationKind;
use skyshield_core::types::Position;

/// Formation cycle state owned by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FormationState {
    /// Ticks run in the current level.
    pub ticks: u64,
    pub current: FormationKind,
}

/// Advance the cycle and move batteries. Returns the new shape when it changed.
pub fn run(
    world: &mut World,
    state: &mut FormationState,
    config: &FormationConfig,
    slot_count: usize,
) -> Option<FormationKind> {
    state.ticks += 1;
    let changed = if config.period_ticks > 0 && state.ticks % config.period_ticks == 0 {
        state.current = state.current.next();
        Some(state.current)
    } else {
        None
    };

    let mid = slot_count.saturating_sub(1) as f64 / 2.0;
    for (_entity, (battery, pos, health)) in
        world.query_mut::<(&mut Battery, &mut Position, &Health)>()
    {
        if health.destroyed {
            continue;
        }
        battery.target = slot_target(state.current, battery.slot, battery.base, mid, config);
        pos.x += (battery.target.x - pos.x) * config.smoothing;
        pos.y += (battery.target.y - pos.y) * config.smoothing;
    }

    changed
}

/// Target position of slot `slot` in `kind`, raised above its base.
/// `mid` is the centre slot index; shapes are symmetric around it.
pub fn slot_target(
    kind: FormationKind,
    slot: usize,
    base: Position,
    mid: f64,
    config: &FormationConfig,
) -> Position {
    let offset = slot as f64 - mid;
    let lift = match kind {
        FormationKind::Line => 0.0,
        FormationKind::VShape => offset.abs() * config.v_step,
        FormationKind::Arc => offset * offset * config.arc_step,
    };
    Position::new(base.x, base.y - lift)
}

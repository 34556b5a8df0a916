//! Player-gate resolution
//!
//! At most one gate effect per frame. The applied gate and every sibling
//! sharing its pair id are removed before anything else can see them, so a
//! pair can never be applied twice.

use serde::{Deserialize, Serialize};

use super::collision::leftmost_overlap;
use super::stat::StatChange;
use super::state::{GameEvent, Gate, PlayerState};

/// Outcome of the frame's gate contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResolution {
    pub applied: Gate,
    pub change: Option<StatChange>,
    /// Siblings removed without effect
    pub discarded: Vec<Gate>,
}

/// Apply the gate the player is touching, if any, and consume its pair
///
/// With several gates touched, the leftmost (smallest `x`) wins.
pub fn resolve_gates(
    player: &mut PlayerState,
    gates: &mut Vec<Gate>,
    events: &mut Vec<GameEvent>,
) -> Option<GateResolution> {
    let index = leftmost_overlap(&player.rect, gates.iter().map(|g| &g.rect))?;
    let applied = gates.remove(index);
    let change = player.apply_effect(&applied.effect);

    let mut discarded = Vec::new();
    let mut i = 0;
    while i < gates.len() {
        if gates[i].pair_id == applied.pair_id {
            discarded.push(gates.remove(i));
        } else {
            i += 1;
        }
    }

    log::debug!(
        "Gate {} ({}) applied: {:?}, {} sibling(s) discarded",
        applied.id,
        applied.effect,
        change,
        discarded.len()
    );

    events.push(GameEvent::GateApplied {
        id: applied.id,
        pair_id: applied.pair_id,
        effect: applied.effect,
        change,
        beneficial: applied.effect.is_beneficial(),
    });
    events.extend(discarded.iter().map(|g| GameEvent::GateDiscarded {
        id: g.id,
        pair_id: g.pair_id,
    }));

    Some(GateResolution {
        applied,
        change,
        discarded,
    })
}

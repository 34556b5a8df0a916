//! Gate and enemy spawners
//!
//! Each spawner owns its timer; the frame loop only feeds it elapsed time.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::stat::Operator;
use super::state::{BoostKind, Enemy, EntityIds, GameEvent, Gate, GateEffect};
use super::timer::SpawnTimer;
use crate::consts::*;
use crate::error::SettingsError;

/// How a spawn event lays out its gates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateLayout {
    /// One arithmetic gate per field half, falling down the lanes
    Lanes {
        /// Weighted pool, one entry per weight unit
        operators: Vec<Operator>,
        /// Inclusive operand range for `+` and `-`
        additive: (u64, u64),
        /// Inclusive operand range for `x` and `/`
        scaling: (u64, u64),
    },
    /// A row of boost walls sliding in from the right; replaces the previous row
    Walls,
}

/// Spawns a gate pair every interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSpawner {
    timer: SpawnTimer,
    layout: GateLayout,
    pairs_spawned: u32,
}

impl GateSpawner {
    pub fn lanes(
        interval_ms: f32,
        operators: Vec<Operator>,
        additive: (u64, u64),
        scaling: (u64, u64),
    ) -> Result<Self, SettingsError> {
        if operators.is_empty() {
            return Err(SettingsError::EmptyOperatorPool);
        }
        if scaling.0 == 0 || scaling.0 > scaling.1 {
            return Err(SettingsError::InvalidRange {
                name: "scaling_operands",
                min: scaling.0,
                max: scaling.1,
            });
        }
        if additive.0 > additive.1 {
            return Err(SettingsError::InvalidRange {
                name: "additive_operands",
                min: additive.0,
                max: additive.1,
            });
        }
        Ok(Self {
            timer: SpawnTimer::new("gate_interval_ms", interval_ms)?,
            layout: GateLayout::Lanes {
                operators,
                additive,
                scaling,
            },
            pairs_spawned: 0,
        })
    }

    pub fn walls(interval_ms: f32) -> Result<Self, SettingsError> {
        Ok(Self {
            timer: SpawnTimer::new("wall_interval_ms", interval_ms)?,
            layout: GateLayout::Walls,
            pairs_spawned: 0,
        })
    }

    pub fn layout(&self) -> &GateLayout {
        &self.layout
    }

    pub fn pairs_spawned(&self) -> u32 {
        self.pairs_spawned
    }

    /// Advance the timer and spawn a pair when it fires
    pub fn tick(
        &mut self,
        dt_ms: f32,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
        field: &Rect,
        gates: &mut Vec<Gate>,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.timer.tick(dt_ms) {
            return;
        }

        let pair_id = rng.random_range(0..=MAX_PAIR_ID);
        let spawned = match &self.layout {
            GateLayout::Lanes {
                operators,
                additive,
                scaling,
            } => {
                let width = field.w / 2.0 - 2.0 * GATE_EDGE_MARGIN;
                let lefts = [
                    field.left() + GATE_EDGE_MARGIN,
                    field.center().x + GATE_EDGE_MARGIN,
                ];
                lefts
                    .into_iter()
                    .map(|x| Gate {
                        id: ids.next_id(),
                        pair_id,
                        rect: Rect::new(x, field.top() + GATE_SPAWN_Y, width, GATE_HEIGHT),
                        velocity: Vec2::new(0.0, GATE_FALL_SPEED),
                        effect: roll_arithmetic(rng, operators, *additive, *scaling),
                    })
                    .collect::<Vec<_>>()
            }
            GateLayout::Walls => {
                for old in gates.drain(..) {
                    events.push(GameEvent::GateExpired { id: old.id });
                }
                WALL_ROWS
                    .into_iter()
                    .map(|row| Gate {
                        id: ids.next_id(),
                        pair_id,
                        rect: Rect::new(
                            field.right(),
                            field.top() + row - WALL_HEIGHT / 2.0,
                            WALL_WIDTH,
                            WALL_HEIGHT,
                        ),
                        velocity: Vec2::new(-WALL_SPEED, 0.0),
                        effect: GateEffect::Boost(
                            BoostKind::ALL[rng.random_range(0..BoostKind::ALL.len())],
                        ),
                    })
                    .collect::<Vec<_>>()
            }
        };

        self.pairs_spawned += 1;
        log::debug!(
            "Gate pair {} (#{}): {}",
            pair_id,
            self.pairs_spawned,
            spawned
                .iter()
                .map(|g| g.effect.to_string())
                .collect::<Vec<_>>()
                .join(" | ")
        );

        for gate in spawned {
            events.push(GameEvent::GateSpawned {
                id: gate.id,
                pair_id: gate.pair_id,
                effect: gate.effect,
                rect: gate.rect,
            });
            gates.push(gate);
        }
    }
}

/// Roll one lane gate: weighted operator, then an operand for its class
fn roll_arithmetic(
    rng: &mut Pcg32,
    operators: &[Operator],
    additive: (u64, u64),
    scaling: (u64, u64),
) -> GateEffect {
    let op = operators[rng.random_range(0..operators.len())];
    let (min, max) = if op.is_scaling() { scaling } else { additive };
    GateEffect::Arithmetic {
        op,
        operand: rng.random_range(min..=max),
    }
}

/// Move every gate one frame and drop those that left the field
pub fn advance_gates(gates: &mut Vec<Gate>, field: &Rect, events: &mut Vec<GameEvent>) {
    gates.retain_mut(|gate| {
        gate.rect.translate(gate.velocity);
        if gate.rect.is_past(field, gate.velocity) {
            events.push(GameEvent::GateExpired { id: gate.id });
            false
        } else {
            true
        }
    });
}

/// Spawns enemies every interval, harder every few spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawner {
    timer: SpawnTimer,
    spawned: u32,
}

impl EnemySpawner {
    pub fn new(interval_ms: f32) -> Result<Self, SettingsError> {
        Ok(Self {
            timer: SpawnTimer::new("enemy_interval_ms", interval_ms)?,
            spawned: 0,
        })
    }

    /// Enemies spawned so far
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Difficulty level of the next enemy
    pub fn next_level(&self) -> u32 {
        self.spawned / ENEMIES_PER_LEVEL
    }

    pub fn max_hp_for(level: u32) -> i32 {
        let level = i32::try_from(level).unwrap_or(i32::MAX);
        ENEMY_BASE_HP.saturating_add(level.saturating_mul(ENEMY_HP_PER_LEVEL))
    }

    /// Advance the timer and spawn one enemy when it fires
    pub fn tick(
        &mut self,
        dt_ms: f32,
        rng: &mut Pcg32,
        ids: &mut EntityIds,
        field: &Rect,
        enemies: &mut Vec<Enemy>,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.timer.tick(dt_ms) {
            return;
        }

        let level = self.next_level();
        let enemy = spawn_enemy(level, rng, ids.next_id(), field);
        self.spawned += 1;

        if level > 0 && self.spawned % ENEMIES_PER_LEVEL == 1 {
            log::info!("Enemy difficulty level {level} (max hp {})", enemy.max_hp);
        }
        events.push(GameEvent::EnemySpawned {
            id: enemy.id,
            level,
            max_hp: enemy.max_hp,
            rect: enemy.rect,
        });
        enemies.push(enemy);
    }
}

fn spawn_enemy(level: u32, rng: &mut Pcg32, id: u32, field: &Rect) -> Enemy {
    let (lo, hi) = (
        ENEMY_SPAWN_MARGIN,
        (field.h as u32).saturating_sub(ENEMY_SPAWN_MARGIN),
    );
    // Fields too short for the margin spawn on the centre line
    let y = if lo <= hi {
        rng.random_range(lo..=hi) as f32
    } else {
        field.h / 2.0
    };
    let center = Vec2::new(field.right() + ENEMY_SPAWN_OFFSET, field.top() + y);

    let (slow, fast) = ENEMY_SPEED_RANGE;
    let speed = rng.random_range(slow..=fast) + level / LEVELS_PER_SPEED_STEP;

    let max_hp = EnemySpawner::max_hp_for(level);
    Enemy {
        id,
        rect: Rect::from_center(center, ENEMY_WIDTH, ENEMY_HEIGHT),
        hp: max_hp,
        max_hp,
        speed: speed as f32,
        level,
    }
}

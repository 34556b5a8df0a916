//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one rendered frame.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::combat::{advance_enemies, resolve_projectile_hits};
use super::projectile::update_projectiles;
use super::rect::Rect;
use super::resolve::resolve_gates;
use super::spawn::advance_gates;
use super::stat::StatKind;
use super::state::{GameEvent, GamePhase, GameState, Mood, PlayerStats, Weapon};

/// Held directions for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// What the renderer should draw for an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sprite {
    Player { mood: Mood },
    Gate { label: String, beneficial: bool },
    Enemy { health_ratio: f32 },
    Projectile { weapon: Weapon, orbiting: bool },
}

/// One entity to draw this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    /// Entity id (0 for the player)
    pub id: u32,
    pub rect: Rect,
    pub sprite: Sprite,
}

/// HUD numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatSummary {
    Count(u64),
    Power(u64),
    Combat { hp: u32, sword: u32, arrow: u32 },
}

impl fmt::Display for StatSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatSummary::Count(n) => write!(f, "Count: {n}"),
            StatSummary::Power(n) => write!(f, "Power: {n}"),
            StatSummary::Combat { hp, sword, arrow } => {
                write!(f, "HP:{hp}  Sword:{sword}  Arrow:{arrow}")
            }
        }
    }
}

/// Everything the frame loop needs after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Gates, projectiles, enemies, then the player on top
    pub drawables: Vec<Drawable>,
    pub summary: StatSummary,
    pub events: Vec<GameEvent>,
    /// The run is over; stop calling `tick`
    pub terminal: bool,
}

/// Advance the game state by one frame of `dt_ms` milliseconds
///
/// Spawn timers use `dt_ms`; movement is per frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) -> FrameResult {
    let mut events = Vec::new();

    if state.phase == GamePhase::Defeated {
        return state.frame_result(events);
    }

    state.frame += 1;
    state.elapsed_ms += f64::from(dt_ms);

    // Spawners
    state.gate_spawner.tick(
        dt_ms,
        &mut state.rng,
        &mut state.ids,
        &state.field,
        &mut state.gates,
        &mut events,
    );
    if let Some(spawner) = state.enemy_spawner.as_mut() {
        spawner.tick(
            dt_ms,
            &mut state.rng,
            &mut state.ids,
            &state.field,
            &mut state.enemies,
            &mut events,
        );
    }
    state.armory.tick(
        dt_ms,
        &mut state.ids,
        &state.player,
        &mut state.projectiles,
        &mut events,
    );

    // Movement and gates
    state.player.drive(input, &state.field);
    advance_gates(&mut state.gates, &state.field, &mut events);
    resolve_gates(&mut state.player, &mut state.gates, &mut events);

    // Projectiles and enemies
    let anchor = state.player.rect.center();
    update_projectiles(
        &mut state.projectiles,
        &state.enemies,
        anchor,
        &state.field,
        &mut events,
    );

    let player_box = state.player.rect;
    if let PlayerStats::Combat(stats) = &mut state.player.stats {
        advance_enemies(
            &mut state.enemies,
            &player_box,
            stats,
            &state.field,
            &mut events,
        );
        resolve_projectile_hits(
            &mut state.projectiles,
            &mut state.enemies,
            stats,
            &mut events,
        );
    }

    if state.player.is_defeated() {
        state.phase = GamePhase::Defeated;
        log::info!(
            "Defeated at frame {} ({:.1}s): {}",
            state.frame,
            state.elapsed_ms / 1000.0,
            state.summary()
        );
        events.push(GameEvent::Defeated { frame: state.frame });
    }

    state.frame_result(events)
}

impl GameState {
    /// Current HUD numbers
    pub fn summary(&self) -> StatSummary {
        match &self.player.stats {
            PlayerStats::Tracked(tracker) => match tracker.kind() {
                StatKind::Count => StatSummary::Count(tracker.value()),
                StatKind::Power => StatSummary::Power(tracker.value()),
            },
            PlayerStats::Combat(stats) => StatSummary::Combat {
                hp: stats.hp,
                sword: stats.sword_atk,
                arrow: stats.arrow_atk,
            },
        }
    }

    /// Everything on screen, back to front
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut out =
            Vec::with_capacity(self.gates.len() + self.projectiles.len() + self.enemies.len() + 1);
        out.extend(self.gates.iter().map(|g| Drawable {
            id: g.id,
            rect: g.rect,
            sprite: Sprite::Gate {
                label: g.effect.to_string(),
                beneficial: g.effect.is_beneficial(),
            },
        }));
        out.extend(self.projectiles.iter().map(|p| Drawable {
            id: p.id,
            rect: p.rect,
            sprite: Sprite::Projectile {
                weapon: p.weapon,
                orbiting: p.orbiting,
            },
        }));
        out.extend(self.enemies.iter().map(|e| Drawable {
            id: e.id,
            rect: e.rect,
            sprite: Sprite::Enemy {
                health_ratio: e.health_ratio(),
            },
        }));
        out.push(Drawable {
            id: 0,
            rect: self.player.rect,
            sprite: Sprite::Player {
                mood: self.player.mood,
            },
        });
        out
    }

    fn frame_result(&self, events: Vec<GameEvent>) -> FrameResult {
        FrameResult {
            drawables: self.drawables(),
            summary: self.summary(),
            events,
            terminal: self.is_terminal(),
        }
    }
}

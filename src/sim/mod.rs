//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order, order-preserving removal)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combat;
pub mod projectile;
pub mod rect;
pub mod resolve;
pub mod spawn;
pub mod stat;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{leftmost_overlap, nearest_to};
pub use combat::{advance_enemies, resolve_projectile_hits};
pub use projectile::{Armory, Launcher, update_projectiles};
pub use rect::Rect;
pub use resolve::{GateResolution, resolve_gates};
pub use spawn::{EnemySpawner, GateLayout, GateSpawner};
pub use stat::{Operator, StatChange, StatKind, StatTracker};
pub use state::{
    Axis, BoostKind, CombatStats, Enemy, GameEvent, GamePhase, GameState, Gate, GateEffect, Mood,
    PlayerState, PlayerStats, Projectile, ProjectileKind, Weapon,
};
pub use tick::{Drawable, FrameResult, Sprite, StatSummary, TickInput, tick};
pub use timer::SpawnTimer;

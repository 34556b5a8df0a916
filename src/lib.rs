//! Gate Runner - deterministic core of a gate-and-wave arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, gate resolution, combat)
//! - `settings`: Validated, serializable run configuration
//! - `error`: Configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::{Settings, Variant};

/// Game configuration constants
///
/// Speeds are pixels per frame; intervals are milliseconds.
pub mod consts {
    /// Frame length the movement speeds are tuned for (60 FPS)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Gate variants field
    pub const LANE_FIELD_WIDTH: f32 = 600.0;
    pub const LANE_FIELD_HEIGHT: f32 = 600.0;

    /// Combat variant field
    pub const ARENA_FIELD_WIDTH: f32 = 1100.0;
    pub const ARENA_FIELD_HEIGHT: f32 = 650.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 8.0;
    pub const LANE_PLAYER_SIZE: f32 = 50.0;
    /// Gap between the lane player's bottom edge and the field bottom
    pub const LANE_PLAYER_BOTTOM_GAP: f32 = 50.0;
    pub const ARENA_PLAYER_SIZE: f32 = 72.0;
    pub const ARENA_PLAYER_X: f32 = 200.0;
    pub const ARENA_START_HP: u32 = 5;

    /// Lane gates
    pub const GATE_INTERVAL_MS: f32 = 1500.0;
    pub const GATE_HEIGHT: f32 = 80.0;
    pub const GATE_EDGE_MARGIN: f32 = 5.0;
    pub const GATE_SPAWN_Y: f32 = -100.0;
    pub const GATE_FALL_SPEED: f32 = 5.0;
    /// Weighted operator pool: `+` 3x, `-` 2x, `x` and `/` 1x
    pub const OPERATOR_POOL: &str = "+++--x/";
    pub const ADDITIVE_OPERANDS: (u64, u64) = (5, 50);
    pub const SCALING_OPERANDS: (u64, u64) = (2, 5);
    pub const MAX_PAIR_ID: u32 = 999_999;

    /// Arena walls
    pub const WALL_INTERVAL_MS: f32 = 3000.0;
    pub const WALL_WIDTH: f32 = 80.0;
    pub const WALL_HEIGHT: f32 = 150.0;
    pub const WALL_SPEED: f32 = 6.0;
    pub const WALL_ROWS: [f32; 2] = [250.0, 450.0];

    /// Enemies
    pub const ENEMY_INTERVAL_MS: f32 = 1200.0;
    pub const ENEMY_WIDTH: f32 = 60.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;
    pub const ENEMY_BASE_HP: i32 = 30;
    pub const ENEMY_HP_PER_LEVEL: i32 = 5;
    pub const ENEMY_SPEED_RANGE: (u32, u32) = (3, 6);
    /// Spawns per difficulty level
    pub const ENEMIES_PER_LEVEL: u32 = 5;
    /// Levels per extra pixel of speed
    pub const LEVELS_PER_SPEED_STEP: u32 = 3;
    /// Enemies spawn this far right of the field edge (centre x)
    pub const ENEMY_SPAWN_OFFSET: f32 = 50.0;
    /// Vertical margin kept free of enemy spawns
    pub const ENEMY_SPAWN_MARGIN: u32 = 100;

    /// Projectiles
    pub const SWORD_INTERVAL_MS: f32 = 1500.0;
    pub const ARROW_INTERVAL_MS: f32 = 500.0;
    pub const BOLT_INTERVAL_MS: f32 = 160.0;
    pub const SWORD_SPEED: f32 = 6.0;
    pub const ARROW_SPEED: f32 = 14.0;
    pub const BOLT_SPEED: f32 = 10.0;
    pub const SWORD_SIZE: f32 = 24.0;
    pub const ARROW_SIZE: (f32, f32) = (32.0, 10.0);
    pub const BOLT_SIZE: (f32, f32) = (10.0, 20.0);
    pub const ORBIT_RADIUS: f32 = 50.0;
    /// Orbit angle advance per frame (degrees)
    pub const ORBIT_STEP_DEG: f32 = 4.0;
    /// Angular spacing of freshly spawned swords (degrees)
    pub const ORBIT_SLOT_DEG: f32 = 60.0;
}

/// Point on a circle of `radius` around `center` at `degrees`
#[inline]
pub fn orbit_point(center: glam::Vec2, radius: f32, degrees: f32) -> glam::Vec2 {
    let rad = degrees.to_radians();
    center + glam::Vec2::new(rad.cos(), rad.sin()) * radius
}

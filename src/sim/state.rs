//! Game state and core simulation types
//!
//! Entity lists are plain `Vec`s kept in spawn order; removal always
//! preserves the order of the survivors.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::projectile::{Armory, Launcher};
use super::rect::Rect;
use super::spawn::{EnemySpawner, GateSpawner};
use super::stat::{Operator, StatChange, StatKind, StatTracker};
use super::tick::TickInput;
use crate::consts::*;
use crate::error::SettingsError;
use crate::settings::{Settings, Variant};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Terminal: no further updates happen
    Defeated,
}

/// Direction the player may move in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Left/right (gate variants)
    Horizontal,
    /// Up/down (combat variant)
    Vertical,
}

/// Expression the renderer shows on the player after a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    Neutral,
    Cheerful,
    Gloomy,
}

/// Named wall effects (combat variant), each worth +1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostKind {
    Hp,
    Sword,
    Arrow,
}

impl BoostKind {
    pub const ALL: [BoostKind; 3] = [BoostKind::Hp, BoostKind::Sword, BoostKind::Arrow];
}

/// What touching a gate does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateEffect {
    Arithmetic { op: Operator, operand: u64 },
    Boost(BoostKind),
}

impl GateEffect {
    /// Blue (helpful) or red (harmful) gate
    pub fn is_beneficial(&self) -> bool {
        match self {
            GateEffect::Arithmetic { op, .. } => op.is_beneficial(),
            GateEffect::Boost(_) => true,
        }
    }
}

impl fmt::Display for GateEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateEffect::Arithmetic { op, operand } => write!(f, "{op}{operand}"),
            GateEffect::Boost(BoostKind::Hp) => write!(f, "HP +1"),
            GateEffect::Boost(BoostKind::Sword) => write!(f, "Sword +1"),
            GateEffect::Boost(BoostKind::Arrow) => write!(f, "Arrow +1"),
        }
    }
}

/// A gate (falling lane gate or sliding wall)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub id: u32,
    /// Shared by every gate spawned in the same event
    pub pair_id: u32,
    pub rect: Rect,
    /// Pixels per frame
    pub velocity: Vec2,
    pub effect: GateEffect,
}

/// An enemy walking toward the player's side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub hp: i32,
    pub max_hp: i32,
    /// Pixels per frame, leftward
    pub speed: f32,
    pub level: u32,
}

impl Enemy {
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(-self.speed, 0.0)
    }

    pub fn advance(&mut self) {
        self.rect.translate(self.velocity());
    }

    /// Remaining health in [0, 1] for the health bar
    pub fn health_ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

/// Weapon a projectile came from (picks its sprite)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    /// Seeking blade, orbits the player while no enemy is alive
    Sword,
    /// Piercing arrow fired toward the enemies
    Arrow,
    /// Upward shot in the power variant
    Bolt,
}

/// Movement rule of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Homes on the nearest enemy, otherwise orbits the player
    Seeking {
        /// Orbit angle in degrees
        angle_deg: f32,
        radius: f32,
        /// Homing step, pixels per frame
        speed: f32,
    },
    /// Constant velocity until off-field
    Linear { velocity: Vec2 },
}

/// A player-owned projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub weapon: Weapon,
    pub kind: ProjectileKind,
    pub rect: Rect,
    /// Last update circled the player instead of homing
    pub orbiting: bool,
}

impl Projectile {
    /// Seeking kinds are used up by their first hit; linear ones pierce
    pub fn is_single_use(&self) -> bool {
        matches!(self.kind, ProjectileKind::Seeking { .. })
    }

    /// Damage against an enemy, read from the player's current levels
    pub fn damage(&self, stats: &CombatStats) -> i32 {
        let level = match self.kind {
            ProjectileKind::Seeking { .. } => stats.sword_atk,
            ProjectileKind::Linear { .. } => stats.arrow_atk.max(1),
        };
        i32::try_from(level).unwrap_or(i32::MAX)
    }
}

/// Player health and attack levels (combat variant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub hp: u32,
    pub sword_atk: u32,
    pub arrow_atk: u32,
}

impl CombatStats {
    pub fn new(hp: u32) -> Self {
        Self {
            hp,
            sword_atk: 1,
            arrow_atk: 1,
        }
    }

    pub fn boost(&mut self, kind: BoostKind) -> StatChange {
        let slot = match kind {
            BoostKind::Hp => &mut self.hp,
            BoostKind::Sword => &mut self.sword_atk,
            BoostKind::Arrow => &mut self.arrow_atk,
        };
        let before = *slot;
        *slot = before.saturating_add(1);
        StatChange {
            before: before as u64,
            after: *slot as u64,
        }
    }

    /// Lose one HP to an enemy contact; returns the HP left
    pub fn take_hit(&mut self) -> u32 {
        self.hp = self.hp.saturating_sub(1);
        self.hp
    }
}

/// Stats by variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStats {
    Tracked(StatTracker),
    Combat(CombatStats),
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub rect: Rect,
    /// Pixels per frame
    pub speed: f32,
    pub axis: Axis,
    pub stats: PlayerStats,
    pub mood: Mood,
}

impl PlayerState {
    /// Lane runner: centred horizontally, near the bottom edge
    pub fn lane(field: &Rect, tracker: StatTracker) -> Self {
        let size = LANE_PLAYER_SIZE;
        let rect = Rect::new(
            field.center().x - size / 2.0,
            field.bottom() - LANE_PLAYER_BOTTOM_GAP - size,
            size,
            size,
        );
        Self {
            rect,
            speed: PLAYER_SPEED,
            axis: Axis::Horizontal,
            stats: PlayerStats::Tracked(tracker),
            mood: Mood::Neutral,
        }
    }

    /// Arena fighter: left side, vertically centred
    pub fn arena(field: &Rect, hp: u32) -> Self {
        let center = Vec2::new(field.left() + ARENA_PLAYER_X, field.center().y);
        Self {
            rect: Rect::from_center(center, ARENA_PLAYER_SIZE, ARENA_PLAYER_SIZE),
            speed: PLAYER_SPEED,
            axis: Axis::Vertical,
            stats: PlayerStats::Combat(CombatStats::new(hp)),
            mood: Mood::Neutral,
        }
    }

    /// Move along the player's axis and stay inside the field
    pub fn drive(&mut self, input: &TickInput, field: &Rect) {
        let (back, forward) = match self.axis {
            Axis::Horizontal => (input.left, input.right),
            Axis::Vertical => (input.up, input.down),
        };
        let mut step = 0.0;
        if back {
            step -= self.speed;
        }
        if forward {
            step += self.speed;
        }
        match self.axis {
            Axis::Horizontal => self.rect.x += step,
            Axis::Vertical => self.rect.y += step,
        }
        self.rect.clamp_within(field);
    }

    /// Apply a gate effect; `None` when the effect does not fit this player
    pub fn apply_effect(&mut self, effect: &GateEffect) -> Option<StatChange> {
        match (&mut self.stats, effect) {
            (PlayerStats::Tracked(tracker), GateEffect::Arithmetic { op, operand }) => {
                let change = tracker.apply(*op, *operand);
                if tracker.kind() == StatKind::Count {
                    self.mood = if op.is_beneficial() {
                        Mood::Cheerful
                    } else {
                        Mood::Gloomy
                    };
                }
                Some(change)
            }
            (PlayerStats::Combat(stats), GateEffect::Boost(kind)) => Some(stats.boost(*kind)),
            _ => {
                log::warn!("Gate effect {effect} does not apply to this player");
                None
            }
        }
    }

    /// Failure threshold reached (count 0 or HP 0)
    pub fn is_defeated(&self) -> bool {
        match &self.stats {
            PlayerStats::Tracked(tracker) => tracker.is_depleted(),
            PlayerStats::Combat(stats) => stats.hp == 0,
        }
    }

    pub fn combat(&self) -> Option<&CombatStats> {
        match &self.stats {
            PlayerStats::Combat(stats) => Some(stats),
            PlayerStats::Tracked(_) => None,
        }
    }

    pub fn tracker(&self) -> Option<&StatTracker> {
        match &self.stats {
            PlayerStats::Tracked(tracker) => Some(tracker),
            PlayerStats::Combat(_) => None,
        }
    }
}

/// Something that happened during a tick, for the renderer/audio layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    GateSpawned {
        id: u32,
        pair_id: u32,
        effect: GateEffect,
        rect: Rect,
    },
    EnemySpawned {
        id: u32,
        level: u32,
        max_hp: i32,
        rect: Rect,
    },
    ProjectileSpawned {
        id: u32,
        weapon: Weapon,
        rect: Rect,
    },
    /// The one gate of a pair whose effect was applied
    GateApplied {
        id: u32,
        pair_id: u32,
        effect: GateEffect,
        change: Option<StatChange>,
        beneficial: bool,
    },
    /// A sibling removed without effect
    GateDiscarded { id: u32, pair_id: u32 },
    /// Left the field or was cleared by a new wall row
    GateExpired { id: u32 },
    EnemyDefeated { id: u32 },
    EnemyEscaped { id: u32 },
    PlayerHit { enemy_id: u32, hp: u32 },
    ProjectileSpent { id: u32, enemy_id: u32 },
    ProjectileExpired { id: u32 },
    Defeated { frame: u64 },
}

/// Monotonic entity id source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Play field, origin at the top-left
    pub field: Rect,
    pub phase: GamePhase,
    /// Frames simulated so far
    pub frame: u64,
    pub elapsed_ms: f64,
    pub player: PlayerState,
    /// Active gates (spawn order)
    pub gates: Vec<Gate>,
    /// Live enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Live projectiles (spawn order)
    pub projectiles: Vec<Projectile>,
    pub gate_spawner: GateSpawner,
    /// Combat variant only
    pub enemy_spawner: Option<EnemySpawner>,
    pub armory: Armory,
    pub(crate) rng: Pcg32,
    pub(crate) ids: EntityIds,
}

impl GameState {
    /// Validate settings and set up a fresh run
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let (width, height) = settings.field_size();
        let field = Rect::new(0.0, 0.0, width, height);

        let (player, gate_spawner, enemy_spawner, armory) = match settings.variant {
            Variant::GateCount | Variant::GatePower => {
                let kind = if settings.variant == Variant::GateCount {
                    StatKind::Count
                } else {
                    StatKind::Power
                };
                let initial = match kind {
                    StatKind::Count => settings.initial_count,
                    StatKind::Power => settings.initial_power,
                };
                let player = PlayerState::lane(&field, StatTracker::new(kind, initial));
                let gates = GateSpawner::lanes(
                    settings.gate_interval_ms,
                    settings.operators()?,
                    settings.additive_operands,
                    settings.scaling_operands,
                )?;
                let armory = if kind == StatKind::Power {
                    Armory::new(vec![Launcher::new(Weapon::Bolt, settings.bolt_interval_ms)?])
                } else {
                    Armory::default()
                };
                (player, gates, None, armory)
            }
            Variant::Combat => {
                let player = PlayerState::arena(&field, settings.initial_hp);
                let gates = GateSpawner::walls(settings.wall_interval_ms)?;
                let enemies = EnemySpawner::new(settings.enemy_interval_ms)?;
                let armory = Armory::new(vec![
                    Launcher::new(Weapon::Sword, settings.sword_interval_ms)?,
                    Launcher::new(Weapon::Arrow, settings.arrow_interval_ms)?,
                ]);
                (player, gates, Some(enemies), armory)
            }
        };

        log::info!(
            "New {} run: seed={}, field={}x{}",
            settings.variant.as_str(),
            settings.seed,
            width,
            height
        );

        Ok(Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            field,
            phase: GamePhase::Playing,
            frame: 0,
            elapsed_ms: 0.0,
            player,
            gates: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            gate_spawner,
            enemy_spawner,
            armory,
            ids: EntityIds::default(),
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Defeated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane_field() -> Rect {
        Rect::new(0.0, 0.0, LANE_FIELD_WIDTH, LANE_FIELD_HEIGHT)
    }

    #[test]
    fn test_new_state_per_variant() {
        let state = GameState::new(Settings::for_variant(Variant::GateCount)).unwrap();
        assert_eq!(state.player.axis, Axis::Horizontal);
        assert_eq!(state.player.tracker().map(|t| t.value()), Some(1));
        assert!(state.enemy_spawner.is_none());
        assert!(state.armory.launchers().is_empty());

        let state = GameState::new(Settings::for_variant(Variant::GatePower)).unwrap();
        assert_eq!(state.armory.launchers().len(), 1);

        let state = GameState::new(Settings::for_variant(Variant::Combat)).unwrap();
        assert_eq!(state.player.axis, Axis::Vertical);
        assert_eq!(state.player.combat().map(|c| c.hp), Some(ARENA_START_HP));
        assert!(state.enemy_spawner.is_some());
        assert_eq!(state.armory.launchers().len(), 2);
    }

    #[test]
    fn test_new_state_rejects_bad_settings() {
        let mut settings = Settings::for_variant(Variant::Combat);
        settings.sword_interval_ms = -1.0;
        assert!(GameState::new(settings).is_err());
    }

    #[test]
    fn test_lane_player_placement() {
        let player = PlayerState::lane(&lane_field(), StatTracker::new(StatKind::Count, 1));
        assert_eq!(player.rect.center().x, LANE_FIELD_WIDTH / 2.0);
        assert_eq!(player.rect.bottom(), LANE_FIELD_HEIGHT - LANE_PLAYER_BOTTOM_GAP);
    }

    #[test]
    fn test_drive_clamps_to_field() {
        let field = lane_field();
        let mut player = PlayerState::lane(&field, StatTracker::new(StatKind::Count, 1));
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            player.drive(&left, &field);
        }
        assert_eq!(player.rect.left(), 0.0);

        // Vertical keys do nothing on the horizontal axis
        let y = player.rect.y;
        player.drive(
            &TickInput {
                up: true,
                ..Default::default()
            },
            &field,
        );
        assert_eq!(player.rect.y, y);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let field = Rect::new(0.0, 0.0, ARENA_FIELD_WIDTH, ARENA_FIELD_HEIGHT);
        let mut player = PlayerState::arena(&field, 5);
        let before = player.rect;
        player.drive(
            &TickInput {
                up: true,
                down: true,
                ..Default::default()
            },
            &field,
        );
        assert_eq!(player.rect, before);
    }

    #[test]
    fn test_count_mood_follows_gate() {
        let mut player = PlayerState::lane(&lane_field(), StatTracker::new(StatKind::Count, 10));
        player.apply_effect(&GateEffect::Arithmetic {
            op: Operator::Divide,
            operand: 2,
        });
        assert_eq!(player.mood, Mood::Gloomy);
        player.apply_effect(&GateEffect::Arithmetic {
            op: Operator::Add,
            operand: 2,
        });
        assert_eq!(player.mood, Mood::Cheerful);
    }

    #[test]
    fn test_mismatched_effect_is_ignored() {
        let field = Rect::new(0.0, 0.0, ARENA_FIELD_WIDTH, ARENA_FIELD_HEIGHT);
        let mut player = PlayerState::arena(&field, 5);
        let change = player.apply_effect(&GateEffect::Arithmetic {
            op: Operator::Add,
            operand: 5,
        });
        assert_eq!(change, None);
        assert_eq!(player.combat().map(|c| c.hp), Some(5));
    }

    #[test]
    fn test_boosts() {
        let mut stats = CombatStats::new(5);
        assert_eq!(
            stats.boost(BoostKind::Sword),
            StatChange {
                before: 1,
                after: 2
            }
        );
        stats.boost(BoostKind::Hp);
        assert_eq!(stats.hp, 6);
        assert_eq!(stats.take_hit(), 5);
    }

    #[test]
    fn test_damage_reads_live_levels() {
        let projectile = Projectile {
            id: 1,
            weapon: Weapon::Arrow,
            kind: ProjectileKind::Linear {
                velocity: Vec2::new(ARROW_SPEED, 0.0),
            },
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            orbiting: false,
        };
        let mut stats = CombatStats::new(5);
        stats.arrow_atk = 0;
        assert_eq!(projectile.damage(&stats), 1);
        stats.arrow_atk = 4;
        assert_eq!(projectile.damage(&stats), 4);
        assert!(!projectile.is_single_use());
    }

    #[test]
    fn test_gate_labels() {
        let plus = GateEffect::Arithmetic {
            op: Operator::Add,
            operand: 12,
        };
        assert_eq!(plus.to_string(), "+12");
        assert!(plus.is_beneficial());
        assert_eq!(GateEffect::Boost(BoostKind::Hp).to_string(), "HP +1");
    }
}

//! Projectile launching and movement
//!
//! Swords home on the nearest enemy and circle the player when there is
//! none; arrows and bolts fly straight until they leave the field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::nearest_to;
use super::rect::Rect;
use super::state::{Enemy, EntityIds, GameEvent, PlayerState, Projectile, ProjectileKind, Weapon};
use super::timer::SpawnTimer;
use crate::consts::*;
use crate::error::SettingsError;
use crate::orbit_point;

/// One weapon and its firing timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    pub weapon: Weapon,
    timer: SpawnTimer,
}

impl Launcher {
    pub fn new(weapon: Weapon, interval_ms: f32) -> Result<Self, SettingsError> {
        let name = match weapon {
            Weapon::Sword => "sword_interval_ms",
            Weapon::Arrow => "arrow_interval_ms",
            Weapon::Bolt => "bolt_interval_ms",
        };
        Ok(Self {
            weapon,
            timer: SpawnTimer::new(name, interval_ms)?,
        })
    }
}

/// The player's automatic weapons, fired in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Armory {
    launchers: Vec<Launcher>,
}

impl Armory {
    pub fn new(launchers: Vec<Launcher>) -> Self {
        Self { launchers }
    }

    pub fn launchers(&self) -> &[Launcher] {
        &self.launchers
    }

    /// Advance every launcher; each one that fires adds a projectile
    pub fn tick(
        &mut self,
        dt_ms: f32,
        ids: &mut EntityIds,
        player: &PlayerState,
        projectiles: &mut Vec<Projectile>,
        events: &mut Vec<GameEvent>,
    ) {
        for launcher in &mut self.launchers {
            if !launcher.timer.tick(dt_ms) {
                continue;
            }
            let id = ids.next_id();
            let projectile = match launcher.weapon {
                // Fresh swords fan out by how many projectiles are already live
                Weapon::Sword => sword(id, player.rect.center(), projectiles.len()),
                Weapon::Arrow => arrow(id, player.rect.center()),
                Weapon::Bolt => bolt(id, &player.rect),
            };
            log::debug!("Launched {:?} #{}", projectile.weapon, projectile.id);
            events.push(GameEvent::ProjectileSpawned {
                id: projectile.id,
                weapon: projectile.weapon,
                rect: projectile.rect,
            });
            projectiles.push(projectile);
        }
    }
}

fn sword(id: u32, center: Vec2, slot: usize) -> Projectile {
    Projectile {
        id,
        weapon: Weapon::Sword,
        kind: ProjectileKind::Seeking {
            angle_deg: slot as f32 * ORBIT_SLOT_DEG,
            radius: ORBIT_RADIUS,
            speed: SWORD_SPEED,
        },
        rect: Rect::from_center(center, SWORD_SIZE, SWORD_SIZE),
        orbiting: false,
    }
}

fn arrow(id: u32, center: Vec2) -> Projectile {
    let (w, h) = ARROW_SIZE;
    Projectile {
        id,
        weapon: Weapon::Arrow,
        kind: ProjectileKind::Linear {
            velocity: Vec2::new(ARROW_SPEED, 0.0),
        },
        rect: Rect::from_center(center, w, h),
        orbiting: false,
    }
}

/// Leaves from the top edge of the player
fn bolt(id: u32, player: &Rect) -> Projectile {
    let (w, h) = BOLT_SIZE;
    Projectile {
        id,
        weapon: Weapon::Bolt,
        kind: ProjectileKind::Linear {
            velocity: Vec2::new(0.0, -BOLT_SPEED),
        },
        rect: Rect::new(player.center().x - w / 2.0, player.top() - h, w, h),
        orbiting: false,
    }
}

impl Projectile {
    /// Move one frame
    ///
    /// Seeking: step toward the nearest enemy (never past its centre), or
    /// orbit `anchor` when no enemy is alive.
    pub fn advance(&mut self, enemies: &[Enemy], anchor: Vec2) {
        match &mut self.kind {
            ProjectileKind::Seeking {
                angle_deg,
                radius,
                speed,
            } => {
                let here = self.rect.center();
                match nearest_to(here, enemies.iter().map(|e| &e.rect)) {
                    Some(target) => {
                        let to_target = enemies[target].rect.center() - here;
                        let dist = to_target.length();
                        if dist > 0.0 {
                            self.rect.translate(to_target / dist * speed.min(dist));
                        }
                        self.orbiting = false;
                    }
                    None => {
                        *angle_deg += ORBIT_STEP_DEG;
                        self.rect.set_center(orbit_point(anchor, *radius, *angle_deg));
                        self.orbiting = true;
                    }
                }
            }
            ProjectileKind::Linear { velocity } => self.rect.translate(*velocity),
        }
    }

    /// Linear projectiles are done once past the far edge; seeking ones never expire
    pub fn has_left(&self, field: &Rect) -> bool {
        match self.kind {
            ProjectileKind::Linear { velocity } => self.rect.is_past(field, velocity),
            ProjectileKind::Seeking { .. } => false,
        }
    }
}

/// Move all projectiles one frame and drop those that left the field
pub fn update_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &[Enemy],
    anchor: Vec2,
    field: &Rect,
    events: &mut Vec<GameEvent>,
) {
    projectiles.retain_mut(|projectile| {
        projectile.advance(enemies, anchor);
        if projectile.has_left(field) {
            events.push(GameEvent::ProjectileExpired { id: projectile.id });
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stat::{StatKind, StatTracker};
    use proptest::prelude::*;

    fn enemy_at(id: u32, center: Vec2) -> Enemy {
        Enemy {
            id,
            rect: Rect::from_center(center, ENEMY_WIDTH, ENEMY_HEIGHT),
            hp: 30,
            max_hp: 30,
            speed: 3.0,
            level: 0,
        }
    }

    fn arena() -> Rect {
        Rect::new(0.0, 0.0, ARENA_FIELD_WIDTH, ARENA_FIELD_HEIGHT)
    }

    #[test]
    fn test_seeking_steps_toward_nearest() {
        let mut blade = sword(1, Vec2::new(200.0, 300.0), 0);
        let enemies = [
            enemy_at(10, Vec2::new(800.0, 300.0)),
            enemy_at(11, Vec2::new(200.0, 400.0)),
        ];
        blade.advance(&enemies, Vec2::new(200.0, 300.0));
        assert!(!blade.orbiting);
        let center = blade.rect.center();
        assert!((center - Vec2::new(200.0, 306.0)).length() < 1e-4);
    }

    #[test]
    fn test_seeking_tie_goes_to_first_enemy() {
        let mut blade = sword(1, Vec2::new(500.0, 300.0), 0);
        let enemies = [
            enemy_at(10, Vec2::new(500.0, 200.0)),
            enemy_at(11, Vec2::new(500.0, 400.0)),
        ];
        blade.advance(&enemies, Vec2::ZERO);
        assert!(blade.rect.center().y < 300.0);
    }

    #[test]
    fn test_seeking_does_not_overshoot() {
        let mut blade = sword(1, Vec2::new(100.0, 100.0), 0);
        let enemies = [enemy_at(10, Vec2::new(103.0, 100.0))];
        blade.advance(&enemies, Vec2::ZERO);
        assert!((blade.rect.center() - Vec2::new(103.0, 100.0)).length() < 1e-4);
        // Sitting on the target: no movement, no NaN
        blade.advance(&enemies, Vec2::ZERO);
        assert!(blade.rect.center().is_finite());
    }

    #[test]
    fn test_orbit_without_enemies() {
        let anchor = Vec2::new(200.0, 325.0);
        let mut blade = sword(1, anchor, 0);
        blade.advance(&[], anchor);
        assert!(blade.orbiting);
        let expected = orbit_point(anchor, ORBIT_RADIUS, ORBIT_STEP_DEG);
        assert!((blade.rect.center() - expected).length() < 1e-3);
    }

    #[test]
    fn test_orbit_closes_after_full_turn() {
        let anchor = Vec2::new(200.0, 325.0);
        let mut blade = sword(1, anchor, 2);
        blade.advance(&[], anchor);
        let start = blade.rect.center();
        let frames_per_turn = (360.0 / ORBIT_STEP_DEG) as usize;
        for _ in 0..frames_per_turn {
            blade.advance(&[], anchor);
        }
        assert!((blade.rect.center() - start).length() < 1e-2);
    }

    #[test]
    fn test_orbit_follows_player() {
        let mut blade = sword(1, Vec2::new(200.0, 325.0), 0);
        let moved = Vec2::new(200.0, 100.0);
        blade.advance(&[], moved);
        assert!((blade.rect.center().distance(moved) - ORBIT_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn test_arrow_expires_past_right_edge() {
        let field = arena();
        let mut projectiles = vec![arrow(1, Vec2::new(ARENA_FIELD_WIDTH + 10.0, 300.0))];
        let mut events = Vec::new();
        // Left edge starts inside and crosses the right edge on this step
        update_projectiles(&mut projectiles, &[], Vec2::ZERO, &field, &mut events);
        assert!(projectiles.is_empty());
        assert_eq!(events, vec![GameEvent::ProjectileExpired { id: 1 }]);
    }

    #[test]
    fn test_arrow_flies_straight() {
        let field = arena();
        let mut projectiles = vec![arrow(1, Vec2::new(200.0, 300.0))];
        let enemies = [enemy_at(5, Vec2::new(600.0, 100.0))];
        let mut events = Vec::new();
        update_projectiles(&mut projectiles, &enemies, Vec2::ZERO, &field, &mut events);
        assert_eq!(projectiles[0].rect.center(), Vec2::new(214.0, 300.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_bolt_leaves_from_player_top() {
        let field = Rect::new(0.0, 0.0, LANE_FIELD_WIDTH, LANE_FIELD_HEIGHT);
        let player = PlayerState::lane(&field, StatTracker::new(StatKind::Power, 1));
        let shot = bolt(1, &player.rect);
        assert_eq!(shot.rect.bottom(), player.rect.top());
        assert_eq!(shot.rect.center().x, player.rect.center().x);
    }

    #[test]
    fn test_armory_fans_swords_by_live_count() {
        let field = arena();
        let player = PlayerState::arena(&field, 5);
        let mut armory = Armory::new(vec![
            Launcher::new(Weapon::Sword, SWORD_INTERVAL_MS).unwrap(),
            Launcher::new(Weapon::Arrow, ARROW_INTERVAL_MS).unwrap(),
        ]);
        let mut ids = EntityIds::default();
        let mut projectiles = Vec::new();
        let mut events = Vec::new();

        armory.tick(500.0, &mut ids, &player, &mut projectiles, &mut events);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].weapon, Weapon::Arrow);

        armory.tick(500.0, &mut ids, &player, &mut projectiles, &mut events);
        armory.tick(500.0, &mut ids, &player, &mut projectiles, &mut events);
        // Sword fired at 1500 ms with two arrows already live, then the third arrow
        let blade = projectiles
            .iter()
            .find(|p| p.weapon == Weapon::Sword)
            .unwrap();
        assert!(matches!(
            blade.kind,
            ProjectileKind::Seeking { angle_deg, .. } if angle_deg == 120.0
        ));
        assert_eq!(projectiles.len(), 4);
        assert_eq!(events.len(), 4);
    }

    proptest! {
        #[test]
        fn seeking_always_closes_distance(
            sx in -500.0f32..500.0, sy in -500.0f32..500.0,
            ex in -500.0f32..500.0, ey in -500.0f32..500.0,
        ) {
            let target = Vec2::new(ex, ey);
            let mut blade = sword(1, Vec2::new(sx, sy), 0);
            let enemies = [enemy_at(1, target)];
            let before = blade.rect.center().distance(target);
            blade.advance(&enemies, Vec2::ZERO);
            let after = blade.rect.center().distance(target);
            if before > 1e-3 {
                prop_assert!(after < before);
            } else {
                prop_assert!(after <= before + 1e-3);
            }
        }

        #[test]
        fn orbit_keeps_constant_radius(
            px in 0.0f32..1000.0, py in 0.0f32..600.0, slot in 0usize..8, frames in 1usize..200,
        ) {
            let anchor = Vec2::new(px, py);
            let mut blade = sword(1, anchor, slot);
            for _ in 0..frames {
                blade.advance(&[], anchor);
                let r = blade.rect.center().distance(anchor);
                prop_assert!((r - ORBIT_RADIUS).abs() < 1e-2);
            }
        }
    }
}

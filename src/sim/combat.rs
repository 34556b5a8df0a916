//! Enemy contact and projectile hits
//!
//! Removal happens in place during the pass: a removed enemy is never
//! tested again, and survivors keep their spawn order.

use super::rect::Rect;
use super::state::{CombatStats, Enemy, GameEvent, Projectile};

/// Move enemies one frame; contacts cost the player 1 HP, escapes cost nothing
pub fn advance_enemies(
    enemies: &mut Vec<Enemy>,
    player: &Rect,
    stats: &mut CombatStats,
    field: &Rect,
    events: &mut Vec<GameEvent>,
) {
    enemies.retain_mut(|enemy| {
        enemy.advance();
        if enemy.rect.overlaps(player) {
            let hp = stats.take_hit();
            log::debug!("Enemy {} reached the player, hp {}", enemy.id, hp);
            events.push(GameEvent::PlayerHit {
                enemy_id: enemy.id,
                hp,
            });
            false
        } else if enemy.rect.is_past(field, enemy.velocity()) {
            events.push(GameEvent::EnemyEscaped { id: enemy.id });
            false
        } else {
            true
        }
    });
}

/// Test every projectile against every live enemy
///
/// Seeking projectiles are spent on their first hit. Linear projectiles
/// pierce: they stay alive and keep testing the remaining enemies in the
/// same pass. Damage reads the player's levels at the moment of the hit.
pub fn resolve_projectile_hits(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
    stats: &CombatStats,
    events: &mut Vec<GameEvent>,
) {
    let mut p = 0;
    while p < projectiles.len() {
        let mut spent_on = None;
        let mut e = 0;
        while e < enemies.len() {
            if !projectiles[p].rect.overlaps(&enemies[e].rect) {
                e += 1;
                continue;
            }

            let enemy_id = enemies[e].id;
            enemies[e].hp -= projectiles[p].damage(stats);
            if enemies[e].hp <= 0 {
                enemies.remove(e);
                log::debug!("Enemy {enemy_id} defeated");
                events.push(GameEvent::EnemyDefeated { id: enemy_id });
            } else {
                e += 1;
            }

            if projectiles[p].is_single_use() {
                spent_on = Some(enemy_id);
                break;
            }
        }

        match spent_on {
            Some(enemy_id) => {
                let spent = projectiles.remove(p);
                events.push(GameEvent::ProjectileSpent {
                    id: spent.id,
                    enemy_id,
                });
            }
            None => p += 1,
        }
    }
}

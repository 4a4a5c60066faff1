/// Projectiles, hit resolution and explosions.

use tracing::info;

use crate::config::PlatformerConfig;
use crate::entities::{Bullet, BulletOwner, Enemy, EnemyKind, Explosion, Player};
use crate::geometry::Bounds;
use crate::physics::{lose_life, take_damage};

// ── Firing ───────────────────────────────────────────────────────────────────

/// World position of the gun muzzle; the gun sticks out of whichever side
/// the player faces.
pub fn muzzle_position(player: &Player, config: &PlatformerConfig) -> (f32, f32) {
    let x = if player.facing_right {
        player.x + player.width - config.gun_offset_x + config.gun_length
    } else {
        player.x - (config.gun_length - config.gun_offset_x)
    };
    let y = player.y + config.gun_offset_y + (config.gun_height / 2.0).floor();
    (x, y)
}

/// Fire a bullet from the muzzle if the cooldown has elapsed.
pub fn player_shoot(player: &mut Player, config: &PlatformerConfig) -> Option<Bullet> {
    if player.shoot_cooldown > 0 {
        return None;
    }
    let (muzzle_x, muzzle_y) = muzzle_position(player, config);
    let direction = if player.facing_right { 1.0 } else { -1.0 };
    let x = if player.facing_right {
        muzzle_x
    } else {
        muzzle_x - config.bullet_width
    };
    player.shoot_cooldown = config.shoot_cooldown_frames;
    Some(Bullet {
        x,
        y: muzzle_y - (config.bullet_height / 2.0).floor(),
        vx: config.bullet_speed * direction,
        vy: 0.0,
        width: config.bullet_width,
        height: config.bullet_height,
        owner: BulletOwner::Player,
        alive: true,
    })
}

/// A shooter whose cooldown has run out fires at the player's centre and
/// rearms.  Other variants never fire.
pub fn enemy_fire(enemy: &mut Enemy, player: &Player, config: &PlatformerConfig) -> Option<Bullet> {
    let cooldown = match &mut enemy.kind {
        EnemyKind::Shooter { cooldown } if *cooldown == 0 => cooldown,
        _ => return None,
    };
    *cooldown = config.shooter_cooldown_frames;

    let (ex, ey) = enemy.rect().center();
    let (px, py) = player.rect().center();
    let (dx, dy) = (px - ex, py - ey);
    let dist = (dx * dx + dy * dy).sqrt().max(1.0);
    Some(Bullet {
        x: ex,
        y: ey,
        vx: config.enemy_bullet_speed * dx / dist,
        vy: config.enemy_bullet_speed * dy / dist,
        width: config.enemy_bullet_width,
        height: config.enemy_bullet_height,
        owner: BulletOwner::Enemy,
        alive: true,
    })
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Advance one frame; bullets leaving the world die.  Enemy bullets get
/// vertical slack around the viewport, player bullets fly level and only
/// check the horizontal bounds.
pub fn update_bullet(bullet: &mut Bullet, config: &PlatformerConfig) {
    bullet.x += bullet.vx;
    bullet.y += bullet.vy;

    let out_x = bullet.x < 0.0 || bullet.x > config.world_width;
    let out_y = match bullet.owner {
        BulletOwner::Player => false,
        BulletOwner::Enemy => {
            bullet.y < -config.enemy_bullet_margin
                || bullet.y > config.viewport_height + config.enemy_bullet_margin
        }
    };
    if out_x || out_y {
        bullet.alive = false;
    }
}

// ── Hit resolution ───────────────────────────────────────────────────────────

/// Player bullets against enemies.  Each enemy is matched with the first
/// live bullet touching it; both are consumed, an explosion appears at the
/// enemy's centre and the kill is scored.  Returns the number of kills.
pub fn resolve_bullet_hits(
    bullets: &mut [Bullet],
    enemies: &mut Vec<Enemy>,
    explosions: &mut Vec<Explosion>,
    player: &mut Player,
    config: &PlatformerConfig,
) -> u32 {
    let mut kills = 0;
    enemies.retain(|enemy| {
        let hit = bullets
            .iter_mut()
            .find(|b| b.alive && b.owner == BulletOwner::Player && b.hits(enemy));
        match hit {
            Some(bullet) => {
                bullet.alive = false;
                let (cx, cy) = enemy.rect().center();
                explosions.push(Explosion {
                    x: cx,
                    y: cy,
                    frame: 0,
                    done: false,
                });
                player.score += config.kill_score;
                kills += 1;
                false
            }
            None => true,
        }
    });
    kills
}

/// Enemy bullets against the player.  Every touching bullet is consumed;
/// damage goes through [`take_damage`] so an invincibility window absorbs
/// the rest.  Returns whether a life was lost.
pub fn resolve_enemy_bullets(
    bullets: &mut [Bullet],
    player: &mut Player,
    config: &PlatformerConfig,
) -> bool {
    let mut died = false;
    for bullet in bullets
        .iter_mut()
        .filter(|b| b.alive && b.owner == BulletOwner::Enemy)
    {
        if !player.hits(&*bullet) {
            continue;
        }
        bullet.alive = false;
        if take_damage(player, config.enemy_bullet_damage, config) {
            info!("player shot down");
            lose_life(player, config);
            died = true;
        }
    }
    died
}

/// Contact damage from one enemy.  Returns whether a life was lost.
pub fn resolve_melee(enemy: &Enemy, player: &mut Player, config: &PlatformerConfig) -> bool {
    if !player.hits(enemy) {
        return false;
    }
    if take_damage(player, config.contact_damage, config) {
        info!(enemy = enemy.kind.name(), "player killed by contact");
        lose_life(player, config);
        return true;
    }
    false
}

// ── Explosions ───────────────────────────────────────────────────────────────

/// Age every explosion by one frame and drop the finished ones.
pub fn update_explosions(explosions: &mut Vec<Explosion>, config: &PlatformerConfig) {
    for explosion in explosions.iter_mut() {
        explosion.frame += 1;
        if explosion.frame >= config.explosion_frames {
            explosion.done = true;
        }
    }
    explosions.retain(|e| !e.done);
}

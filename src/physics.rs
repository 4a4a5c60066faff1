/// Per-frame physics for the player and patrolling enemies, plus the
/// damage / life-loss contract.

use tracing::info;

use crate::config::PlatformerConfig;
use crate::entities::{Enemy, EnemyKind, Platform, Player};
use crate::geometry::Bounds;

// ── Damage ───────────────────────────────────────────────────────────────────

/// Apply `amount` of damage.
///
/// A no-op while invincible.  Otherwise health drops (floored at zero) and,
/// unless invincibility is permanent, a fresh invincibility window starts.
/// Returns `true` when this call brought health to zero; the caller must
/// then run [`lose_life`].
pub fn take_damage(player: &mut Player, amount: u32, config: &PlatformerConfig) -> bool {
    if player.is_invincible() {
        return false;
    }
    player.health = player.health.saturating_sub(amount);
    if !player.permanent_invincibility {
        player.invincible_frames = config.invincibility_frames;
    }
    player.health == 0
}

/// Consume one life: health back to max, invincibility window cleared,
/// respawn in the air at the spawn point at rest.
pub fn lose_life(player: &mut Player, config: &PlatformerConfig) {
    player.lives = player.lives.saturating_sub(1);
    player.health = config.max_health;
    player.invincible_frames = 0;
    player.x = config.spawn.0;
    player.y = config.spawn.1;
    player.vx = 0.0;
    player.vy = 0.0;
    player.on_ground = false;
    info!(lives = player.lives, "life lost");
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Count down the invincibility window and the shoot cooldown.
pub fn tick_timers(player: &mut Player) {
    if !player.permanent_invincibility {
        player.invincible_frames = player.invincible_frames.saturating_sub(1);
    }
    player.shoot_cooldown = player.shoot_cooldown.saturating_sub(1);
}

/// Gravity, integration, platform resolution and world clamping.
///
/// Falling onto a platform lands on it; rising into one bumps the head.
/// Dropping below the viewport costs a life.
pub fn update_player(player: &mut Player, platforms: &[Platform], config: &PlatformerConfig) {
    player.vy += config.gravity;
    player.x += player.vx;
    player.y += player.vy;

    tick_timers(player);

    player.on_ground = false;
    for platform in platforms {
        if !player.hits(platform) {
            continue;
        }
        if player.vy > 0.0 {
            player.y = platform.y - player.height;
            player.vy = 0.0;
            player.on_ground = true;
        } else if player.vy < 0.0 {
            player.y = platform.y + platform.height;
            player.vy = 0.0;
        }
    }

    player.x = player.x.clamp(0.0, (config.world_width - player.width).max(0.0));

    if player.y > config.viewport_height {
        info!(x = player.x, "player fell out of the world");
        lose_life(player, config);
    }
}

/// Start a jump if standing on something.
pub fn jump(player: &mut Player, config: &PlatformerConfig) {
    if player.on_ground {
        player.vy = config.jump_velocity;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Patrol step, fall-and-snap onto the first overlapping platform, and the
/// shooter cooldown.
///
/// The snap takes the first match in container order, not the nearest
/// platform; platforms are generated non-overlapping so the two agree.
pub fn update_enemy(enemy: &mut Enemy, platforms: &[Platform], config: &PlatformerConfig) {
    let left = enemy.anchor_x;
    let right = enemy.anchor_x + enemy.patrol_distance;
    enemy.x = (enemy.x + enemy.speed * enemy.direction).clamp(left, right);
    if enemy.x <= left || enemy.x >= right {
        enemy.direction = -enemy.direction;
    }

    enemy.y += config.enemy_fall_step;
    if let Some(platform) = platforms.iter().find(|p| enemy.hits(*p)) {
        enemy.y = platform.y - enemy.height;
    }

    if let EnemyKind::Shooter { cooldown } = &mut enemy.kind {
        *cooldown = cooldown.saturating_sub(1);
    }
}

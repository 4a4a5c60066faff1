/// Procedural world generation.
///
/// The world is a 1-D strip filled left to right in chunks.  The session
/// keeps a monotonically increasing `frontier` and asks for one more chunk
/// whenever the player gets within a chunk of it, so no range is ever
/// generated twice.  All randomness comes through the injected RNG.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::debug;

use crate::config::PlatformerConfig;
use crate::entities::{
    Coin, Enemy, EnemyKind, GameState, Heart, Material, Placement, Platform,
};
use crate::geometry::horizontal_overlap;

/// Floating platforms past these x positions switch material.
const ICE_FROM_X: f32 = 1000.0;
const STONE_FROM_X: f32 = 2000.0;

/// Enemies and coins keep this far from a platform's left edge.
const EDGE_INSET: f32 = 20.0;
/// Patrol ranges stay this much shorter than their platform.
const PATROL_MARGIN: f32 = 60.0;
/// Coins hover this far above the platform surface.
const COIN_LIFT: f32 = 30.0;

/// Uniform integer-valued draw from `[lo, hi]`.
fn rand_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    let lo = lo.round() as i32;
    let hi = (hi.round() as i32).max(lo);
    rng.gen_range(lo..=hi) as f32
}

pub fn material_for(x: f32) -> Material {
    if x > STONE_FROM_X {
        Material::Stone
    } else if x > ICE_FROM_X {
        Material::Ice
    } else {
        Material::Grass
    }
}

/// True when a platform at (`x`, `y`) of `width` keeps clear of every
/// existing platform: the horizontal overlap stays within tolerance, or the
/// two are far enough apart vertically.
pub fn is_clear_of(
    platforms: &[Platform],
    x: f32,
    y: f32,
    width: f32,
    config: &PlatformerConfig,
) -> bool {
    let tolerated = width * config.overlap_tolerance;
    platforms.iter().all(|p| {
        horizontal_overlap(x, width, p.x, p.width) <= tolerated
            || (y - p.y).abs() >= config.min_vertical_gap
    })
}

/// Pick a height for a floating platform.  Best effort: after
/// `placement_attempts` misses the default height is used even if it overlaps.
pub fn find_floating_y(
    platforms: &[Platform],
    x: f32,
    width: f32,
    config: &PlatformerConfig,
    rng: &mut impl Rng,
) -> (f32, Placement) {
    let (lo, hi) = config.floating_y_range();
    for _ in 0..config.placement_attempts {
        let y = rand_between(rng, lo, hi);
        if is_clear_of(platforms, x, y, width, config) {
            return (y, Placement::Floating);
        }
    }
    (config.fallback_y(), Placement::Fallback)
}

/// Draw an enemy variant from the configured weights
/// (basic / flying / fast / shooter).
pub fn roll_enemy_kind(config: &PlatformerConfig, rng: &mut impl Rng) -> EnemyKind {
    let index = match WeightedIndex::new(config.enemy_weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => 0,
    };
    match index {
        1 => EnemyKind::Flying,
        2 => EnemyKind::Fast,
        3 => EnemyKind::Shooter {
            cooldown: rng.gen_range(0..=config.shooter_cooldown_frames),
        },
        _ => EnemyKind::Basic,
    }
}

/// Place an enemy on top of the platform at (`px`, `py`).
///
/// The patrol distance is drawn from `[min_patrol, width - 60]` (the minimum
/// wins on narrow platforms), then the spawn offset is chosen so the whole
/// patrol range fits on the platform whenever there is room for it.
pub fn spawn_enemy(
    config: &PlatformerConfig,
    px: f32,
    py: f32,
    width: f32,
    rng: &mut impl Rng,
) -> Enemy {
    let kind = roll_enemy_kind(config, rng);
    let (w, h) = match kind {
        EnemyKind::Shooter { .. } => (config.shooter_width, config.shooter_height),
        _ => (config.enemy_width, config.enemy_height),
    };

    let max_patrol = (width - PATROL_MARGIN).max(config.min_patrol + 1.0);
    let patrol_distance = rand_between(rng, config.min_patrol, max_patrol);

    let room = (width - patrol_distance - w).max(0.0);
    let offset = rand_between(rng, EDGE_INSET.min(room), room);
    let x = px + offset;

    Enemy {
        x,
        y: py - h,
        width: w,
        height: h,
        anchor_x: x,
        patrol_distance,
        direction: 1.0,
        speed: config.enemy_speed,
        kind,
    }
}

fn ground(config: &PlatformerConfig, x: f32, width: f32) -> Platform {
    Platform {
        x,
        y: config.ground_y(),
        width,
        height: config.ground_thickness,
        material: Material::Grass,
        placement: Placement::Ground,
    }
}

/// Append platforms, enemies and coins covering `[start_x, end_x)`.
///
/// The cursor may run past `end_x` by up to one platform plus a gap; where it
/// stopped is left in `state.gen_cursor` so the next chunk starts after it.
pub fn generate_segment(state: &mut GameState, start_x: f32, end_x: f32, rng: &mut impl Rng) {
    let config = &state.config;
    let mut x = start_x;

    while x < end_x {
        if x == 0.0 {
            // Spawn ground: one full chunk so the player always lands.
            state.platforms.push(ground(config, x, config.chunk_width));
            x += config.chunk_width;
            continue;
        }

        if rng.gen_bool(config.ground_probability) {
            let width = rand_between(rng, config.ground_min_width, config.ground_max_width);
            state.platforms.push(ground(config, x, width));
            x += width;
        } else {
            let width = rand_between(rng, config.platform_min_width, config.platform_max_width);
            let (y, placement) = find_floating_y(&state.platforms, x, width, config, rng);
            if placement == Placement::Fallback {
                debug!(x, width, "no clear height found, using fallback");
            }
            state.platforms.push(Platform {
                x,
                y,
                width,
                height: config.platform_thickness,
                material: material_for(x),
                placement,
            });

            if rng.gen_bool(config.enemy_probability) {
                let enemy = spawn_enemy(config, x, y, width, rng);
                debug!(kind = enemy.kind.name(), x = enemy.x, "enemy spawned");
                state.enemies.push(enemy);
            }

            let (min_coins, max_coins) = config.coins_per_platform;
            for _ in 0..rng.gen_range(min_coins..=max_coins) {
                let offset = rand_between(rng, EDGE_INSET, width - EDGE_INSET);
                state.coins.push(Coin {
                    x: x + offset,
                    y: y - COIN_LIFT,
                    size: config.coin_size,
                    collected: false,
                });
            }
            x += width;
        }

        x += rand_between(rng, config.gap_min, config.gap_max);
    }
    state.gen_cursor = state.gen_cursor.max(x);
}

/// Hearts sit at fixed fractions of the world width, once per session.
pub fn generate_hearts(config: &PlatformerConfig) -> Vec<Heart> {
    config
        .heart_fractions
        .iter()
        .map(|fraction| Heart {
            x: config.world_width * fraction,
            y: config.heart_y(),
            size: config.heart_size,
            heal: config.heart_heal,
            collected: false,
        })
        .collect()
}

/// Generate one more chunk if the player is within a chunk of the frontier
/// and the frontier has not reached the world ceiling.  Returns whether a
/// chunk was added.
///
/// The chunk picks up where the previous one's cursor stopped, so a ground
/// segment never lands on top of a platform that ran past the old frontier.
pub fn extend_frontier(state: &mut GameState, rng: &mut impl Rng) -> bool {
    let chunk = state.config.chunk_width;
    if state.player.x <= state.frontier - chunk || state.frontier >= state.config.world_width {
        return false;
    }
    let end = state.frontier + chunk;
    let start = state.frontier.max(state.gen_cursor);
    generate_segment(state, start, end, rng);
    state.frontier = end;
    debug!(
        frontier = state.frontier,
        platforms = state.platforms.len(),
        enemies = state.enemies.len(),
        "world extended"
    );
    true
}

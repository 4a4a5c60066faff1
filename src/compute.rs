/// Session loop: builds a fresh session and advances it one frame at a time.
///
/// `tick` is the only writer of a `GameState`.  All randomness comes through
/// the injected RNG so callers control determinism (tests use a seeded RNG).

use rand::Rng;
use tracing::info;

use crate::camera::camera_x;
use crate::combat::{
    enemy_fire, player_shoot, resolve_bullet_hits, resolve_enemy_bullets, resolve_melee,
    update_bullet, update_explosions,
};
use crate::config::PlatformerConfig;
use crate::entities::{BulletOwner, GameState, GameStatus, Player};
use crate::geometry::Bounds;
use crate::physics::{jump, update_enemy, update_player};
use crate::world_gen::{extend_frontier, generate_hearts, generate_segment};

/// One frame of player intent.  `left`/`right` are held keys; `jump` and
/// `shoot` are presses the front end reports once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub shoot: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a new session: spawn ground plus two chunks of world, the hearts,
/// and a player at the spawn point.
pub fn init_state(config: PlatformerConfig, high_score: u32, rng: &mut impl Rng) -> GameState {
    let player = Player::spawn(&config);
    let hearts = generate_hearts(&config);
    let mut state = GameState {
        config,
        player,
        platforms: Vec::new(),
        enemies: Vec::new(),
        bullets: Vec::new(),
        explosions: Vec::new(),
        coins: Vec::new(),
        hearts,
        camera_x: 0.0,
        frontier: 0.0,
        gen_cursor: 0.0,
        high_score,
        status: GameStatus::Playing,
        frame: 0,
    };

    let initial = state.config.chunk_width * 2.0;
    generate_segment(&mut state, 0.0, initial, rng);
    state.frontier = initial;
    state.camera_x = camera_x(state.player.x, &state.config);

    info!(
        platforms = state.platforms.len(),
        enemies = state.enemies.len(),
        coins = state.coins.len(),
        "session started"
    );
    state
}

/// Throw the whole session away and start over with the same config.
/// Only the best score carries across.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    let best = state.high_score.max(state.player.score);
    init_state(state.config.clone(), best, rng)
}

/// Grant permanent invincibility if `code` matches (case-insensitive).
pub fn activate_cheat_code(state: &mut GameState, code: &str) -> bool {
    if !code.trim().eq_ignore_ascii_case(&state.config.cheat_code) {
        return false;
    }
    state.player.permanent_invincibility = true;
    info!("cheat activated: permanent invincibility");
    true
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

fn apply_input(state: &mut GameState, input: &Input) {
    let player = &mut state.player;
    let config = &state.config;

    player.vx = 0.0;
    if input.left {
        player.vx = -config.player_speed;
        player.facing_right = false;
    }
    if input.right {
        player.vx = config.player_speed;
        player.facing_right = true;
    }
    if input.jump {
        jump(player, config);
    }
    if input.shoot {
        if let Some(bullet) = player_shoot(player, config) {
            state.bullets.push(bullet);
        }
    }
}

/// Coins and hearts stay in their containers once collected so totals
/// remain queryable.
pub fn collect_pickups(state: &mut GameState) {
    let player = &mut state.player;
    let config = &state.config;

    for coin in state.coins.iter_mut().filter(|c| !c.collected) {
        if player.hits(&*coin) {
            coin.collected = true;
            player.score += config.coin_score;
        }
    }
    for heart in state.hearts.iter_mut().filter(|h| !h.collected) {
        if player.hits(&*heart) {
            heart.collected = true;
            player.health = (player.health + heart.heal).min(config.max_health);
        }
    }
}

fn update_status(state: &mut GameState) {
    let player = &state.player;
    if player.lives == 0 {
        state.status = GameStatus::GameOver;
        info!(score = player.score, frame = state.frame, "game over");
    } else if player.x >= state.config.world_width - state.config.win_margin {
        state.status = GameStatus::Won;
        info!(score = player.score, frame = state.frame, "level complete");
    }
    state.high_score = state.high_score.max(player.score);
}

/// Advance the session by one frame.  Does nothing once the session has
/// ended.
pub fn tick(state: &mut GameState, input: &Input, rng: &mut impl Rng) {
    if state.status != GameStatus::Playing {
        return;
    }
    state.frame += 1;

    // ── 1. Input, player physics ─────────────────────────────────────────────
    apply_input(state, input);
    update_player(&mut state.player, &state.platforms, &state.config);

    // ── 2. Extend the world ahead of the player ──────────────────────────────
    extend_frontier(state, rng);

    // ── 3. Enemies: patrol, fall, contact damage ─────────────────────────────
    for enemy in state.enemies.iter_mut() {
        update_enemy(enemy, &state.platforms, &state.config);
        resolve_melee(enemy, &mut state.player, &state.config);
    }

    // ── 4. Player bullets: move, then hit enemies ────────────────────────────
    for bullet in state
        .bullets
        .iter_mut()
        .filter(|b| b.alive && b.owner == BulletOwner::Player)
    {
        update_bullet(bullet, &state.config);
    }
    resolve_bullet_hits(
        &mut state.bullets,
        &mut state.enemies,
        &mut state.explosions,
        &mut state.player,
        &state.config,
    );
    update_explosions(&mut state.explosions, &state.config);

    // ── 5. Shooters fire; enemy bullets move, then hit the player ────────────
    for enemy in state.enemies.iter_mut() {
        if let Some(bullet) = enemy_fire(enemy, &state.player, &state.config) {
            state.bullets.push(bullet);
        }
    }
    for bullet in state
        .bullets
        .iter_mut()
        .filter(|b| b.alive && b.owner == BulletOwner::Enemy)
    {
        update_bullet(bullet, &state.config);
    }
    resolve_enemy_bullets(&mut state.bullets, &mut state.player, &state.config);
    state.bullets.retain(|b| b.alive);

    // ── 6. Pickups, end conditions, camera ───────────────────────────────────
    collect_pickups(state);
    update_status(state);
    state.camera_x = camera_x(state.player.x, &state.config);
}

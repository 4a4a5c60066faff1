/// Entity types for a platformer session. Plain data; behaviour lives in the
/// physics, combat and world_gen modules.

use crate::config::PlatformerConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Won,
}

// ── Platforms ─────────────────────────────────────────────────────────────────

/// Visual tag only; physics treats every material the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    Grass,
    Ice,
    Stone,
}

/// How the generator arrived at a platform's height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Ground-level segment (including the spawn ground).
    Ground,
    /// Floating platform whose height passed the overlap check.
    Floating,
    /// Floating platform placed at the default height after the search gave up.
    Fallback,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub material: Material,
    pub placement: Placement,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    pub facing_right: bool,
    pub health: u32,
    pub lives: u32,
    /// Frames left in the current invincibility window.
    pub invincible_frames: u32,
    /// Cheat-granted, never expires.
    pub permanent_invincibility: bool,
    pub shoot_cooldown: u32,
    pub score: u32,
}

impl Player {
    pub fn spawn(config: &PlatformerConfig) -> Self {
        Player {
            x: config.spawn.0,
            y: config.spawn.1,
            vx: 0.0,
            vy: 0.0,
            width: config.player_width,
            height: config.player_height,
            on_ground: false,
            facing_right: true,
            health: config.max_health,
            lives: config.start_lives,
            invincible_frames: 0,
            permanent_invincibility: false,
            shoot_cooldown: 0,
            score: 0,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.permanent_invincibility || self.invincible_frames > 0
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    Basic,
    Flying,
    Fast,
    /// Fires an aimed bullet whenever `cooldown` reaches zero.
    Shooter { cooldown: u32 },
}

impl EnemyKind {
    /// Stable short name, used for logs and the render snapshot.
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Flying => "flying",
            EnemyKind::Fast => "fast",
            EnemyKind::Shooter { .. } => "shooter",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Left end of the patrol range (the spawn x).
    pub anchor_x: f32,
    pub patrol_distance: f32,
    /// −1.0 or +1.0.
    pub direction: f32,
    pub speed: f32,
    pub kind: EnemyKind,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub owner: BulletOwner,
    /// Cleared on impact or when leaving the world; dead bullets are
    /// compacted out at the end of the frame.
    pub alive: bool,
}

/// A purely cosmetic burst left behind by a destroyed enemy.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub frame: u32,
    pub done: bool,
}

// ── Collectibles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub collected: bool,
}

#[derive(Clone, Debug)]
pub struct Heart {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub heal: u32,
    pub collected: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session.  Owned by the frame loop; restart replaces it.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: PlatformerConfig,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    /// Player and enemy bullets, told apart by `owner`.
    pub bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub coins: Vec<Coin>,
    pub hearts: Vec<Heart>,
    pub camera_x: f32,
    /// Rightmost world x that has been generated.
    pub frontier: f32,
    /// Where the generator's cursor stopped; may run past `frontier` by up
    /// to one platform plus a gap.
    pub gen_cursor: f32,
    /// Best score seen this process; survives restarts, never written to disk.
    pub high_score: u32,
    pub status: GameStatus,
    pub frame: u64,
}

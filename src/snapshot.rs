/// Read-only view of one frame for a renderer.
///
/// Everything a renderer needs is copied out of the `GameState`, so drawing
/// never touches simulation state.  Collected pickups and dead bullets are
/// left out; sprites are in world space and `camera_x` gives the view.

use serde::Serialize;

use crate::entities::{BulletOwner, EnemyKind, GameState, GameStatus, Material};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteKind {
    Grass,
    Ice,
    Stone,
    Coin,
    Heart,
    Basic,
    Flying,
    Fast,
    Shooter,
    PlayerBullet,
    EnemyBullet,
    /// `frame` carries the explosion's age.
    Explosion,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub frame: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub facing_right: bool,
    pub on_ground: bool,
    pub walking: bool,
    /// True while damage is being ignored (blink).
    pub invincible: bool,
    pub permanent_invincibility: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub health: u32,
    pub max_health: u32,
    pub coins_collected: usize,
    pub coins_total: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub status: &'static str,
    pub camera_x: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub world_width: f32,
    pub player: PlayerView,
    /// Back to front: platforms, pickups, enemies, bullets, explosions.
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

fn sprite(kind: SpriteKind, x: f32, y: f32, w: f32, h: f32) -> Sprite {
    Sprite { kind, x, y, w, h, frame: 0 }
}

pub fn status_name(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "playing",
        GameStatus::GameOver => "game_over",
        GameStatus::Won => "won",
    }
}

pub fn snapshot(state: &GameState) -> FrameSnapshot {
    let mut sprites = Vec::with_capacity(
        state.platforms.len()
            + state.coins.len()
            + state.hearts.len()
            + state.enemies.len()
            + state.bullets.len()
            + state.explosions.len(),
    );

    for p in &state.platforms {
        let kind = match p.material {
            Material::Grass => SpriteKind::Grass,
            Material::Ice => SpriteKind::Ice,
            Material::Stone => SpriteKind::Stone,
        };
        sprites.push(sprite(kind, p.x, p.y, p.width, p.height));
    }
    for c in state.coins.iter().filter(|c| !c.collected) {
        sprites.push(sprite(SpriteKind::Coin, c.x, c.y, c.size, c.size));
    }
    for h in state.hearts.iter().filter(|h| !h.collected) {
        sprites.push(sprite(SpriteKind::Heart, h.x, h.y, h.size, h.size));
    }
    for e in &state.enemies {
        let kind = match e.kind {
            EnemyKind::Basic => SpriteKind::Basic,
            EnemyKind::Flying => SpriteKind::Flying,
            EnemyKind::Fast => SpriteKind::Fast,
            EnemyKind::Shooter { .. } => SpriteKind::Shooter,
        };
        sprites.push(sprite(kind, e.x, e.y, e.width, e.height));
    }
    for b in state.bullets.iter().filter(|b| b.alive) {
        let kind = match b.owner {
            BulletOwner::Player => SpriteKind::PlayerBullet,
            BulletOwner::Enemy => SpriteKind::EnemyBullet,
        };
        sprites.push(sprite(kind, b.x, b.y, b.width, b.height));
    }
    for ex in &state.explosions {
        sprites.push(Sprite {
            frame: ex.frame,
            ..sprite(SpriteKind::Explosion, ex.x, ex.y, 0.0, 0.0)
        });
    }

    let p = &state.player;
    FrameSnapshot {
        frame: state.frame,
        status: status_name(state.status),
        camera_x: state.camera_x,
        viewport_width: state.config.viewport_width,
        viewport_height: state.config.viewport_height,
        world_width: state.config.world_width,
        player: PlayerView {
            x: p.x,
            y: p.y,
            w: p.width,
            h: p.height,
            facing_right: p.facing_right,
            on_ground: p.on_ground,
            walking: p.on_ground && p.vx != 0.0,
            invincible: p.is_invincible(),
            permanent_invincibility: p.permanent_invincibility,
        },
        sprites,
        hud: Hud {
            score: p.score,
            high_score: state.high_score.max(p.score),
            lives: p.lives,
            health: p.health,
            max_health: state.config.max_health,
            coins_collected: state.coins.iter().filter(|c| c.collected).count(),
            coins_total: state.coins.len(),
        },
    }
}

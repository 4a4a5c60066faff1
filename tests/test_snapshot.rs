use platformer::compute::init_state;
use platformer::config::PlatformerConfig;
use platformer::entities::*;
use platformer::snapshot::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn state() -> GameState {
    init_state(PlatformerConfig::default(), 0, &mut StdRng::seed_from_u64(21))
}

fn count(snap: &FrameSnapshot, kind: SpriteKind) -> usize {
    snap.sprites.iter().filter(|s| s.kind == kind).count()
}

#[test]
fn every_platform_becomes_a_sprite() {
    let s = state();
    let snap = snapshot(&s);
    let platforms = count(&snap, SpriteKind::Grass)
        + count(&snap, SpriteKind::Ice)
        + count(&snap, SpriteKind::Stone);
    assert_eq!(platforms, s.platforms.len());
    // Platforms are drawn first
    assert_eq!(snap.sprites[0].kind, SpriteKind::Grass);
    assert_eq!(snap.sprites[0].w, 800.0);
}

#[test]
fn collected_coins_and_dead_bullets_are_hidden() {
    let mut s = state();
    s.coins = vec![
        Coin { x: 10.0, y: 10.0, size: 20.0, collected: true },
        Coin { x: 50.0, y: 10.0, size: 20.0, collected: false },
    ];
    s.bullets = vec![
        Bullet {
            x: 0.0,
            y: 0.0,
            vx: 12.0,
            vy: 0.0,
            width: 8.0,
            height: 3.0,
            owner: BulletOwner::Player,
            alive: false,
        },
        Bullet {
            x: 0.0,
            y: 0.0,
            vx: 6.0,
            vy: 0.0,
            width: 6.0,
            height: 3.0,
            owner: BulletOwner::Enemy,
            alive: true,
        },
    ];
    let snap = snapshot(&s);
    assert_eq!(count(&snap, SpriteKind::Coin), 1);
    assert_eq!(count(&snap, SpriteKind::PlayerBullet), 0);
    assert_eq!(count(&snap, SpriteKind::EnemyBullet), 1);
    assert_eq!(snap.hud.coins_collected, 1);
    assert_eq!(snap.hud.coins_total, 2);
}

#[test]
fn hud_mirrors_the_player() {
    let mut s = state();
    s.player.score = 120;
    s.player.health = 70;
    s.player.lives = 2;
    s.high_score = 90;
    let hud = snapshot(&s).hud;
    assert_eq!(hud.score, 120);
    assert_eq!(hud.high_score, 120);
    assert_eq!(hud.health, 70);
    assert_eq!(hud.max_health, 100);
    assert_eq!(hud.lives, 2);
}

#[test]
fn explosions_carry_their_age() {
    let mut s = state();
    s.explosions.push(Explosion { x: 300.0, y: 400.0, frame: 7, done: false });
    let snap = snapshot(&s);
    let ex = snap
        .sprites
        .iter()
        .find(|sp| sp.kind == SpriteKind::Explosion)
        .expect("explosion sprite");
    assert_eq!((ex.x, ex.y, ex.frame), (300.0, 400.0, 7));
}

#[test]
fn status_names() {
    assert_eq!(status_name(GameStatus::Playing), "playing");
    assert_eq!(status_name(GameStatus::GameOver), "game_over");
    assert_eq!(status_name(GameStatus::Won), "won");
}

#[test]
fn snapshot_serializes_to_json() {
    let snap = snapshot(&state());
    let json = serde_json::to_value(&snap).expect("serializable");
    assert_eq!(json["status"], "playing");
    assert_eq!(json["viewport_width"], 800.0);
    assert_eq!(json["sprites"][0]["kind"], "grass");
    assert_eq!(json["player"]["facing_right"], true);
}

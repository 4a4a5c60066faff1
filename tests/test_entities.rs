use platformer::config::PlatformerConfig;
use platformer::entities::*;

#[test]
fn entity_enums_compare() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(GameStatus::GameOver, GameStatus::Won);
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Enemy);
    assert_ne!(Placement::Floating, Placement::Fallback);

    // Shooter cooldown is payload, so two shooters differ by cooldown
    assert_eq!(EnemyKind::Shooter { cooldown: 3 }, EnemyKind::Shooter { cooldown: 3 });
    assert_ne!(EnemyKind::Shooter { cooldown: 3 }, EnemyKind::Shooter { cooldown: 4 });
}

#[test]
fn enemy_kind_names() {
    assert_eq!(EnemyKind::Basic.name(), "basic");
    assert_eq!(EnemyKind::Flying.name(), "flying");
    assert_eq!(EnemyKind::Fast.name(), "fast");
    assert_eq!(EnemyKind::Shooter { cooldown: 0 }.name(), "shooter");
}

#[test]
fn player_spawns_from_config() {
    let config = PlatformerConfig::default();
    let p = Player::spawn(&config);
    assert_eq!((p.x, p.y), (100.0, 100.0));
    assert_eq!((p.width, p.height), (32.0, 32.0));
    assert_eq!(p.health, 100);
    assert_eq!(p.lives, 3);
    assert_eq!(p.score, 0);
    assert!(p.facing_right);
    assert!(!p.on_ground);
    assert!(!p.is_invincible());
}

#[test]
fn invincibility_from_window_or_cheat() {
    let config = PlatformerConfig::default();
    let mut p = Player::spawn(&config);
    p.invincible_frames = 1;
    assert!(p.is_invincible());

    p.invincible_frames = 0;
    p.permanent_invincibility = true;
    assert!(p.is_invincible());
}

#[test]
fn game_state_clone_is_independent() {
    let config = PlatformerConfig::default();
    let original = GameState {
        player: Player::spawn(&config),
        platforms: Vec::new(),
        enemies: Vec::new(),
        bullets: Vec::new(),
        explosions: Vec::new(),
        coins: Vec::new(),
        hearts: Vec::new(),
        camera_x: 0.0,
        frontier: 0.0,
        gen_cursor: 0.0,
        high_score: 0,
        status: GameStatus::Playing,
        frame: 0,
        config,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 999.0;
    cloned.player.score = 999;
    cloned.coins.push(Coin { x: 5.0, y: 5.0, size: 20.0, collected: false });

    assert_eq!(original.player.x, 100.0);
    assert_eq!(original.player.score, 0);
    assert!(original.coins.is_empty());
}

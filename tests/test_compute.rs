use platformer::camera::camera_x;
use platformer::compute::*;
use platformer::config::PlatformerConfig;
use platformer::entities::*;
use platformer::physics::take_damage;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A session reduced to one full-width ground strip with the player resting
/// on it at x=100.  The frontier is already at the ceiling so ticks never
/// generate anything.
fn flat_state() -> GameState {
    let mut s = init_state(PlatformerConfig::default(), 0, &mut seeded_rng());
    s.platforms = vec![Platform {
        x: 0.0,
        y: 560.0,
        width: s.config.world_width,
        height: 40.0,
        material: Material::Grass,
        placement: Placement::Ground,
    }];
    s.enemies.clear();
    s.coins.clear();
    s.hearts.clear();
    s.bullets.clear();
    s.frontier = s.config.world_width;
    s.player.y = 560.0 - s.player.height;
    s.player.on_ground = true;
    s
}

fn right() -> Input {
    Input { right: true, ..Input::default() }
}

fn left() -> Input {
    Input { left: true, ..Input::default() }
}

// ── init_state / restart ─────────────────────────────────────────────────────

#[test]
fn init_state_starts_playing() {
    let s = init_state(PlatformerConfig::default(), 7, &mut seeded_rng());
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.frame, 0);
    assert_eq!(s.frontier, 1600.0);
    assert_eq!(s.hearts.len(), 3);
    assert_eq!(s.high_score, 7);
    assert_eq!(s.camera_x, 0.0);
    assert!(s.bullets.is_empty());
    assert!(s.explosions.is_empty());
    assert_eq!((s.player.x, s.player.y), (100.0, 100.0));
}

#[test]
fn restart_keeps_best_score() {
    let mut rng = seeded_rng();
    let mut s = init_state(PlatformerConfig::default(), 100, &mut rng);
    s.player.score = 500;
    s.player.lives = 0;
    s.status = GameStatus::GameOver;

    let fresh = restart(&s, &mut rng);
    assert_eq!(fresh.high_score, 500);
    assert_eq!(fresh.player.score, 0);
    assert_eq!(fresh.player.lives, 3);
    assert_eq!(fresh.status, GameStatus::Playing);
}

#[test]
fn restart_does_not_lower_best_score() {
    let mut rng = seeded_rng();
    let mut s = init_state(PlatformerConfig::default(), 900, &mut rng);
    s.player.score = 50;
    assert_eq!(restart(&s, &mut rng).high_score, 900);
}

// ── Input ────────────────────────────────────────────────────────────────────

#[test]
fn walking_right_on_ground() {
    let mut s = flat_state();
    tick(&mut s, &right(), &mut seeded_rng());
    assert_eq!(s.player.x, 105.0);
    assert_eq!(s.player.y, 528.0);
    assert!(s.player.on_ground);
    assert!(s.player.facing_right);
    assert_eq!(s.frame, 1);
}

#[test]
fn walking_left_turns_around() {
    let mut s = flat_state();
    tick(&mut s, &left(), &mut seeded_rng());
    assert_eq!(s.player.x, 95.0);
    assert!(!s.player.facing_right);
}

#[test]
fn no_input_stops_horizontal_motion() {
    let mut s = flat_state();
    let mut rng = seeded_rng();
    tick(&mut s, &right(), &mut rng);
    tick(&mut s, &Input::default(), &mut rng);
    assert_eq!(s.player.vx, 0.0);
    assert_eq!(s.player.x, 105.0);
}

#[test]
fn both_directions_means_right() {
    let mut s = flat_state();
    let both = Input { left: true, right: true, ..Input::default() };
    tick(&mut s, &both, &mut seeded_rng());
    assert_eq!(s.player.x, 105.0);
    assert!(s.player.facing_right);
}

#[test]
fn jump_leaves_the_ground() {
    let mut s = flat_state();
    let jump = Input { jump: true, ..Input::default() };
    tick(&mut s, &jump, &mut seeded_rng());
    assert!(!s.player.on_ground);
    assert!(s.player.y < 528.0);
    assert!(s.player.vy < 0.0);
}

#[test]
fn jump_and_land_again() {
    let mut s = flat_state();
    let mut rng = seeded_rng();
    tick(&mut s, &Input { jump: true, ..Input::default() }, &mut rng);
    let mut landed = false;
    for _ in 0..120 {
        tick(&mut s, &Input::default(), &mut rng);
        if s.player.on_ground {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert_eq!(s.player.y, 528.0);
}

#[test]
fn shoot_spawns_a_player_bullet() {
    let mut s = flat_state();
    let mut rng = seeded_rng();
    let shoot = Input { shoot: true, ..Input::default() };
    tick(&mut s, &shoot, &mut rng);
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].owner, BulletOwner::Player);
    // Moved once already this frame
    assert_eq!(s.bullets[0].x, 139.0 + 12.0);

    // Holding shoot respects the cooldown
    tick(&mut s, &shoot, &mut rng);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn bullets_are_compacted_once_dead() {
    let mut s = flat_state();
    let mut rng = seeded_rng();
    s.player.facing_right = false;
    tick(&mut s, &Input { shoot: true, ..Input::default() }, &mut rng);
    assert_eq!(s.bullets.len(), 1);
    for _ in 0..20 {
        tick(&mut s, &Input::default(), &mut rng);
    }
    assert!(s.bullets.is_empty());
}

// ── Combat in the loop ───────────────────────────────────────────────────────

#[test]
fn shooting_an_enemy_scores_and_explodes() {
    let mut s = flat_state();
    let mut rng = seeded_rng();
    s.enemies.push(Enemy {
        x: 200.0,
        y: 530.0,
        width: 30.0,
        height: 30.0,
        anchor_x: 200.0,
        patrol_distance: 0.0,
        direction: 1.0,
        speed: 2.0,
        kind: EnemyKind::Basic,
    });
    tick(&mut s, &Input { shoot: true, ..Input::default() }, &mut rng);
    for _ in 0..10 {
        if s.enemies.is_empty() {
            break;
        }
        tick(&mut s, &Input::default(), &mut rng);
    }
    assert!(s.enemies.is_empty());
    assert_eq!(s.player.score, 25);
    assert_eq!(s.explosions.len(), 1);
    assert!(s.high_score >= 25);
}

#[test]
fn walking_into_an_enemy_hurts() {
    let mut s = flat_state();
    s.enemies.push(Enemy {
        x: 110.0,
        y: 530.0,
        width: 30.0,
        height: 30.0,
        anchor_x: 110.0,
        patrol_distance: 0.0,
        direction: 1.0,
        speed: 2.0,
        kind: EnemyKind::Fast,
    });
    tick(&mut s, &Input::default(), &mut seeded_rng());
    assert_eq!(s.player.health, 80);
    assert!(s.player.is_invincible());
}

// ── Pickups ──────────────────────────────────────────────────────────────────

#[test]
fn coin_pickup_scores_once() {
    let mut s = flat_state();
    let mut rng = seeded_rng();
    s.coins.push(Coin { x: 110.0, y: 530.0, size: 20.0, collected: false });
    tick(&mut s, &Input::default(), &mut rng);
    assert_eq!(s.player.score, 10);
    assert_eq!(s.coins.len(), 1);
    assert!(s.coins[0].collected);

    tick(&mut s, &Input::default(), &mut rng);
    assert_eq!(s.player.score, 10);
}

#[test]
fn heart_heals_up_to_max() {
    let mut s = flat_state();
    s.player.health = 80;
    s.hearts.push(Heart { x: 105.0, y: 520.0, size: 30.0, heal: 40, collected: false });
    tick(&mut s, &Input::default(), &mut seeded_rng());
    assert_eq!(s.player.health, 100);
    assert!(s.hearts[0].collected);
}

#[test]
fn collect_pickups_ignores_distant_items() {
    let mut s = flat_state();
    s.coins.push(Coin { x: 400.0, y: 530.0, size: 20.0, collected: false });
    collect_pickups(&mut s);
    assert!(!s.coins[0].collected);
    assert_eq!(s.player.score, 0);
}

// ── End conditions ───────────────────────────────────────────────────────────

#[test]
fn last_life_lost_ends_the_session() {
    let mut s = flat_state();
    s.player.lives = 1;
    s.player.y = 700.0;
    s.player.on_ground = false;
    tick(&mut s, &Input::default(), &mut seeded_rng());
    assert_eq!(s.player.lives, 0);
    assert_eq!(s.status, GameStatus::GameOver);
}

#[test]
fn reaching_the_far_end_wins() {
    let mut s = flat_state();
    s.player.x = 9894.0;
    let mut rng = seeded_rng();
    tick(&mut s, &right(), &mut rng);
    assert_eq!(s.player.x, 9899.0);
    assert_eq!(s.status, GameStatus::Playing);
    tick(&mut s, &right(), &mut rng);
    assert_eq!(s.status, GameStatus::Won);
}

#[test]
fn ended_session_ignores_ticks() {
    let mut s = flat_state();
    s.status = GameStatus::GameOver;
    let before_x = s.player.x;
    tick(&mut s, &right(), &mut seeded_rng());
    assert_eq!(s.frame, 0);
    assert_eq!(s.player.x, before_x);
}

// ── Camera ───────────────────────────────────────────────────────────────────

#[test]
fn camera_centres_and_clamps() {
    let c = PlatformerConfig::default();
    assert_eq!(camera_x(100.0, &c), 0.0);
    assert_eq!(camera_x(5000.0, &c), 4600.0);
    assert_eq!(camera_x(9990.0, &c), 9200.0);
}

#[test]
fn camera_always_in_range() {
    let c = PlatformerConfig::default();
    let mut rng = seeded_rng();
    for _ in 0..1_000 {
        let x = rng.gen_range(-500.0..11_000.0);
        let cam = camera_x(x, &c);
        assert!((0.0..=9200.0).contains(&cam), "x={} cam={}", x, cam);
    }
}

#[test]
fn camera_follows_player_during_tick() {
    let mut s = flat_state();
    s.player.x = 5000.0;
    tick(&mut s, &right(), &mut seeded_rng());
    assert_eq!(s.camera_x, 4605.0);
}

// ── Cheat ────────────────────────────────────────────────────────────────────

#[test]
fn cheat_code_grants_permanent_invincibility() {
    let mut s = flat_state();
    assert!(!activate_cheat_code(&mut s, "iddqd"));
    assert!(!s.player.permanent_invincibility);

    assert!(activate_cheat_code(&mut s, " IDKFA "));
    assert!(s.player.permanent_invincibility);

    let config = s.config.clone();
    assert!(!take_damage(&mut s.player, 100, &config));
    assert_eq!(s.player.health, 100);
}

// ── Whole-session invariants ─────────────────────────────────────────────────

#[test]
fn random_play_keeps_invariants() {
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = init_state(PlatformerConfig::default(), 0, &mut rng);
        let mut last_frontier = s.frontier;

        for _ in 0..3_000 {
            let input = Input {
                left: rng.gen_bool(0.2),
                right: rng.gen_bool(0.7),
                jump: rng.gen_bool(0.1),
                shoot: rng.gen_bool(0.2),
            };
            tick(&mut s, &input, &mut rng);

            assert!(s.player.health > 0 && s.player.health <= 100);
            assert!((0.0..=9200.0).contains(&s.camera_x));
            assert!(s.player.x >= 0.0 && s.player.x <= s.config.world_width - s.player.width);
            assert!(s.frontier >= last_frontier);
            last_frontier = s.frontier;
            assert!(s.bullets.iter().all(|b| b.alive));
            for e in &s.enemies {
                assert!(e.x >= e.anchor_x && e.x <= e.anchor_x + e.patrol_distance);
            }
            assert!(s.high_score >= s.player.score);
            if s.status != GameStatus::Playing {
                break;
            }
        }
    }
}

/// Every tunable of a platformer session.
///
/// `Default` reproduces the classic 800×600 / 60 FPS game.  The binary
/// overrides a handful of fields from the command line and calls
/// [`PlatformerConfig::validate`] before starting a session.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct PlatformerConfig {
    // ── Viewport & clock ─────────────────────────────────────────────────────
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub fps: u32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_health: u32,
    pub start_lives: u32,
    pub spawn: (f32, f32),
    pub invincibility_frames: u32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub shooter_width: f32,
    pub shooter_height: f32,
    pub enemy_speed: f32,
    /// Downward step applied before enemies snap back onto their platform.
    pub enemy_fall_step: f32,
    pub contact_damage: u32,
    pub shooter_cooldown_frames: u32,

    // ── Weapons ──────────────────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub shoot_cooldown_frames: u32,
    pub gun_length: f32,
    pub gun_height: f32,
    pub gun_offset_x: f32,
    pub gun_offset_y: f32,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_width: f32,
    pub enemy_bullet_height: f32,
    pub enemy_bullet_damage: u32,
    /// Vertical slack beyond the viewport before an enemy bullet is dropped.
    pub enemy_bullet_margin: f32,
    pub explosion_frames: u32,

    // ── Collectibles & scoring ───────────────────────────────────────────────
    pub coin_size: f32,
    pub coin_score: u32,
    pub kill_score: u32,
    pub heart_size: f32,
    pub heart_heal: u32,
    /// Heart x-positions as fractions of the world width.
    pub heart_fractions: Vec<f32>,

    // ── World generation ─────────────────────────────────────────────────────
    pub chunk_width: f32,
    pub world_width: f32,
    /// Reaching `world_width - win_margin` wins the session.
    pub win_margin: f32,
    pub ground_thickness: f32,
    pub ground_probability: f64,
    pub ground_min_width: f32,
    pub ground_max_width: f32,
    pub platform_thickness: f32,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    pub placement_attempts: u32,
    /// Largest tolerated horizontal overlap, as a fraction of the new width.
    pub overlap_tolerance: f32,
    pub min_vertical_gap: f32,
    pub enemy_probability: f64,
    /// Weights for basic / flying / fast / shooter.
    pub enemy_weights: [u32; 4],
    pub min_patrol: f32,
    pub coins_per_platform: (u32, u32),

    pub cheat_code: String,
}

impl PlatformerConfig {
    /// Resting `y` of ground segments.
    pub fn ground_y(&self) -> f32 {
        self.viewport_height - self.ground_thickness
    }

    /// Inclusive range for random floating-platform heights.
    pub fn floating_y_range(&self) -> (f32, f32) {
        (self.viewport_height - 200.0, self.viewport_height - 80.0)
    }

    /// Height used when no clear position is found.
    pub fn fallback_y(&self) -> f32 {
        self.viewport_height - 120.0
    }

    pub fn heart_y(&self) -> f32 {
        self.viewport_height - 150.0
    }

    pub fn max_camera_x(&self) -> f32 {
        (self.world_width - self.viewport_width).max(0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width < self.viewport_width {
            return Err(ConfigError::WorldNarrowerThanViewport {
                world: self.world_width,
                viewport: self.viewport_width,
            });
        }
        if self.chunk_width <= 0.0 {
            return Err(ConfigError::NonPositive("chunk_width"));
        }
        if self.fps == 0 {
            return Err(ConfigError::NonPositive("fps"));
        }
        if self.start_lives == 0 {
            return Err(ConfigError::NonPositive("start_lives"));
        }
        if self.platform_min_width > self.platform_max_width {
            return Err(ConfigError::EmptyRange("platform width"));
        }
        if self.ground_min_width > self.ground_max_width {
            return Err(ConfigError::EmptyRange("ground width"));
        }
        if self.gap_min > self.gap_max {
            return Err(ConfigError::EmptyRange("gap"));
        }
        if self.coins_per_platform.0 > self.coins_per_platform.1 {
            return Err(ConfigError::EmptyRange("coins per platform"));
        }
        // Coins are dropped at [20, width - 20] along the platform.
        if self.platform_min_width < 40.0 {
            return Err(ConfigError::PlatformTooNarrow(self.platform_min_width));
        }
        for (name, p) in [
            ("ground_probability", self.ground_probability),
            ("enemy_probability", self.enemy_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::ProbabilityOutOfRange(name, p));
            }
        }
        if self.enemy_weights.iter().all(|&w| w == 0) {
            return Err(ConfigError::NoEnemyWeights);
        }
        Ok(())
    }
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            fps: 60,

            player_width: 32.0,
            player_height: 32.0,
            player_speed: 5.0,
            jump_velocity: -15.0,
            gravity: 0.7,
            max_health: 100,
            start_lives: 3,
            spawn: (100.0, 100.0),
            invincibility_frames: 60,

            enemy_width: 30.0,
            enemy_height: 30.0,
            shooter_width: 50.0,
            shooter_height: 50.0,
            enemy_speed: 2.0,
            enemy_fall_step: 1.0,
            contact_damage: 20,
            shooter_cooldown_frames: 90,

            bullet_speed: 12.0,
            bullet_width: 8.0,
            bullet_height: 3.0,
            shoot_cooldown_frames: 12,
            gun_length: 22.0,
            gun_height: 10.0,
            gun_offset_x: 15.0,
            gun_offset_y: 14.0,
            enemy_bullet_speed: 6.0,
            enemy_bullet_width: 6.0,
            enemy_bullet_height: 3.0,
            enemy_bullet_damage: 10,
            enemy_bullet_margin: 100.0,
            explosion_frames: 20,

            coin_size: 20.0,
            coin_score: 10,
            kill_score: 25,
            heart_size: 30.0,
            heart_heal: 40,
            heart_fractions: vec![0.2, 0.45, 0.7],

            chunk_width: 800.0,
            world_width: 10_000.0,
            win_margin: 100.0,
            ground_thickness: 40.0,
            ground_probability: 0.4,
            ground_min_width: 200.0,
            ground_max_width: 400.0,
            platform_thickness: 20.0,
            platform_min_width: 200.0,
            platform_max_width: 400.0,
            gap_min: 50.0,
            gap_max: 150.0,
            placement_attempts: 50,
            overlap_tolerance: 0.1,
            min_vertical_gap: 80.0,
            enemy_probability: 0.7,
            enemy_weights: [55, 10, 20, 15],
            min_patrol: 30.0,
            coins_per_platform: (1, 3),

            cheat_code: "idkfa".to_string(),
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// A configuration that cannot drive a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    WorldNarrowerThanViewport { world: f32, viewport: f32 },
    NonPositive(&'static str),
    EmptyRange(&'static str),
    PlatformTooNarrow(f32),
    ProbabilityOutOfRange(&'static str, f64),
    NoEnemyWeights,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WorldNarrowerThanViewport { world, viewport } => write!(
                f,
                "world width {} is smaller than the viewport width {}",
                world, viewport
            ),
            ConfigError::NonPositive(field) => write!(f, "{} must be positive", field),
            ConfigError::EmptyRange(what) => write!(f, "{} range is empty (min > max)", what),
            ConfigError::PlatformTooNarrow(w) => {
                write!(f, "platform minimum width {} is below 40", w)
            }
            ConfigError::ProbabilityOutOfRange(field, p) => {
                write!(f, "{} is {}, expected a probability in [0, 1]", field, p)
            }
            ConfigError::NoEnemyWeights => write!(f, "enemy variant weights are all zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

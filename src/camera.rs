use crate::config::PlatformerConfig;

/// Horizontal view offset centred on `player_x`, clamped so the viewport
/// never shows past either end of the world.  Instant follow, no smoothing.
pub fn camera_x(player_x: f32, config: &PlatformerConfig) -> f32 {
    let target = player_x - config.viewport_width / 2.0;
    target.min(config.max_camera_x()).max(0.0)
}

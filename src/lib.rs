//! arcade-sim - deterministic simulation core for small 2D arcade games
//!
//! Core modules:
//! - `sim::shooter`: top-down shooter (waves, power-ups, multi-phase bosses)
//! - `sim::platformer`: gravity platformer (checkpoints, coins, kill plane)
//! - `sim::step`: fixed-timestep driver shared by both rule sets
//! - `sim::arena`: tombstone entity storage
//!
//! The crate is headless: no rendering, no input devices, no timers. A
//! frontend samples input into the per-tick input structs and drives the
//! simulation through [`FixedTimestep`].

pub mod sim;

pub use sim::aabb::Aabb;
pub use sim::arena::{Arena, EntityId};
pub use sim::step::{FixedTimestep, Simulation};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the original frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Entity sizes (width, height)
    pub const PLAYER_SIZE: (f32, f32) = (50.0, 50.0);
    pub const BULLET_SIZE: (f32, f32) = (5.0, 10.0);
    pub const TARGET_SIZE: (f32, f32) = (30.0, 30.0);
    pub const ENEMY_SIZE: (f32, f32) = (40.0, 40.0);
    pub const POWER_UP_SIZE: (f32, f32) = (20.0, 20.0);
    pub const BOSS_SIZE: (f32, f32) = (100.0, 100.0);

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 420.0;
    pub const BULLET_DAMAGE: i32 = 10;

    /// Fire gating (0.2 s between shots; 0.05 s under rapid fire)
    pub const FIRE_COOLDOWN_TICKS: u32 = 12;
    pub const RAPID_FIRE_COOLDOWN_TICKS: u32 = 3;

    /// Targets fall somewhere in this speed band (pixels/sec)
    pub const TARGET_MIN_FALL_SPEED: f32 = 120.0;
    pub const TARGET_MAX_FALL_SPEED: f32 = 240.0;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 120.0;
    pub const ENEMY_FIRE_INTERVAL_TICKS: u32 = 60;

    /// Power-ups: 5 s on the field, 5 s of effect once collected
    pub const POWER_UP_FIELD_TTL_TICKS: u32 = 5 * 60;
    pub const POWER_UP_EFFECT_TICKS: u32 = 5 * 60;
    /// Spawn chance per tick, percent
    pub const POWER_UP_SPAWN_PERCENT: u32 = 1;

    /// Boss defaults
    pub const BOSS_SPEED: f32 = 120.0;
    pub const BOSS_STAGE1_HEALTH: i32 = 100;
    pub const BOSS_STAGE2_HEALTH: i32 = 200;
    pub const BOSS_AIMED_INTERVAL_TICKS: u32 = 60;
    pub const BOSS_SPREAD_INTERVAL_TICKS: u32 = 30;
    pub const BOSS_RING_INTERVAL_TICKS: u32 = 180;
    pub const BOSS_RING_DAMAGE: i32 = 15;
    pub const BOSS_MINION_COUNT: usize = 3;

    /// Scoring
    pub const TARGET_SCORE: u64 = 10;
    pub const BOSS_SCORE: u64 = 100;

    /// Platformer tuning
    pub const GRAVITY: f32 = 1800.0;
    pub const MOVE_SPEED: f32 = 260.0;
    pub const JUMP_SPEED: f32 = 650.0;
    pub const ACTOR_SIZE: (f32, f32) = (24.0, 32.0);
    pub const CHECKPOINT_POINTS: u64 = 50;
    pub const COIN_POINTS: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;
}

/// Velocity vector for a speed and heading angle (radians)
#[inline]
pub fn velocity_from_angle(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Advance a position along a heading for dt seconds.
///
/// Pure function of its arguments. Every straight-line mover (bullets,
/// homing enemies, the boss) integrates through here, so movement never
/// depends on surrounding state.
#[inline]
pub fn step_position(pos: Vec2, speed: f32, angle: f32, dt: f32) -> Vec2 {
    pos + velocity_from_angle(speed, angle) * dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Same arguments, same result - no hidden state
        #[test]
        fn prop_step_position_is_pure(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            speed in 0.0f32..500.0,
            angle in -std::f32::consts::PI..std::f32::consts::PI,
        ) {
            let pos = Vec2::new(x, y);
            let a = step_position(pos, speed, angle, consts::SIM_DT);
            let b = step_position(pos, speed, angle, consts::SIM_DT);
            prop_assert_eq!(a, b);
        }

        /// Displacement decomposes as speed * dt along the heading
        #[test]
        fn prop_step_position_displacement(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            speed in 0.0f32..500.0,
            angle in -std::f32::consts::PI..std::f32::consts::PI,
        ) {
            let pos = Vec2::new(x, y);
            let moved = step_position(pos, speed, angle, consts::SIM_DT);
            let displacement = (moved - pos).length();
            let expected = speed * consts::SIM_DT;
            prop_assert!((displacement - expected).abs() < 1e-2);
        }
    }

    #[test]
    fn test_zero_speed_is_stationary() {
        let pos = Vec2::new(42.0, 17.0);
        assert_eq!(step_position(pos, 0.0, 1.3, consts::SIM_DT), pos);
    }

    #[test]
    fn test_heading_axes() {
        let pos = Vec2::ZERO;
        let right = step_position(pos, 60.0, 0.0, 1.0);
        assert!((right.x - 60.0).abs() < 1e-4 && right.y.abs() < 1e-4);

        let down = step_position(pos, 60.0, std::f32::consts::FRAC_PI_2, 1.0);
        assert!(down.x.abs() < 1e-3 && (down.y - 60.0).abs() < 1e-4);
    }
}

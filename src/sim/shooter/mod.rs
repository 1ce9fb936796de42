//! Top-down shooter rule set
//!
//! Waves of falling targets, homing enemies, timed power-ups, and a
//! multi-phase boss at the end of every wave.

pub mod state;
pub mod tick;

pub use state::{
    ActiveEffects, Boss, BossKind, Bullet, Enemy, Faction, Player, PowerUp, PowerUpKind,
    ShooterPhase, ShooterState, Target,
};
pub use tick::{PlayerInput, ShooterInput, generate_wave, tick};

//! Side-view platformer rule set
//!
//! Constant gravity, axis-aligned platform blocks, checkpoints that score
//! once and move the respawn point, coins, a kill plane, and a goal region.

pub mod state;
pub mod tick;

pub use state::{
    Actor, Checkpoint, Coin, LevelLayout, PlatformerPhase, PlatformerState,
};
pub use tick::{PlatformerInput, tick};

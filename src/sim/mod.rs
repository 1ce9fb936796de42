//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order; compaction runs after traversal)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod arena;
pub mod platformer;
pub mod shooter;
pub mod step;

pub use aabb::Aabb;
pub use arena::{Arena, EntityId};
pub use step::{FixedTimestep, Simulation};

//! Platformer entities and run state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::aabb::Aabb;
use crate::sim::arena::Arena;

/// Current phase of a platformer run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformerPhase {
    Playing,
    /// Goal reached
    LevelComplete,
    /// Out of lives
    GameOver,
}

/// The player body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Standing on a block top as of the last tick
    pub grounded: bool,
}

impl Actor {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(ACTOR_SIZE.0, ACTOR_SIZE.1),
            grounded: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Scores once on first touch, then anchors the respawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub region: Aabb,
    pub scored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub region: Aabb,
}

/// Static level description, decoupled from run state so one layout can
/// seed many runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub spawn: Vec2,
    pub blocks: Vec<Aabb>,
    pub checkpoints: Vec<Aabb>,
    pub coins: Vec<Aabb>,
    pub goal: Aabb,
    /// Falling past this y loses a life
    pub kill_plane_y: f32,
}

impl LevelLayout {
    /// Small demo course: a ground slab, three rising step platforms, two
    /// checkpoints, a coin run, goal on the far right
    pub fn demo() -> Self {
        Self {
            spawn: Vec2::new(40.0, 500.0),
            blocks: vec![
                Aabb::new(0.0, 560.0, 800.0, 40.0),
                Aabb::new(200.0, 460.0, 120.0, 20.0),
                Aabb::new(380.0, 380.0, 120.0, 20.0),
                Aabb::new(560.0, 300.0, 120.0, 20.0),
            ],
            checkpoints: vec![
                Aabb::new(250.0, 420.0, 40.0, 40.0),
                Aabb::new(610.0, 260.0, 40.0, 40.0),
            ],
            coins: vec![
                Aabb::new(150.0, 520.0, 16.0, 16.0),
                Aabb::new(420.0, 340.0, 16.0, 16.0),
                Aabb::new(700.0, 420.0, 16.0, 16.0),
            ],
            goal: Aabb::new(740.0, 480.0, 40.0, 80.0),
            kill_plane_y: 700.0,
        }
    }
}

/// Complete platformer state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformerState {
    pub time_ticks: u64,
    pub score: u64,
    pub lives: u8,
    pub phase: PlatformerPhase,
    pub actor: Actor,
    /// Where the actor reappears after losing a life
    pub respawn: Vec2,
    pub blocks: Vec<Aabb>,
    pub checkpoints: Arena<Checkpoint>,
    pub coins: Arena<Coin>,
    pub goal: Aabb,
    pub kill_plane_y: f32,
}

impl PlatformerState {
    pub fn new(layout: &LevelLayout) -> Self {
        let mut checkpoints = Arena::new();
        for &region in &layout.checkpoints {
            checkpoints.spawn(Checkpoint {
                region,
                scored: false,
            });
        }
        let mut coins = Arena::new();
        for &region in &layout.coins {
            coins.spawn(Coin { region });
        }

        Self {
            time_ticks: 0,
            score: 0,
            lives: STARTING_LIVES,
            phase: PlatformerPhase::Playing,
            actor: Actor::new(layout.spawn),
            respawn: layout.spawn,
            blocks: layout.blocks.clone(),
            checkpoints,
            coins,
            goal: layout.goal,
            kill_plane_y: layout.kill_plane_y,
        }
    }

    pub fn respawn_actor(&mut self) {
        self.actor = Actor::new(self.respawn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_from_layout() {
        let layout = LevelLayout::demo();
        let state = PlatformerState::new(&layout);

        assert_eq!(state.phase, PlatformerPhase::Playing);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.checkpoints.len(), layout.checkpoints.len());
        assert_eq!(state.coins.len(), layout.coins.len());
        assert_eq!(state.actor.pos, layout.spawn);
        assert_eq!(state.respawn, layout.spawn);
    }

    #[test]
    fn test_respawn_resets_velocity() {
        let layout = LevelLayout::demo();
        let mut state = PlatformerState::new(&layout);
        state.actor.vel = Vec2::new(100.0, 900.0);
        state.actor.pos = Vec2::new(300.0, 650.0);
        state.respawn = Vec2::new(250.0, 420.0);

        state.respawn_actor();

        assert_eq!(state.actor.pos, Vec2::new(250.0, 420.0));
        assert_eq!(state.actor.vel, Vec2::ZERO);
        assert!(!state.actor.grounded);
    }

    #[test]
    fn test_demo_layout_is_consistent() {
        let layout = LevelLayout::demo();
        // Checkpoints and goal rest on block tops
        let block_tops: Vec<f32> = layout.blocks.iter().map(|b| b.pos.y).collect();
        for cp in &layout.checkpoints {
            assert!(block_tops.contains(&cp.max().y));
        }
        assert!(block_tops.contains(&layout.goal.max().y));
        // Kill plane sits below everything
        for block in &layout.blocks {
            assert!(block.max().y < layout.kill_plane_y);
        }
    }
}

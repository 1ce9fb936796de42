//! Platformer per-tick update
//!
//! Axis-separated movement: integrate x, resolve against blocks, then
//! integrate y and resolve again. Landing is whichever y-resolution pushed
//! the actor up out of a block.

use glam::Vec2;

use super::state::{PlatformerPhase, PlatformerState};
use crate::consts::*;
use crate::sim::arena::EntityId;
use crate::sim::step::Simulation;

/// Sampled input for a tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformerInput {
    /// Horizontal axis in -1..1
    pub move_axis: f32,
    pub jump: bool,
}

impl Simulation for PlatformerState {
    type Input = PlatformerInput;

    fn tick(&mut self, input: &PlatformerInput, dt: f32) {
        tick(self, input, dt);
    }
}

/// Advance the platformer by one fixed timestep
pub fn tick(state: &mut PlatformerState, input: &PlatformerInput, dt: f32) {
    if state.phase != PlatformerPhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // --- Movement intent ---
    let actor = &mut state.actor;
    actor.vel.x = input.move_axis.clamp(-1.0, 1.0) * MOVE_SPEED;
    if input.jump && actor.grounded {
        actor.vel.y = -JUMP_SPEED;
        actor.grounded = false;
    }
    actor.vel.y += GRAVITY * dt;

    // --- X axis: integrate then push out of blocks ---
    actor.pos.x += actor.vel.x * dt;
    for block in &state.blocks {
        if actor.aabb().overlaps(block) {
            if actor.vel.x > 0.0 {
                actor.pos.x = block.pos.x - actor.size.x;
            } else if actor.vel.x < 0.0 {
                actor.pos.x = block.max().x;
            }
            actor.vel.x = 0.0;
        }
    }

    // --- Y axis: integrate, land on tops, bump heads on bottoms ---
    actor.grounded = false;
    actor.pos.y += actor.vel.y * dt;
    for block in &state.blocks {
        if actor.aabb().overlaps(block) {
            if actor.vel.y > 0.0 {
                actor.pos.y = block.pos.y - actor.size.y;
                actor.vel.y = 0.0;
                actor.grounded = true;
            } else if actor.vel.y < 0.0 {
                actor.pos.y = block.max().y;
                actor.vel.y = 0.0;
            }
        }
    }

    let actor_box = state.actor.aabb();

    // --- Checkpoints: score once, then anchor the respawn ---
    let mut reached: Vec<crate::Aabb> = Vec::new();
    for (_, checkpoint) in state.checkpoints.iter_mut() {
        if !checkpoint.scored && actor_box.overlaps(&checkpoint.region) {
            checkpoint.scored = true;
            reached.push(checkpoint.region);
        }
    }
    for region in reached {
        state.score += CHECKPOINT_POINTS;
        state.respawn = Vec2::new(
            region.center().x - state.actor.size.x / 2.0,
            region.max().y - state.actor.size.y,
        );
        log::info!("Checkpoint reached, score {}", state.score);
    }

    // --- Coins ---
    let collected: Vec<EntityId> = state
        .coins
        .iter()
        .filter(|(_, coin)| actor_box.overlaps(&coin.region))
        .map(|(id, _)| id)
        .collect();
    for id in collected {
        state.coins.kill(id);
        state.score += COIN_POINTS;
    }

    // --- Goal and kill plane ---
    if actor_box.overlaps(&state.goal) {
        state.phase = PlatformerPhase::LevelComplete;
        log::info!(
            "Level complete in {} ticks with score {}",
            state.time_ticks,
            state.score
        );
    } else if state.actor.pos.y > state.kill_plane_y {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = PlatformerPhase::GameOver;
            log::info!("Game over with score {}", state.score);
        } else {
            state.respawn_actor();
            log::debug!("Fell out, {} lives left", state.lives);
        }
    }

    state.coins.compact();
}

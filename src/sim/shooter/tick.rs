//! Shooter per-tick update
//!
//! One pass over the whole rule set: input, movement, firing, collision
//! resolution, spawning, and phase transitions. Entity removal is tombstoned
//! during the pass and compacted at the very end, never mid-traversal.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Boss, BossKind, Bullet, Enemy, Faction, PowerUp, PowerUpKind, ShooterPhase, ShooterState,
    Target,
};
use crate::consts::*;
use crate::sim::arena::EntityId;
use crate::sim::step::Simulation;
use crate::step_position;

// Stream salts so independent spawn decisions in one tick never share RNG
const SALT_WAVE: u64 = 1;
const SALT_POWER_UP: u64 = 2;
const SALT_TARGET_WRAP: u64 = 3;
const SALT_MINIONS: u64 = 4;

/// Per-target wrap salt. The id sits in the high bits, so no id value can
/// make a wrap salt alias one of the base salts above.
fn wrap_salt(id: EntityId) -> u64 {
    SALT_TARGET_WRAP + ((id.0 as u64) << 32)
}

/// One player's sampled input for a tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    /// Movement axes, each in -1..1
    pub move_x: f32,
    pub move_y: f32,
    /// Absolute aim heading in radians
    pub aim: f32,
    pub fire: bool,
}

/// Input for the whole roster; missing entries read as idle
#[derive(Debug, Clone, Default)]
pub struct ShooterInput {
    pub players: Vec<PlayerInput>,
}

impl Simulation for ShooterState {
    type Input = ShooterInput;

    fn tick(&mut self, input: &ShooterInput, dt: f32) {
        tick(self, input, dt);
    }
}

fn nearest_center(centers: &[Vec2], pos: Vec2) -> Option<Vec2> {
    centers.iter().copied().min_by(|a, b| {
        a.distance_squared(pos)
            .partial_cmp(&b.distance_squared(pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn heading_toward(from: Vec2, to: Vec2) -> f32 {
    (to - from).y.atan2((to - from).x)
}

/// Advance the shooter by one fixed timestep
pub fn tick(state: &mut ShooterState, input: &ShooterInput, dt: f32) {
    if state.phase == ShooterPhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // --- Players: movement, effect timers, firing ---
    for i in 0..state.players.len() {
        let pin = input.players.get(i).copied().unwrap_or_default();
        let player = &mut state.players[i];
        if !player.alive() {
            continue;
        }

        player.aim = pin.aim;
        let axis = Vec2::new(pin.move_x.clamp(-1.0, 1.0), pin.move_y.clamp(-1.0, 1.0));
        player.pos += axis * PLAYER_SPEED * dt;
        player.pos.x = player.pos.x.clamp(0.0, ARENA_WIDTH - PLAYER_SIZE.0);
        player.pos.y = player.pos.y.clamp(0.0, ARENA_HEIGHT - PLAYER_SIZE.1);

        player.effects.tick();
        player.fire_cooldown_ticks = player.fire_cooldown_ticks.saturating_sub(1);

        if pin.fire && player.fire_cooldown_ticks == 0 {
            // Rapid fire swaps in a shorter cooldown instead of bypassing
            // the gate outright, so a held key can't emit a bullet per tick
            let damage = if player.effects.double_damage_active() {
                BULLET_DAMAGE * 2
            } else {
                BULLET_DAMAGE
            };
            player.fire_cooldown_ticks = if player.effects.rapid_fire_active() {
                RAPID_FIRE_COOLDOWN_TICKS
            } else {
                FIRE_COOLDOWN_TICKS
            };
            let pos = player.aabb().center();
            let angle = player.aim;
            state.bullets.spawn(Bullet {
                pos,
                angle,
                speed: BULLET_SPEED,
                damage,
                faction: Faction::Player,
            });
        }
    }

    // --- Bullets: integrate, cull off-arena ---
    for (_, bullet) in state.bullets.iter_mut() {
        bullet.pos = step_position(bullet.pos, bullet.speed, bullet.angle, dt);
    }
    let arena_rect = crate::Aabb::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT);
    state
        .bullets
        .kill_where(|_, b| !arena_rect.overlaps(&b.aabb()));

    // --- Targets: fall, wrap back in at the top ---
    let mut wrapped: Vec<EntityId> = Vec::new();
    for (id, target) in state.targets.iter_mut() {
        target.pos.y += target.fall_speed * dt;
        if target.pos.y > ARENA_HEIGHT {
            wrapped.push(id);
        }
    }
    for id in wrapped {
        let mut rng = state.rng_state.stream(state.time_ticks, wrap_salt(id));
        if let Some(target) = state.targets.get_mut(id) {
            target.pos.y = -TARGET_SIZE.1;
            target.pos.x = rng.random_range(0.0..ARENA_WIDTH - TARGET_SIZE.0);
        }
    }

    let player_centers: Vec<Vec2> = state
        .players
        .iter()
        .filter(|p| p.alive())
        .map(|p| p.aabb().center())
        .collect();

    // --- Enemies: home on the nearest player, fire aimed shots ---
    let mut enemy_shots: Vec<(Vec2, f32)> = Vec::new();
    for (_, enemy) in state.enemies.iter_mut() {
        let center = enemy.aabb().center();
        if let Some(target) = nearest_center(&player_centers, center) {
            let angle = heading_toward(center, target);
            enemy.pos = step_position(enemy.pos, enemy.speed, angle, dt);

            enemy.fire_cooldown_ticks = enemy.fire_cooldown_ticks.saturating_sub(1);
            if enemy.fire_cooldown_ticks == 0 {
                enemy_shots.push((enemy.aabb().center(), angle));
                enemy.fire_cooldown_ticks = enemy.fire_interval_ticks;
            }
        }
    }
    for (pos, angle) in enemy_shots {
        state.bullets.spawn(Bullet {
            pos,
            angle,
            speed: BULLET_SPEED,
            damage: BULLET_DAMAGE,
            faction: Faction::Enemy,
        });
    }

    // --- Boss: movement, phase attack pattern, minion summons ---
    let mut boss_shots: Vec<(Vec2, f32, i32)> = Vec::new();
    let mut summon_at: Option<Vec2> = None;
    if let Some(boss) = state.boss.as_mut() {
        let center = boss.aabb().center();
        if let Some(target) = nearest_center(&player_centers, center) {
            let angle = heading_toward(center, target);
            boss.pos = step_position(boss.pos, BOSS_SPEED, angle, dt);
        }

        boss.fire_cooldown_ticks = boss.fire_cooldown_ticks.saturating_sub(1);
        boss.special_cooldown_ticks = boss.special_cooldown_ticks.saturating_sub(1);

        let center = boss.aabb().center();
        match boss.phase {
            1 => {
                if boss.fire_cooldown_ticks == 0 {
                    if let Some(target) = nearest_center(&player_centers, center) {
                        boss_shots.push((center, heading_toward(center, target), BULLET_DAMAGE));
                        boss.fire_cooldown_ticks = BOSS_AIMED_INTERVAL_TICKS;
                    }
                }
            }
            2 => {
                if boss.fire_cooldown_ticks == 0 {
                    if let Some(target) = nearest_center(&player_centers, center) {
                        let aim = heading_toward(center, target);
                        for offset in [
                            -std::f32::consts::FRAC_PI_4,
                            0.0,
                            std::f32::consts::FRAC_PI_4,
                        ] {
                            boss_shots.push((center, aim + offset, BULLET_DAMAGE));
                        }
                        boss.fire_cooldown_ticks = BOSS_SPREAD_INTERVAL_TICKS;
                    }
                }
            }
            _ => {
                if boss.special_cooldown_ticks == 0 {
                    // Ring burst in all eight directions
                    for i in 0..8 {
                        let angle = i as f32 * std::f32::consts::FRAC_PI_4;
                        boss_shots.push((center, angle, BOSS_RING_DAMAGE));
                    }
                    boss.special_cooldown_ticks = BOSS_RING_INTERVAL_TICKS;
                }
            }
        }

        if boss.kind == BossKind::Stage2 && state.enemies.is_empty() {
            summon_at = Some(boss.pos);
        }
    }
    for (pos, angle, damage) in boss_shots {
        state.bullets.spawn(Bullet {
            pos,
            angle,
            speed: BULLET_SPEED,
            damage,
            faction: Faction::Enemy,
        });
    }
    if let Some(origin) = summon_at {
        let mut rng = state.rng_state.stream(state.time_ticks, SALT_MINIONS);
        for _ in 0..BOSS_MINION_COUNT {
            let offset = Vec2::new(rng.random_range(0.0..50.0), rng.random_range(0.0..50.0));
            state.enemies.spawn(Enemy::new(origin + offset));
        }
        log::info!("Boss summoned {} minions", BOSS_MINION_COUNT);
    }

    // --- Collision resolution (tombstones only; compaction comes last) ---
    let mut dead_bullets: Vec<EntityId> = Vec::new();
    let mut dead_targets: Vec<EntityId> = Vec::new();
    let mut dead_enemies: Vec<EntityId> = Vec::new();
    let mut boss_damage = 0i32;
    let mut player_hits: Vec<(usize, i32)> = Vec::new();

    for (bullet_id, bullet) in state.bullets.iter() {
        let bb = bullet.aabb();
        match bullet.faction {
            Faction::Player => {
                let mut consumed = false;
                for (target_id, target) in state.targets.iter() {
                    if !consumed
                        && !dead_targets.contains(&target_id)
                        && bb.overlaps(&target.aabb())
                    {
                        dead_targets.push(target_id);
                        consumed = true;
                    }
                }
                if !consumed {
                    for (enemy_id, enemy) in state.enemies.iter() {
                        if !consumed
                            && !dead_enemies.contains(&enemy_id)
                            && bb.overlaps(&enemy.aabb())
                        {
                            dead_enemies.push(enemy_id);
                            consumed = true;
                        }
                    }
                }
                if !consumed {
                    if let Some(boss) = &state.boss {
                        if bb.overlaps(&boss.aabb()) {
                            boss_damage += bullet.damage;
                            consumed = true;
                        }
                    }
                }
                if consumed {
                    dead_bullets.push(bullet_id);
                }
            }
            Faction::Enemy => {
                for (i, player) in state.players.iter().enumerate() {
                    if player.alive() && bb.overlaps(&player.aabb()) {
                        player_hits.push((i, bullet.damage));
                        dead_bullets.push(bullet_id);
                        break;
                    }
                }
            }
        }
    }

    for id in dead_bullets {
        state.bullets.kill(id);
    }
    for id in dead_targets {
        state.targets.kill(id);
        state.score += TARGET_SCORE;
    }
    for id in dead_enemies {
        state.enemies.kill(id);
    }
    for (i, damage) in player_hits {
        let player = &mut state.players[i];
        player.health = (player.health - damage).max(0);
        if !player.alive() {
            log::info!("Player {i} down");
        }
    }

    if boss_damage > 0 {
        let mut defeated = false;
        if let Some(boss) = state.boss.as_mut() {
            if boss.take_damage(boss_damage) {
                defeated = true;
            } else if boss.switch_phase() {
                log::info!(
                    "Boss phase {} at {}/{} hp",
                    boss.phase,
                    boss.health,
                    boss.max_health
                );
            }
        }
        if defeated {
            state.score += BOSS_SCORE;
            state.boss = None;
            state.enemies.clear();
            state.level += 1;
            state.phase = ShooterPhase::Playing;
            log::info!("Boss defeated, advancing to level {}", state.level);
            generate_wave(state);
        }
    }

    // --- Power-ups: expiry, pickup, spawn roll ---
    for (_, power_up) in state.power_ups.iter_mut() {
        power_up.ttl_ticks = power_up.ttl_ticks.saturating_sub(1);
    }
    state.power_ups.kill_where(|_, p| p.expired());

    let mut picked: Vec<(usize, EntityId, PowerUpKind)> = Vec::new();
    for (power_up_id, power_up) in state.power_ups.iter() {
        for (i, player) in state.players.iter().enumerate() {
            if player.alive() && player.aabb().overlaps(&power_up.aabb()) {
                picked.push((i, power_up_id, power_up.kind));
                break;
            }
        }
    }
    for (i, id, kind) in picked {
        if state.power_ups.is_alive(id) {
            state.power_ups.kill(id);
            state.players[i].effects.apply(kind);
        }
    }

    let mut rng = state.rng_state.stream(state.time_ticks, SALT_POWER_UP);
    if rng.random_range(0..100u32) < POWER_UP_SPAWN_PERCENT {
        let pos = Vec2::new(
            rng.random_range(0.0..ARENA_WIDTH - POWER_UP_SIZE.0),
            rng.random_range(0.0..ARENA_HEIGHT - 200.0),
        );
        let kind = if rng.random_bool(0.5) {
            PowerUpKind::DoubleDamage
        } else {
            PowerUpKind::RapidFire
        };
        state.power_ups.spawn(PowerUp::new(pos, kind));
    }

    // --- Phase transitions ---
    if state.phase == ShooterPhase::Playing && state.boss.is_none() && state.targets.is_empty() {
        let kind = if state.level % 2 == 0 {
            BossKind::Stage2
        } else {
            BossKind::Stage1
        };
        let pos = Vec2::new(ARENA_WIDTH / 2.0 - BOSS_SIZE.0 / 2.0, 50.0);
        state.boss = Some(Boss::new(kind, pos));
        state.phase = ShooterPhase::BossFight;
        log::info!("Wave {} cleared, {kind:?} boss incoming", state.level);
    }

    if state.all_players_dead() {
        state.phase = ShooterPhase::GameOver;
        log::info!(
            "Game over at level {} with score {}",
            state.level,
            state.score
        );
    }

    // --- Compaction: the only place tombstones are reclaimed ---
    state.bullets.compact();
    state.targets.compact();
    state.enemies.compact();
    state.power_ups.compact();
}

/// Populate the current level's wave: falling targets, plus escort enemies
/// from level 2 on
pub fn generate_wave(state: &mut ShooterState) {
    let mut rng = state.rng_state.stream(state.level as u64, SALT_WAVE);

    let target_count = 4 + state.level as usize;
    for _ in 0..target_count {
        let pos = Vec2::new(
            rng.random_range(0.0..ARENA_WIDTH - TARGET_SIZE.0),
            rng.random_range(0.0..ARENA_HEIGHT - 200.0),
        );
        let fall_speed = rng.random_range(TARGET_MIN_FALL_SPEED..TARGET_MAX_FALL_SPEED);
        state.targets.spawn(Target { pos, fall_speed });
    }

    let escort_count = if state.level >= 2 {
        1 + state.level as usize / 2
    } else {
        0
    };
    for _ in 0..escort_count {
        let pos = Vec2::new(
            rng.random_range(0.0..ARENA_WIDTH - ENEMY_SIZE.0),
            rng.random_range(0.0..ARENA_HEIGHT / 3.0),
        );
        state.enemies.spawn(Enemy::new(pos));
    }

    log::info!("Level {}: {target_count} targets, {escort_count} escorts", state.level);
}

//! Per-frame simulation step
//!
//! Order within a frame: clock and spawn timer, collisions, sprite updates.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::mask::rotated_extent;
use super::state::{GameEvent, GamePhase, GameState, Sprite, SpriteCatalog, SpriteKind};
use crate::consts::*;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held (space)
    pub fire: bool,
    /// Start or restart pressed (enter)
    pub start: bool,
}

impl TickInput {
    /// Raw movement axes: right-left, down-up. Not normalized.
    pub fn axis(&self) -> Vec2 {
        Vec2::new(
            self.right as i32 as f32 - self.left as i32 as f32,
            self.down as i32 as f32 - self.up as i32 as f32,
        )
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::StartScreen | GamePhase::GameOver => {
            if input.start {
                state.start_round();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ms += f64::from(dt) * 1000.0;

    // Meteor spawn timer
    while state.time_ms >= state.next_spawn_ms {
        state.spawn_meteor();
        state.next_spawn_ms += METEOR_SPAWN_INTERVAL_MS;
    }

    // A player hit ends the round, but this frame still finishes
    resolve_collisions(state);
    update_sprites(state, input, dt);
}

/// Update every sprite once and drop the ones that expired
fn update_sprites(state: &mut GameState, input: &TickInput, dt: f32) {
    let now_ms = state.time_ms;
    let catalog = &state.catalog;
    let mut shot_from: Option<Vec2> = None;

    state.sprites.retain_mut(|sprite| {
        update_sprite(sprite, catalog, input, dt, now_ms, &mut shot_from)
    });

    // Lasers join after the pass so they start moving next frame
    if let Some(anchor) = shot_from {
        state.spawn_laser(anchor);
        state.events.push(GameEvent::LaserFired);
    }
}

/// Returns false when the sprite should be removed
fn update_sprite(
    sprite: &mut Sprite,
    catalog: &SpriteCatalog,
    input: &TickInput,
    dt: f32,
    now_ms: f64,
    shot_from: &mut Option<Vec2>,
) -> bool {
    match &mut sprite.kind {
        SpriteKind::Player(player) => {
            if player.update(&mut sprite.pos, input.axis(), input.fire, dt, now_ms) {
                *shot_from = Some(sprite.rect().mid_top());
            }
            true
        }
        SpriteKind::Star => true,
        SpriteKind::Laser(laser) => {
            laser.update(&mut sprite.pos, dt);
            sprite.rect().bottom() >= 0.0
        }
        SpriteKind::Meteor(meteor) => {
            let alive = meteor.update(&mut sprite.pos, dt, now_ms);
            // Grow the box to the rotated image, keeping the same center
            sprite.size = rotated_extent(catalog.meteor.size(), meteor.rotation);
            alive
        }
        SpriteKind::Explosion(explosion) => {
            let alive = explosion.update(dt);
            if let Some(size) = explosion
                .current_frame()
                .and_then(|f| catalog.explosion_frames.get(f))
            {
                sprite.size = *size;
            }
            alive
        }
    }
}

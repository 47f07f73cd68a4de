//! Collision detection and resolution
//!
//! Two tests with different precision:
//! - Player vs meteor uses opacity masks, since a hit ends the round and the
//!   ship and rock silhouettes are far from rectangular.
//! - Laser vs meteor uses bounding boxes; lasers are thin and plentiful and a
//!   generous hit costs nothing.

use std::collections::HashSet;

use super::mask::Mask;
use super::rect::Rect;
use super::state::{GamePhase, GameState, SpriteKind};

/// What happened during one resolver pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// The player was hit and the round ended
    pub player_hit: bool,
    /// Meteors removed this pass (by the player or by lasers)
    pub meteors_destroyed: usize,
    /// Lasers consumed by hits
    pub lasers_spent: usize,
}

/// Pixel-accurate overlap between two sprites given their boxes and masks.
///
/// Boxes are checked first; masks are aligned on their whole-pixel top-left
/// corners.
pub fn masks_collide(a_rect: &Rect, a_mask: &Mask, b_rect: &Rect, b_mask: &Mask) -> bool {
    if !a_rect.overlaps(b_rect) {
        return false;
    }
    let offset = b_rect.pixel_origin() - a_rect.pixel_origin();
    a_mask.overlaps(b_mask, offset)
}

/// Run one collision pass. Only does work while a round is in progress.
///
/// A player hit removes every meteor touching the ship and ends the round.
/// Lasers are still resolved against the remaining meteors in the same pass.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    if state.phase != GamePhase::Playing {
        return report;
    }

    // Player vs meteors
    if let Some(player) = state.player() {
        let player_rect = player.rect();
        let player_mask = &state.catalog.player;

        let crushed: HashSet<u32> = state
            .sprites
            .iter()
            .filter_map(|sprite| match &sprite.kind {
                SpriteKind::Meteor(meteor) => {
                    let rect = sprite.rect();
                    if !rect.overlaps(&player_rect) {
                        return None;
                    }
                    let mask = state.catalog.meteor.rotated(meteor.rotation);
                    masks_collide(&player_rect, player_mask, &rect, &mask).then_some(sprite.id)
                }
                _ => None,
            })
            .collect();

        if !crushed.is_empty() {
            state.sprites.retain(|s| !crushed.contains(&s.id));
            report.player_hit = true;
            report.meteors_destroyed = crushed.len();
            log::debug!("Player hit by {} meteor(s)", crushed.len());
            state.end_round();
        }
    }

    // Lasers vs meteors
    let lasers: Vec<(u32, Rect)> = state.lasers().map(|s| (s.id, s.rect())).collect();
    let meteors: Vec<(u32, Rect)> = state.meteors().map(|s| (s.id, s.rect())).collect();
    let mut removed: HashSet<u32> = HashSet::new();
    let mut blasts = Vec::new();

    for (laser_id, laser_rect) in &lasers {
        let mut hits = 0;
        for (meteor_id, meteor_rect) in &meteors {
            if !removed.contains(meteor_id) && laser_rect.overlaps(meteor_rect) {
                removed.insert(*meteor_id);
                hits += 1;
            }
        }
        if hits > 0 {
            removed.insert(*laser_id);
            report.lasers_spent += 1;
            report.meteors_destroyed += hits;
            blasts.extend(std::iter::repeat_n(laser_rect.mid_top(), hits));
        }
    }

    if !removed.is_empty() {
        state.sprites.retain(|s| !removed.contains(&s.id));
        for pos in blasts {
            state.spawn_explosion(pos);
        }
        log::debug!(
            "{} laser(s) destroyed {} meteor(s)",
            report.lasers_spent,
            report.meteors_destroyed
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::tests::test_catalog;
    use crate::sim::state::{GameEvent, Meteor};
    use glam::Vec2;

    fn still_meteor(spawn_ms: f64) -> Meteor {
        Meteor {
            direction: Vec2::new(0.0, 1.0),
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            spawn_ms,
        }
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(3, test_catalog());
        state.start_round();
        state.drain_events();
        state
    }

    #[test]
    fn test_masks_collide_requires_solid_overlap() {
        let a_rect = Rect::new(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let b_rect = Rect::new(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0));

        let mut corner = Mask::empty(2, 2);
        corner.set(0, 0, true);
        let solid = Mask::filled(2, 2);

        // Boxes overlap on (1,1) only, which is transparent in `corner`
        assert!(!masks_collide(&a_rect, &corner, &b_rect, &solid));
        assert!(masks_collide(&a_rect, &solid, &b_rect, &solid));
    }

    #[test]
    fn test_meteor_on_player_ends_round() {
        let mut state = playing_state();
        state.time_ms += 2500.0;
        let player_pos = state.player().unwrap().pos;
        state.spawn_meteor_with(player_pos, still_meteor(state.time_ms));

        let report = resolve_collisions(&mut state);
        assert!(report.player_hit);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score, 2);
        assert_eq!(state.meteors().count(), 0);
        assert!(state.events.contains(&GameEvent::PlayerHit { score: 2 }));

        // Already over: a second pass is a no-op
        let again = resolve_collisions(&mut state);
        assert_eq!(again, CollisionReport::default());
    }

    #[test]
    fn test_lasers_still_resolve_when_player_is_hit() {
        let mut state = playing_state();
        let player_pos = state.player().unwrap().pos;
        state.spawn_meteor_with(player_pos, still_meteor(0.0));
        state.spawn_laser(Vec2::new(300.0, 300.0));
        state.spawn_meteor_with(Vec2::new(300.0, 295.0), still_meteor(0.0));

        let report = resolve_collisions(&mut state);
        assert!(report.player_hit);
        assert_eq!(report.lasers_spent, 1);
        assert_eq!(report.meteors_destroyed, 2);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.meteors().count(), 0);
        assert_eq!(state.lasers().count(), 0);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Explosion { .. }))
        );
    }

    #[test]
    fn test_transparent_player_pixels_do_not_kill() {
        let mut catalog = test_catalog();
        // Ship is a single solid pixel in the top-left corner
        let mut ship = Mask::empty(20, 20);
        ship.set(0, 0, true);
        catalog.player = ship;

        let mut state = GameState::new(3, catalog);
        state.start_round();
        let player_pos = state.player().unwrap().pos;
        // Meteor overlaps the lower-right quarter of the ship's box
        state.spawn_meteor_with(player_pos + Vec2::new(10.0, 10.0), still_meteor(0.0));

        let report = resolve_collisions(&mut state);
        assert!(!report.player_hit);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_laser_destroys_every_overlapping_meteor() {
        let mut state = playing_state();
        let laser_id = state.spawn_laser(Vec2::new(300.0, 300.0));
        let laser_top = state.lasers().next().unwrap().rect().mid_top();

        state.spawn_meteor_with(Vec2::new(300.0, 295.0), still_meteor(0.0));
        state.spawn_meteor_with(Vec2::new(303.0, 290.0), still_meteor(0.0));
        state.spawn_meteor_with(Vec2::new(297.0, 298.0), still_meteor(0.0));
        // Far away, untouched
        let survivor = state.spawn_meteor_with(Vec2::new(1500.0, 100.0), still_meteor(0.0));
        state.drain_events();

        let report = resolve_collisions(&mut state);
        assert_eq!(report.lasers_spent, 1);
        assert_eq!(report.meteors_destroyed, 3);
        assert!(state.sprites.iter().all(|s| s.id != laser_id));
        assert_eq!(state.meteors().map(|s| s.id).collect::<Vec<_>>(), vec![survivor]);

        let blasts: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Explosion { .. }))
            .collect();
        assert_eq!(blasts.len(), 3);
        assert!(blasts.iter().all(|e| **e == GameEvent::Explosion { pos: laser_top }));
    }

    #[test]
    fn test_meteor_only_consumed_by_first_laser() {
        let mut state = playing_state();
        state.spawn_laser(Vec2::new(500.0, 200.0));
        let second = state.spawn_laser(Vec2::new(502.0, 200.0));
        state.spawn_meteor_with(Vec2::new(501.0, 195.0), still_meteor(0.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.lasers_spent, 1);
        assert_eq!(report.meteors_destroyed, 1);
        // The second laser found nothing left to hit
        assert!(state.lasers().any(|s| s.id == second));
    }

    #[test]
    fn test_laser_miss_leaves_everything() {
        let mut state = playing_state();
        state.spawn_laser(Vec2::new(100.0, 900.0));
        state.spawn_meteor_with(Vec2::new(1000.0, 100.0), still_meteor(0.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report, CollisionReport::default());
        assert_eq!(state.lasers().count(), 1);
        assert_eq!(state.meteors().count(), 1);
    }
}

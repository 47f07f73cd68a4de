//! Macroquad rendering module
//!
//! Draws straight from `GameState`; nothing here feeds back into the
//! simulation.

pub mod screens;
pub mod sprites;

use macroquad::color::BLACK;
use macroquad::window::clear_background;

use crate::assets::Assets;
use crate::sim::{GamePhase, GameState};

/// Per-frame renderer bound to the loaded assets
pub struct Renderer<'a> {
    assets: &'a Assets,
    show_fps: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(assets: &'a Assets, show_fps: bool) -> Self {
        Self { assets, show_fps }
    }

    /// Render the current frame
    pub fn draw(&self, state: &GameState) {
        match state.phase {
            GamePhase::StartScreen => screens::draw_start_screen(),
            GamePhase::Playing => {
                clear_background(BLACK);
                sprites::draw_sprites(state, self.assets);
                screens::draw_score(&self.assets.font, state.score());
            }
            GamePhase::GameOver => {
                // Frozen playfield under the overlay
                clear_background(BLACK);
                sprites::draw_sprites(state, self.assets);
                screens::draw_game_over(state.final_score);
            }
        }

        if self.show_fps {
            screens::draw_fps();
        }
    }
}

//! Sprite drawing

use macroquad::color::WHITE;
use macroquad::texture::{DrawTextureParams, Texture2D, draw_texture_ex};

use crate::assets::Assets;
use crate::sim::{GameState, SpriteKind};

/// Draw every live sprite in insertion order
pub fn draw_sprites(state: &GameState, assets: &Assets) {
    for sprite in &state.sprites {
        match &sprite.kind {
            SpriteKind::Player(_) => draw_centered(&assets.player.texture, sprite.pos, 0.0),
            SpriteKind::Star => draw_centered(&assets.star.texture, sprite.pos, 0.0),
            SpriteKind::Laser(_) => draw_centered(&assets.laser.texture, sprite.pos, 0.0),
            SpriteKind::Meteor(meteor) => {
                draw_centered(&assets.meteor.texture, sprite.pos, meteor.rotation)
            }
            SpriteKind::Explosion(explosion) => {
                if let Some(frame) = explosion
                    .current_frame()
                    .and_then(|f| assets.explosion_frames.get(f))
                {
                    draw_centered(&frame.texture, sprite.pos, 0.0);
                }
            }
        }
    }
}

/// Draw a texture centered on `center`, turned counter-clockwise by `degrees`.
///
/// Macroquad rotates about the destination center, so the drawn image stays
/// centered on the sprite's logical position however far it has spun.
fn draw_centered(texture: &Texture2D, center: glam::Vec2, degrees: f32) {
    let size = texture.size();
    draw_texture_ex(
        texture,
        center.x - size.x / 2.0,
        center.y - size.y / 2.0,
        WHITE,
        DrawTextureParams {
            // Positive macroquad rotation is clockwise on screen
            rotation: -degrees.to_radians(),
            ..Default::default()
        },
    );
}

//! Text overlays: score, start screen, game over

use macroquad::color::{BLACK, Color, WHITE};
use macroquad::shapes::draw_rectangle;
use macroquad::text::{Font, TextDimensions, TextParams, draw_text_ex, measure_text};
use macroquad::time::get_fps;
use macroquad::window::clear_background;

use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};

const SCORE_COLOR: Color = Color::new(240.0 / 255.0, 240.0 / 255.0, 240.0 / 255.0, 1.0);
const PROMPT_COLOR: Color = Color::new(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0);
const GAME_OVER_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const DIM_COLOR: Color = Color::new(0.0, 0.0, 0.0, 180.0 / 255.0);

const SCORE_FONT_SIZE: u16 = 40;
const TITLE_FONT_SIZE: u16 = 100;
const BODY_FONT_SIZE: u16 = 50;

/// Which point of the text box lands on the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Center,
    MidBottom,
}

/// Left edge and baseline for text measured as `dims` placed at (x, y)
pub fn text_origin(dims: &TextDimensions, x: f32, y: f32, anchor: TextAnchor) -> (f32, f32) {
    let left = x - dims.width / 2.0;
    let top = match anchor {
        TextAnchor::Center => y - dims.height / 2.0,
        TextAnchor::MidBottom => y - dims.height,
    };
    (left, top + dims.offset_y)
}

fn draw_text_at(
    text: &str,
    font: Option<&Font>,
    font_size: u16,
    color: Color,
    (x, y): (f32, f32),
    anchor: TextAnchor,
) {
    let dims = measure_text(text, font, font_size, 1.0);
    let (left, baseline) = text_origin(&dims, x, y, anchor);
    draw_text_ex(
        text,
        left,
        baseline,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

/// Survival time, bottom center
pub fn draw_score(font: &Font, score: u64) {
    draw_text_at(
        &format!("Score: {score}"),
        Some(font),
        SCORE_FONT_SIZE,
        SCORE_COLOR,
        (WINDOW_WIDTH / 2.0, WINDOW_HEIGHT - 50.0),
        TextAnchor::MidBottom,
    );
}

pub fn draw_start_screen() {
    clear_background(BLACK);
    let cx = WINDOW_WIDTH / 2.0;
    let cy = WINDOW_HEIGHT / 2.0;
    draw_text_at(
        "SPACE SHOOTER",
        None,
        TITLE_FONT_SIZE,
        WHITE,
        (cx, cy - 50.0),
        TextAnchor::Center,
    );
    draw_text_at(
        "Press ENTER to Start",
        None,
        BODY_FONT_SIZE,
        PROMPT_COLOR,
        (cx, cy + 20.0),
        TextAnchor::Center,
    );
}

/// Dimmed overlay with the final score and restart prompt
pub fn draw_game_over(final_score: u64) {
    draw_rectangle(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT, DIM_COLOR);

    let cx = WINDOW_WIDTH / 2.0;
    let cy = WINDOW_HEIGHT / 2.0;
    draw_text_at(
        "GAME OVER",
        None,
        TITLE_FONT_SIZE,
        GAME_OVER_COLOR,
        (cx, cy - 50.0),
        TextAnchor::Center,
    );
    draw_text_at(
        &format!("Your Score: {final_score}"),
        None,
        BODY_FONT_SIZE,
        WHITE,
        (cx, cy + 20.0),
        TextAnchor::Center,
    );
    draw_text_at(
        "Press ENTER to Restart or ESC to Exit",
        None,
        BODY_FONT_SIZE,
        WHITE,
        (cx, cy + 80.0),
        TextAnchor::Center,
    );
}

pub fn draw_fps() {
    draw_text_at(
        &format!("FPS: {}", get_fps()),
        None,
        24,
        WHITE,
        (60.0, 30.0),
        TextAnchor::Center,
    );
}

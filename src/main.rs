//! Space Shooter entry point
//!
//! Loads settings and assets, then runs the frame loop:
//! input → simulation tick → sounds → drawing → frame pacing.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use macroquad::input::{KeyCode, is_key_down, is_key_pressed};
use macroquad::time::{get_frame_time, get_time};
use macroquad::window::{Conf, next_frame};

use space_shooter::assets::{AssetError, Assets, SoundBank};
use space_shooter::audio::AudioManager;
use space_shooter::consts::*;
use space_shooter::renderer::Renderer;
use space_shooter::settings::{SETTINGS_PATH, Settings};
use space_shooter::sim::{GameState, TickInput, tick};

fn window_conf() -> Conf {
    Conf {
        window_title: WINDOW_TITLE.to_owned(),
        window_width: WINDOW_WIDTH as i32,
        window_height: WINDOW_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Snapshot the keyboard for this frame
fn read_input() -> TickInput {
    TickInput {
        left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
        down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
        fire: is_key_down(KeyCode::Space),
        start: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Sleep off the rest of the frame budget
fn limit_frame_rate(frame_start: f64) {
    let target_frame_time = 1.0 / TARGET_FPS;

    #[cfg(not(target_arch = "wasm32"))]
    {
        // Sleep for the bulk, then spin-wait for precision
        let spin_margin = 0.002;
        while get_time() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while get_time() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        // The browser paces frames
        let _ = (frame_start, target_frame_time);
    }
}

async fn load_all(root: &Path) -> Result<(Assets, SoundBank), AssetError> {
    let assets = Assets::load(root).await?;
    let sounds = SoundBank::load(root).await?;
    Ok((assets, sounds))
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Space Shooter starting...");

    let settings = Settings::load_or_default(SETTINGS_PATH);

    let (assets, sounds) = match load_all(&settings.asset_root).await {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut state = GameState::new(seed, assets.catalog());

    let mut audio = AudioManager::new(sounds, &settings);
    audio.start_music();

    let renderer = Renderer::new(&assets, settings.show_fps);

    loop {
        let frame_start = get_time();

        if is_key_pressed(KeyCode::Escape) {
            log::info!("Escape pressed, exiting");
            break;
        }

        let dt = get_frame_time().min(MAX_FRAME_DT);
        tick(&mut state, &read_input(), dt);

        for event in state.drain_events() {
            audio.handle_event(&event);
        }

        renderer.draw(&state);

        limit_frame_rate(frame_start);
        next_frame().await;
    }

    audio.stop_music();
}

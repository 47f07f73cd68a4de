//! Asset loading
//!
//! Everything is loaded once before the first frame. A missing or corrupt
//! file is fatal: the caller logs the error and exits.

use std::path::{Path, PathBuf};

use macroquad::audio::{Sound, load_sound};
use macroquad::text::{Font, load_ttf_font};
use macroquad::texture::{FilterMode, Image, Texture2D, load_image};
use thiserror::Error;

use crate::consts::EXPLOSION_FRAME_COUNT;
use crate::sim::{Mask, SpriteCatalog};

/// Asset loading errors
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to load image {path}: {reason}")]
    Image { path: PathBuf, reason: String },

    #[error("Failed to load font {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("Failed to load sound {path}: {reason}")]
    Sound { path: PathBuf, reason: String },
}

/// A texture plus the opacity mask derived from its pixels
pub struct SpriteImage {
    pub texture: Texture2D,
    pub mask: Mask,
}

impl SpriteImage {
    fn from_image(image: &Image) -> Self {
        let texture = Texture2D::from_image(image);
        texture.set_filter(FilterMode::Linear);
        let mask = Mask::from_rgba(image.width as usize, image.height as usize, &image.bytes);
        Self { texture, mask }
    }
}

/// Sound effects and music
pub struct SoundBank {
    pub laser: Sound,
    pub explosion: Sound,
    pub music: Sound,
}

/// Every image and font the game draws
pub struct Assets {
    pub player: SpriteImage,
    pub star: SpriteImage,
    pub meteor: SpriteImage,
    pub laser: SpriteImage,
    pub explosion_frames: Vec<SpriteImage>,
    pub font: Font,
}

impl SoundBank {
    /// Load all sounds from under `root`
    pub async fn load(root: &Path) -> Result<Self, AssetError> {
        let audio = root.join("audio");
        let sounds = Self {
            laser: load_audio(&audio.join("laser.wav")).await?,
            explosion: load_audio(&audio.join("explosion.wav")).await?,
            music: load_audio(&audio.join("game_music.wav")).await?,
        };
        log::info!("Loaded sounds from {}", audio.display());
        Ok(sounds)
    }
}

/// Relative path of the `index`th explosion frame
pub fn explosion_frame_path(index: usize) -> PathBuf {
    Path::new("images").join("explosion").join(format!("{index}.png"))
}

impl Assets {
    /// Load all assets from under `root`
    pub async fn load(root: &Path) -> Result<Self, AssetError> {
        let images = root.join("images");

        let player = load_sprite(&images.join("player.png")).await?;
        let star = load_sprite(&images.join("star.png")).await?;
        let meteor = load_sprite(&images.join("meteor.png")).await?;
        let laser = load_sprite(&images.join("laser.png")).await?;

        let mut explosion_frames = Vec::with_capacity(EXPLOSION_FRAME_COUNT);
        for i in 0..EXPLOSION_FRAME_COUNT {
            explosion_frames.push(load_sprite(&root.join(explosion_frame_path(i))).await?);
        }

        let font_path = images.join("Oxanium-Bold.ttf");
        let font = load_ttf_font(&font_path.to_string_lossy())
            .await
            .map_err(|e| AssetError::Font {
                path: font_path.clone(),
                reason: e.to_string(),
            })?;

        log::info!(
            "Loaded assets from {} ({} explosion frames)",
            root.display(),
            explosion_frames.len()
        );

        Ok(Self {
            player,
            star,
            meteor,
            laser,
            explosion_frames,
            font,
        })
    }

    /// Sizes and masks for the simulation
    pub fn catalog(&self) -> SpriteCatalog {
        SpriteCatalog {
            player: self.player.mask.clone(),
            laser: self.laser.mask.clone(),
            meteor: self.meteor.mask.clone(),
            star: self.star.mask.clone(),
            explosion_frames: self.explosion_frames.iter().map(|f| f.mask.size()).collect(),
        }
    }
}

async fn load_sprite(path: &Path) -> Result<SpriteImage, AssetError> {
    let image = load_image(&path.to_string_lossy())
        .await
        .map_err(|e| AssetError::Image {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    log::debug!("Loaded {} ({}x{})", path.display(), image.width, image.height);
    Ok(SpriteImage::from_image(&image))
}

async fn load_audio(path: &Path) -> Result<Sound, AssetError> {
    load_sound(&path.to_string_lossy())
        .await
        .map_err(|e| AssetError::Sound {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_frame_paths() {
        assert_eq!(
            explosion_frame_path(0),
            Path::new("images").join("explosion").join("0.png")
        );
        assert_eq!(
            explosion_frame_path(20),
            Path::new("images").join("explosion").join("20.png")
        );
    }

    #[test]
    fn test_error_names_the_file() {
        let err = AssetError::Image {
            path: PathBuf::from("images/player.png"),
            reason: "not found".into(),
        };
        let message = err.to_string();
        assert!(message.contains("images/player.png"));
        assert!(message.contains("not found"));
    }
}

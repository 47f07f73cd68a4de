//! Headless simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Image data arrives pre-digested as a `SpriteCatalog`

pub mod collision;
pub mod mask;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, masks_collide, resolve_collisions};
pub use mask::{Mask, rotated_extent};
pub use rect::Rect;
pub use state::{
    Explosion, GameEvent, GamePhase, GameState, Laser, Meteor, Player, Sprite, SpriteCatalog,
    SpriteKind,
};
pub use tick::{TickInput, tick};

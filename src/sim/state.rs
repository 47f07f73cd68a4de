//! Game state and core simulation types
//!
//! Every live object is a [`Sprite`] in a single arena owned by
//! [`GameState`]. The meteor and laser subsets are views over that arena
//! filtered by [`SpriteKind`], so dropping a sprite from the arena drops it
//! from every subset at once.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::mask::{Mask, rotated_extent};
use super::rect::Rect;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start key
    StartScreen,
    /// Active round
    Playing,
    /// Round ended, waiting for restart
    GameOver,
}

/// Side effects the simulation asks the outside world to carry out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new round began
    RoundStarted,
    /// Player fired a laser
    LaserFired,
    /// A meteor entered at the top of the screen
    MeteorSpawned { id: u32 },
    /// An explosion effect was created
    Explosion { pos: Vec2 },
    /// Player collided with a meteor; the round is over
    PlayerHit { score: u64 },
}

/// Sizes and opacity masks of every image the simulation needs
#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    pub player: Mask,
    pub laser: Mask,
    pub meteor: Mask,
    pub star: Mask,
    /// Size of each explosion frame, in playback order
    pub explosion_frames: Vec<Vec2>,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Unit or zero movement direction
    pub direction: Vec2,
    pub speed: f32,
    pub can_shoot: bool,
    /// Clock time of the last shot (ms)
    pub shoot_time_ms: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            direction: Vec2::ZERO,
            speed: PLAYER_SPEED,
            can_shoot: true,
            shoot_time_ms: 0.0,
        }
    }
}

impl Player {
    /// Move along `direction` and handle the trigger.
    ///
    /// Returns true if a shot was fired this frame.
    pub fn update(
        &mut self,
        pos: &mut Vec2,
        direction: Vec2,
        fire: bool,
        dt: f32,
        now_ms: f64,
    ) -> bool {
        self.direction = direction.normalize_or_zero();
        *pos += self.direction * self.speed * dt;

        let fired = fire && self.can_shoot;
        if fired {
            self.can_shoot = false;
            self.shoot_time_ms = now_ms;
        }

        self.reload(now_ms);
        fired
    }

    /// Re-arm once the cooldown has elapsed
    pub fn reload(&mut self, now_ms: f64) {
        if !self.can_shoot && now_ms - self.shoot_time_ms >= SHOOT_COOLDOWN_MS {
            self.can_shoot = true;
        }
    }
}

/// A laser bolt travelling straight up
#[derive(Debug, Clone, Copy, Default)]
pub struct Laser;

impl Laser {
    pub fn update(&self, pos: &mut Vec2, dt: f32) {
        pos.y -= LASER_SPEED * dt;
    }
}

/// A falling, spinning meteor
#[derive(Debug, Clone)]
pub struct Meteor {
    /// Drift direction (x in [-0.5, 0.5], y = 1)
    pub direction: Vec2,
    pub speed: f32,
    /// Accumulated rotation (degrees, counter-clockwise)
    pub rotation: f32,
    /// Spin rate (degrees/s)
    pub rotation_speed: f32,
    /// Clock time at spawn (ms)
    pub spawn_ms: f64,
}

impl Meteor {
    /// Advance position and spin. Returns false once the lifetime is spent.
    pub fn update(&mut self, pos: &mut Vec2, dt: f32, now_ms: f64) -> bool {
        *pos += self.direction * self.speed * dt;
        self.rotation += self.rotation_speed * dt;
        !self.expired(now_ms)
    }

    /// Meteors leave after a fixed lifetime, even if still on screen
    #[inline]
    pub fn expired(&self, now_ms: f64) -> bool {
        now_ms - self.spawn_ms >= METEOR_LIFETIME_MS
    }
}

/// A one-shot explosion animation
#[derive(Debug, Clone)]
pub struct Explosion {
    /// Fractional frame position
    pub frame_index: f32,
    pub frame_count: usize,
}

impl Explosion {
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_index: 0.0,
            frame_count,
        }
    }

    /// Advance the animation. Returns false once past the last frame.
    pub fn update(&mut self, dt: f32) -> bool {
        self.frame_index += EXPLOSION_FPS * dt;
        self.current_frame().is_some()
    }

    /// Frame to display, or None when the animation is over
    pub fn current_frame(&self) -> Option<usize> {
        let frame = self.frame_index as usize;
        (frame < self.frame_count).then_some(frame)
    }
}

/// Per-variant state of a sprite
#[derive(Debug, Clone)]
pub enum SpriteKind {
    Player(Player),
    Star,
    Laser(Laser),
    Meteor(Meteor),
    Explosion(Explosion),
}

/// A live object in the arena
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: u32,
    /// Center position (screen pixels)
    pub pos: Vec2,
    /// Size of the currently displayed image
    pub size: Vec2,
    pub kind: SpriteKind,
}

impl Sprite {
    /// Bounding box, always centered on `pos`
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn is_meteor(&self) -> bool {
        matches!(self.kind, SpriteKind::Meteor(_))
    }

    pub fn is_laser(&self) -> bool {
        matches!(self.kind, SpriteKind::Laser(_))
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, SpriteKind::Player(_))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation clock (ms); only advances while playing
    pub time_ms: f64,
    /// Clock time the current round began
    pub round_start_ms: f64,
    /// Clock time of the next meteor spawn
    pub next_spawn_ms: f64,
    /// Score recorded when the last round ended
    pub final_score: u64,
    /// All live sprites in insertion (draw) order
    pub sprites: Vec<Sprite>,
    /// Pending side effects, drained by the frame loop
    pub events: Vec<GameEvent>,
    /// Image sizes and masks
    pub catalog: SpriteCatalog,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game sitting on the start screen
    pub fn new(seed: u64, catalog: SpriteCatalog) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::StartScreen,
            time_ms: 0.0,
            round_start_ms: 0.0,
            next_spawn_ms: METEOR_SPAWN_INTERVAL_MS,
            final_score: 0,
            sprites: Vec::new(),
            events: Vec::new(),
            catalog,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a fresh round: new player, new stars, no meteors or lasers
    pub fn start_round(&mut self) {
        self.sprites.clear();
        self.round_start_ms = self.time_ms;
        self.next_spawn_ms = self.time_ms + METEOR_SPAWN_INTERVAL_MS;
        self.final_score = 0;

        for _ in 0..STAR_COUNT {
            let x = self.rng.random_range(0..=WINDOW_WIDTH as u32) as f32;
            let y = self.rng.random_range(0..=WINDOW_HEIGHT as u32) as f32;
            self.spawn_star(Vec2::new(x, y));
        }
        self.spawn_player(Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0));

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started (seed {})", self.seed);
    }

    /// End the round, locking in the current score
    pub fn end_round(&mut self) {
        self.final_score = self.score();
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::PlayerHit {
            score: self.final_score,
        });
        log::info!("Game over, score {}", self.final_score);
    }

    /// Whole seconds survived in the current round
    pub fn score(&self) -> u64 {
        match self.phase {
            GamePhase::GameOver => self.final_score,
            _ => ((self.time_ms - self.round_start_ms).max(0.0) / 1000.0).floor() as u64,
        }
    }

    fn push_sprite(&mut self, pos: Vec2, size: Vec2, kind: SpriteKind) -> u32 {
        let id = self.next_entity_id();
        self.sprites.push(Sprite { id, pos, size, kind });
        id
    }

    pub fn spawn_star(&mut self, pos: Vec2) -> u32 {
        let size = self.catalog.star.size();
        self.push_sprite(pos, size, SpriteKind::Star)
    }

    pub fn spawn_player(&mut self, pos: Vec2) -> u32 {
        let size = self.catalog.player.size();
        self.push_sprite(pos, size, SpriteKind::Player(Player::default()))
    }

    /// Spawn a laser whose bottom edge midpoint sits at `anchor`
    pub fn spawn_laser(&mut self, anchor: Vec2) -> u32 {
        let size = self.catalog.laser.size();
        let pos = Rect::from_mid_bottom(anchor, size).center();
        self.push_sprite(pos, size, SpriteKind::Laser(Laser))
    }

    /// Spawn a meteor at a random x along the top edge
    pub fn spawn_meteor(&mut self) -> u32 {
        let x = self.rng.random_range(0..=WINDOW_WIDTH as u32) as f32;
        let drift = self.rng.random_range(-METEOR_MAX_DRIFT..=METEOR_MAX_DRIFT);
        let speed = self.rng.random_range(METEOR_MIN_SPEED..=METEOR_MAX_SPEED) as f32;
        let spin = self.rng.random_range(METEOR_MIN_SPIN..=METEOR_MAX_SPIN) as f32;
        self.spawn_meteor_with(
            Vec2::new(x, 0.0),
            Meteor {
                direction: Vec2::new(drift, 1.0),
                speed,
                rotation: 0.0,
                rotation_speed: spin,
                spawn_ms: self.time_ms,
            },
        )
    }

    /// Spawn a meteor with explicit motion
    pub fn spawn_meteor_with(&mut self, pos: Vec2, meteor: Meteor) -> u32 {
        let size = rotated_extent(self.catalog.meteor.size(), meteor.rotation);
        let id = self.push_sprite(pos, size, SpriteKind::Meteor(meteor));
        self.events.push(GameEvent::MeteorSpawned { id });
        log::debug!("Meteor {} spawned at x={:.0}", id, pos.x);
        id
    }

    /// Spawn an explosion centered on `pos`
    pub fn spawn_explosion(&mut self, pos: Vec2) -> u32 {
        let frames = self.catalog.explosion_frames.len();
        let size = self.catalog.explosion_frames.first().copied().unwrap_or(Vec2::ZERO);
        self.events.push(GameEvent::Explosion { pos });
        self.push_sprite(pos, size, SpriteKind::Explosion(Explosion::new(frames)))
    }

    pub fn player(&self) -> Option<&Sprite> {
        self.sprites.iter().find(|s| s.is_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.is_player())
    }

    pub fn meteors(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(|s| s.is_meteor())
    }

    pub fn lasers(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(|s| s.is_laser())
    }

    pub fn stars(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(|s| matches!(s.kind, SpriteKind::Star))
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Solid square sprites, small enough to keep tests readable
    pub(crate) fn test_catalog() -> SpriteCatalog {
        SpriteCatalog {
            player: Mask::filled(20, 20),
            laser: Mask::filled(4, 10),
            meteor: Mask::filled(16, 16),
            star: Mask::filled(2, 2),
            explosion_frames: vec![Vec2::splat(32.0); EXPLOSION_FRAME_COUNT],
        }
    }

    #[test]
    fn test_new_state_waits_on_start_screen() {
        let state = GameState::new(1, test_catalog());
        assert_eq!(state.phase, GamePhase::StartScreen);
        assert!(state.sprites.is_empty());
    }

    #[test]
    fn test_start_round_populates_arena() {
        let mut state = GameState::new(7, test_catalog());
        state.start_round();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stars().count(), STAR_COUNT);
        assert_eq!(state.sprites.iter().filter(|s| s.is_player()).count(), 1);
        assert_eq!(state.meteors().count(), 0);
        assert_eq!(state.lasers().count(), 0);

        for star in state.stars() {
            assert!((0.0..=WINDOW_WIDTH).contains(&star.pos.x));
            assert!((0.0..=WINDOW_HEIGHT).contains(&star.pos.y));
        }
        let player = state.player().unwrap();
        assert_eq!(player.pos, Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0));
    }

    #[test]
    fn test_spawned_meteor_within_ranges() {
        let mut state = GameState::new(42, test_catalog());
        for _ in 0..200 {
            state.spawn_meteor();
        }
        for sprite in state.meteors() {
            let SpriteKind::Meteor(m) = &sprite.kind else {
                unreachable!()
            };
            assert_eq!(sprite.pos.y, 0.0);
            assert!((0.0..=WINDOW_WIDTH).contains(&sprite.pos.x));
            assert!((-0.5..=0.5).contains(&m.direction.x));
            assert_eq!(m.direction.y, 1.0);
            assert!((400.0..=500.0).contains(&m.speed));
            assert!((40.0..=80.0).contains(&m.rotation_speed));
        }
    }

    #[test]
    fn test_laser_anchored_by_bottom_edge() {
        let mut state = GameState::new(1, test_catalog());
        let id = state.spawn_laser(Vec2::new(100.0, 300.0));
        let laser = state.sprites.iter().find(|s| s.id == id).unwrap();
        assert_eq!(laser.rect().bottom(), 300.0);
        assert_eq!(laser.rect().center().x, 100.0);
    }

    #[test]
    fn test_player_direction_normalized() {
        let mut player = Player::default();
        let mut pos = Vec2::ZERO;
        player.update(&mut pos, Vec2::new(1.0, 1.0), false, 1.0, 0.0);
        assert!((player.direction.length() - 1.0).abs() < 1e-6);
        assert!((pos.length() - PLAYER_SPEED).abs() < 1e-3);

        // Opposing keys cancel out
        player.update(&mut pos, Vec2::ZERO, false, 1.0, 0.0);
        assert_eq!(player.direction, Vec2::ZERO);
    }

    #[test]
    fn test_player_cooldown() {
        let mut player = Player::default();
        let mut pos = Vec2::ZERO;

        assert!(player.update(&mut pos, Vec2::ZERO, true, 0.0, 1000.0));
        assert!(!player.can_shoot);

        // Trigger held through the cooldown: no shots
        assert!(!player.update(&mut pos, Vec2::ZERO, true, 0.0, 1200.0));
        assert!(!player.update(&mut pos, Vec2::ZERO, true, 0.0, 1399.0));
        assert!(!player.can_shoot);

        // Re-armed at exactly 400 ms
        player.reload(1400.0);
        assert!(player.can_shoot);
        assert!(player.update(&mut pos, Vec2::ZERO, true, 0.0, 1400.0));
    }

    #[test]
    fn test_meteor_lifetime_ignores_position() {
        let mut meteor = Meteor {
            direction: Vec2::new(0.0, 1.0),
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 60.0,
            spawn_ms: 500.0,
        };
        let mut pos = Vec2::new(960.0, 400.0);
        assert!(meteor.update(&mut pos, 0.0, 3499.0));
        assert!(!meteor.update(&mut pos, 0.0, 3500.0));
        // Still squarely on screen when despawned
        assert_eq!(pos, Vec2::new(960.0, 400.0));
    }

    #[test]
    fn test_explosion_plays_every_frame_then_ends() {
        let mut explosion = Explosion::new(3);
        assert_eq!(explosion.current_frame(), Some(0));
        assert!(explosion.update(0.05));
        assert_eq!(explosion.current_frame(), Some(1));
        assert!(explosion.update(0.05));
        assert_eq!(explosion.current_frame(), Some(2));
        assert!(!explosion.update(0.05));
        assert_eq!(explosion.current_frame(), None);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(1, test_catalog());
        state.start_round();
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::RoundStarted]);
        assert!(state.events.is_empty());
    }
}

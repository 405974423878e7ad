//! All simulation entity types: plain data plus hitbox accessors.
//!
//! Collections are ordered `Vec`s and identity is positional; only hazards
//! carry an `id`, and that exists purely to desynchronise their sway.

use crate::collision::{Circle, Point, Rect, Triangle};
use crate::scaling::{Metrics, Viewport};

// ── Enumerations ──────────────────────────────────────────────────────────────

/// Visual family of an enemy ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Saucer,
    Fighter,
    Insectoid,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Saucer, EnemyKind::Fighter, EnemyKind::Insectoid];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Absorbs hazard and enemy-bullet damage.
    Shield,
    /// Three parallel bullets per shot.
    TripleShot,
    /// Multiplies player movement speed.
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::TripleShot,
        PowerUpKind::SpeedBoost,
    ];

    fn slot(self) -> usize {
        match self {
            PowerUpKind::Shield => 0,
            PowerUpKind::TripleShot => 1,
            PowerUpKind::SpeedBoost => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Lives hit zero; waiting for the death explosions to finish.
    Dying,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// The singleton ship.  `x` is the horizontal centre, `y` the top edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub lives: u32,
    /// Ticks of post-hit blink left.
    pub hit_effect_timer: u32,
    pub shoot_cooldown: u32,
}

impl Player {
    pub fn body_rect(&self) -> Rect {
        Rect::new(
            self.x - self.width / 2.0,
            self.y,
            self.x + self.width / 2.0,
            self.y + self.height,
        )
    }

    /// Left and right wing hit regions.  They reach past the body rectangle,
    /// matching the swept silhouette the renderer draws.
    pub fn wings(&self) -> [Triangle; 2] {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        let left = Triangle::new(
            Point::new(x - w / 4.0, y + h / 2.0),
            Point::new(x - w * 1.2, y + h * 0.7),
            Point::new(x - w / 2.0, y + h * 0.9),
        );
        let right = Triangle::new(
            Point::new(x + w / 4.0, y + h / 2.0),
            Point::new(x + w * 1.2, y + h * 0.7),
            Point::new(x + w / 2.0, y + h * 0.9),
        );
        [left, right]
    }

    pub fn pickup_rect(&self, margin: f32) -> Rect {
        self.body_rect().expanded(margin)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }
}

// ── Enemies & projectiles ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub kind: EnemyKind,
    pub shoot_timer: u32,
}

impl Enemy {
    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.x, self.y, self.size, self.size)
    }
}

/// Player and enemy bullets share this shape; they live in separate stores.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Signed: negative travels up, positive travels down.
    pub vy: f32,
    pub radius: f32,
}

impl Bullet {
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }
}

// ── Collectibles & hazards ────────────────────────────────────────────────────

/// A glint orbiting a falling power-up.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    pub angle: f32,
    pub distance: f32,
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub fall_speed: f32,
    pub rotation: f32,
    pub pulse_phase: f32,
    pub particles: Vec<Sparkle>,
}

impl PowerUp {
    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.x, self.y, self.size, self.size)
    }
}

/// Falling "alien head".
#[derive(Clone, Debug, PartialEq)]
pub struct Hazard {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub vy: f32,
    pub pulse_phase: f32,
}

impl Hazard {
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.size / 2.0)
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.x, self.y, self.size, self.size)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub size: f32,
}

// ── Visual effects ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub frame: f32,
    /// Part of the player-death burst; gates `Dying → GameOver`.
    pub death: bool,
}

/// Expanding ring at an impact point.
#[derive(Clone, Debug, PartialEq)]
pub struct Flash {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub frame: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub life: u32,
}

/// Radial "power gained" pulse centred on the player.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerRing {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Radius added per tick.
    pub growth: f32,
    pub kind: PowerUpKind,
    pub frame: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Explosion(Explosion),
    HazardHit(Flash),
    HazardParticle(Particle),
    EnemyHit(Flash),
    EnemyParticle(Particle),
    PowerRing(PowerRing),
}

impl Effect {
    pub fn is_death_explosion(&self) -> bool {
        matches!(self, Effect::Explosion(Explosion { death: true, .. }))
    }
}

// ── Power-up timers ───────────────────────────────────────────────────────────

/// Remaining ticks per power-up kind.  An effect is active exactly while its
/// counter is positive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivePowerUps {
    remaining: [u32; 3],
}

impl ActivePowerUps {
    pub fn remaining(&self, kind: PowerUpKind) -> u32 {
        self.remaining[kind.slot()]
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining(kind) > 0
    }

    /// Restart `kind` at `ticks`; picking up a running power-up refreshes it.
    pub fn activate(&mut self, kind: PowerUpKind, ticks: u32) {
        self.remaining[kind.slot()] = ticks;
    }

    /// Count every running timer down by one tick.
    pub fn decay(&mut self) {
        for t in self.remaining.iter_mut() {
            *t = t.saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.remaining = [0; 3];
    }

    /// Active kinds with their remaining ticks.
    pub fn iter(&self) -> impl Iterator<Item = (PowerUpKind, u32)> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .map(|k| (k, self.remaining(k)))
            .filter(|&(_, t)| t > 0)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The whole simulation state.  The update engine is its only writer; the
/// renderer and the host read it through `&GameState`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Shared formation heading: `1.0` right, `-1.0` left.
    pub enemy_direction: f32,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub hazards: Vec<Hazard>,
    pub effects: Vec<Effect>,
    pub stars: Vec<Star>,
    pub active: ActivePowerUps,
    pub score: u32,
    pub phase: GamePhase,
    pub frame: u64,
    /// Ticks until the next power-up spawn.
    pub power_up_timer: u32,
    /// Ticks until the next hazard spawn.
    pub hazard_timer: u32,
    pub game_over_timer: u32,
    pub viewport: Viewport,
    pub metrics: Metrics,
}

impl GameState {
    pub fn death_explosions_remaining(&self) -> usize {
        self.effects.iter().filter(|e| e.is_death_explosion()).count()
    }

    /// Drop every transient entity.  Stars are background and stay.
    pub fn clear_entities(&mut self) {
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.power_ups.clear();
        self.hazards.clear();
        self.effects.clear();
    }
}

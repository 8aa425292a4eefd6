/// Game entity types and their small per-entity behaviours.
///
/// Entities carry their own position and size; anything that has to look at
/// more than one entity lives in `formation`, `collision` or `session`.

use crate::audio::Sound;
use crate::config::{
    BARRIER_SIZE, BOMB_SIZE, GUNSHIP_SIZE, INVADER_SIZE, LASER_SIZE, LIFE_ICON_SIZE, SAUCER_SIZE,
};
use crate::geometry::Rect;

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Point tier of an invader row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub fn points(self) -> u32 {
        match self {
            Tier::One => 10,
            Tier::Two => 20,
            Tier::Three => 30,
        }
    }
}

/// Everything the render sink knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Gunship,
    GunshipExplosion,
    Invader(Tier),
    InvaderExplosion(Tier),
    Laser,
    Bomb,
    Saucer,
    SaucerExplosion,
    Barrier,
    LifeIcon,
}

impl Sprite {
    /// (width, height) in world units.  Explosions share the size of the
    /// sprite they replace.
    pub fn size(self) -> (i32, i32) {
        match self {
            Sprite::Gunship | Sprite::GunshipExplosion => GUNSHIP_SIZE,
            Sprite::Invader(_) | Sprite::InvaderExplosion(_) => INVADER_SIZE,
            Sprite::Laser => LASER_SIZE,
            Sprite::Bomb => BOMB_SIZE,
            Sprite::Saucer | Sprite::SaucerExplosion => SAUCER_SIZE,
            Sprite::Barrier => BARRIER_SIZE,
            Sprite::LifeIcon => LIFE_ICON_SIZE,
        }
    }
}

// ── Capabilities ──────────────────────────────────────────────────────────────

/// Render descriptor: which sprite, and where its top-left corner goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawItem {
    pub sprite: Sprite,
    pub x: i32,
    pub y: i32,
}

pub trait Drawable {
    fn draw_item(&self) -> DrawItem;
}

pub trait Collidable {
    fn bounds(&self) -> Rect;
}

/// What a successful hit on a target is worth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub points: u32,
    pub sound: Sound,
}

/// Lifecycle of anything that can be blown up.  `Exploded` entities stay in
/// their container until the next explosion-refresh sweep removes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Alive,
    Exploded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

// ── Gunship ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub condition: Condition,
}

impl Ship {
    pub fn new(x: i32, y: i32, speed: i32) -> Self {
        let (width, height) = Sprite::Gunship.size();
        Self {
            x,
            y,
            width,
            height,
            speed,
            condition: Condition::Alive,
        }
    }

    pub fn move_left(&mut self) {
        self.x -= self.speed;
    }

    pub fn move_right(&mut self) {
        self.x += self.speed;
    }

    /// Pull the ship back inside `[0, play_width - width]`.
    pub fn clamp(&mut self, play_width: i32) {
        self.x = self.x.min(play_width - self.width).max(0);
    }

    pub fn is_alive(&self) -> bool {
        self.condition == Condition::Alive
    }

    pub fn explode(&mut self) {
        self.condition = Condition::Exploded;
    }

    /// Restore the normal sprite after an explosion.
    pub fn reset(&mut self) {
        self.condition = Condition::Alive;
    }

    /// Where a freshly fired laser starts.
    pub fn muzzle(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y)
    }
}

impl Drawable for Ship {
    fn draw_item(&self) -> DrawItem {
        let sprite = match self.condition {
            Condition::Alive => Sprite::Gunship,
            Condition::Exploded => Sprite::GunshipExplosion,
        };
        DrawItem { sprite, x: self.x, y: self.y }
    }
}

impl Collidable for Ship {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Fired by the gunship, travels up.
    Laser,
    /// Dropped by an invader, travels down.
    Bomb,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    /// Survives hits instead of being removed.
    pub persistent: bool,
}

impl Projectile {
    pub fn laser(x: i32, y: i32, speed: i32) -> Self {
        Self::new(ProjectileKind::Laser, x, y, speed)
    }

    pub fn bomb(x: i32, y: i32, speed: i32) -> Self {
        Self::new(ProjectileKind::Bomb, x, y, speed)
    }

    fn new(kind: ProjectileKind, x: i32, y: i32, speed: i32) -> Self {
        let (width, height) = match kind {
            ProjectileKind::Laser => Sprite::Laser.size(),
            ProjectileKind::Bomb => Sprite::Bomb.size(),
        };
        Self {
            kind,
            x,
            y,
            width,
            height,
            speed,
            persistent: false,
        }
    }

    pub fn is_laser(&self) -> bool {
        self.kind == ProjectileKind::Laser
    }

    pub fn is_bomb(&self) -> bool {
        self.kind == ProjectileKind::Bomb
    }

    /// Advance one tick along the projectile's axis.
    pub fn advance(&mut self) {
        match self.kind {
            ProjectileKind::Laser => self.y -= self.speed,
            ProjectileKind::Bomb => self.y += self.speed,
        }
    }

    /// True once the projectile is entirely past the edge it travels
    /// towards: above `top` for lasers, below `bottom` for bombs.
    pub fn out_of_bounds(&self, top: i32, bottom: i32) -> bool {
        match self.kind {
            ProjectileKind::Laser => self.y + self.height <= top,
            ProjectileKind::Bomb => self.y >= bottom,
        }
    }
}

impl Drawable for Projectile {
    fn draw_item(&self) -> DrawItem {
        let sprite = match self.kind {
            ProjectileKind::Laser => Sprite::Laser,
            ProjectileKind::Bomb => Sprite::Bomb,
        };
        DrawItem { sprite, x: self.x, y: self.y }
    }
}

impl Collidable for Projectile {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Invaders ──────────────────────────────────────────────────────────────────

/// One member of a row.  Its vertical position belongs to the row.
#[derive(Clone, Debug)]
pub struct Invader {
    pub column: usize,
    pub x: i32,
    pub width: i32,
    pub height: i32,
    pub tier: Tier,
    pub condition: Condition,
}

impl Invader {
    pub fn new(tier: Tier, column: usize, x: i32) -> Self {
        let (width, height) = Sprite::Invader(tier).size();
        Self {
            column,
            x,
            width,
            height,
            tier,
            condition: Condition::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.condition == Condition::Alive
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn step(&mut self, direction: Direction, speed: i32) {
        match direction {
            Direction::Left => self.x -= speed,
            Direction::Right => self.x += speed,
        }
    }

    /// Mark as exploded and report what it was worth.  Hitting an invader
    /// that already exploded yields nothing.
    pub fn explode(&mut self) -> Option<Hit> {
        if !self.is_alive() {
            return None;
        }
        self.condition = Condition::Exploded;
        Some(Hit {
            points: self.tier.points(),
            sound: Sound::InvaderExplosion,
        })
    }

    pub fn sprite(&self) -> Sprite {
        match self.condition {
            Condition::Alive => Sprite::Invader(self.tier),
            Condition::Exploded => Sprite::InvaderExplosion(self.tier),
        }
    }
}

// ── Saucer ────────────────────────────────────────────────────────────────────

/// Bonus target crossing the top of the screen left to right.
#[derive(Clone, Debug)]
pub struct Saucer {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub speed: i32,
    pub value: u32,
    pub condition: Condition,
}

impl Saucer {
    pub fn new(x: i32, y: i32, speed: i32, value: u32) -> Self {
        let (width, height) = Sprite::Saucer.size();
        Self {
            x,
            y,
            width,
            height,
            speed,
            value,
            condition: Condition::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.condition == Condition::Alive
    }

    /// Move right.  Exploded saucers hang in place until swept.
    pub fn advance(&mut self) {
        if self.is_alive() {
            self.x += self.speed;
        }
    }

    /// True once the right edge has reached the side of the play area.
    pub fn past_right_edge(&self, play_width: i32) -> bool {
        self.x + self.width >= play_width
    }

    pub fn explode(&mut self) -> Option<Hit> {
        if !self.is_alive() {
            return None;
        }
        self.condition = Condition::Exploded;
        Some(Hit {
            points: self.value,
            sound: Sound::SaucerExplosion,
        })
    }
}

impl Drawable for Saucer {
    fn draw_item(&self) -> DrawItem {
        let sprite = match self.condition {
            Condition::Alive => Sprite::Saucer,
            Condition::Exploded => Sprite::SaucerExplosion,
        };
        DrawItem { sprite, x: self.x, y: self.y }
    }
}

impl Collidable for Saucer {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Barriers ──────────────────────────────────────────────────────────────────

/// Immovable wall that soaks up any projectile touching it.
#[derive(Clone, Debug)]
pub struct Barrier {
    pub rect: Rect,
}

impl Drawable for Barrier {
    fn draw_item(&self) -> DrawItem {
        DrawItem {
            sprite: Sprite::Barrier,
            x: self.rect.x,
            y: self.rect.y,
        }
    }
}

impl Collidable for Barrier {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub lives: u32,
    pub score: u32,
}

impl PlayerState {
    pub fn new(lives: u32) -> Self {
        Self { lives, score: 0 }
    }

    /// Returns true when that was the last life.
    pub fn remove_a_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn add_to_score(&mut self, value: u32) {
        self.score = self.score.saturating_add(value);
    }
}

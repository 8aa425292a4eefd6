/// Gameplay constants and the configuration handed to a `Session`.
///
/// Everything here is static for the lifetime of a session; nothing is
/// renegotiated at runtime.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::entities::Tier;
use crate::geometry::Rect;

// ── Timing ────────────────────────────────────────────────────────────────────

pub const FRAME_REFRESH_RATE: u32 = 30;

/// How long the game-over banner stays up before the terminal is restored.
pub const GAME_OVER_DELAY: Duration = Duration::from_secs(1);

// ── Play area (world units) ───────────────────────────────────────────────────

pub const DISPLAY_WIDTH: i32 = 600;
pub const DISPLAY_HEIGHT: i32 = 600;

/// Lasers are discarded once they climb above this line.
pub const PLAY_AREA_TOP: i32 = 50;

// ── Speeds (world units per tick) ─────────────────────────────────────────────

pub const GUNSHIP_SPEED: i32 = 20;
pub const LASER_SPEED: i32 = 20;
pub const BOMB_SPEED: i32 = 15;
pub const INVADER_SPEED: i32 = 5;
pub const SAUCER_SPEED: i32 = 10;

// ── Cadences (ticks) ──────────────────────────────────────────────────────────

pub const EXPLOSION_REFRESH_CYCLE: u64 = 10;
pub const NEW_BOMB_CYCLE_INTERVAL: u64 = 30;
pub const SAUCER_SPAWN_CYCLE: u64 = 150;

// ── Squadron layout ───────────────────────────────────────────────────────────

pub const MAX_INVADERS_IN_ROW: usize = 9;
pub const INVADER_START_X: i32 = 50;
pub const INVADER_START_Y: i32 = PLAY_AREA_TOP;
pub const INVADER_COLUMN_SPACING: i32 = 50;
pub const INVADER_ROW_SPACING: i32 = 45;
pub const INVADER_MOVE_DOWN: i32 = 2;

// ── Player ────────────────────────────────────────────────────────────────────

pub const STARTING_LIVES: u32 = 3;
pub const MAX_LASERS_IN_FLIGHT: usize = 1;
pub const GUNSHIP_START_X: i32 = DISPLAY_WIDTH / 2;
pub const GUNSHIP_START_Y: i32 = DISPLAY_HEIGHT - 40;

// ── Saucer ────────────────────────────────────────────────────────────────────

pub const SAUCER_Y: i32 = PLAY_AREA_TOP - 20;
pub const SAUCER_VALUE_STEP: u32 = 50;
pub const SAUCER_MAX_VALUE: u32 = 300;
pub const SAUCER_SPAWN_CHANCE: f64 = 0.5;

// ── Barriers ──────────────────────────────────────────────────────────────────

pub const BARRIER_POSITION: i32 = 450;
pub const BARRIER_COLUMNS: [i32; 4] = [60, 200, 340, 480];

// ── Sprite sizes (width, height) ──────────────────────────────────────────────

pub const GUNSHIP_SIZE: (i32, i32) = (40, 24);
pub const INVADER_SIZE: (i32, i32) = (32, 24);
pub const LASER_SIZE: (i32, i32) = (4, 12);
pub const BOMB_SIZE: (i32, i32) = (6, 12);
pub const SAUCER_SIZE: (i32, i32) = (48, 20);
pub const BARRIER_SIZE: (i32, i32) = (60, 16);
pub const LIFE_ICON_SIZE: (i32, i32) = (23, 23);

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const SCORE_LABEL_POS: (i32, i32) = (5, 5);
pub const SCORE_VALUE_POS: (i32, i32) = (85, 5);
pub const LIVES_Y_POSITION: i32 = 3;
pub const LIVES_LABEL_POS: (i32, i32) = (DISPLAY_WIDTH - 180, LIVES_Y_POSITION + 4);
pub const LIFE_ICON_XS: [i32; 3] = [DISPLAY_WIDTH - 120, DISPLAY_WIDTH - 90, DISPLAY_WIDTH - 60];

/// Shared playback volume for every registered sound.
pub const SOUND_VOLUME: f32 = 0.2;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Shape of the invader grid at session start.
#[derive(Clone, Debug, PartialEq)]
pub struct SquadronLayout {
    /// One entry per row, top row first.
    pub tiers: Vec<Tier>,
    pub columns: usize,
    pub start_x: i32,
    pub start_y: i32,
    pub column_spacing: i32,
    pub row_spacing: i32,
}

impl Default for SquadronLayout {
    fn default() -> Self {
        Self {
            tiers: vec![Tier::One, Tier::One, Tier::Two, Tier::Two, Tier::Three, Tier::Three],
            columns: MAX_INVADERS_IN_ROW,
            start_x: INVADER_START_X,
            start_y: INVADER_START_Y,
            column_spacing: INVADER_COLUMN_SPACING,
            row_spacing: INVADER_ROW_SPACING,
        }
    }
}

impl SquadronLayout {
    /// A layout with a single invader at `(x, y)`.
    pub fn single(tier: Tier, x: i32, y: i32) -> Self {
        Self {
            tiers: vec![tier],
            columns: 1,
            start_x: x,
            start_y: y,
            ..Self::default()
        }
    }
}

// ── Game configuration ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub display_width: i32,
    pub display_height: i32,
    pub play_area_top: i32,
    pub tick_rate: u32,

    pub ship_speed: i32,
    pub laser_speed: i32,
    pub bomb_speed: i32,
    pub invader_speed: i32,
    pub saucer_speed: i32,
    pub invader_move_down: i32,

    pub explosion_refresh_cycle: u64,
    pub bomb_cycle: u64,
    pub saucer_cycle: u64,
    pub saucer_spawn_chance: f64,

    pub starting_lives: u32,
    pub max_lasers: usize,
    /// Lasers survive hits and keep travelling.
    pub piercing_lasers: bool,
    /// Keep the gunship inside `[0, display_width - width]`.
    pub clamp_ship: bool,
    pub ship_start: (i32, i32),

    pub saucer_y: i32,
    pub saucer_value_step: u32,
    pub saucer_max_value: u32,

    pub barriers: Vec<Rect>,
    pub layout: SquadronLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        let (bw, bh) = BARRIER_SIZE;
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            play_area_top: PLAY_AREA_TOP,
            tick_rate: FRAME_REFRESH_RATE,
            ship_speed: GUNSHIP_SPEED,
            laser_speed: LASER_SPEED,
            bomb_speed: BOMB_SPEED,
            invader_speed: INVADER_SPEED,
            saucer_speed: SAUCER_SPEED,
            invader_move_down: INVADER_MOVE_DOWN,
            explosion_refresh_cycle: EXPLOSION_REFRESH_CYCLE,
            bomb_cycle: NEW_BOMB_CYCLE_INTERVAL,
            saucer_cycle: SAUCER_SPAWN_CYCLE,
            saucer_spawn_chance: SAUCER_SPAWN_CHANCE,
            starting_lives: STARTING_LIVES,
            max_lasers: MAX_LASERS_IN_FLIGHT,
            piercing_lasers: false,
            clamp_ship: true,
            ship_start: (GUNSHIP_START_X, GUNSHIP_START_Y),
            saucer_y: SAUCER_Y,
            saucer_value_step: SAUCER_VALUE_STEP,
            saucer_max_value: SAUCER_MAX_VALUE,
            barriers: BARRIER_COLUMNS
                .iter()
                .map(|&x| Rect::new(x, BARRIER_POSITION, bw, bh))
                .collect(),
            layout: SquadronLayout::default(),
        }
    }
}

impl GameConfig {
    /// Time budget of a single tick.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_width <= 0 || self.display_height <= 0 {
            return Err(ConfigError::EmptyPlayArea {
                width: self.display_width,
                height: self.display_height,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        for (name, cadence) in [
            ("explosion_refresh_cycle", self.explosion_refresh_cycle),
            ("bomb_cycle", self.bomb_cycle),
            ("saucer_cycle", self.saucer_cycle),
        ] {
            if cadence == 0 {
                return Err(ConfigError::ZeroCadence { name });
            }
        }
        let (_, laser_height) = LASER_SIZE;
        if self.laser_speed < laser_height {
            return Err(ConfigError::SlowLaser {
                speed: self.laser_speed,
                height: laser_height,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.layout.tiers.is_empty() || self.layout.columns == 0 {
            return Err(ConfigError::EmptyLayout);
        }
        if !(0.0..=1.0).contains(&self.saucer_spawn_chance) {
            return Err(ConfigError::SpawnChanceOutOfRange {
                chance: self.saucer_spawn_chance,
            });
        }
        if self.saucer_value_step == 0 || self.saucer_max_value < self.saucer_value_step {
            return Err(ConfigError::SaucerValueRange {
                step: self.saucer_value_step,
                max: self.saucer_max_value,
            });
        }
        Ok(())
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    EmptyPlayArea { width: i32, height: i32 },
    ZeroTickRate,
    ZeroCadence { name: &'static str },
    /// A laser slower than its own height lingers above the play area.
    SlowLaser { speed: i32, height: i32 },
    ZeroLives,
    EmptyLayout,
    SpawnChanceOutOfRange { chance: f64 },
    SaucerValueRange { step: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPlayArea { width, height } => {
                write!(f, "play area must be non-empty, got {width}x{height}")
            }
            Self::ZeroTickRate => write!(f, "tick rate must be at least 1"),
            Self::ZeroCadence { name } => write!(f, "cadence `{name}` must be at least 1 tick"),
            Self::SlowLaser { speed, height } => {
                write!(f, "laser speed {speed} must be at least the laser height {height}")
            }
            Self::ZeroLives => write!(f, "starting lives must be at least 1"),
            Self::EmptyLayout => write!(f, "squadron layout has no invaders"),
            Self::SpawnChanceOutOfRange { chance } => {
                write!(f, "saucer spawn chance {chance} is outside [0, 1]")
            }
            Self::SaucerValueRange { step, max } => write!(
                f,
                "saucer value step {step} must be non-zero and not above the max value {max}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ── Environment helpers ───────────────────────────────────────────────────────

pub fn read_env_optional_u64(name: &str) -> Option<u64> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("{} is not an unsigned integer ({:?}); ignoring it", name, raw);
            None
        }
    }
}

pub fn read_env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| matches!(value.trim(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

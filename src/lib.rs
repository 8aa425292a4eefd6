pub mod audio;
pub mod collision;
pub mod config;
pub mod display;
pub mod entities;
pub mod formation;
pub mod geometry;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod session;

pub use config::{ConfigError, GameConfig, SquadronLayout};
pub use session::{GameOverReason, Session, SessionStatus};

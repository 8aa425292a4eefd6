/// One game session: owns every entity and advances them one tick at a time.
///
/// Phase order inside `tick`: input, scheduled events, movement, breach
/// check, collisions.  Rendering is a separate pass (`render::render_frame`)
/// over the state left behind.

use rand::Rng;

use crate::audio::{AudioSink, Sound, SoundBank};
use crate::collision;
use crate::config::{GameConfig, SOUND_VOLUME};
use crate::entities::{Barrier, Hit, PlayerState, Projectile, Saucer, Ship};
use crate::formation::Squadron;
use crate::input::InputEvent;
use crate::scheduler::{Due, Scheduler};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    OutOfLives,
    /// The squadron came down to the gunship's line.
    Breach,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Paused,
    GameOver(GameOverReason),
}

#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub ship: Ship,
    pub squadron: Squadron,
    /// Lasers and bombs in flight, in no particular order.
    pub projectiles: Vec<Projectile>,
    pub saucer: Option<Saucer>,
    pub barriers: Vec<Barrier>,
    pub player: PlayerState,
    pub scheduler: Scheduler,
    pub status: SessionStatus,
    pub sounds: SoundBank,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let (sx, sy) = config.ship_start;
        let ship = Ship::new(sx, sy, config.ship_speed);
        let squadron = Squadron::new(&config.layout, config.invader_speed, config.invader_move_down);
        let barriers = config
            .barriers
            .iter()
            .map(|&rect| Barrier { rect })
            .collect();
        let scheduler = Scheduler::new(
            config.explosion_refresh_cycle,
            config.bomb_cycle,
            config.saucer_cycle,
        );
        Self {
            ship,
            squadron,
            projectiles: Vec::new(),
            saucer: None,
            barriers,
            player: PlayerState::new(config.starting_lives),
            scheduler,
            status: SessionStatus::Running,
            sounds: SoundBank::load(SOUND_VOLUME),
            config,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, SessionStatus::GameOver(_))
    }

    pub fn lasers_in_flight(&self) -> usize {
        self.projectiles.iter().filter(|p| p.is_laser()).count()
    }

    fn play(&self, audio: &mut impl AudioSink, sound: Sound) {
        if let Some(handle) = self.sounds.handle(sound) {
            audio.play(handle);
        }
    }

    fn end(&mut self, reason: GameOverReason) {
        tracing::info!(
            ?reason,
            score = self.player.score,
            tick = self.scheduler.tick(),
            "game over"
        );
        self.status = SessionStatus::GameOver(reason);
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// Advance the session by one tick.  All randomness comes through `rng`
    /// so callers control determinism.
    pub fn tick(&mut self, input: &[InputEvent], rng: &mut impl Rng, audio: &mut impl AudioSink) {
        match self.status {
            SessionStatus::GameOver(_) => return,
            SessionStatus::Paused => {
                if input.contains(&InputEvent::TogglePause) {
                    tracing::debug!("resumed");
                    self.status = SessionStatus::Running;
                }
                return;
            }
            SessionStatus::Running => {}
        }

        if !self.handle_input(input, audio) {
            return;
        }

        let due = self.scheduler.advance();
        self.run_scheduled(due, rng, audio);

        self.move_game_objects();

        if self.squadron.reached(self.ship.y) {
            self.end(GameOverReason::Breach);
            return;
        }

        self.detect_collisions(audio);
    }

    /// Apply this tick's input.  Returns false when the input stopped the
    /// tick (pause or quit).
    fn handle_input(&mut self, input: &[InputEvent], audio: &mut impl AudioSink) -> bool {
        for event in input {
            match event {
                InputEvent::Quit => {
                    self.end(GameOverReason::Quit);
                    return false;
                }
                InputEvent::TogglePause => {
                    tracing::debug!(tick = self.scheduler.tick(), "paused");
                    self.status = SessionStatus::Paused;
                    return false;
                }
                InputEvent::MoveLeft => self.move_ship(|ship| ship.move_left()),
                InputEvent::MoveRight => self.move_ship(|ship| ship.move_right()),
                InputEvent::Fire => {
                    self.fire_laser(audio);
                }
            }
        }
        true
    }

    fn move_ship(&mut self, step: impl FnOnce(&mut Ship)) {
        step(&mut self.ship);
        if self.config.clamp_ship {
            self.ship.clamp(self.config.display_width);
        }
    }

    /// Fire from the gunship unless the laser cap is already in flight.
    pub fn fire_laser(&mut self, audio: &mut impl AudioSink) -> bool {
        if self.lasers_in_flight() >= self.config.max_lasers {
            return false;
        }
        let (x, y) = self.ship.muzzle();
        let mut laser = Projectile::laser(x, y, self.config.laser_speed);
        laser.persistent = self.config.piercing_lasers;
        self.projectiles.push(laser);
        self.play(audio, Sound::Shoot);
        true
    }

    // ── Scheduled events ──────────────────────────────────────────────────────

    fn run_scheduled(&mut self, due: Due, rng: &mut impl Rng, audio: &mut impl AudioSink) {
        if due.explosion_refresh {
            self.refresh_explosions();
        }
        if due.bomb {
            self.drop_bomb(rng, audio);
        }
        if due.saucer {
            self.maybe_spawn_saucer(rng);
        }
    }

    /// Sweep exploded invaders and saucer, and put the gunship back together.
    pub fn refresh_explosions(&mut self) {
        let removed = self.squadron.remove_exploded();
        if removed > 0 {
            tracing::debug!(removed, left = self.squadron.invader_count(), "explosions cleared");
            if self.squadron.is_cleared() {
                tracing::info!("squadron cleared");
            }
        }
        if self.saucer.as_ref().is_some_and(|s| !s.is_alive()) {
            self.saucer = None;
        }
        if !self.ship.is_alive() {
            self.ship.reset();
        }
    }

    /// Have a randomly chosen alive invader drop a bomb.  Returns false when
    /// there is nobody left to drop one.
    pub fn drop_bomb(&mut self, rng: &mut impl Rng, audio: &mut impl AudioSink) -> bool {
        let origin = self
            .squadron
            .select_bomber(rng)
            .and_then(|at| self.squadron.bomb_origin(at));
        let Some((x, y)) = origin else {
            return false;
        };
        self.projectiles.push(Projectile::bomb(x, y, self.config.bomb_speed));
        self.play(audio, Sound::Bomb);
        true
    }

    /// Roll for a saucer if none is around.  Returns true when one spawned.
    pub fn maybe_spawn_saucer(&mut self, rng: &mut impl Rng) -> bool {
        let chance = self.config.saucer_spawn_chance.clamp(0.0, 1.0);
        if self.saucer.is_some() || !rng.gen_bool(chance) {
            return false;
        }
        let step = self.config.saucer_value_step.max(1);
        let slots = (self.config.saucer_max_value / step).max(1);
        let value = rng.gen_range(1..=slots) * step;
        tracing::debug!(value, "saucer spawned");
        self.saucer = Some(Saucer::new(0, self.config.saucer_y, self.config.saucer_speed, value));
        true
    }

    // ── Movement ──────────────────────────────────────────────────────────────

    fn move_game_objects(&mut self) {
        let (top, bottom) = (self.config.play_area_top, self.config.display_height);
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles.retain(|p| !p.out_of_bounds(top, bottom));

        if let Some(saucer) = &mut self.saucer {
            saucer.advance();
            if saucer.past_right_edge(self.config.display_width) {
                tracing::debug!("saucer left the screen");
                self.saucer = None;
            }
        }

        self.squadron.advance();
        self.squadron.update_direction(self.config.display_width);
    }

    // ── Collisions ────────────────────────────────────────────────────────────

    fn award(&mut self, hit: Hit, audio: &mut impl AudioSink) {
        self.play(audio, hit.sound);
        self.player.add_to_score(hit.points);
    }

    fn detect_collisions(&mut self, audio: &mut impl AudioSink) {
        for hit in collision::lasers_vs_squadron(&mut self.squadron, &mut self.projectiles) {
            self.award(hit, audio);
        }

        let saucer_hit = self
            .saucer
            .as_mut()
            .and_then(|saucer| collision::lasers_vs_saucer(saucer, &mut self.projectiles));
        if let Some(hit) = saucer_hit {
            self.award(hit, audio);
        }

        if collision::bombs_vs_ship(&mut self.ship, &mut self.projectiles) {
            self.play(audio, Sound::ShipExplosion);
            let last = self.player.remove_a_life();
            tracing::info!(lives = self.player.lives, "gunship hit");
            if last {
                self.end(GameOverReason::OutOfLives);
            }
        }

        collision::barriers_vs_projectiles(&self.barriers, &mut self.projectiles);
    }
}

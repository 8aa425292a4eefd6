/// Tick counter and the fixed cadences evaluated against it.

/// Which scheduled events fall on the current tick.  Several can coincide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Due {
    pub explosion_refresh: bool,
    pub bomb: bool,
    pub saucer: bool,
}

#[derive(Clone, Debug)]
pub struct Scheduler {
    tick: u64,
    explosion_refresh: u64,
    bomb: u64,
    saucer: u64,
}

impl Scheduler {
    /// Cadences are in ticks; zero is treated as one.
    pub fn new(explosion_refresh: u64, bomb: u64, saucer: u64) -> Self {
        Self {
            tick: 0,
            explosion_refresh: explosion_refresh.max(1),
            bomb: bomb.max(1),
            saucer: saucer.max(1),
        }
    }

    /// Number of ticks advanced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Move to the next tick and report what is due on it.
    pub fn advance(&mut self) -> Due {
        self.tick += 1;
        Due {
            explosion_refresh: self.tick % self.explosion_refresh == 0,
            bomb: self.tick % self.bomb == 0,
            saucer: self.tick % self.saucer == 0,
        }
    }
}

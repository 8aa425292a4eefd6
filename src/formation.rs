/// The invader squadron: rows sharing one horizontal direction.
///
/// The squadron owns its rows and each row owns its invaders.  Shared state
/// (a row's y, the squadron's direction) lives only on the owner and is read
/// from there; invaders never keep a copy.

use rand::Rng;

use crate::config::SquadronLayout;
use crate::entities::{Condition, Direction, DrawItem, Invader, Tier};
use crate::geometry::Rect;

// ── Row ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Row {
    pub index: usize,
    pub tier: Tier,
    pub y: i32,
    pub invaders: Vec<Invader>,
}

impl Row {
    pub fn new(index: usize, tier: Tier, layout: &SquadronLayout) -> Self {
        let invaders = (0..layout.columns)
            .map(|column| {
                let x = layout.start_x + column as i32 * layout.column_spacing;
                Invader::new(tier, column, x)
            })
            .collect();
        Self {
            index,
            tier,
            y: layout.start_y + index as i32 * layout.row_spacing,
            invaders,
        }
    }

    pub fn len(&self) -> usize {
        self.invaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invaders.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.invaders.iter().filter(|i| i.is_alive()).count()
    }

    /// Bounding box of one of this row's invaders.
    pub fn bounds_of(&self, invader: &Invader) -> Rect {
        Rect::new(invader.x, self.y, invader.width, invader.height)
    }

    pub fn draw_items(&self) -> impl Iterator<Item = DrawItem> + '_ {
        self.invaders.iter().map(move |invader| DrawItem {
            sprite: invader.sprite(),
            x: invader.x,
            y: self.y,
        })
    }

    pub fn move_down(&mut self, step: i32) {
        self.y += step;
    }

    /// Drop every exploded invader.  Returns how many were removed.
    pub fn remove_exploded(&mut self) -> usize {
        let before = self.invaders.len();
        self.invaders.retain(|i| i.condition != Condition::Exploded);
        before - self.invaders.len()
    }

    /// Index of a uniformly chosen alive invader.
    fn pick_alive(&self, rng: &mut impl Rng) -> Option<usize> {
        let alive: Vec<usize> = self
            .invaders
            .iter()
            .enumerate()
            .filter(|(_, i)| i.is_alive())
            .map(|(idx, _)| idx)
            .collect();
        if alive.is_empty() {
            return None;
        }
        Some(alive[rng.gen_range(0..alive.len())])
    }
}

// ── Squadron ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Squadron {
    pub rows: Vec<Row>,
    pub direction: Direction,
    pub speed: i32,
    pub drop_step: i32,
}

/// Identifies one invader: row position in the squadron, then position in the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvaderRef {
    pub row: usize,
    pub slot: usize,
}

impl Squadron {
    pub fn new(layout: &SquadronLayout, speed: i32, drop_step: i32) -> Self {
        let rows = layout
            .tiers
            .iter()
            .enumerate()
            .map(|(index, &tier)| Row::new(index, tier, layout))
            .collect();
        Self {
            rows,
            direction: Direction::Right,
            speed,
            drop_step,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn invader_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    pub fn is_cleared(&self) -> bool {
        self.rows.iter().all(Row::is_empty)
    }

    pub fn get(&self, at: InvaderRef) -> Option<(&Row, &Invader)> {
        let row = self.rows.get(at.row)?;
        let invader = row.invaders.get(at.slot)?;
        Some((row, invader))
    }

    /// Shift every invader one step in the current shared direction.
    pub fn advance(&mut self) {
        let (direction, speed) = (self.direction, self.speed);
        for invader in self.rows.iter_mut().flat_map(|r| r.invaders.iter_mut()) {
            invader.step(direction, speed);
        }
    }

    /// Scan rows in order and invaders in column order for one that has
    /// crossed a side of the play area, and flip the squadron if so.
    ///
    /// The first flip found is applied on the spot (direction changes and
    /// every row drops one step) and the scan carries on under the new
    /// direction, so at most one flip happens per call.  Returns whether the
    /// direction changed.
    pub fn update_direction(&mut self, play_width: i32) -> bool {
        let mut flipped = false;
        for r in 0..self.rows.len() {
            for i in 0..self.rows[r].invaders.len() {
                let invader = &self.rows[r].invaders[i];
                let wanted = if invader.right() > play_width {
                    Direction::Left
                } else if invader.x <= 0 {
                    Direction::Right
                } else {
                    continue;
                };
                if wanted != self.direction && !flipped {
                    tracing::debug!(
                        row = r,
                        column = invader.column,
                        ?wanted,
                        "squadron changes direction"
                    );
                    self.change_direction(wanted);
                    flipped = true;
                }
            }
        }
        flipped
    }

    fn change_direction(&mut self, direction: Direction) {
        self.direction = direction;
        let step = self.drop_step;
        for row in &mut self.rows {
            row.move_down(step);
        }
    }

    /// True once any row has come down to (or past) `line`.
    pub fn reached(&self, line: i32) -> bool {
        self.rows.iter().any(|row| row.y >= line)
    }

    /// Remove exploded invaders, then retire rows left empty.  Returns the
    /// number of invaders removed.
    pub fn remove_exploded(&mut self) -> usize {
        let removed: usize = self.rows.iter_mut().map(Row::remove_exploded).sum();
        let rows_before = self.rows.len();
        self.rows.retain(|row| !row.is_empty());
        if self.rows.len() != rows_before {
            tracing::debug!(
                retired = rows_before - self.rows.len(),
                remaining = self.rows.len(),
                "rows retired"
            );
        }
        removed
    }

    /// Pick a row uniformly among rows holding an alive invader, then one of
    /// its alive invaders uniformly.
    pub fn select_bomber(&self, rng: &mut impl Rng) -> Option<InvaderRef> {
        let candidates: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.alive_count() > 0)
            .map(|(idx, _)| idx)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let row = candidates[rng.gen_range(0..candidates.len())];
        let slot = self.rows[row].pick_alive(rng)?;
        Some(InvaderRef { row, slot })
    }

    /// Where a bomb dropped by `at` starts: the invader's centre, at its row's y.
    pub fn bomb_origin(&self, at: InvaderRef) -> Option<(i32, i32)> {
        let (row, invader) = self.get(at)?;
        Some((invader.x + invader.width / 2, row.y))
    }

    pub fn draw_items(&self) -> impl Iterator<Item = DrawItem> + '_ {
        self.rows.iter().flat_map(|row| row.draw_items())
    }
}

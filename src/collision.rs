/// Per-tick collision checks.
///
/// Each check removes the projectiles it consumes straight away, so a later
/// check in the same tick never sees them.  Effects on score, lives and audio
/// are handed back as `Hit`s for the session to apply.

use crate::entities::{Barrier, Collidable, Hit, Projectile, Saucer, Ship};
use crate::formation::Squadron;
use crate::geometry::Rect;

/// Index of the first projectile matching `wanted` that overlaps `target`.
fn first_overlap(
    projectiles: &[Projectile],
    target: &Rect,
    wanted: impl Fn(&Projectile) -> bool,
) -> Option<usize> {
    projectiles
        .iter()
        .position(|p| wanted(p) && p.bounds().overlaps(target))
}

/// Spend the projectile at `idx` unless it pierces.
fn consume(projectiles: &mut Vec<Projectile>, idx: usize) {
    if !projectiles[idx].persistent {
        projectiles.remove(idx);
    }
}

/// Alive invaders against lasers.  Each invader takes at most one hit; an
/// invader that already exploded is skipped.
pub fn lasers_vs_squadron(squadron: &mut Squadron, projectiles: &mut Vec<Projectile>) -> Vec<Hit> {
    let mut hits = Vec::new();
    for row in &mut squadron.rows {
        let row_y = row.y;
        for invader in &mut row.invaders {
            if !invader.is_alive() {
                continue;
            }
            let target = Rect::new(invader.x, row_y, invader.width, invader.height);
            if let Some(idx) = first_overlap(projectiles, &target, Projectile::is_laser) {
                if let Some(hit) = invader.explode() {
                    hits.push(hit);
                }
                consume(projectiles, idx);
            }
        }
    }
    hits
}

pub fn lasers_vs_saucer(saucer: &mut Saucer, projectiles: &mut Vec<Projectile>) -> Option<Hit> {
    if !saucer.is_alive() {
        return None;
    }
    let idx = first_overlap(projectiles, &saucer.bounds(), Projectile::is_laser)?;
    let hit = saucer.explode();
    consume(projectiles, idx);
    hit
}

/// Bombs against the gunship.  The first overlapping bomb is spent and the
/// ship shows its explosion until the next refresh, even if it already does.
/// Returns true when the ship was hit.
pub fn bombs_vs_ship(ship: &mut Ship, projectiles: &mut Vec<Projectile>) -> bool {
    match first_overlap(projectiles, &ship.bounds(), Projectile::is_bomb) {
        Some(idx) => {
            ship.explode();
            consume(projectiles, idx);
            true
        }
        None => false,
    }
}

/// Barriers soak up every projectile touching them, whichever way it travels.
/// Returns how many were absorbed.
pub fn barriers_vs_projectiles(barriers: &[Barrier], projectiles: &mut Vec<Projectile>) -> usize {
    let before = projectiles.len();
    for barrier in barriers {
        let wall = barrier.bounds();
        projectiles.retain(|p| !p.bounds().overlaps(&wall));
    }
    before - projectiles.len()
}

use invaders::config::{SquadronLayout, DISPLAY_WIDTH, INVADER_MOVE_DOWN, INVADER_SPEED};
use invaders::entities::{Direction, Tier};
use invaders::formation::{InvaderRef, Squadron};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn default_squadron() -> Squadron {
    Squadron::new(&SquadronLayout::default(), INVADER_SPEED, INVADER_MOVE_DOWN)
}

fn two_rows() -> Squadron {
    let layout = SquadronLayout {
        tiers: vec![Tier::One, Tier::Two],
        columns: 1,
        start_x: 100,
        start_y: 100,
        ..SquadronLayout::default()
    };
    Squadron::new(&layout, 5, 2)
}

fn row_ys(s: &Squadron) -> Vec<i32> {
    s.rows.iter().map(|r| r.y).collect()
}

// ── Setup ─────────────────────────────────────────────────────────────────────

#[test]
fn default_layout_is_six_rows_of_nine() {
    let s = default_squadron();
    assert_eq!(s.row_count(), 6);
    assert_eq!(s.invader_count(), 54);
    assert_eq!(s.direction, Direction::Right);
    assert_eq!(row_ys(&s), vec![50, 95, 140, 185, 230, 275]);

    let tiers: Vec<Tier> = s.rows.iter().map(|r| r.tier).collect();
    assert_eq!(tiers, vec![Tier::One, Tier::One, Tier::Two, Tier::Two, Tier::Three, Tier::Three]);

    let xs: Vec<i32> = s.rows[0].invaders.iter().map(|i| i.x).collect();
    assert_eq!(xs, vec![50, 100, 150, 200, 250, 300, 350, 400, 450]);
    let columns: Vec<usize> = s.rows[3].invaders.iter().map(|i| i.column).collect();
    assert_eq!(columns, (0..9).collect::<Vec<_>>());
}

#[test]
fn invader_bounds_take_the_row_y() {
    let mut s = default_squadron();
    s.rows[2].y = 333;
    let row = &s.rows[2];
    let rect = row.bounds_of(&row.invaders[1]);
    assert_eq!((rect.x, rect.y), (100, 333));
}

// ── Direction & drop ──────────────────────────────────────────────────────────

#[test]
fn lead_invader_flips_squadron_on_expected_tick() {
    let mut s = default_squadron();
    let lead = &s.rows[0].invaders[8];
    let right_edge_start = lead.right(); // 450 + 32 = 482
    let speed = INVADER_SPEED;
    // ceil((600 - 482) / 5) = ceil(23.6) = 24
    let expected = (DISPLAY_WIDTH - right_edge_start + speed - 1) / speed;
    assert_eq!(expected, 24);

    let mut tick = 0;
    loop {
        tick += 1;
        s.advance();
        if s.update_direction(DISPLAY_WIDTH) {
            break;
        }
        assert!(tick < 100, "squadron never turned");
    }
    assert_eq!(tick, expected);
    assert_eq!(s.direction, Direction::Left);
}

#[test]
fn squadron_turns_back_at_left_wall() {
    let mut s = default_squadron();
    for _ in 0..24 {
        s.advance();
        s.update_direction(DISPLAY_WIDTH);
    }
    assert_eq!(s.direction, Direction::Left);
    // leftmost invader sits at 50 + 24*5 = 170; reaches x <= 0 after 34 steps
    let mut ticks = 0;
    while s.direction == Direction::Left {
        s.advance();
        s.update_direction(DISPLAY_WIDTH);
        ticks += 1;
    }
    assert_eq!(ticks, 34);
    assert_eq!(s.rows[0].invaders[0].x, 0);
    assert_eq!(row_ys(&s)[0], 50 + 2 * INVADER_MOVE_DOWN);
}

#[test]
fn every_row_drops_exactly_once_per_flip() {
    let mut s = default_squadron();
    let before = row_ys(&s);
    // Line every row's last invader up past the edge so all of them trip
    for row in &mut s.rows {
        let last = row.invaders.len() - 1;
        row.invaders[last].x = 580;
    }
    assert!(s.update_direction(DISPLAY_WIDTH));
    let after = row_ys(&s);
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(*a, b + INVADER_MOVE_DOWN);
    }
}

#[test]
fn no_drop_without_a_flip() {
    let mut s = default_squadron();
    let before = row_ys(&s);
    for _ in 0..10 {
        s.advance();
        assert!(!s.update_direction(DISPLAY_WIDTH));
    }
    assert_eq!(row_ys(&s), before);
}

#[test]
fn already_heading_away_is_not_a_flip() {
    let mut s = two_rows();
    s.direction = Direction::Left;
    s.rows[0].invaders[0].x = 590; // past the right edge, but already going left
    let before = row_ys(&s);
    assert!(!s.update_direction(DISPLAY_WIDTH));
    assert_eq!(row_ys(&s), before);
}

#[test]
fn right_edge_touching_the_wall_does_not_flip() {
    let mut s = two_rows();
    s.rows[0].invaders[0].x = DISPLAY_WIDTH - 32; // right edge == 600
    assert!(!s.update_direction(DISPLAY_WIDTH));
    s.rows[0].invaders[0].x += 1; // right edge == 601
    assert!(s.update_direction(DISPLAY_WIDTH));
    assert_eq!(s.direction, Direction::Left);
}

#[test]
fn left_wall_flips_at_zero() {
    let mut s = two_rows();
    s.direction = Direction::Left;
    s.rows[1].invaders[0].x = 1;
    assert!(!s.update_direction(DISPLAY_WIDTH));
    s.rows[1].invaders[0].x = 0;
    assert!(s.update_direction(DISPLAY_WIDTH));
    assert_eq!(s.direction, Direction::Right);
}

#[test]
fn scan_order_decides_conflicting_edges() {
    // Row 0 is past the left wall, row 1 past the right wall.
    // Heading right: row 0 asks for Right (no change), row 1 flips to Left.
    let mut s = two_rows();
    s.rows[0].invaders[0].x = -5;
    s.rows[1].invaders[0].x = 590;
    assert!(s.update_direction(DISPLAY_WIDTH));
    assert_eq!(s.direction, Direction::Left);
    assert_eq!(row_ys(&s), vec![102, 147]);

    // Heading left: row 0 flips to Right first; row 1 is ignored this scan.
    let mut s = two_rows();
    s.direction = Direction::Left;
    s.rows[0].invaders[0].x = -5;
    s.rows[1].invaders[0].x = 590;
    assert!(s.update_direction(DISPLAY_WIDTH));
    assert_eq!(s.direction, Direction::Right);
    assert_eq!(row_ys(&s), vec![102, 147]);
}

#[test]
fn retired_rows_are_not_dropped() {
    let mut s = default_squadron();
    for invader in &mut s.rows[0].invaders {
        invader.explode();
    }
    assert_eq!(s.remove_exploded(), 9);
    assert_eq!(s.row_count(), 5);
    let before = row_ys(&s);
    assert_eq!(before[0], 95); // former row 1 is now first

    let last = s.rows[0].invaders.len() - 1;
    s.rows[0].invaders[last].x = 590;
    assert!(s.update_direction(DISPLAY_WIDTH));
    let after = row_ys(&s);
    assert_eq!(after.len(), 5);
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(*a, b + INVADER_MOVE_DOWN);
    }
}

#[test]
fn exploded_invaders_keep_moving_with_the_formation() {
    let mut s = two_rows();
    s.rows[0].invaders[0].explode();
    s.advance();
    assert_eq!(s.rows[0].invaders[0].x, 105);
}

// ── Breach ────────────────────────────────────────────────────────────────────

#[test]
fn reached_checks_row_y_against_line() {
    let mut s = two_rows(); // rows at 100 and 145
    assert!(!s.reached(146));
    assert!(s.reached(145));
    s.rows[1].y = 200;
    assert!(s.reached(200));
}

// ── Thinning ──────────────────────────────────────────────────────────────────

#[test]
fn only_exploded_invaders_are_swept() {
    let mut s = default_squadron();
    s.rows[1].invaders[3].explode();
    s.rows[1].invaders[5].explode();
    assert_eq!(s.remove_exploded(), 2);
    let columns: Vec<usize> = s.rows[1].invaders.iter().map(|i| i.column).collect();
    assert_eq!(columns, vec![0, 1, 2, 4, 6, 7, 8]);
    assert_eq!(s.invader_count(), 52);
    // nothing left to sweep
    assert_eq!(s.remove_exploded(), 0);
}

#[test]
fn clearing_every_row_empties_the_squadron() {
    let mut s = two_rows();
    for row in &mut s.rows {
        for invader in &mut row.invaders {
            invader.explode();
        }
    }
    assert!(!s.is_cleared()); // still pending removal
    s.remove_exploded();
    assert!(s.is_cleared());
    assert_eq!(s.row_count(), 0);
}

// ── Bomber selection ──────────────────────────────────────────────────────────

#[test]
fn single_invader_is_always_the_bomber() {
    let layout = SquadronLayout::single(Tier::Two, 300, 200);
    let s = Squadron::new(&layout, 5, 2);
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(s.select_bomber(&mut rng), Some(InvaderRef { row: 0, slot: 0 }));
    }
    assert_eq!(s.bomb_origin(InvaderRef { row: 0, slot: 0 }), Some((316, 200)));
}

#[test]
fn exploded_invaders_never_bomb() {
    let layout = SquadronLayout {
        tiers: vec![Tier::One, Tier::Two],
        columns: 3,
        ..SquadronLayout::default()
    };
    let mut s = Squadron::new(&layout, 5, 2);
    for invader in &mut s.rows[0].invaders {
        invader.explode();
    }
    s.rows[1].invaders[0].explode();
    s.rows[1].invaders[2].explode();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(s.select_bomber(&mut rng), Some(InvaderRef { row: 1, slot: 1 }));
    }
}

#[test]
fn no_bomber_when_nobody_is_alive() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut s = two_rows();
    for row in &mut s.rows {
        row.invaders[0].explode();
    }
    assert_eq!(s.select_bomber(&mut rng), None);
    s.remove_exploded();
    assert_eq!(s.select_bomber(&mut rng), None);
    assert_eq!(s.bomb_origin(InvaderRef { row: 0, slot: 0 }), None);
}

#[test]
fn bomber_selection_covers_every_row() {
    let s = default_squadron();
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = [false; 6];
    for _ in 0..500 {
        let at = s.select_bomber(&mut rng).unwrap();
        assert!(at.slot < 9);
        seen[at.row] = true;
    }
    assert!(seen.iter().all(|&hit| hit));
}

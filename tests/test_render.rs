use std::io;

use invaders::entities::{Projectile, Saucer, Sprite, Tier};
use invaders::render::{render_frame, render_game_over, Canvas, Tone};
use invaders::{GameConfig, Session, SessionStatus};

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Clear,
    Draw(Sprite, i32, i32),
    Text(String, i32, i32, Tone),
    Present,
}

#[derive(Default)]
struct Recording(Vec<Op>);

impl Canvas for Recording {
    fn clear(&mut self) -> io::Result<()> {
        self.0.push(Op::Clear);
        Ok(())
    }

    fn draw(&mut self, sprite: Sprite, x: i32, y: i32) -> io::Result<()> {
        self.0.push(Op::Draw(sprite, x, y));
        Ok(())
    }

    fn text(&mut self, text: &str, x: i32, y: i32, tone: Tone) -> io::Result<()> {
        self.0.push(Op::Text(text.to_string(), x, y, tone));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.0.push(Op::Present);
        Ok(())
    }
}

/// Canvas that gives up on the first draw.
struct Broken;

impl Canvas for Broken {
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn draw(&mut self, _: Sprite, _: i32, _: i32) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
    }

    fn text(&mut self, _: &str, _: i32, _: i32, _: Tone) -> io::Result<()> {
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn is_invader(op: &Op) -> bool {
    matches!(op, Op::Draw(Sprite::Invader(_) | Sprite::InvaderExplosion(_), _, _))
}

// ── Frame ─────────────────────────────────────────────────────────────────────

#[test]
fn frame_draws_in_layer_order() {
    let session = Session::new(GameConfig::default());
    let mut canvas = Recording::default();
    render_frame(&session, &mut canvas).unwrap();
    let ops = canvas.0;

    let hud = vec![
        Op::Clear,
        Op::Text("Lives".into(), 420, 7, Tone::Label),
        Op::Draw(Sprite::LifeIcon, 480, 3),
        Op::Draw(Sprite::LifeIcon, 510, 3),
        Op::Draw(Sprite::LifeIcon, 540, 3),
        Op::Text("Score".into(), 5, 5, Tone::Label),
        Op::Text("0".into(), 85, 5, Tone::Value),
        Op::Draw(Sprite::Gunship, 300, 560),
    ];
    assert_eq!(ops[..hud.len()], hud[..]);

    let invaders = &ops[hud.len()..hud.len() + 54];
    assert!(invaders.iter().all(is_invader));
    assert_eq!(invaders[0], Op::Draw(Sprite::Invader(Tier::One), 50, 50));
    assert_eq!(invaders[53], Op::Draw(Sprite::Invader(Tier::Three), 450, 275));

    let tail = &ops[hud.len() + 54..];
    assert_eq!(
        tail,
        &[
            Op::Draw(Sprite::Barrier, 60, 450),
            Op::Draw(Sprite::Barrier, 200, 450),
            Op::Draw(Sprite::Barrier, 340, 450),
            Op::Draw(Sprite::Barrier, 480, 450),
            Op::Present,
        ]
    );
}

#[test]
fn projectiles_and_saucer_sit_between_invaders_and_barriers() {
    let mut session = Session::new(GameConfig {
        barriers: Vec::new(),
        ..GameConfig::default()
    });
    session.projectiles.push(Projectile::bomb(100, 400, 15));
    session.saucer = Some(Saucer::new(0, 30, 10, 50));
    let mut canvas = Recording::default();
    render_frame(&session, &mut canvas).unwrap();

    let ops = canvas.0;
    let last_invader = ops.iter().rposition(is_invader).unwrap();
    assert_eq!(ops[last_invader + 1], Op::Draw(Sprite::Bomb, 100, 400));
    assert_eq!(ops[last_invader + 2], Op::Draw(Sprite::Saucer, 0, 30));
    assert_eq!(ops[last_invader + 3], Op::Present);
}

#[test]
fn lost_lives_drop_icons_from_the_left() {
    let mut session = Session::new(GameConfig::default());
    session.player.lives = 1;
    session.player.score = 130;
    let mut canvas = Recording::default();
    render_frame(&session, &mut canvas).unwrap();

    let icons: Vec<&Op> = canvas
        .0
        .iter()
        .filter(|op| matches!(op, Op::Draw(Sprite::LifeIcon, _, _)))
        .collect();
    assert_eq!(icons, vec![&Op::Draw(Sprite::LifeIcon, 540, 3)]);
    assert!(canvas.0.contains(&Op::Text("130".into(), 85, 5, Tone::Value)));
}

#[test]
fn paused_frame_shows_the_banner_last() {
    let mut session = Session::new(GameConfig::default());
    session.status = SessionStatus::Paused;
    let mut canvas = Recording::default();
    render_frame(&session, &mut canvas).unwrap();

    let n = canvas.0.len();
    assert_eq!(canvas.0[n - 2], Op::Text("Paused".into(), 300, 300, Tone::Banner));
    assert_eq!(canvas.0[n - 1], Op::Present);
}

#[test]
fn game_over_screen_is_just_the_banner() {
    let session = Session::new(GameConfig::default());
    let mut canvas = Recording::default();
    render_game_over(&session, &mut canvas).unwrap();
    assert_eq!(
        canvas.0,
        vec![
            Op::Clear,
            Op::Text("Game Over".into(), 300, 300, Tone::Banner),
            Op::Present,
        ]
    );
}

#[test]
fn canvas_errors_propagate() {
    let session = Session::new(GameConfig::default());
    let err = render_frame(&session, &mut Broken).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

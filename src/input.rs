/// Player input: the discrete events the session understands and the
/// crossterm plumbing that produces them.

use std::sync::mpsc::Receiver;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    MoveLeft,
    MoveRight,
    Fire,
    /// Pause while running, resume while paused.
    TogglePause,
}

/// Something that can be polled once per tick for new input.
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Translate a terminal key into a game event.
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputEvent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(InputEvent::MoveRight),
        KeyCode::Char(' ') => Some(InputEvent::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::TogglePause),
        _ => None,
    }
}

/// Map a raw terminal event.  Key releases are ignored.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) if *kind != KeyEventKind::Release => map_key(*code, *modifiers),
        _ => None,
    }
}

/// Drains terminal events forwarded by a reader thread.
pub struct ChannelInput {
    rx: Receiver<Event>,
}

impl ChannelInput {
    pub fn new(rx: Receiver<Event>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.rx.try_iter().filter_map(|ev| map_event(&ev)).collect()
    }
}

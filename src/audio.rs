/// Sound registry and the fire-and-forget audio sink the session plays into.

use std::collections::HashMap;

use crate::config::SOUND_VOLUME;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Shoot,
    Bomb,
    InvaderExplosion,
    ShipExplosion,
    SaucerExplosion,
}

impl Sound {
    pub const ALL: [Sound; 5] = [
        Sound::Shoot,
        Sound::Bomb,
        Sound::InvaderExplosion,
        Sound::ShipExplosion,
        Sound::SaucerExplosion,
    ];

    /// Asset name the sound is registered under.
    pub fn asset_name(self) -> &'static str {
        match self {
            Sound::Shoot => "shoot.wav",
            Sound::Bomb => "bomb.wav",
            Sound::InvaderExplosion => "invader_explosion.wav",
            Sound::ShipExplosion => "ship_explosion.wav",
            Sound::SaucerExplosion => "saucer.wav",
        }
    }

    pub fn is_explosion(self) -> bool {
        matches!(
            self,
            Sound::InvaderExplosion | Sound::ShipExplosion | Sound::SaucerExplosion
        )
    }
}

/// Opaque handle into a `SoundBank`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundHandle {
    pub id: usize,
    pub sound: Sound,
    pub name: &'static str,
    pub volume: f32,
}

/// Registry of every sound the game plays, keyed by asset name.
/// Built once when a session starts.
#[derive(Clone, Debug)]
pub struct SoundBank {
    handles: HashMap<&'static str, SoundHandle>,
}

impl SoundBank {
    pub fn load(volume: f32) -> Self {
        let handles = Sound::ALL
            .iter()
            .enumerate()
            .map(|(id, sound)| {
                let name = sound.asset_name();
                (name, SoundHandle { id, sound: *sound, name, volume })
            })
            .collect();
        Self { handles }
    }

    pub fn get(&self, name: &str) -> Option<SoundHandle> {
        self.handles.get(name).copied()
    }

    pub fn handle(&self, sound: Sound) -> Option<SoundHandle> {
        self.get(sound.asset_name())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::load(SOUND_VOLUME)
    }
}

pub trait AudioSink {
    fn play(&mut self, handle: SoundHandle);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _handle: SoundHandle) {}
}

/// Terminal audio: logs every sound and optionally rings the bell for explosions.
pub struct TerminalAudio<W: std::io::Write> {
    out: W,
    bell: bool,
}

impl<W: std::io::Write> TerminalAudio<W> {
    pub fn new(out: W, bell: bool) -> Self {
        Self { out, bell }
    }
}

impl<W: std::io::Write> AudioSink for TerminalAudio<W> {
    fn play(&mut self, handle: SoundHandle) {
        tracing::trace!(sound = handle.name, volume = handle.volume, "play");
        if self.bell && handle.sound.is_explosion() {
            // A failed bell is not worth interrupting the frame for.
            let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        }
    }
}

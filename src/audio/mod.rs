//! Sound effects.
//!
//! Cues are short synthesized beeps. If no output can be opened the
//! [`SoundManager`] logs why once and then ignores every cue.

pub mod output;
pub mod synth;

pub use output::{AudioError, ToneSink};

/// Whether this build can open an audio device at all.
pub const fn compiled_in() -> bool {
    cfg!(feature = "audio")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Appear,
    HitMole,
    HitBomb,
    TimeUp,
    Click,
}

pub struct SoundManager {
    sink: Option<Box<dyn ToneSink>>,
}

impl SoundManager {
    /// Open the default output unless `muted`.
    pub fn new(muted: bool) -> Self {
        if muted {
            log::info!("audio muted");
            return Self::silent();
        }
        match output::open_default() {
            Ok(sink) => Self::with_sink(sink),
            Err(e) => {
                log::warn!("audio disabled: {}", e);
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self { sink: None }
    }

    pub fn with_sink(sink: Box<dyn ToneSink>) -> Self {
        Self { sink: Some(sink) }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn play(&mut self, cue: SoundCue) {
        if let Some(sink) = self.sink.as_mut() {
            sink.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<SoundCue>>>);

    impl ToneSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.lock().unwrap().push(cue);
        }
    }

    #[test]
    fn test_cues_reach_sink() {
        let played = Arc::new(Mutex::new(Vec::new()));
        let mut sounds = SoundManager::with_sink(Box::new(Recorder(played.clone())));
        sounds.play(SoundCue::Click);
        sounds.play(SoundCue::HitBomb);
        assert!(sounds.is_enabled());
        assert_eq!(
            *played.lock().unwrap(),
            vec![SoundCue::Click, SoundCue::HitBomb]
        );
    }

    #[test]
    fn test_compiled_in_follows_feature() {
        assert_eq!(compiled_in(), cfg!(feature = "audio"));
        if !compiled_in() {
            assert!(!SoundManager::new(false).is_enabled());
        }
    }

    #[test]
    fn test_muted_manager_is_silent() {
        let mut sounds = SoundManager::new(true);
        assert!(!sounds.is_enabled());
        sounds.play(SoundCue::TimeUp);
    }
}

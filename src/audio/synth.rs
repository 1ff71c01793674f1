//! Sine-beep synthesizer.
//!
//! Each cue is one or more short sine tones whose gain falls exponentially
//! from 0.3 to 0.01 over the tone. Tones are `oddio` signals played into an
//! `oddio::Mixer`; the output backend runs the mixer on the audio thread.

use super::SoundCue;
use std::cell::Cell;
use std::f32::consts::TAU;

const START_GAIN: f32 = 0.3;
const END_GAIN: f32 = 0.01;

/// One beep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_secs: f32,
    /// Offset from the moment the cue is played.
    pub delay_secs: f32,
}

impl Tone {
    const fn new(freq_hz: f32, duration_secs: f32, delay_secs: f32) -> Self {
        Self {
            freq_hz,
            duration_secs,
            delay_secs,
        }
    }
}

/// The tones that make up a cue.
pub fn tones_for(cue: SoundCue) -> Vec<Tone> {
    match cue {
        SoundCue::Appear => vec![Tone::new(600.0, 0.10, 0.0)],
        SoundCue::HitMole => vec![Tone::new(400.0, 0.15, 0.0)],
        // Three low beeps stacked 50ms apart
        SoundCue::HitBomb => vec![
            Tone::new(100.0, 0.2, 0.0),
            Tone::new(150.0, 0.2, 0.05),
            Tone::new(200.0, 0.2, 0.10),
        ],
        SoundCue::TimeUp => vec![Tone::new(800.0, 0.3, 0.0)],
        SoundCue::Click => vec![Tone::new(500.0, 0.1, 0.0)],
    }
}

/// Gain `t` seconds into a tone of the given length.
pub fn envelope(t: f32, duration_secs: f32) -> f32 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    let progress = (t / duration_secs).clamp(0.0, 1.0);
    START_GAIN * (END_GAIN / START_GAIN).powf(progress)
}

/// Stereo mixer that cue tones are played into.
pub type CueMixer = oddio::Mixer<[f32; 2]>;

/// A single tone as an `oddio` signal. Silent until its delay has passed,
/// finished once the tone has played out.
pub struct Beep {
    tone: Tone,
    /// Seconds since the cue was played.
    clock: Cell<f32>,
}

impl Beep {
    pub fn new(tone: Tone) -> Self {
        Self {
            tone,
            clock: Cell::new(0.0),
        }
    }

    /// True once the tone has played out.
    pub fn is_finished(&self) -> bool {
        self.clock.get() >= self.tone.delay_secs + self.tone.duration_secs
    }

    fn value_at(&self, clock: f32) -> f32 {
        let t = clock - self.tone.delay_secs;
        if t < 0.0 || t >= self.tone.duration_secs {
            return 0.0;
        }
        (TAU * self.tone.freq_hz * t).sin() * envelope(t, self.tone.duration_secs)
    }
}

impl oddio::Signal for Beep {
    type Frame = [f32; 2];

    fn sample(&self, interval: f32, out: &mut [[f32; 2]]) {
        let mut clock = self.clock.get();
        for frame in out.iter_mut() {
            let value = self.value_at(clock);
            *frame = [value, value];
            clock += interval;
        }
        self.clock.set(clock);
    }

    fn remaining(&self) -> f32 {
        self.tone.delay_secs + self.tone.duration_secs - self.clock.get()
    }
}

/// Queue every tone of `cue` on the mixer.
pub fn play_cue(mixer: &mut oddio::Handle<CueMixer>, cue: SoundCue) {
    for tone in tones_for(cue) {
        let _ = mixer.control().play(Beep::new(tone));
    }
}
